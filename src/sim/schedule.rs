//! Timers driven by a host-supplied millisecond clock
//!
//! `TickClock` is the fixed-interval tick timer. It cannot be retimed in place:
//! a new interval means restarting it from the moment of the change.
//! `Scheduler` holds one-shot deferred actions tagged with the session
//! generation that created them. Tasks from an older generation never fire,
//! even if a cancellation was missed.

use serde::{Deserialize, Serialize};

/// Periodic tick timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TickClock {
    interval_ms: u32,
    next_due_ms: Option<u64>,
}

impl TickClock {
    /// Tear down any running schedule and start a new one from `now_ms`
    pub fn restart(&mut self, now_ms: u64, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
        self.next_due_ms = Some(now_ms + self.interval_ms as u64);
    }

    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// When the next tick fires, if running
    pub fn next_due(&self) -> Option<u64> {
        self.next_due_ms
    }

    /// Move to the following tick at the current interval
    pub fn advance(&mut self) {
        if let Some(due) = self.next_due_ms.as_mut() {
            *due += self.interval_ms as u64;
        }
    }
}

pub type TaskId = u64;

/// Work that runs after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Undo a slow-down power-up
    RestoreSpeed { ms: u32 },
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    id: TaskId,
    due_ms: u64,
    generation: u32,
    action: DeferredAction,
}

/// A task that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTask {
    pub id: TaskId,
    pub due_ms: u64,
    pub action: DeferredAction,
}

/// One-shot timers keyed to a session generation
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_id: TaskId,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(
        &mut self,
        now_ms: u64,
        delay_ms: u64,
        generation: u32,
        action: DeferredAction,
    ) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            due_ms: now_ms + delay_ms,
            generation,
            action,
        });
        id
    }

    /// Cancel everything; returns how many tasks were dropped
    pub fn clear(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Earliest due time among pending tasks
    pub fn next_due(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.due_ms).min()
    }

    /// Remove and return the earliest task due at or before `now_ms` for the
    /// live `generation`. Due tasks from other generations are discarded.
    pub fn pop_due(&mut self, now_ms: u64, generation: u32) -> Option<DueTask> {
        loop {
            let idx = self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due_ms <= now_ms)
                .min_by_key(|(_, t)| (t.due_ms, t.id))
                .map(|(i, _)| i)?;
            let task = self.tasks.remove(idx);
            if task.generation == generation {
                return Some(DueTask {
                    id: task.id,
                    due_ms: task.due_ms,
                    action: task.action,
                });
            }
            log::debug!(
                "Dropped stale task {} from generation {}",
                task.id,
                task.generation
            );
        }
    }
}
