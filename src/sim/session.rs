//! Session controller
//!
//! Owns the single live `GameState`, the direction latch and both timers.
//! The host feeds wall-clock milliseconds into `update`; everything that comes
//! due up to that moment runs in time order.

use super::input::{Direction, DirectionLatch};
use super::notify::Notifications;
use super::powerup::PowerUpKind;
use super::rules::Rules;
use super::schedule::{DeferredAction, Scheduler, TickClock};
use super::snapshot::Snapshot;
use super::state::{GameEvent, GameState};
use super::tick::resolve_tick;
use crate::consts::MAX_CATCH_UP_TICKS;
use crate::error::ConfigError;

pub struct Session {
    state: GameState,
    latch: DirectionLatch,
    clock: TickClock,
    scheduler: Scheduler,
    notifications: Notifications,
    /// Last time seen by `update`
    now_ms: u64,
    /// Events raised outside `update` (start, restart), handed out on the next call
    pending_events: Vec<GameEvent>,
}

impl Session {
    /// New idle session; `rules` are validated first
    pub fn new(seed: u64, rules: Rules) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(Self {
            state: GameState::new(seed, rules),
            latch: DirectionLatch::default(),
            clock: TickClock::default(),
            scheduler: Scheduler::new(),
            notifications: Notifications::default(),
            now_ms: 0,
            pending_events: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn direction(&self) -> Direction {
        self.latch.current()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of deferred tasks still waiting
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.notifications.messages())
    }

    /// Mark the session started and lay out a fresh game
    pub fn start_session(&mut self) {
        self.state.started = true;
        self.reset();
        log::info!("Session {} started", self.state.generation);
        self.pending_events.push(GameEvent::SessionStarted {
            generation: self.state.generation,
        });
    }

    /// Reset everything except `started`, cancelling pending deferred tasks
    pub fn restart_session(&mut self) {
        self.reset();
        log::info!("Session restarted (generation {})", self.state.generation);
        self.pending_events.push(GameEvent::SessionRestarted {
            generation: self.state.generation,
        });
    }

    fn reset(&mut self) {
        let cancelled = self.scheduler.clear();
        if cancelled > 0 {
            log::debug!("Cancelled {} pending tasks", cancelled);
        }

        let started = self.state.started;
        let generation = self.state.generation.wrapping_add(1);
        self.state = GameState::with_rng(self.state.rng_state, self.state.rules, generation);
        self.state.started = started;

        self.latch = DirectionLatch::new(Direction::Right);
        self.notifications.clear();
        if started {
            self.clock.restart(self.now_ms, self.state.speed_ms);
        } else {
            self.clock.stop();
        }
    }

    pub fn toggle_pause(&mut self) {
        self.state.paused = !self.state.paused;
        log::debug!("Paused: {}", self.state.paused);
    }

    /// Set the direction read by the next tick
    pub fn set_direction(&mut self, direction: Direction) {
        self.latch.set(direction);
    }

    /// Feed a key name to the input mapper; returns true if it was consumed
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.latch.handle_key(key)
    }

    /// Run every tick and deferred task due up to `now_ms`
    pub fn update(&mut self, now_ms: u64) -> Vec<GameEvent> {
        let now_ms = now_ms.max(self.now_ms);
        let mut events = std::mem::take(&mut self.pending_events);
        let mut ticks = 0;

        loop {
            let tick_due = self.clock.next_due().filter(|&t| t <= now_ms);
            let task_due = self.scheduler.next_due().filter(|&t| t <= now_ms);

            match (tick_due, task_due) {
                (None, None) => break,
                (Some(at), task) if task.is_none_or(|t| at < t) => {
                    if ticks >= MAX_CATCH_UP_TICKS {
                        // Too far behind: skip the backlog
                        self.clock.restart(now_ms, self.state.speed_ms);
                        continue;
                    }
                    ticks += 1;
                    self.run_tick(at, &mut events);
                }
                _ => self.run_due_task(now_ms, &mut events),
            }
        }

        self.now_ms = now_ms;
        self.notifications.prune(now_ms);
        events
    }

    fn run_tick(&mut self, at_ms: u64, events: &mut Vec<GameEvent>) {
        let old_speed = self.state.speed_ms;
        let outcome = resolve_tick(&self.state, self.latch.current());
        self.state = outcome.state;

        for event in outcome.events {
            match event {
                GameEvent::PowerUpCollected {
                    kind: PowerUpKind::SlowDown,
                } => {
                    let rules = self.state.rules;
                    self.scheduler.schedule(
                        at_ms,
                        rules.slow_down_duration_ms,
                        self.state.generation,
                        DeferredAction::RestoreSpeed {
                            ms: rules.slow_down_ms,
                        },
                    );
                }
                GameEvent::GameOver { .. } => {
                    let cancelled = self.scheduler.clear();
                    log::debug!("Game over, cancelled {} pending tasks", cancelled);
                    self.clock.stop();
                }
                _ => {}
            }
            self.notifications.push(&event, at_ms);
            events.push(event);
        }

        self.retime_clock(at_ms, old_speed);
    }

    fn run_due_task(&mut self, now_ms: u64, events: &mut Vec<GameEvent>) {
        let Some(task) = self.scheduler.pop_due(now_ms, self.state.generation) else {
            return;
        };
        match task.action {
            DeferredAction::RestoreSpeed { ms } => {
                let old_speed = self.state.speed_ms;
                self.state.speed_ms = old_speed
                    .saturating_sub(ms)
                    .max(self.state.rules.min_speed_ms);
                log::debug!("Slow-down over, interval {}ms", self.state.speed_ms);
                let event = GameEvent::SlowDownExpired {
                    speed_ms: self.state.speed_ms,
                };
                self.notifications.push(&event, task.due_ms);
                events.push(event);
                self.retime_clock(task.due_ms, old_speed);
            }
        }
    }

    /// Keep the tick rhythm, or restart the clock if the interval changed
    fn retime_clock(&mut self, at_ms: u64, old_speed: u32) {
        if !self.clock.is_running() {
            return;
        }
        if self.state.speed_ms != old_speed {
            self.clock.restart(at_ms, self.state.speed_ms);
        } else if self.clock.next_due().is_some_and(|due| due <= at_ms) {
            self.clock.advance();
        }
    }
}
