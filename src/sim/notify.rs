//! On-screen event notifications
//!
//! Short messages derived from game events, each visible for a fixed time.

use std::collections::VecDeque;

use serde::Serialize;

use super::powerup::PowerUpKind;
use super::state::{GameEvent, Hazard};
use crate::consts::NOTIFICATION_MS;

/// Most notifications kept at once; older ones are dropped first
const MAX_ACTIVE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub expires_at_ms: u64,
}

/// Message shown for an event, if any
pub fn message_for(event: &GameEvent) -> Option<String> {
    let message = match event {
        GameEvent::LevelUp { level, .. } => format!("Level {}!", level),
        GameEvent::PowerUpCollected {
            kind: PowerUpKind::ExtraLife,
        } => "Extra life!".to_string(),
        GameEvent::PowerUpCollected {
            kind: PowerUpKind::SlowDown,
        } => "Slowed down!".to_string(),
        GameEvent::SlowDownExpired { .. } => "Speed restored".to_string(),
        GameEvent::LifeLost {
            hazard: Hazard::Boundary,
            lives,
        } => format!("Hit the wall! {} lives left", lives),
        GameEvent::LifeLost {
            hazard: Hazard::Obstacle,
            lives,
        } => format!("Hit an obstacle! {} lives left", lives),
        GameEvent::GameOver { score, .. } => format!("Game over! Final score: {}", score),
        GameEvent::FoodEaten { .. }
        | GameEvent::SessionStarted { .. }
        | GameEvent::SessionRestarted { .. } => return None,
    };
    Some(message)
}

#[derive(Debug, Clone)]
pub struct Notifications {
    active: VecDeque<Notification>,
    duration_ms: u64,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(NOTIFICATION_MS)
    }
}

impl Notifications {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            active: VecDeque::with_capacity(MAX_ACTIVE),
            duration_ms,
        }
    }

    /// Queue the message for `event`, if it has one
    pub fn push(&mut self, event: &GameEvent, now_ms: u64) {
        if let Some(message) = message_for(event) {
            if self.active.len() == MAX_ACTIVE {
                self.active.pop_front();
            }
            self.active.push_back(Notification {
                message,
                expires_at_ms: now_ms + self.duration_ms,
            });
        }
    }

    /// Drop expired notifications
    pub fn prune(&mut self, now_ms: u64) {
        self.active.retain(|n| n.expires_at_ms > now_ms);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn messages(&self) -> Vec<String> {
        self.active.iter().map(|n| n.message.clone()).collect()
    }
}
