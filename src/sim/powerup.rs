//! Power-ups
//!
//! Exactly one power-up is live during play. It is replaced with a fresh one
//! whenever the snake collects it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::vector::{Position, random_position};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// +1 life
    ExtraLife,
    /// Longer tick interval for a while
    SlowDown,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::ExtraLife, PowerUpKind::SlowDown];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::ExtraLife => "extraLife",
            PowerUpKind::SlowDown => "slowDown",
        }
    }
}

/// A power-up entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub position: Position,
    pub kind: PowerUpKind,
}

/// Pick a kind uniformly and place it at a random position
pub fn generate_power_up<R: Rng>(rng: &mut R, boundary: i32) -> PowerUp {
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    PowerUp {
        position: random_position(rng, boundary),
        kind,
    }
}
