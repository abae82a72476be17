//! Directional input
//!
//! Maps arrow-key style signals to one of four axis-aligned directions.
//! There is no queue: the latest signal wins and is read by the next tick.
//! Reversing straight into the body is allowed; the engine never checks
//! self-collision.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned movement direction on the play plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Unit vector for this direction (exactly one nonzero axis)
    pub fn to_vec3(self) -> Vec3 {
        match self {
            Direction::Up => Vec3::Y,
            Direction::Down => Vec3::NEG_Y,
            Direction::Left => Vec3::NEG_X,
            Direction::Right => Vec3::X,
        }
    }

    /// Convert a raw axis vector. Returns `None` unless exactly one of x/y is
    /// ±1 and every other component is 0.
    pub fn from_axes(x: i32, y: i32, z: i32) -> Option<Self> {
        match (x, y, z) {
            (0, 1, 0) => Some(Direction::Up),
            (0, -1, 0) => Some(Direction::Down),
            (-1, 0, 0) => Some(Direction::Left),
            (1, 0, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Map a DOM-style key name to a direction. Unknown keys map to `None`.
pub fn map_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Holds the most recent direction until the next tick reads it
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionLatch {
    current: Direction,
}

impl DirectionLatch {
    pub fn new(direction: Direction) -> Self {
        Self { current: direction }
    }

    /// Overwrite the pending direction (level-triggered, no validation)
    pub fn set(&mut self, direction: Direction) {
        self.current = direction;
    }

    /// Feed a key name; returns true if it was a direction key
    pub fn handle_key(&mut self, key: &str) -> bool {
        match map_key(key) {
            Some(direction) => {
                self.set(direction);
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Direction {
        self.current
    }
}
