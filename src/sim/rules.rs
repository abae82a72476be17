//! Tunable gameplay rules
//!
//! A copy travels inside every `GameState`, so the tick function only needs
//! the state and the direction.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Arena half-extent on x and y
    pub boundary: i32,
    /// Head displacement per tick
    pub step: f32,
    pub collision_threshold: f32,
    pub start_lives: u32,
    pub start_speed_ms: u32,
    pub min_speed_ms: u32,
    pub level_speed_step_ms: u32,
    pub level_every: usize,
    pub food_score: u32,
    pub slow_down_ms: u32,
    pub slow_down_duration_ms: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            boundary: BOUNDARY,
            step: STEP,
            collision_threshold: COLLISION_THRESHOLD,
            start_lives: START_LIVES,
            start_speed_ms: START_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            level_speed_step_ms: LEVEL_SPEED_STEP_MS,
            level_every: LEVEL_EVERY,
            food_score: FOOD_SCORE,
            slow_down_ms: SLOW_DOWN_MS,
            slow_down_duration_ms: SLOW_DOWN_DURATION_MS,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.boundary < 2 {
            return Err(ConfigError::Invalid(format!(
                "boundary must be at least 2, got {}",
                self.boundary
            )));
        }
        if self.step.is_nan() || self.step <= 0.0 {
            return Err(ConfigError::Invalid("step must be positive".into()));
        }
        if self.collision_threshold.is_nan() || self.collision_threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "collision_threshold must be positive".into(),
            ));
        }
        if self.start_lives == 0 {
            return Err(ConfigError::Invalid("start_lives must be at least 1".into()));
        }
        if self.min_speed_ms == 0 {
            return Err(ConfigError::Invalid("min_speed_ms must be positive".into()));
        }
        if self.start_speed_ms < self.min_speed_ms {
            return Err(ConfigError::Invalid(format!(
                "start_speed_ms ({}) is below min_speed_ms ({})",
                self.start_speed_ms, self.min_speed_ms
            )));
        }
        if self.level_every == 0 {
            return Err(ConfigError::Invalid("level_every must be at least 1".into()));
        }
        Ok(())
    }

    /// Interval after one level-up, floored at `min_speed_ms`
    pub fn faster(&self, speed_ms: u32) -> u32 {
        speed_ms
            .saturating_sub(self.level_speed_step_ms)
            .max(self.min_speed_ms)
    }
}
