//! Snake 3D - a segmented snake steered around a bounded arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, session control)
//! - `settings`: Data-driven rules and start-up options
//! - `error`: Errors raised while loading settings

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

/// Default gameplay constants
pub mod consts {
    /// Most ticks run by one `Session::update` call to prevent spiral of death
    pub const MAX_CATCH_UP_TICKS: u32 = 8;

    /// Arena half-width/half-height on the x and y axes
    pub const BOUNDARY: i32 = 5;
    /// Distance the head travels per tick
    pub const STEP: f32 = 0.5;
    /// Box half-size for proximity collisions
    pub const COLLISION_THRESHOLD: f32 = 0.5;

    /// Session defaults
    pub const START_LIVES: u32 = 3;
    pub const START_SPEED_MS: u32 = 200;
    /// Tick interval floor
    pub const MIN_SPEED_MS: u32 = 50;
    /// Tick interval shaved off on every level-up
    pub const LEVEL_SPEED_STEP_MS: u32 = 20;
    /// Level up whenever the grown snake length is a multiple of this
    pub const LEVEL_EVERY: usize = 5;
    pub const FOOD_SCORE: u32 = 10;

    /// Slow-down power-up: interval bonus and how long it lasts
    pub const SLOW_DOWN_MS: u32 = 50;
    pub const SLOW_DOWN_DURATION_MS: u64 = 5000;

    /// How long a notification stays on screen
    pub const NOTIFICATION_MS: u64 = 2000;
}
