//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes from the host as milliseconds, never read directly
//! - Seeded RNG only, carried inside the state
//! - No rendering or platform dependencies

pub mod input;
pub mod notify;
pub mod powerup;
pub mod rules;
pub mod schedule;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod vector;

pub use input::{Direction, DirectionLatch, map_key};
pub use notify::{Notification, Notifications, message_for};
pub use powerup::{PowerUp, PowerUpKind, generate_power_up};
pub use rules::Rules;
pub use schedule::{DeferredAction, DueTask, Scheduler, TaskId, TickClock};
pub use session::Session;
pub use snapshot::{Hud, Snapshot};
pub use state::{GameEvent, GameState, Hazard, RngState};
pub use tick::{TickOutcome, resolve_tick};
pub use vector::{Position, advance, is_near, out_of_bounds, random_position};
