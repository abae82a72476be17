//! Read-only view handed to the render collaborator once per state change

use serde::Serialize;

use super::powerup::PowerUp;
use super::state::GameState;
use super::vector::Position;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    pub speed_ms: u32,
    pub paused: bool,
    pub started: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub obstacles: Vec<Position>,
    pub power_up: PowerUp,
    pub hud: Hud,
    pub notifications: Vec<String>,
}

impl Snapshot {
    pub fn capture(state: &GameState, notifications: Vec<String>) -> Self {
        Self {
            snake: state.snake.clone(),
            food: state.food,
            obstacles: state.obstacles.clone(),
            power_up: state.power_up,
            hud: Hud {
                level: state.level,
                score: state.score,
                lives: state.lives,
                speed_ms: state.speed_ms,
                paused: state.paused,
                started: state.started,
                game_over: state.game_over,
            },
            notifications,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
