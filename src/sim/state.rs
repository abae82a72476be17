//! Game state and core simulation types
//!
//! The whole live game is one `GameState` value. Ticks replace it wholesale.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::powerup::{PowerUp, PowerUpKind, generate_power_up};
use super::rules::Rules;
use super::vector::{Position, random_position};

/// What the head ran into when a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hazard {
    Boundary,
    Obstacle,
}

/// Semantic events for the presentation layer (notifications, sounds, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { generation: u32 },
    SessionRestarted { generation: u32 },
    FoodEaten { score: u32, length: usize },
    LevelUp { level: u32, speed_ms: u32 },
    LifeLost { hazard: Hazard, lives: u32 },
    GameOver { score: u32, level: u32 },
    PowerUpCollected { kind: PowerUpKind },
    SlowDownExpired { speed_ms: u32 },
}

/// RNG state wrapper for serialization
///
/// Every draw seeds a `Pcg32` from `word` and stores the generator's next
/// output back, so the state stays a plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    word: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, word: seed }
    }

    /// Run `f` with a generator and advance the stored word
    pub fn draw<T>(&mut self, f: impl FnOnce(&mut Pcg32) -> T) -> T {
        let mut rng = Pcg32::seed_from_u64(self.word);
        let value = f(&mut rng);
        self.word = rng.next_u64();
        value
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Rules this session plays by
    pub rules: Rules,
    pub rng_state: RngState,
    /// Session generation, bumped on every restart
    pub generation: u32,
    /// Body segments, head first. Never empty.
    pub snake: Vec<Position>,
    pub food: Position,
    /// Append-only until restart
    pub obstacles: Vec<Position>,
    pub power_up: PowerUp,
    pub score: u32,
    /// Never below 0; 0 means game over
    pub lives: u32,
    pub level: u32,
    /// Tick interval in milliseconds
    pub speed_ms: u32,
    pub paused: bool,
    pub started: bool,
    pub game_over: bool,
    /// Ticks resolved this session (no-op ticks excluded)
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh layout: single segment at the origin, new food and power-up,
    /// no obstacles. Not started.
    pub fn new(seed: u64, rules: Rules) -> Self {
        Self::with_rng(RngState::new(seed), rules, 0)
    }

    pub(crate) fn with_rng(mut rng_state: RngState, rules: Rules, generation: u32) -> Self {
        let food = rng_state.draw(|rng| random_position(rng, rules.boundary));
        let power_up = rng_state.draw(|rng| generate_power_up(rng, rules.boundary));
        Self {
            rules,
            rng_state,
            generation,
            snake: vec![Position::ZERO],
            food,
            obstacles: Vec::new(),
            power_up,
            score: 0,
            lives: rules.start_lives,
            level: 1,
            speed_ms: rules.start_speed_ms,
            paused: false,
            started: false,
            game_over: false,
            time_ticks: 0,
        }
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    /// Always false for a valid state
    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    /// True when ticks should advance the game
    pub fn is_active(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    pub(crate) fn random_position(&mut self) -> Position {
        let boundary = self.rules.boundary;
        self.rng_state.draw(|rng| random_position(rng, boundary))
    }

    pub(crate) fn new_power_up(&mut self) -> PowerUp {
        let boundary = self.rules.boundary;
        self.rng_state.draw(|rng| generate_power_up(rng, boundary))
    }
}
