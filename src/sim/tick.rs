//! Tick resolution
//!
//! `resolve_tick` is a pure reducer: it takes the current state and the latest
//! direction and returns the next state plus the events it produced. Checks run
//! in priority order and the first match ends the tick:
//! boundary, food, obstacle, then power-up followed by the normal move.
//! Food is checked before obstacles, so a head that reaches food and an
//! obstacle at once eats the food.

use super::input::Direction;
use super::powerup::PowerUpKind;
use super::state::{GameEvent, GameState, Hazard};
use super::vector::{Position, advance, is_near, out_of_bounds};

/// Next state and the events raised while producing it
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Advance the game by one tick
pub fn resolve_tick(state: &GameState, direction: Direction) -> TickOutcome {
    let mut next = state.clone();
    let mut events = Vec::new();

    if !state.is_active() {
        return TickOutcome { state: next, events };
    }

    next.time_ticks += 1;
    let rules = next.rules;
    let threshold = rules.collision_threshold;
    let new_head = advance(next.head(), direction, rules.step);

    if out_of_bounds(new_head, rules.boundary) {
        lose_life(&mut next, Hazard::Boundary, &mut events);
    } else if is_near(new_head, next.food, threshold) {
        eat_food(&mut next, new_head, &mut events);
    } else if next.obstacles.iter().any(|obs| is_near(new_head, *obs, threshold)) {
        lose_life(&mut next, Hazard::Obstacle, &mut events);
    } else {
        if is_near(new_head, next.power_up.position, threshold) {
            collect_power_up(&mut next, &mut events);
        }
        // Plain move: new head in, tail out
        next.snake.insert(0, new_head);
        next.snake.pop();
    }

    TickOutcome {
        state: next,
        events,
    }
}

/// Lose a life without moving; the last life ends the session
fn lose_life(state: &mut GameState, hazard: Hazard, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    log::info!("Hit {:?}, {} lives left", hazard, state.lives);
    events.push(GameEvent::LifeLost {
        hazard,
        lives: state.lives,
    });

    if state.lives == 0 {
        state.game_over = true;
        state.started = false;
        log::info!("Game over: score {} at level {}", state.score, state.level);
        events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
    }
}

/// Grow by one segment, respawn food, and level up on every `level_every` length
fn eat_food(state: &mut GameState, new_head: Position, events: &mut Vec<GameEvent>) {
    let rules = state.rules;
    state.food = state.random_position();
    state.score += rules.food_score;
    state.snake.insert(0, new_head);
    events.push(GameEvent::FoodEaten {
        score: state.score,
        length: state.snake.len(),
    });

    // Unvalidated rules may carry `level_every == 0`; that never levels up
    if state.snake.len().checked_rem(rules.level_every) == Some(0) {
        state.level += 1;
        state.speed_ms = rules.faster(state.speed_ms);
        let obstacle = state.random_position();
        state.obstacles.push(obstacle);
        log::info!(
            "Level {} reached, interval {}ms, {} obstacles",
            state.level,
            state.speed_ms,
            state.obstacles.len()
        );
        events.push(GameEvent::LevelUp {
            level: state.level,
            speed_ms: state.speed_ms,
        });
    }
}

/// Apply the power-up effect and replace it. The slow-down reversal is the
/// session's job; the reducer only applies the immediate bump.
fn collect_power_up(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let kind = state.power_up.kind;
    match kind {
        PowerUpKind::ExtraLife => state.lives += 1,
        PowerUpKind::SlowDown => state.speed_ms += state.rules.slow_down_ms,
    }
    log::debug!("Collected {}", kind.as_str());
    events.push(GameEvent::PowerUpCollected { kind });
    state.power_up = state.new_power_up();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerup::PowerUp;
    use crate::sim::rules::Rules;
    use glam::Vec3;
    use proptest::prelude::*;

    const FAR_FOOD: Position = Vec3::new(4.0, 4.0, 0.0);
    const FAR_POWER_UP: Position = Vec3::new(-4.0, 4.0, 0.0);

    /// Started state with food and power-up parked out of the way
    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, Rules::default());
        state.started = true;
        state.food = FAR_FOOD;
        state.power_up = PowerUp {
            position: FAR_POWER_UP,
            kind: PowerUpKind::ExtraLife,
        };
        state
    }

    fn line_snake(len: usize) -> Vec<Position> {
        (0..len)
            .map(|i| Vec3::new(-0.5 * i as f32, 0.0, 0.0))
            .collect()
    }

    #[test]
    fn test_eat_food_grows_and_scores() {
        let mut state = playing_state();
        state.food = Vec3::new(0.5, 0.0, 0.0);

        let out = resolve_tick(&state, Direction::Right);
        assert_eq!(out.state.score, 10);
        assert_eq!(out.state.len(), 2);
        assert_eq!(out.state.head(), Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(out.state.snake[1], Vec3::ZERO);
        assert_ne!(out.state.food, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(out.state.food.fract(), Vec3::ZERO);
        assert_eq!(
            out.events,
            vec![GameEvent::FoodEaten {
                score: 10,
                length: 2
            }]
        );
    }

    #[test]
    fn test_boundary_costs_last_life() {
        let mut state = playing_state();
        state.lives = 1;
        state.snake = vec![Vec3::new(5.0, 0.0, 0.0)];

        let out = resolve_tick(&state, Direction::Right);
        assert_eq!(out.state.lives, 0);
        assert!(out.state.game_over);
        assert!(!out.state.started);
        assert_eq!(out.state.snake, state.snake);
        assert!(out.events.contains(&GameEvent::LifeLost {
            hazard: Hazard::Boundary,
            lives: 0
        }));
        assert!(out.events.contains(&GameEvent::GameOver { score: 0, level: 1 }));
    }

    #[test]
    fn test_boundary_with_lives_left_keeps_playing() {
        let mut state = playing_state();
        state.snake = vec![Vec3::new(0.0, -5.0, 0.0)];

        let out = resolve_tick(&state, Direction::Down);
        assert_eq!(out.state.lives, 2);
        assert!(!out.state.game_over);
        assert!(out.state.started);
        assert_eq!(out.state.head(), Vec3::new(0.0, -5.0, 0.0));
    }

    #[test]
    fn test_level_up_on_fifth_segment() {
        let mut state = playing_state();
        state.snake = line_snake(4);
        state.food = Vec3::new(0.5, 0.0, 0.0);

        let out = resolve_tick(&state, Direction::Right);
        assert_eq!(out.state.len(), 5);
        assert_eq!(out.state.level, 2);
        assert_eq!(out.state.speed_ms, 180);
        assert_eq!(out.state.obstacles.len(), 1);
        assert!(out.events.contains(&GameEvent::LevelUp {
            level: 2,
            speed_ms: 180
        }));
    }

    #[test]
    fn test_no_level_up_off_multiple() {
        let mut state = playing_state();
        state.snake = line_snake(3);
        state.food = Vec3::new(0.5, 0.0, 0.0);

        let out = resolve_tick(&state, Direction::Right);
        assert_eq!(out.state.len(), 4);
        assert_eq!(out.state.level, 1);
        assert_eq!(out.state.speed_ms, 200);
        assert!(out.state.obstacles.is_empty());
    }

    #[test]
    fn test_level_up_speed_floor() {
        let mut state = playing_state();
        state.snake = line_snake(9);
        state.speed_ms = 60;
        state.food = Vec3::new(0.5, 0.0, 0.0);

        let out = resolve_tick(&state, Direction::Right);
        assert_eq!(out.state.speed_ms, 50);
    }

    #[test]
    fn test_food_beats_obstacle() {
        let mut state = playing_state();
        state.food = Vec3::new(0.5, 0.0, 0.0);
        state.obstacles = vec![Vec3::new(0.5, 0.0, 0.0)];

        let out = resolve_tick(&state, Direction::Right);
        assert_eq!(out.state.lives, 3);
        assert_eq!(out.state.score, 10);
        assert_eq!(out.state.len(), 2);
    }

    #[test]
    fn test_food_beats_power_up() {
        let mut state = playing_state();
        state.food = Vec3::new(0.5, 0.0, 0.0);
        state.power_up = PowerUp {
            position: Vec3::new(0.5, 0.0, 0.0),
            kind: PowerUpKind::ExtraLife,
        };

        let out = resolve_tick(&state, Direction::Right);
        assert_eq!(out.state.score, 10);
        assert_eq!(out.state.len(), 2);
        assert_eq!(out.state.lives, 3);
        assert_eq!(out.state.power_up, state.power_up);
        assert!(
            !out.events
                .iter()
                .any(|e| matches!(e, GameEvent::PowerUpCollected { .. }))
        );
    }

    #[test]
    fn test_obstacle_beats_power_up() {
        let mut state = playing_state();
        state.obstacles = vec![Vec3::new(0.5, 0.0, 0.0)];
        state.power_up = PowerUp {
            position: Vec3::new(0.5, 0.0, 0.0),
            kind: PowerUpKind::SlowDown,
        };

        let out = resolve_tick(&state, Direction::Right);
        assert_eq!(out.state.lives, 2);
        assert_eq!(out.state.speed_ms, 200);
        assert_eq!(out.state.power_up, state.power_up);
        assert_eq!(
            out.events,
            vec![GameEvent::LifeLost {
                hazard: Hazard::Obstacle,
                lives: 2
            }]
        );
    }

    #[test]
    fn test_zero_level_every_never_levels_up() {
        let rules = Rules {
            level_every: 0,
            ..Rules::default()
        };
        let mut state = GameState::new(3, rules);
        state.started = true;
        state.food = Vec3::new(0.5, 0.0, 0.0);

        let out = resolve_tick(&state, Direction::Right);
        assert_eq!(out.state.len(), 2);
        assert_eq!(out.state.level, 1);
        assert!(out.state.obstacles.is_empty());
    }

    #[test]
    fn test_obstacle_costs_life_without_moving() {
        let mut state = playing_state();
        state.obstacles = vec![Vec3::new(0.0, 0.5, 0.0)];

        let out = resolve_tick(&state, Direction::Up);
        assert_eq!(out.state.lives, 2);
        assert_eq!(out.state.snake, state.snake);
        assert_eq!(
            out.events,
            vec![GameEvent::LifeLost {
                hazard: Hazard::Obstacle,
                lives: 2
            }]
        );
    }

    #[test]
    fn test_obstacle_game_over() {
        let mut state = playing_state();
        state.lives = 1;
        state.obstacles = vec![Vec3::new(0.5, 0.0, 0.0)];

        let out = resolve_tick(&state, Direction::Right);
        assert_eq!(out.state.lives, 0);
        assert!(out.state.game_over);
        assert!(!out.state.started);
    }

    #[test]
    fn test_extra_life_power_up() {
        let mut state = playing_state();
        state.power_up = PowerUp {
            position: Vec3::new(-0.5, 0.0, 0.0),
            kind: PowerUpKind::ExtraLife,
        };

        let out = resolve_tick(&state, Direction::Left);
        assert_eq!(out.state.lives, 4);
        assert_eq!(out.state.head(), Vec3::new(-0.5, 0.0, 0.0));
        assert_eq!(out.state.len(), 1);
        assert!(out.events.contains(&GameEvent::PowerUpCollected {
            kind: PowerUpKind::ExtraLife
        }));
        assert_ne!(out.state.rng_state, state.rng_state);
    }

    #[test]
    fn test_slow_down_power_up_bumps_interval() {
        let mut state = playing_state();
        state.power_up = PowerUp {
            position: Vec3::new(0.5, 0.0, 0.0),
            kind: PowerUpKind::SlowDown,
        };

        let out = resolve_tick(&state, Direction::Right);
        assert_eq!(out.state.speed_ms, 250);
        assert_eq!(out.state.lives, 3);
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut state = playing_state();
        state.snake = line_snake(3);

        let out = resolve_tick(&state, Direction::Up);
        assert_eq!(
            out.state.snake,
            vec![
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(-0.5, 0.0, 0.0),
            ]
        );
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_reversing_into_body_is_not_a_collision() {
        let mut state = playing_state();
        state.snake = line_snake(3);

        let out = resolve_tick(&state, Direction::Left);
        assert_eq!(out.state.lives, 3);
        assert_eq!(out.state.head(), Vec3::new(-0.5, 0.0, 0.0));
    }

    #[test]
    fn test_inactive_ticks_are_noops() {
        let mut paused = playing_state();
        paused.paused = true;
        let mut not_started = playing_state();
        not_started.started = false;
        let mut over = playing_state();
        over.game_over = true;

        for state in [paused, not_started, over] {
            let out = resolve_tick(&state, Direction::Right);
            assert_eq!(out.state.snake, state.snake);
            assert_eq!(out.state.time_ticks, state.time_ticks);
            assert!(out.events.is_empty());
        }
    }

    #[test]
    fn test_input_state_untouched() {
        let mut state = playing_state();
        state.food = Vec3::new(0.5, 0.0, 0.0);
        let before = state.clone();

        let _ = resolve_tick(&state, Direction::Right);
        assert_eq!(state.snake, before.snake);
        assert_eq!(state.score, before.score);
        assert_eq!(state.food, before.food);
    }

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_session_monotonic(
            seed in any::<u64>(),
            moves in prop::collection::vec(arb_direction(), 1..300),
        ) {
            let mut state = GameState::new(seed, Rules::default());
            state.started = true;

            for direction in moves {
                let out = resolve_tick(&state, direction);
                let next = out.state;
                prop_assert!(next.len() >= state.len());
                prop_assert!(next.obstacles.len() >= state.obstacles.len());
                prop_assert!(!next.is_empty());
                prop_assert!(next.head().x.abs() <= 5.0 && next.head().y.abs() <= 5.0);
                prop_assert!(next.speed_ms >= 50);
                if next.lives == 0 {
                    prop_assert!(next.game_over);
                }
                state = next;
            }
        }
    }
}
