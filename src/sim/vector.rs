//! Position helpers: spawning, proximity collisions and head advance
//!
//! Gameplay happens on the z = 0 plane, but positions stay 3D so the render
//! side can place meshes directly.

use glam::Vec3;
use rand::Rng;

use super::input::Direction;

/// A point in the arena. `z` is always 0.
pub type Position = Vec3;

/// Random integer position inside the playable area, one unit in from the wall.
pub fn random_position<R: Rng>(rng: &mut R, boundary: i32) -> Position {
    let limit = (boundary - 1).max(0);
    let x = rng.random_range(-limit..=limit);
    let y = rng.random_range(-limit..=limit);
    Vec3::new(x as f32, y as f32, 0.0)
}

/// Box proximity test on x/y. This is the only collision predicate in the game.
#[inline]
pub fn is_near(a: Position, b: Position, threshold: f32) -> bool {
    (a.x - b.x).abs() < threshold && (a.y - b.y).abs() < threshold
}

/// Next head position after one step in `direction`
#[inline]
pub fn advance(head: Position, direction: Direction, step: f32) -> Position {
    head + direction.to_vec3() * step
}

/// True when x or y lies outside [-boundary, boundary]
#[inline]
pub fn out_of_bounds(pos: Position, boundary: i32) -> bool {
    let b = boundary as f32;
    pos.x > b || pos.x < -b || pos.y > b || pos.y < -b
}
