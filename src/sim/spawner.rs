//! Enemy generation at the viewport perimeter

use rand::Rng;

use super::state::{ENEMY_PALETTE, Enemy, GameState, Viewport};
use crate::consts::*;
use crate::{angle_between, unit_velocity};

/// Build a new enemy just outside the viewport, aimed at its centre
///
/// Half the time the enemy appears beyond the left or right edge, otherwise
/// beyond the top or bottom edge. It is pushed out by its own radius so it is
/// born fully off-screen.
pub fn spawn_enemy(id: u32, viewport: Viewport, rng: &mut impl Rng) -> Enemy {
    let radius = rng.random_range(ENEMY_MIN_RADIUS..ENEMY_MAX_RADIUS);

    let (x, y) = if rng.random_bool(0.5) {
        let x = if rng.random_bool(0.5) {
            -radius
        } else {
            viewport.width + radius
        };
        (x, rng.random::<f32>() * viewport.height)
    } else {
        let x = rng.random::<f32>() * viewport.width;
        let y = if rng.random_bool(0.5) {
            -radius
        } else {
            viewport.height + radius
        };
        (x, y)
    };

    let pos = glam::Vec2::new(x, y);
    let angle = angle_between(pos, viewport.center());
    let color = ENEMY_PALETTE[rng.random_range(0..ENEMY_PALETTE.len())];

    Enemy {
        id,
        pos,
        vel: unit_velocity(angle) * ENEMY_SPEED,
        radius,
        color,
    }
}

/// Spawn an enemy into the live collection, returning its id
pub fn spawn_into(state: &mut GameState, viewport: Viewport, rng: &mut impl Rng) -> u32 {
    let id = state.next_entity_id();
    let enemy = spawn_enemy(id, viewport, rng);
    log::debug!(
        "Spawned enemy {} r={:.1} {} at ({:.0}, {:.0})",
        id,
        enemy.radius,
        enemy.color.to_hex(),
        enemy.pos.x,
        enemy.pos.y
    );
    state.enemies.push(enemy);
    id
}
