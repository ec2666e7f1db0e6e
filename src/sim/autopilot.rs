//! Demo-mode aiming
//!
//! Picks a fire target the way a decent player would: the enemy closest to
//! the centre, led by its velocity over the time the shot needs to get there.

use glam::Vec2;

use super::state::GameState;
use crate::consts::PROJECTILE_SPEED;
use crate::distance;

/// Point to fire at, or `None` when there is nothing to shoot
pub fn autopilot_target(state: &GameState) -> Option<Vec2> {
    let origin = state.player.pos;

    let enemy = state.enemies.iter().min_by(|a, b| {
        let da = distance(a.pos, origin) - a.radius;
        let db = distance(b.pos, origin) - b.radius;
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })?;

    // Lead the target by the projectile's flight time
    let flight_ticks = distance(enemy.pos, origin) / PROJECTILE_SPEED;
    Some(enemy.pos + enemy.vel * flight_ticks)
}

/// Fires at most once every `cooldown_ticks`
#[derive(Debug, Clone)]
pub struct Autopilot {
    pub cooldown_ticks: u32,
    remaining: u32,
}

impl Autopilot {
    pub fn new(cooldown_ticks: u32) -> Self {
        Self {
            cooldown_ticks,
            remaining: 0,
        }
    }

    /// Call once per tick; returns a target when it is time to shoot
    pub fn update(&mut self, state: &GameState) -> Option<Vec2> {
        if self.remaining > 0 {
            self.remaining -= 1;
            return None;
        }
        let target = autopilot_target(state)?;
        self.remaining = self.cooldown_ticks;
        Some(target)
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(12)
    }
}
