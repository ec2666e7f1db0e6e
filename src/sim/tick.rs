//! Fixed-displacement simulation tick
//!
//! One call advances every entity by exactly one velocity step, resolves
//! collisions, and reports what happened as `GameEvent`s. Nothing outside
//! this function observes a partially applied tick.

use super::collision::{circle_leaves_viewport, circles_touch};
use super::state::{GameState, SessionPhase, Viewport};
use crate::events::GameEvent;

/// Advance the game state by one tick
///
/// Does nothing unless the session is running. Enemies are walked in reverse
/// index order, and for each enemy the projectiles are walked in reverse too,
/// so an immediate `Vec::remove` never disturbs an index still to be visited.
///
/// A large enemy that shrinks keeps being tested against the remaining
/// projectiles with its new radius, so it can take several hits in one tick.
/// Once an enemy is destroyed its scan ends.
pub fn tick(state: &mut GameState, viewport: Viewport) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != SessionPhase::Running {
        return events;
    }

    state.time_ticks += 1;

    // 1. Move projectiles, remember the ones that left the screen
    let mut off_screen = Vec::new();
    for projectile in &mut state.projectiles {
        projectile.pos += projectile.vel;
        if circle_leaves_viewport(projectile.pos, projectile.radius, viewport) {
            off_screen.push(projectile.id);
        }
    }

    // 2. Move enemies and resolve contacts
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    let mut ei = state.enemies.len();
    while ei > 0 {
        ei -= 1;

        let enemy = &mut state.enemies[ei];
        enemy.pos += enemy.vel;

        if circles_touch(player_pos, player_radius, enemy.pos, enemy.radius) {
            log::info!(
                "Player hit by enemy {} after {} ticks, final score {}",
                enemy.id,
                state.time_ticks,
                state.score
            );
            state.phase = SessionPhase::GameOver;
            events.push(GameEvent::GameOver {
                final_score: state.score,
            });
            break;
        }

        let mut pi = state.projectiles.len();
        while pi > 0 {
            pi -= 1;

            let enemy = &mut state.enemies[ei];
            let projectile = &state.projectiles[pi];
            if !circles_touch(projectile.pos, projectile.radius, enemy.pos, enemy.radius) {
                continue;
            }

            let destroyed = if enemy.splits_on_hit() {
                enemy.take_partial_hit();
                events.push(GameEvent::EnemyShrunk {
                    id: enemy.id,
                    radius: enemy.radius,
                });
                false
            } else {
                let id = enemy.id;
                state.enemies.remove(ei);
                state.score += 1;
                events.push(GameEvent::EnemyDestroyed { id });
                events.push(GameEvent::ScoreChanged { score: state.score });
                true
            };

            state.projectiles.remove(pi);

            if destroyed {
                break;
            }
        }
    }

    // 3. Drop projectiles that left the viewport this tick
    if !off_screen.is_empty() {
        state.projectiles.retain(|p| !off_screen.contains(&p.id));
    }

    events
}
