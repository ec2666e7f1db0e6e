//! Draw-list generation
//!
//! The simulation only owns positions, radii and colours. A render surface
//! asks for the frame as a flat list of commands and draws them in order.

use glam::Vec2;

use crate::sim::{GameState, Viewport};

/// Alpha of the black fill laid over the previous frame (leaves short trails)
pub const TRAIL_FADE_ALPHA: f32 = 0.1;

/// One primitive for the render surface
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole viewport with translucent black
    Fade { size: Vec2, alpha: f32 },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        rgba: [f32; 4],
    },
}

/// Build the commands for one frame: fade, player, projectiles, enemies
pub fn build_draw_list(state: &GameState, viewport: Viewport) -> Vec<DrawCommand> {
    let mut commands =
        Vec::with_capacity(2 + state.projectiles.len() + state.enemies.len());

    commands.push(DrawCommand::Fade {
        size: Vec2::new(viewport.width, viewport.height),
        alpha: TRAIL_FADE_ALPHA,
    });

    commands.push(DrawCommand::Circle {
        center: state.player.pos,
        radius: state.player.radius,
        rgba: state.player.color.to_rgba(1.0),
    });

    commands.extend(state.projectiles.iter().map(|p| DrawCommand::Circle {
        center: p.pos,
        radius: p.radius,
        rgba: p.color.to_rgba(1.0),
    }));

    commands.extend(state.enemies.iter().map(|e| DrawCommand::Circle {
        center: e.pos,
        radius: e.radius,
        rgba: e.color.to_rgba(1.0),
    }));

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ENEMY_PALETTE, Enemy};

    #[test]
    fn test_empty_state_draws_fade_and_player() {
        let vp = Viewport::new(800.0, 600.0);
        let state = GameState::new(vp);
        let list = build_draw_list(&state, vp);

        assert_eq!(list.len(), 2);
        assert_eq!(
            list[0],
            DrawCommand::Fade {
                size: Vec2::new(800.0, 600.0),
                alpha: TRAIL_FADE_ALPHA
            }
        );
        assert_eq!(
            list[1],
            DrawCommand::Circle {
                center: Vec2::new(400.0, 300.0),
                radius: 10.0,
                rgba: [1.0, 1.0, 1.0, 1.0],
            }
        );
    }

    #[test]
    fn test_one_circle_per_live_entity() {
        let vp = Viewport::default();
        let mut state = GameState::new(vp);
        state.push_projectile(Vec2::new(10.0, 10.0), Vec2::X);
        state.push_projectile(Vec2::new(20.0, 10.0), Vec2::X);
        state.enemies.push(Enemy {
            id: 99,
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            radius: 22.0,
            color: ENEMY_PALETTE[3],
        });

        let list = build_draw_list(&state, vp);
        assert_eq!(list.len(), 5);
        match &list[4] {
            DrawCommand::Circle { radius, rgba, .. } => {
                assert_eq!(*radius, 22.0);
                assert_eq!(*rgba, ENEMY_PALETTE[3].to_rgba(1.0));
            }
            other => panic!("expected enemy circle, got {other:?}"),
        }
    }
}
