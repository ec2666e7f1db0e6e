//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick displacement only
//! - Seeded RNG only
//! - Reverse index iteration with immediate removal
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::{Autopilot, autopilot_target};
pub use collision::{circle_leaves_viewport, circles_touch};
pub use spawner::{spawn_enemy, spawn_into};
pub use state::{
    Color, ENEMY_PALETTE, Enemy, GameState, Player, Projectile, SessionPhase, Viewport,
};
pub use tick::tick;
