//! Perimeter Defense - hold the centre against circles closing in from the edges
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, tick)
//! - `session`: Session controller driving the simulation from a run queue
//! - `scheduler`: Cooperative, cancellable timer queue on a virtual clock
//! - `events`: Game events and observer plumbing for UI/audio/leaderboard
//! - `renderer`: Draw-list generation for a render surface
//! - `platform`: Pointer input and frame timing
//! - `persistence`: JSON save/load for settings and the leaderboard

pub mod audio;
pub mod events;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod sim;

pub use events::{GameEvent, SessionObserver, SoundCue};
pub use highscores::Leaderboard;
pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Player circle radius
    pub const PLAYER_RADIUS: f32 = 10.0;

    /// Projectile circle radius
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Projectile speed (pixels per tick)
    pub const PROJECTILE_SPEED: f32 = 4.0;

    /// Enemy radius range, drawn uniformly in [MIN, MAX)
    pub const ENEMY_MIN_RADIUS: f32 = 10.0;
    pub const ENEMY_MAX_RADIUS: f32 = 30.0;
    /// Base enemy speed (pixels per tick)
    pub const ENEMY_SPEED: f32 = 1.0;
    /// Enemies larger than this split (shrink) instead of dying when hit
    pub const ENEMY_SPLIT_RADIUS: f32 = 20.0;
    /// Radius lost per partial hit
    pub const ENEMY_SHRINK: f32 = 10.0;
    /// Velocity multiplier applied on a partial hit (speeds the enemy up)
    pub const ENEMY_HIT_SPEED_FACTOR: f32 = 2.5;

    /// Circles closer than this gap (pixels) count as touching
    pub const CONTACT_GAP: f32 = 1.0;

    /// Wall-clock period between enemy spawns
    pub const SPAWN_INTERVAL_MS: f64 = 900.0;

    /// Leaderboard points per destroyed enemy
    pub const POINTS_PER_KILL: u64 = 100;
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn unit_velocity(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle (radians) of the ray from `from` toward `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}
