//! Game state and core simulation types
//!
//! Everything the tick touches lives in `GameState`; the viewport is passed in
//! separately because the host may resize it at any time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Before the first start, or after stop/reset
    #[default]
    Idle,
    /// Ticking and spawning
    Running,
    /// Player was hit; frozen until reset/start
    GameOver,
}

/// Packed 0xRRGGBB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFFFF);

    /// RGBA components in 0..=1
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        let r = ((self.0 >> 16) & 0xFF) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xFF) as f32 / 255.0;
        let b = (self.0 & 0xFF) as f32 / 255.0;
        [r, g, b, alpha]
    }

    /// CSS-style hex string (`#RRGGBB`)
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.0 & 0xFF_FFFF)
    }
}

/// Enemy colour palette, sampled uniformly at spawn
pub const ENEMY_PALETTE: [Color; 4] = [
    Color(0x00FF9C),
    Color(0xB6FFA1),
    Color(0x563A9C),
    Color(0xFFE700),
];

/// Drawable surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// The defended point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            color: Color::WHITE,
        }
    }
}

/// A shot fired from the centre
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
            color: Color::WHITE,
        }
    }
}

/// A circle homing on the centre
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Enemy {
    /// Whether a hit shrinks this enemy rather than destroying it
    pub fn splits_on_hit(&self) -> bool {
        self.radius > ENEMY_SPLIT_RADIUS
    }

    /// Apply a partial hit: smaller and faster
    pub fn take_partial_hit(&mut self) {
        self.radius -= ENEMY_SHRINK;
        self.vel *= ENEMY_HIT_SPEED_FACTOR;
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: SessionPhase,
    /// Enemies destroyed this session
    pub score: u32,
    /// Engine ticks executed this session
    pub time_ticks: u64,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle state with the player at the viewport centre
    pub fn new(viewport: Viewport) -> Self {
        Self {
            phase: SessionPhase::Idle,
            score: 0,
            time_ticks: 0,
            player: Player::new(viewport.center()),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop all entities and zero the score, re-centring the player
    pub fn clear(&mut self, viewport: Viewport) {
        self.score = 0;
        self.time_ticks = 0;
        self.player = Player::new(viewport.center());
        self.projectiles.clear();
        self.enemies.clear();
        self.next_id = 1;
    }

    /// Append a projectile, returning its id
    pub fn push_projectile(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, pos, vel));
        id
    }

    /// Leaderboard points for the current score
    pub fn points(&self) -> u64 {
        self.score as u64 * POINTS_PER_KILL
    }
}
