//! Game settings and preferences
//!
//! Persisted as a JSON file next to the leaderboard. Unknown or missing
//! fields fall back to defaults so old files keep loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistError, load_json, save_json};
use crate::session::SessionConfig;
use crate::sim::Viewport;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels
    pub height: f32,
    /// Ticks per second (one tick per display refresh)
    pub frame_rate: u32,

    // === Simulation ===
    /// Fixed RNG seed; random per run when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Menu music off
    pub music_muted: bool,

    // === Leaderboard ===
    /// Where the leaderboard is stored
    pub leaderboard_path: PathBuf,
    /// Name to record scores under
    pub player_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            frame_rate: 60,

            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            music_muted: false,

            leaderboard_path: PathBuf::from("leaderboard.json"),
            player_name: None,
        }
    }
}

impl Settings {
    /// Milliseconds between frame ticks
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.frame_rate.max(1) as f64
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Session parameters; `fallback_seed` is used when no seed is configured
    pub fn session_config(&self, fallback_seed: u64) -> SessionConfig {
        SessionConfig {
            viewport: self.viewport(),
            seed: self.seed.unwrap_or(fallback_seed),
            frame_interval_ms: self.frame_interval_ms(),
        }
    }

    /// Load settings, falling back to defaults on a missing or unreadable file
    pub fn load(path: &Path) -> Self {
        match load_json(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
