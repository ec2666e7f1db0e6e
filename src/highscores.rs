//! Leaderboard of named players
//!
//! A name appears once; each finished game adds its points to that name's
//! running total. Entries stay sorted by points, highest first.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistError, load_json, quarantine, save_json};

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub points: u64,
}

/// Ranked leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Credit `points` to `name` and return the resulting rank (1-indexed)
    ///
    /// Blank names are rejected with `None`.
    pub fn add(&mut self, name: &str, points: u64) -> Option<usize> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.points += points,
            None => self.entries.push(LeaderboardEntry {
                name: name.to_string(),
                points,
            }),
        }

        // Stable: equal totals keep their previous order
        self.entries.sort_by(|a, b| b.points.cmp(&a.points));

        self.rank_of(name)
    }

    /// Rank of a player (1-indexed)
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| i + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top entry (if any)
    pub fn leader(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    /// Display lines, `"1. name: points"`
    pub fn lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec!["No scores yet!".to_string()];
        }
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {}: {}", i + 1, e.name, e.points))
            .collect()
    }

    /// Load from a JSON file; a missing file is an empty leaderboard
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        let board: Self = load_json(path)?.unwrap_or_default();
        log::info!("Loaded {} leaderboard entries", board.entries.len());
        Ok(board)
    }

    /// Load, moving a corrupt file aside and starting empty
    ///
    /// Any other I/O failure is returned; the caller must not save over a
    /// file it could not read.
    pub fn load_or_recover(path: &Path) -> Result<Self, PersistError> {
        match Self::load(path) {
            Err(PersistError::Json { source, .. }) => {
                log::warn!("Leaderboard unreadable ({}), starting fresh", source);
                quarantine(path)?;
                Ok(Self::new())
            }
            other => other,
        }
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        save_json(path, self)?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }
}
