//! JSON save/load for settings and the leaderboard
//!
//! Features:
//! - Missing file is not an error (`Ok(None)`)
//! - Atomic replace: write `<path>.tmp`, then rename over the target
//! - Parent directories created on save
//! - Unreadable files can be moved aside to `<path>.corrupt` instead of
//!   being overwritten

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Why a load or save failed
#[derive(Debug)]
pub enum PersistError {
    /// Filesystem failure
    Io { path: PathBuf, source: io::Error },
    /// File exists but is not valid JSON for the expected type
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            PersistError::Json { path, source } => {
                write!(f, "invalid JSON in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io { source, .. } => Some(source),
            PersistError::Json { source, .. } => Some(source),
        }
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> PersistError + '_ {
    move |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Load a value, or `None` if the file does not exist
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_err(path)(e)),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| PersistError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Save a value as pretty JSON, replacing the file atomically
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = with_suffix(path, ".tmp");
    fs::write(&tmp, json).map_err(io_err(&tmp))?;
    fs::rename(&tmp, path).map_err(io_err(path))?;
    Ok(())
}

/// Move a file that failed to parse to `<path>.corrupt`, replacing any
/// earlier one, and return the new location
pub fn quarantine(path: &Path) -> Result<PathBuf, PersistError> {
    let aside = with_suffix(path, ".corrupt");
    fs::rename(path, &aside).map_err(io_err(path))?;
    log::warn!("Moved unreadable {} to {}", path.display(), aside.display());
    Ok(aside)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
