//! High-score persistence collaborators.

use std::path::{Path, PathBuf};

use orbdrop_core::Score;

use crate::error::PersistenceError;

/// Where the high score lives between sessions. `save` runs on every merge
/// that sets a new record.
pub trait HighScoreStore {
    fn load(&self) -> Result<Score, PersistenceError>;
    fn save(&mut self, score: Score) -> Result<(), PersistenceError>;
}

/// In-process store. Starts empty (reads as 0).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<Score>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: Score) -> Self {
        Self {
            value: Some(value),
            saves: 0,
        }
    }

    pub fn value(&self) -> Option<Score> {
        self.value
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Score, PersistenceError> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: Score) -> Result<(), PersistenceError> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

/// A single decimal number in a text file. A missing file reads as 0.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<Score, PersistenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let trimmed = content.trim();
        trimmed.parse().map_err(|_| PersistenceError::Parse {
            path: self.path.clone(),
            value: trimmed.to_string(),
        })
    }

    fn save(&mut self, score: Score) -> Result<(), PersistenceError> {
        std::fs::write(&self.path, format!("{score}\n"))?;
        Ok(())
    }
}
