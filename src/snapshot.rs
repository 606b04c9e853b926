//! Game snapshot persistence
//!
//! Serializes the whole aggregate as JSON and restores it defensively: a
//! snapshot only hands the game back after the aggregate invariants have
//! been re-checked, so corrupted or partial persisted state never re-enters
//! the live state machine silently.

use crate::error::GotchaError;
use crate::game::Game;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot IO error: {0}")]
    Io(String),

    #[error("snapshot serialization error: {0}")]
    Serialization(String),

    #[error("snapshot deserialization error: {0}")]
    Deserialization(String),

    /// The snapshot parsed but violates the aggregate invariants.
    #[error("corrupt game snapshot: {0}")]
    Corrupt(#[from] GotchaError),
}

/// A point-in-time copy of one game aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub saved_at: DateTime<Utc>,
    game: Game,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        GameSnapshot {
            saved_at: Utc::now(),
            game: game.clone(),
        }
    }

    /// Validate and hand back the restored aggregate.
    pub fn into_game(self) -> Result<Game, SnapshotError> {
        self.game.validate()?;
        Ok(self.game)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Deserialization(e.to_string()))
    }

    /// Save this snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json).map_err(|e| SnapshotError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let json =
            std::fs::read_to_string(path.as_ref()).map_err(|e| SnapshotError::Io(e.to_string()))?;
        Self::from_json(&json)
    }
}
