//! Position persistence: load/save of the user's held/cash choice.
//!
//! The engine only consumes the current value; stores own durability.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::domain::Position;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("position file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialize position: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("no config directory available for the position file")]
    NoConfigDir,
}

/// Load/save interface for the held position.
pub trait PositionStore {
    /// Current position, `Position::Held` when nothing was stored yet.
    fn load(&self) -> Result<Position, StoreError>;

    /// Overwrite the stored position.
    fn save(&self, position: Position) -> Result<(), StoreError>;
}

impl<P: PositionStore + ?Sized> PositionStore for &P {
    fn load(&self) -> Result<Position, StoreError> {
        (**self).load()
    }

    fn save(&self, position: Position) -> Result<(), StoreError> {
        (**self).save(position)
    }
}

/// On-disk layout of the position file.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedPosition {
    position: Position,
}

/// JSON file store. Missing or corrupt files read as the default position.
#[derive(Debug, Clone)]
pub struct JsonPositionStore {
    path: PathBuf,
}

impl JsonPositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config_dir>/levtimer/position.json`.
    pub fn at_default_location() -> Result<Self, StoreError> {
        let dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(dir.join("levtimer").join("position.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PositionStore for JsonPositionStore {
    fn load(&self) -> Result<Position, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Position::default()),
            Err(e) => return Err(self.io_err(e)),
        };
        match serde_json::from_str::<PersistedPosition>(&content) {
            Ok(p) => Ok(p.position),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt position file, using default");
                Ok(Position::default())
            }
        }
    }

    fn save(&self, position: Position) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let json = serde_json::to_string_pretty(&PersistedPosition { position })?;

        // Write then rename so readers never see a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| self.io_err(e))?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(self.io_err(e));
        }
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryPositionStore {
    value: Cell<Option<Position>>,
}

impl MemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(position: Position) -> Self {
        Self {
            value: Cell::new(Some(position)),
        }
    }
}

impl PositionStore for MemoryPositionStore {
    fn load(&self) -> Result<Position, StoreError> {
        Ok(self.value.get().unwrap_or_default())
    }

    fn save(&self, position: Position) -> Result<(), StoreError> {
        self.value.set(Some(position));
        Ok(())
    }
}
