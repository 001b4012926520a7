//! High score persistence
//!
//! A single number, stored as `{"highscore": <n>}`. Reads never fail (an
//! absent or unreadable record counts as 0); writes only happen when the new
//! score beats the stored one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    #[serde(default)]
    pub highscore: u64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where the high score lives between runs
pub trait HighScoreStore {
    /// Current stored value (0 when there is no record)
    fn load(&mut self) -> u64;

    /// Persist `score` if it beats the stored value. Returns whether it did.
    fn save(&mut self, score: u64) -> Result<bool, StoreError>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    best: u64,
}

impl JsonFileStore {
    /// Open a store at `path`, reading the current record
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = read_record(&path);
        Self { path, best }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, record: &HighScoreRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        // Replace through a sibling temp file; the record on disk is always whole
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

fn read_record(path: &Path) -> u64 {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No high score at {}, starting from 0", path.display());
            return 0;
        }
        Err(e) => {
            log::warn!("Could not read high score {}: {}", path.display(), e);
            return 0;
        }
    };

    match serde_json::from_str::<HighScoreRecord>(&json) {
        Ok(record) => {
            log::info!("Loaded high score {}", record.highscore);
            record.highscore
        }
        Err(e) => {
            log::warn!("Ignoring corrupt high score {}: {}", path.display(), e);
            0
        }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> u64 {
        self.best = read_record(&self.path);
        self.best
    }

    fn save(&mut self, score: u64) -> Result<bool, StoreError> {
        if score <= self.best {
            return Ok(false);
        }
        self.write(&HighScoreRecord { highscore: score })?;
        self.best = score;
        log::info!("High score saved ({})", score);
        Ok(true)
    }
}

/// In-memory store, for tests and runs without a writable disk
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best: u64,
    /// Number of successful writes
    pub writes: u32,
}

impl MemoryStore {
    pub fn with_score(best: u64) -> Self {
        Self { best, writes: 0 }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u64 {
        self.best
    }

    fn save(&mut self, score: u64) -> Result<bool, StoreError> {
        if score <= self.best {
            return Ok(false);
        }
        self.best = score;
        self.writes += 1;
        Ok(true)
    }
}
