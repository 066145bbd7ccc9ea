//! Durable name -> win count storage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ScoreStoreError {
    #[error("Score file {} could not be accessed: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Score file {} does not hold a valid score record: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Scores could not be encoded for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Accumulated wins keyed by player name. Symbols play no part, so the
/// same name in two sessions shares one history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreRecord(BTreeMap<String, u32>);

impl ScoreRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score for `name`, zero if never recorded.
    pub fn get(&self, name: &str) -> u32 {
        self.0.get(name).copied().unwrap_or(0)
    }

    pub fn set(&mut self, name: impl Into<String>, score: u32) {
        self.0.insert(name.into(), score);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, u32)> for ScoreRecord {
    fn from_iter<I: IntoIterator<Item = (N, u32)>>(iter: I) -> Self {
        ScoreRecord(iter.into_iter().map(|(n, s)| (n.into(), s)).collect())
    }
}

pub trait ScoreStore {
    /// The persisted record, or an empty one when nothing has been saved.
    fn load(&self) -> Result<ScoreRecord, ScoreStoreError>;

    /// Replaces whatever was persisted with `record`.
    fn save(&self, record: &ScoreRecord) -> Result<(), ScoreStoreError>;

    /// Removes the persisted record. Clearing an absent record succeeds.
    fn clear(&self) -> Result<(), ScoreStoreError>;
}

/// Keeps the record as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> ScoreStoreError {
        ScoreStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> Result<ScoreRecord, ScoreStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No score file at {}, starting empty.", self.path.display());
                return Ok(ScoreRecord::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let record: ScoreRecord =
            serde_json::from_str(&contents).map_err(|source| ScoreStoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            "Loaded {} score entries from {}",
            record.len(),
            self.path.display()
        );
        Ok(record)
    }

    fn save(&self, record: &ScoreRecord) -> Result<(), ScoreStoreError> {
        let json = serde_json::to_string_pretty(record).map_err(|source| {
            ScoreStoreError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;

        // Write beside the target then rename over it, so readers only ever
        // see a complete record.
        let temp = self.temp_path();
        let mut file = fs::File::create(&temp).map_err(|e| self.io_error(e))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| self.io_error(e))?;
        drop(file);
        fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))?;

        info!("Saved {} score entries to {}", record.len(), self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), ScoreStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Deleted score file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
