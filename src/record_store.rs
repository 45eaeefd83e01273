//! Whole-file JSON persistence for a list of records

use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::StoreError;

/// Outcome of reading the backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Found,
    Missing,
    Unreadable { reason: String },
}

impl LoadStatus {
    /// Message to show the user, if the load lost data.
    pub fn warning(&self) -> Option<String> {
        match self {
            LoadStatus::Unreadable { reason } => Some(format!(
                "Warning: couldn't read saved data ({reason}). Starting with an empty list."
            )),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub status: LoadStatus,
}

pub struct RecordStore<T> {
    path: PathBuf,
    _records: PhantomData<T>,
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn load(&self) -> Loaded<T> {
        if !self.path.exists() {
            return Loaded {
                records: Vec::new(),
                status: LoadStatus::Missing,
            };
        }

        let result = fs::read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                if content.trim().is_empty() {
                    Ok(Vec::new())
                } else {
                    serde_json::from_str::<Vec<T>>(&content).map_err(|e| e.to_string())
                }
            });

        match result {
            Ok(records) => Loaded {
                records,
                status: LoadStatus::Found,
            },
            Err(reason) => {
                warn!("Resetting {}: {}", self.path.display(), reason);
                Loaded {
                    records: Vec::new(),
                    status: LoadStatus::Unreadable { reason },
                }
            }
        }
    }

    /// Overwrite the backing file with `records`.
    pub fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(records)?;
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        fs::write(&self.path, content).map_err(write_err)?;

        debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
