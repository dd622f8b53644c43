//! Persistence for info-screen records.
//!
//! Stores map a reading type to the calendar day its info screen was
//! last shown. `JsonFileStore` keeps the map in a local JSON file:
//!
//! ```json
//! { "AŞK AÇILIMI": "2024-05-01", "FİNANSAL DURUM": "2024-05-03" }
//! ```
//!
//! The file is read once on open and rewritten on every change with an
//! atomic rename (write `.tmp`, then `rename()`).
//!
//! A record whose date cannot be parsed is kept aside as unreadable: its
//! `get` returns [`StoreError::UnreadableRecord`] while sibling records
//! stay readable. A file that is not a JSON object at all opens as an
//! empty store. Either way the next successful write replaces the bad
//! content.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::reading::ReadingTypeKey;

/// Errors from an info-screen store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stored value for a reading type is not a date.
    #[error("unreadable record for {key}: {reason}")]
    UnreadableRecord { key: ReadingTypeKey, reason: String },

    /// Backend-specific failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Local key-value store of "info screen last shown" dates.
pub trait InfoScreenStore {
    /// Date the info screen was last shown for `key`, if any.
    fn get(&self, key: &ReadingTypeKey) -> Result<Option<NaiveDate>, StoreError>;

    /// Upsert the date for `key`.
    fn set(&mut self, key: &ReadingTypeKey, date: NaiveDate) -> Result<(), StoreError>;

    /// Remove the record for `key`. Missing keys are not an error.
    fn delete(&mut self, key: &ReadingTypeKey) -> Result<(), StoreError>;

    /// Remove every record.
    fn delete_all(&mut self) -> Result<(), StoreError>;
}

/// In-process store; nothing survives the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: FxHashMap<ReadingTypeKey, NaiveDate>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl InfoScreenStore for MemoryStore {
    fn get(&self, key: &ReadingTypeKey) -> Result<Option<NaiveDate>, StoreError> {
        Ok(self.records.get(key).copied())
    }

    fn set(&mut self, key: &ReadingTypeKey, date: NaiveDate) -> Result<(), StoreError> {
        self.records.insert(key.clone(), date);
        Ok(())
    }

    fn delete(&mut self, key: &ReadingTypeKey) -> Result<(), StoreError> {
        self.records.remove(key);
        Ok(())
    }

    fn delete_all(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        Ok(())
    }
}

/// Per-installation JSON file store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: BTreeMap<ReadingTypeKey, NaiveDate>,
    unreadable: BTreeMap<ReadingTypeKey, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// Only I/O failures other than "not found" are errors; bad content
    /// is logged and set aside.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let (records, unreadable) = match fs::read_to_string(&path) {
            Ok(json) => parse_records(&path, &json),
            Err(e) if e.kind() == io::ErrorKind::NotFound => (BTreeMap::new(), BTreeMap::new()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        info!(
            "Opened info-screen store at {} ({} records, {} unreadable)",
            path.display(),
            records.len(),
            unreadable.len()
        );
        Ok(Self {
            path,
            records,
            unreadable,
        })
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of readable records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reading types whose stored value could not be parsed on open.
    pub fn unreadable_keys(&self) -> impl Iterator<Item = &ReadingTypeKey> {
        self.unreadable.keys()
    }

    /// Apply `change` to a copy of the records, persist it, then commit.
    ///
    /// On a failed write the in-memory records are left as they were.
    /// A successful write drops every unreadable entry from the file.
    fn update<F>(&mut self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<ReadingTypeKey, NaiveDate>),
    {
        let mut next = self.records.clone();
        change(&mut next);
        self.write(&next)?;
        self.records = next;
        if !self.unreadable.is_empty() {
            debug!("Dropped {} unreadable records", self.unreadable.len());
            self.unreadable.clear();
        }
        Ok(())
    }

    fn write(&self, records: &BTreeMap<ReadingTypeKey, NaiveDate>) -> Result<(), StoreError> {
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| io_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json).map_err(io_err)?;
        fs::rename(&tmp_path, &self.path).map_err(io_err)?;

        debug!("Flushed {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

fn parse_records(
    path: &Path,
    json: &str,
) -> (BTreeMap<ReadingTypeKey, NaiveDate>, BTreeMap<ReadingTypeKey, String>) {
    let raw: BTreeMap<ReadingTypeKey, serde_json::Value> = match serde_json::from_str(json) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(
                "Info-screen store {} is not a record map, starting empty: {}",
                path.display(),
                e
            );
            return (BTreeMap::new(), BTreeMap::new());
        }
    };

    let mut records = BTreeMap::new();
    let mut unreadable = BTreeMap::new();
    for (key, value) in raw {
        match serde_json::from_value::<NaiveDate>(value) {
            Ok(date) => {
                records.insert(key, date);
            }
            Err(e) => {
                warn!("Unreadable info-screen record for {} in {}: {}", key, path.display(), e);
                unreadable.insert(key, e.to_string());
            }
        }
    }
    (records, unreadable)
}

impl InfoScreenStore for JsonFileStore {
    fn get(&self, key: &ReadingTypeKey) -> Result<Option<NaiveDate>, StoreError> {
        if let Some(reason) = self.unreadable.get(key) {
            return Err(StoreError::UnreadableRecord {
                key: key.clone(),
                reason: reason.clone(),
            });
        }
        Ok(self.records.get(key).copied())
    }

    fn set(&mut self, key: &ReadingTypeKey, date: NaiveDate) -> Result<(), StoreError> {
        self.update(|records| {
            records.insert(key.clone(), date);
        })
    }

    fn delete(&mut self, key: &ReadingTypeKey) -> Result<(), StoreError> {
        if !self.records.contains_key(key) && !self.unreadable.contains_key(key) {
            return Ok(());
        }
        self.update(|records| {
            records.remove(key);
        })
    }

    fn delete_all(&mut self) -> Result<(), StoreError> {
        self.update(BTreeMap::clear)
    }
}
