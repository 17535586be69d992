//! Append-only keyed result store.
//!
//! Experiment sweeps accumulate results across many runs; the store is a
//! JSON-lines file of `{key, value}` records that is only ever appended
//! to. Reading merges records in file order — later records override
//! earlier ones — and stops cleanly at a truncated tail, so a run killed
//! mid-write loses at most its last record.

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from the result store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record (de)serialization error.
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    key: String,
    value: serde_json::Value,
}

/// An append-only store of keyed JSON records.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    /// Open a store at the given path. The file is created on first
    /// append; a missing file reads as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record.
    pub fn append<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let record = Record {
            key: key.to_string(),
            value: serde_json::to_value(value)?,
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Read every record, merged in file order (later records win).
    pub fn read_all(&self) -> Result<FxHashMap<String, serde_json::Value>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(FxHashMap::default());
            }
            Err(err) => return Err(err.into()),
        };

        let mut merged = FxHashMap::default();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Record>(&line) {
                Ok(record) => {
                    merged.insert(record.key, record.value);
                }
                Err(_) => {
                    // Truncated tail from an interrupted append; everything
                    // before it is intact.
                    debug!(path = %self.path.display(), "stopping at truncated record");
                    break;
                }
            }
        }
        Ok(merged)
    }

    /// Read one key, deserialized into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.read_all()?.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("skinfaxi-store-{}-{tag}.jsonl", std::process::id()))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let store = ResultStore::open(scratch_path("missing"));
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_read() {
        let path = scratch_path("roundtrip");
        let _ = fs::remove_file(&path);
        let store = ResultStore::open(&path);

        store.append("qft_5", &serde_json::json!({"shots": 1024})).unwrap();
        store.append("bv_4", &serde_json::json!({"shots": 2048})).unwrap();

        let merged = store.read_all().unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["qft_5"]["shots"], 1024);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_later_records_override() {
        let path = scratch_path("override");
        let _ = fs::remove_file(&path);
        let store = ResultStore::open(&path);

        store.append("sweep", &1).unwrap();
        store.append("sweep", &2).unwrap();

        assert_eq!(store.get::<i64>("sweep").unwrap(), Some(2));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_truncated_tail_is_ignored() {
        let path = scratch_path("truncated");
        let _ = fs::remove_file(&path);
        let store = ResultStore::open(&path);

        store.append("intact", &42).unwrap();
        // Simulate an interrupted append.
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"{\"key\":\"torn\",\"val").unwrap();
        drop(file);

        let merged = store.read_all().unwrap();
        assert_eq!(merged.len(), 1);
        assert!(merged.contains_key("intact"));

        let _ = fs::remove_file(&path);
    }
}
