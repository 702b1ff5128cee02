//! Append-only history persistence over a single JSON array file.
//!
//! ## Summary
//! Every completed lookup is appended to the front of a JSON array held in
//! one flat file. Records are stored as the raw values the caller hands in;
//! no shape is enforced at write time, and the typed/displayable view lives
//! in `fipe_core::types`, applied by consumers.
//!
//! ## Concurrency contract
//! Appends are plain read-modify-write cycles with no locking or write
//! queue. Two concurrent appenders can interleave so that one record is
//! lost (last write wins). That is an accepted limitation of a single-user
//! local tool, not something this layer papers over.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::StoreResult;

/// File-backed store for the history list.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Creates a store over the given file path. The file is not touched
    /// until the first write; a missing file reads as an empty history.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ## Summary
    /// Returns the full persisted list, newest first.
    ///
    /// The read path never fails: a missing file, unreadable content, or
    /// content that is not a JSON array all degrade to an empty list so the
    /// caller can always render something.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn list(&self) -> Vec<Value> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read history file, serving empty list");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                tracing::warn!("History file does not hold a JSON array, serving empty list");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to parse history file, serving empty list");
                Vec::new()
            }
        }
    }

    /// ## Summary
    /// Inserts `record` at the front of the persisted list and rewrites the
    /// whole file. The record is stored exactly as given.
    ///
    /// ## Errors
    /// Returns an error when serializing or writing the file fails. Write
    /// failures are the caller's to surface; nothing is retried here.
    #[tracing::instrument(skip(self, record), fields(path = %self.path.display()))]
    pub async fn append_front(&self, record: Value) -> StoreResult<()> {
        let mut records = self.list().await;
        records.insert(0, record);

        let bytes = serde_json::to_vec_pretty(&Value::Array(records))?;
        tokio::fs::write(&self.path, bytes).await?;

        tracing::debug!("History record appended");
        Ok(())
    }
}
