use thiserror::Error;

/// Storage layer errors. Only the write path surfaces these; reads degrade
/// to an empty list instead (see `HistoryStore::list`).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("History file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    CoreError(#[from] fipe_core::error::CoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
