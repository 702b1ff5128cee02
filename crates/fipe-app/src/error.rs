use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    StoreError(#[from] fipe_store::error::StoreError),

    #[error(transparent)]
    CoreError(#[from] fipe_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
