use thiserror::Error;

/// Catalog layer errors. Upstream failures are per-stage and recoverable:
/// the caller retries by repeating the triggering action.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Upstream request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Incomplete selection: {0} not selected")]
    IncompleteSelection(&'static str),

    #[error(transparent)]
    CoreError(#[from] fipe_core::error::CoreError),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
