mod healthcheck;
mod history;

use salvo::Router;

// Re-export route constants from core
pub use fipe_core::constants::{
    HEALTHCHECK_ROUTE_COMPONENT, HISTORY_ROUTE_COMPONENT, HISTORY_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main router: the history API plus the healthcheck.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(healthcheck::routes())
        .push(history::routes())
}
