//! Upstream catalog access for the FIPE lookup core: a typed HTTP client,
//! the three-table dependent lookup cache, the per-session selection state
//! machine, and the optimistic history view.

pub mod cache;
pub mod client;
pub mod error;
pub mod history;
pub mod session;
