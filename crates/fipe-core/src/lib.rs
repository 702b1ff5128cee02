//! Shared foundation for the FIPE lookup core: configuration, error
//! taxonomy, wire/domain types, and year-label utilities.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod util;
