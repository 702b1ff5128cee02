//! FIPE lookup core - integration test support.
//!
//! This crate re-exports the workspace crates to support integration tests
//! that use `fipe_test::` paths.

#![allow(ambiguous_glob_reexports)]

pub mod component {
    // Re-export core modules at the component level
    pub use fipe_core::*;

    // Re-export the catalog crate: client, cache, session, history view
    pub mod catalog {
        pub use fipe_catalog::cache::*;
        pub use fipe_catalog::client::*;
        pub use fipe_catalog::error::*;
        pub use fipe_catalog::history::*;
        pub use fipe_catalog::session::*;
    }

    // Re-export the store crate
    pub mod store {
        pub use fipe_store::error::*;
        pub use fipe_store::store::*;
    }

    // Re-export the app's depot handlers
    pub mod store_handler {
        pub use fipe_app::store_handler::*;
    }

    // Re-export config from both core and app
    pub mod config {
        pub use fipe_app::config::ConfigHandler;
        pub use fipe_core::config::*;
    }
}

// Re-export top-level modules for convenience
pub mod app {
    pub use fipe_app::*;

    pub mod api {
        pub use fipe_app::app::api::*;
    }
}
