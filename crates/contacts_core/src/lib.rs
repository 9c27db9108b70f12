//! Data access for contact records stored in SQLite.
//!
//! A caller opens one handle with [`db::connect`], passes it to
//! [`SqliteContactRepository`] for list/get/create/update/delete, and
//! releases it with [`db::close`].

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{ConnectionConfig, StoreLocation};
pub use db::{close, connect, ConnectionError, ConnectionResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{Contact, ContactId};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
