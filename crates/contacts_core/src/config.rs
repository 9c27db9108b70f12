//! Connection configuration for the contact store.
//!
//! # Responsibility
//! - Describe where the store lives and how the handle should be opened.
//! - Parse externally supplied settings (environment or any key lookup).
//!
//! # Invariants
//! - A configuration always names exactly one store location.
//! - Parsing never touches the filesystem; reachability is checked by `connect`.

use crate::db::ConnectionError;
use std::path::PathBuf;
use std::time::Duration;

/// Environment key holding the database file path (or `:memory:`).
pub const ENV_DB_PATH: &str = "CONTACTS_DB_PATH";
/// Environment key toggling read-only handles.
pub const ENV_DB_READ_ONLY: &str = "CONTACTS_DB_READ_ONLY";
/// Environment key overriding the busy timeout in milliseconds.
pub const ENV_DB_BUSY_TIMEOUT_MS: &str = "CONTACTS_DB_BUSY_TIMEOUT_MS";

const MEMORY_PATH_LITERAL: &str = ":memory:";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the contact table is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// SQLite database file on disk.
    File(PathBuf),
    /// Private in-memory database, discarded when the handle closes.
    Memory,
}

impl StoreLocation {
    pub(crate) fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

/// Settings used by [`crate::db::connect`] to open one store handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub location: StoreLocation,
    /// Open without write access; writes surface as query errors.
    pub read_only: bool,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl ConnectionConfig {
    /// Configuration for a writable database file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::File(path.into()),
            read_only: false,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Configuration for a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::Memory,
            read_only: false,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Builds a configuration from process environment variables.
    ///
    /// # Errors
    /// - `ConnectionError::InvalidConfig` when `CONTACTS_DB_PATH` is missing
    ///   or blank, or when an optional key cannot be parsed.
    pub fn from_env() -> Result<Self, ConnectionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// Same keys and defaults as [`ConnectionConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConnectionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_path = lookup(ENV_DB_PATH).unwrap_or_default();
        let path = raw_path.trim();
        if path.is_empty() {
            return Err(ConnectionError::InvalidConfig(format!(
                "{ENV_DB_PATH} must name a database file or `{MEMORY_PATH_LITERAL}`"
            )));
        }

        let mut config = if path == MEMORY_PATH_LITERAL {
            Self::in_memory()
        } else {
            Self::file(path)
        };

        if let Some(value) = lookup(ENV_DB_READ_ONLY) {
            config.read_only = parse_flag(ENV_DB_READ_ONLY, &value)?;
        }

        if let Some(value) = lookup(ENV_DB_BUSY_TIMEOUT_MS) {
            let millis = value.trim().parse::<u64>().map_err(|err| {
                ConnectionError::InvalidConfig(format!(
                    "{ENV_DB_BUSY_TIMEOUT_MS} must be a non-negative integer, got `{}`: {err}",
                    value.trim()
                ))
            })?;
            config.busy_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConnectionError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(ConnectionError::InvalidConfig(format!(
            "{key} must be one of 1|true|yes|0|false|no, got `{other}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ConnectionConfig, StoreLocation, ENV_DB_BUSY_TIMEOUT_MS, ENV_DB_PATH, ENV_DB_READ_ONLY,
    };
    use crate::db::ConnectionError;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn file_path_uses_defaults() {
        let config = ConnectionConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, "/tmp/c.db")]))
            .expect("path-only config should parse");

        assert_eq!(
            config.location,
            StoreLocation::File(PathBuf::from("/tmp/c.db"))
        );
        assert!(!config.read_only);
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn memory_literal_selects_in_memory_store() {
        let config = ConnectionConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, " :memory: ")]))
            .expect("memory literal should parse");
        assert_eq!(config, ConnectionConfig::in_memory());
    }

    #[test]
    fn optional_keys_are_applied() {
        let config = ConnectionConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, "contacts.db"),
            (ENV_DB_READ_ONLY, "YES"),
            (ENV_DB_BUSY_TIMEOUT_MS, "250"),
        ]))
        .expect("full config should parse");

        assert!(config.read_only);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn missing_path_is_rejected() {
        let err = ConnectionConfig::from_lookup(lookup_from(&[(ENV_DB_READ_ONLY, "1")]))
            .expect_err("missing path must fail");
        assert!(matches!(err, ConnectionError::InvalidConfig(message) if message.contains(ENV_DB_PATH)));
    }

    #[test]
    fn bad_flag_and_timeout_are_rejected() {
        let flag_err = ConnectionConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, "c.db"),
            (ENV_DB_READ_ONLY, "maybe"),
        ]))
        .expect_err("bad flag must fail");
        assert!(matches!(flag_err, ConnectionError::InvalidConfig(_)));

        let timeout_err = ConnectionConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, "c.db"),
            (ENV_DB_BUSY_TIMEOUT_MS, "-1"),
        ]))
        .expect_err("negative timeout must fail");
        assert!(matches!(timeout_err, ConnectionError::InvalidConfig(_)));
    }

    #[test]
    fn builders_override_fields() {
        let config = ConnectionConfig::in_memory()
            .read_only(true)
            .busy_timeout(Duration::from_millis(10));
        assert!(config.read_only);
        assert_eq!(config.busy_timeout, Duration::from_millis(10));
    }
}
