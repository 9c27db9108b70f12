//! Connection provider for the contact store.
//!
//! # Responsibility
//! - Open and configure the single SQLite handle used by callers.
//! - Provision the fixed `contact` table shape on writable handles.
//! - Release the handle and report close failures.
//!
//! # Invariants
//! - Returned handles have the `contact` table available.
//! - No pooling, retries or health checks: one handle per `connect` call.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{close, connect, open_db, open_db_in_memory};

pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Failure to establish, prepare or release a store handle.
#[derive(Debug)]
pub enum ConnectionError {
    /// Configuration could not be turned into a connection request.
    InvalidConfig(String),
    /// The store is unreachable or refused the open request.
    Open(rusqlite::Error),
    /// The handle opened but could not be configured or provisioned.
    Bootstrap(rusqlite::Error),
    /// A read-only handle points at a store without the `contact` table.
    MissingSchema,
    /// The handle could not be released cleanly.
    Close(rusqlite::Error),
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(message) => write!(f, "invalid connection config: {message}"),
            Self::Open(err) => write!(f, "error opening database: {err}"),
            Self::Bootstrap(err) => write!(f, "error preparing database: {err}"),
            Self::MissingSchema => write!(f, "database has no `contact` table"),
            Self::Close(err) => write!(f, "error closing database: {err}"),
        }
    }
}

impl Error for ConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Bootstrap(err) | Self::Close(err) => Some(err),
            Self::InvalidConfig(_) | Self::MissingSchema => None,
        }
    }
}
