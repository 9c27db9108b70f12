//! Connection bootstrap and release for SQLite.
//!
//! # Responsibility
//! - Translate `ConnectionConfig` into open flags and pragmas.
//! - Ensure the `contact` table exists before handing out a handle.
//!
//! # Invariants
//! - Writable handles create the table idempotently.
//! - Read-only handles never write; they only verify the table is present.

use super::{ConnectionError, ConnectionResult};
use crate::config::{ConnectionConfig, StoreLocation};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Instant;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Opens a store handle described by `config`.
///
/// # Errors
/// - `Open` when the file cannot be opened with the requested access.
/// - `Bootstrap` when pragmas or table provisioning fail.
/// - `MissingSchema` when a read-only handle finds no `contact` table.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn connect(config: &ConnectionConfig) -> ConnectionResult<Connection> {
    let started_at = Instant::now();
    let mode = config.location.mode();
    info!(
        "event=db_open module=db status=start mode={mode} read_only={}",
        config.read_only
    );

    let flags = open_flags(config.read_only);
    let opened = match &config.location {
        StoreLocation::File(path) => Connection::open_with_flags(path, flags),
        StoreLocation::Memory => Connection::open_in_memory_with_flags(flags),
    };

    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(ConnectionError::Open(err));
        }
    };

    match bootstrap_connection(&conn, config) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens a writable database file with default settings.
pub fn open_db(path: impl AsRef<Path>) -> ConnectionResult<Connection> {
    connect(&ConnectionConfig::file(path.as_ref()))
}

/// Opens a private writable in-memory database.
pub fn open_db_in_memory() -> ConnectionResult<Connection> {
    connect(&ConnectionConfig::in_memory())
}

/// Releases a handle, reporting failures instead of swallowing them.
///
/// The handle is consumed either way; on failure SQLite keeps the underlying
/// resource until the returned connection is dropped.
pub fn close(conn: Connection) -> ConnectionResult<()> {
    let started_at = Instant::now();
    match conn.close() {
        Ok(()) => {
            info!(
                "event=db_close module=db status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err((_conn, err)) => {
            error!(
                "event=db_close module=db status=error duration_ms={} error_code=db_close_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(ConnectionError::Close(err))
        }
    }
}

fn open_flags(read_only: bool) -> OpenFlags {
    if read_only {
        OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
    } else {
        OpenFlags::default()
    }
}

fn bootstrap_connection(conn: &Connection, config: &ConnectionConfig) -> ConnectionResult<()> {
    conn.busy_timeout(config.busy_timeout)
        .map_err(ConnectionError::Bootstrap)?;

    if config.read_only {
        if !contact_table_exists(conn)? {
            return Err(ConnectionError::MissingSchema);
        }
        return Ok(());
    }

    conn.execute_batch(SCHEMA_SQL)
        .map_err(ConnectionError::Bootstrap)?;
    Ok(())
}

fn contact_table_exists(conn: &Connection) -> ConnectionResult<bool> {
    conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'contact'
        );",
        [],
        |row| row.get::<_, bool>(0),
    )
    .map_err(ConnectionError::Bootstrap)
}
