//! Process entry point for the contacts store.
//!
//! # Responsibility
//! - Open the store described by `CONTACTS_*` environment variables.
//! - Report how many contacts are stored, then release the handle.
//! - Exit non-zero with a logged error when any step fails.

use contacts_core::{
    close, connect, core_version, default_log_level, init_logging, ConnectionConfig,
    ContactRepository, SqliteContactRepository,
};
use log::error;
use std::error::Error;
use std::process::ExitCode;

const ENV_LOG_DIR: &str = "CONTACTS_LOG_DIR";
const ENV_LOG_LEVEL: &str = "CONTACTS_LOG_LEVEL";

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var(ENV_LOG_DIR) {
        let level =
            std::env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("contacts: logging disabled: {err}");
        }
    }

    match run() {
        Ok(count) => {
            println!("contacts_core version={}", core_version());
            println!("contacts stored={count}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("contacts: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<usize, Box<dyn Error>> {
    let config = ConnectionConfig::from_env()?;
    let conn = connect(&config)?;

    let listed = SqliteContactRepository::new(&conn).list_contacts();
    // Close even when listing failed; the listing error wins.
    let closed = close(conn);
    let count = listed?.len();
    closed?;

    Ok(count)
}
