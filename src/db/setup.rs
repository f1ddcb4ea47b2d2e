use std::path::Path;

use rusqlite::Connection;

use super::migrations::run_migrations;
use crate::error::AppResult;

/// Opens (or creates) the settings database and brings its schema up to date.
pub fn init_db(path: impl AsRef<Path>) -> AppResult<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    configure(&conn)?;
    run_migrations(&conn)?;

    log::debug!("Base de paramètres ouverte: {}", path.display());
    Ok(conn)
}

/// In-memory database with the same schema, for tests and `--db-path :memory:`.
pub fn init_in_memory() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
    ",
    )
}
