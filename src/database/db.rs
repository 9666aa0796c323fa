//! Database operations for the spaced-repetition trainer.
//!
//! The durable store is a single SQLite table used as a key-value slot: the
//! whole problem set is serialized into one row and overwritten on every
//! mutation. Callers above this layer treat storage faults as non-fatal.

use rusqlite::{Connection, OptionalExtension, Result, params};

/// Namespaced key under which the problem set is persisted.
pub const STORAGE_KEY: &str = "vitechess_spaced_repetition";

/// Opens the SQLite database at `path` and ensures the storage table exists.
pub fn open_database(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Creates the key-value storage table if missing.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_storage (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

/// Reads the serialized value stored under `key`, `None` if absent.
pub fn read_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM app_storage WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

/// Writes `value` under `key`, replacing any previous value.
pub fn write_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO app_storage (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

/// Removes `key` and its value, if present.
pub fn delete_value(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM app_storage WHERE key = ?1", params![key])?;
    Ok(())
}
