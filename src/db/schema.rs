//! Table definitions. Column names match the layout used by earlier versions
//! of the collector so that existing databases can be opened unchanged.

use rusqlite::{Connection, OptionalExtension, Result};

pub const STATIONS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS stations (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    brand       TEXT NOT NULL,
    street      TEXT NOT NULL,
    place       TEXT NOT NULL,
    lat         REAL NOT NULL,
    lng         REAL NOT NULL,
    dist        REAL NOT NULL,
    houseNumber TEXT NOT NULL,
    postCode    INTEGER NOT NULL
);
"#;

pub const PRICES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS prices (
    stationId   TEXT NOT NULL REFERENCES stations(id),
    timestamp   INTEGER NOT NULL,
    price       REAL NOT NULL,
    PRIMARY KEY (stationId, timestamp)
);
"#;

pub const STATUS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS status (
    stationId   TEXT PRIMARY KEY REFERENCES stations(id),
    isOpen      INTEGER NOT NULL
);
"#;

pub const LOG_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS log (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    date      TEXT NOT NULL,
    operation TEXT NOT NULL,
    target    TEXT DEFAULT '',
    message   TEXT NOT NULL
);
"#;

/// Create every table that does not exist yet. Safe to call on each startup.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(STATIONS_DDL)?;
    conn.execute_batch(PRICES_DDL)?;
    conn.execute_batch(STATUS_DDL)?;
    conn.execute_batch(LOG_DDL)?;
    Ok(())
}

/// Check if a table exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}
