use crate::db::schema::ensure_schema;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Only creates what is missing; existing data is never touched.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    ensure_schema(conn)?;
    Ok(())
}
