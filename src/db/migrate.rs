use crate::db::log::write_log;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::Connection;

/// Schema steps, applied in order. `PRAGMA user_version` records how many
/// have run.
const MIGRATIONS: &[(&str, fn(&Connection) -> rusqlite::Result<()>)] = &[
    ("create_core_tables", create_core_tables),
    ("index_cadet_regimental", index_cadet_lookup),
];

fn create_core_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cadets (
            seq                INTEGER PRIMARY KEY AUTOINCREMENT,
            id                 TEXT NOT NULL UNIQUE,
            regimental_number  TEXT NOT NULL,
            doc                TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS attendance (
            date  TEXT PRIMARY KEY,
            doc   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS counters (
            name   TEXT PRIMARY KEY,
            value  INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
}

fn index_cadet_lookup(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_cadets_regimental ON cadets(regimental_number);
        "#,
    )
}

fn schema_version(conn: &Connection) -> rusqlite::Result<usize> {
    let v: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(v.max(0) as usize)
}

/// Bring the schema up to date. Safe to call on every open.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let current = schema_version(conn)?;

    if current > MIGRATIONS.len() {
        return Err(AppError::Migration(format!(
            "database schema version {current} is newer than this build supports ({})",
            MIGRATIONS.len()
        )));
    }

    for (idx, (name, step)) in MIGRATIONS.iter().enumerate().skip(current) {
        let version = idx + 1;
        step(conn).map_err(|e| AppError::Migration(format!("{name}: {e}")))?;
        conn.pragma_update(None, "user_version", version as i64)?;

        // first run creates the log table, so this is always writable here
        write_log(
            conn,
            "migration_applied",
            name,
            &format!("Schema upgraded to version {version}"),
        )?;

        if current > 0 {
            success(format!("Database migrated to schema v{version} ({name})."));
        }
    }

    Ok(())
}
