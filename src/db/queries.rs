//! Row-level access to the document tables. Each row stores the JSON
//! document in `doc`; indexed columns are copies used for lookups.

use crate::core::identity::IdCategory;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::cadet::Cadet;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::de::DeserializeOwned;

/// Decode the `doc` column of a row.
fn map_doc<T: DeserializeOwned>(row: &Row) -> rusqlite::Result<T> {
    let raw: String = row.get("doc")?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn collect<T>(rows: impl Iterator<Item = rusqlite::Result<T>>) -> AppResult<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn date_key(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------
// Cadets
// ---------------------------

pub fn load_cadets(conn: &Connection) -> AppResult<Vec<Cadet>> {
    let mut stmt = conn.prepare_cached("SELECT doc FROM cadets ORDER BY seq ASC")?;
    let rows = stmt.query_map([], map_doc::<Cadet>)?;
    collect(rows)
}

pub fn load_cadet(conn: &Connection, id: &str) -> AppResult<Option<Cadet>> {
    let mut stmt = conn.prepare_cached("SELECT doc FROM cadets WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_doc::<Cadet>).optional()?)
}

pub fn insert_cadet(conn: &Connection, cadet: &Cadet) -> AppResult<()> {
    let doc = serde_json::to_string(cadet)?;
    conn.execute(
        "INSERT INTO cadets (id, regimental_number, doc) VALUES (?1, ?2, ?3)",
        params![cadet.id, cadet.regimental_number, doc],
    )?;
    Ok(())
}

pub fn update_cadet(conn: &Connection, cadet: &Cadet) -> AppResult<()> {
    let doc = serde_json::to_string(cadet)?;
    let changed = conn.execute(
        "UPDATE cadets SET regimental_number = ?1, doc = ?2 WHERE id = ?3",
        params![cadet.regimental_number, doc, cadet.id],
    )?;
    if changed == 0 {
        return Err(AppError::CadetNotFound(cadet.id.clone()));
    }
    Ok(())
}

pub fn delete_cadet(conn: &Connection, id: &str) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM cadets WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::CadetNotFound(id.to_string()));
    }
    Ok(())
}

// ---------------------------
// Attendance
// ---------------------------

pub fn load_attendance(conn: &Connection) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached("SELECT doc FROM attendance ORDER BY date ASC")?;
    let rows = stmt.query_map([], map_doc::<AttendanceRecord>)?;
    collect(rows)
}

pub fn load_attendance_between(
    conn: &Connection,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT doc FROM attendance
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(params![date_key(from), date_key(to)], map_doc::<AttendanceRecord>)?;
    collect(rows)
}

pub fn load_attendance_for_date(
    conn: &Connection,
    date: &NaiveDate,
) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached("SELECT doc FROM attendance WHERE date = ?1")?;
    Ok(stmt
        .query_row([date_key(date)], map_doc::<AttendanceRecord>)
        .optional()?)
}

/// One row per date: a second write for the same date replaces the first.
pub fn upsert_attendance(conn: &Connection, record: &AttendanceRecord) -> AppResult<()> {
    let doc = serde_json::to_string(record)?;
    conn.execute(
        "INSERT INTO attendance (date, doc) VALUES (?1, ?2)
         ON CONFLICT(date) DO UPDATE SET doc = excluded.doc",
        params![record.date_key(), doc],
    )?;
    Ok(())
}

pub fn delete_attendance(conn: &Connection, date: &NaiveDate) -> AppResult<bool> {
    let changed = conn.execute("DELETE FROM attendance WHERE date = ?1", [date_key(date)])?;
    Ok(changed > 0)
}

// ---------------------------
// Counters
// ---------------------------

pub fn counter_value(conn: &Connection, category: IdCategory) -> AppResult<u64> {
    let v: Option<i64> = conn
        .query_row(
            "SELECT value FROM counters WHERE name = ?1",
            [category.counter_key()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or(0).max(0) as u64)
}

/// Increment-and-read in a single statement, so two writers on the same
/// file can never observe the same value.
pub fn next_counter_value(conn: &Connection, category: IdCategory) -> AppResult<u64> {
    let v: i64 = conn.query_row(
        "INSERT INTO counters (name, value) VALUES (?1, 1)
         ON CONFLICT(name) DO UPDATE SET value = value + 1
         RETURNING value",
        [category.counter_key()],
        |row| row.get(0),
    )?;
    Ok(v.max(0) as u64)
}
