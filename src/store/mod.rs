//! Storage adapters.
//!
//! Callers only see the capability traits below. Two interchangeable
//! implementations exist: [`DocumentStore`] (SQLite documents with live
//! snapshot subscriptions) and [`LocalStore`] (a single JSON key-value file).

mod document;
mod hub;
mod local;

pub use document::DocumentStore;
pub use hub::{SnapshotHub, Subscription};
pub use local::LocalStore;

use crate::config::{Config, StorageKind};
use crate::core::identity::IdCategory;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::cadet::Cadet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub trait CadetStore {
    /// Live roster snapshots: the current roster first, then a full
    /// snapshot after every write.
    fn subscribe_cadets(&self) -> AppResult<Subscription<Cadet>>;

    /// All cadets in insertion order.
    fn list_cadets(&self) -> AppResult<Vec<Cadet>>;

    fn get_cadet(&self, id: &str) -> AppResult<Option<Cadet>>;

    /// Persist a new cadet. The store assigns `id` and returns the stored
    /// record.
    fn insert_cadet(&mut self, cadet: Cadet) -> AppResult<Cadet>;

    /// Replace an existing cadet; `CadetNotFound` if it is gone.
    fn update_cadet(&mut self, cadet: &Cadet) -> AppResult<()>;

    /// Remove a cadet; `CadetNotFound` if it is gone.
    fn delete_cadet(&mut self, id: &str) -> AppResult<()>;
}

pub trait AttendanceStore {
    fn subscribe_attendance(&self) -> AppResult<Subscription<AttendanceRecord>>;

    /// All records ordered by date.
    fn list_attendance(&self) -> AppResult<Vec<AttendanceRecord>>;

    fn get_attendance(&self, date: NaiveDate) -> AppResult<Option<AttendanceRecord>>;

    /// Records whose date falls in `from..=to`.
    fn attendance_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        Ok(self
            .list_attendance()?
            .into_iter()
            .filter(|r| r.date >= from && r.date <= to)
            .collect())
    }

    /// Write the record for its date, replacing any previous one.
    fn upsert_attendance(&mut self, record: &AttendanceRecord) -> AppResult<()>;

    /// Returns whether a record existed.
    fn delete_attendance(&mut self, date: NaiveDate) -> AppResult<bool>;
}

/// Persisted per-category sequence counters.
pub trait CounterStore {
    /// Current value, zero if never incremented.
    fn current_counter(&self, category: IdCategory) -> AppResult<u64>;

    /// Increment, persist, and return the new value.
    fn next_counter(&mut self, category: IdCategory) -> AppResult<u64>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    #[serde(default)]
    pub target: String,
    pub message: String,
}

/// Internal operation log kept next to the data.
pub trait AuditLog {
    fn write_log(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()>;

    fn log_entries(&self) -> AppResult<Vec<LogEntry>>;
}

/// Everything the commands need from a storage backend.
pub trait Backend: CadetStore + AttendanceStore + CounterStore + AuditLog {
    fn describe(&self) -> String;
}

/// Open the backend selected by the configuration.
pub fn open_backend(cfg: &Config) -> AppResult<Box<dyn Backend>> {
    match cfg.storage {
        StorageKind::Document => Ok(Box::new(DocumentStore::open(&cfg.database)?)),
        StorageKind::Local => Ok(Box::new(LocalStore::open(&cfg.local_store)?)),
    }
}

pub(crate) fn new_record_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

pub(crate) fn storage_error(context: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Storage(format!("{context}: {e}"))
}
