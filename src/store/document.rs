//! Document store backed by SQLite.
//!
//! Plays the role of the shared cloud collection: records carry
//! store-assigned ids, every write is pushed to live subscribers as a full
//! snapshot, and concurrent writers resolve by last write wins.

use super::hub::{SnapshotHub, Subscription};
use super::{AttendanceStore, AuditLog, Backend, CadetStore, CounterStore, LogEntry, new_record_id};
use crate::core::identity::IdCategory;
use crate::db::migrate::run_pending_migrations;
use crate::db::log::{load_log, write_log};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::models::cadet::Cadet;
use chrono::NaiveDate;

pub struct DocumentStore {
    pool: DbPool,
    path: String,
    cadet_hub: SnapshotHub<Cadet>,
    attendance_hub: SnapshotHub<AttendanceRecord>,
}

impl DocumentStore {
    /// Open (creating if needed) the database at `path` and apply pending
    /// migrations.
    pub fn open(path: &str) -> AppResult<Self> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let pool = DbPool::new(path)?;
        Self::from_pool(pool, path)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?, ":memory:")
    }

    fn from_pool(pool: DbPool, path: &str) -> AppResult<Self> {
        run_pending_migrations(&pool.conn)?;
        Ok(Self {
            pool,
            path: path.to_string(),
            cadet_hub: SnapshotHub::new(),
            attendance_hub: SnapshotHub::new(),
        })
    }

    fn publish_cadets(&self) -> AppResult<()> {
        if self.cadet_hub.has_subscribers() {
            let snapshot = queries::load_cadets(&self.pool.conn)?;
            self.cadet_hub.publish(&snapshot);
        }
        Ok(())
    }

    fn publish_attendance(&self) -> AppResult<()> {
        if self.attendance_hub.has_subscribers() {
            let snapshot = queries::load_attendance(&self.pool.conn)?;
            self.attendance_hub.publish(&snapshot);
        }
        Ok(())
    }
}

impl CadetStore for DocumentStore {
    fn subscribe_cadets(&self) -> AppResult<Subscription<Cadet>> {
        let initial = queries::load_cadets(&self.pool.conn)?;
        Ok(self.cadet_hub.subscribe(initial))
    }

    fn list_cadets(&self) -> AppResult<Vec<Cadet>> {
        queries::load_cadets(&self.pool.conn)
    }

    fn get_cadet(&self, id: &str) -> AppResult<Option<Cadet>> {
        queries::load_cadet(&self.pool.conn, id)
    }

    fn insert_cadet(&mut self, mut cadet: Cadet) -> AppResult<Cadet> {
        cadet.id = new_record_id();
        queries::insert_cadet(&self.pool.conn, &cadet)?;
        self.publish_cadets()?;
        Ok(cadet)
    }

    fn update_cadet(&mut self, cadet: &Cadet) -> AppResult<()> {
        queries::update_cadet(&self.pool.conn, cadet)?;
        self.publish_cadets()
    }

    fn delete_cadet(&mut self, id: &str) -> AppResult<()> {
        queries::delete_cadet(&self.pool.conn, id)?;
        self.publish_cadets()
    }
}

impl AttendanceStore for DocumentStore {
    fn subscribe_attendance(&self) -> AppResult<Subscription<AttendanceRecord>> {
        let initial = queries::load_attendance(&self.pool.conn)?;
        Ok(self.attendance_hub.subscribe(initial))
    }

    fn list_attendance(&self) -> AppResult<Vec<AttendanceRecord>> {
        queries::load_attendance(&self.pool.conn)
    }

    fn get_attendance(&self, date: NaiveDate) -> AppResult<Option<AttendanceRecord>> {
        queries::load_attendance_for_date(&self.pool.conn, &date)
    }

    fn attendance_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        queries::load_attendance_between(&self.pool.conn, &from, &to)
    }

    fn upsert_attendance(&mut self, record: &AttendanceRecord) -> AppResult<()> {
        queries::upsert_attendance(&self.pool.conn, record)?;
        self.publish_attendance()
    }

    fn delete_attendance(&mut self, date: NaiveDate) -> AppResult<bool> {
        let existed = queries::delete_attendance(&self.pool.conn, &date)?;
        if existed {
            self.publish_attendance()?;
        }
        Ok(existed)
    }
}

impl CounterStore for DocumentStore {
    fn current_counter(&self, category: IdCategory) -> AppResult<u64> {
        queries::counter_value(&self.pool.conn, category)
    }

    fn next_counter(&mut self, category: IdCategory) -> AppResult<u64> {
        queries::next_counter_value(&self.pool.conn, category)
    }
}

impl AuditLog for DocumentStore {
    fn write_log(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        write_log(&self.pool.conn, operation, target, message)
    }

    fn log_entries(&self) -> AppResult<Vec<LogEntry>> {
        load_log(&self.pool.conn)
    }
}

impl Backend for DocumentStore {
    fn describe(&self) -> String {
        format!("document store (SQLite) at {}", self.path)
    }
}
