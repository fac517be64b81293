//! Local key-value store: a single JSON file with the keys `cadets`,
//! `attendance`, `sdCounter`, `swCounter` and `log`.
//!
//! Every operation re-reads the file, so separate handles always see the
//! latest persisted state. Writes go through a temporary file and a rename.
//! Counter increments are read-modify-write and assume a single writer.

use super::hub::{SnapshotHub, Subscription};
use super::{
    AttendanceStore, AuditLog, Backend, CadetStore, CounterStore, LogEntry, new_record_id,
    storage_error,
};
use crate::core::identity::IdCategory;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::cadet::Cadet;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocalData {
    #[serde(default)]
    cadets: Vec<Cadet>,
    #[serde(default)]
    attendance: Vec<AttendanceRecord>,
    #[serde(default)]
    sd_counter: u64,
    #[serde(default)]
    sw_counter: u64,
    #[serde(default)]
    log: Vec<LogEntry>,
}

impl LocalData {
    fn counter_mut(&mut self, category: IdCategory) -> &mut u64 {
        match category {
            IdCategory::Sd => &mut self.sd_counter,
            IdCategory::Sw => &mut self.sw_counter,
        }
    }
}

pub struct LocalStore {
    path: PathBuf,
    cadet_hub: SnapshotHub<Cadet>,
    attendance_hub: SnapshotHub<AttendanceRecord>,
}

impl LocalStore {
    /// Open the store file. A missing file is an empty store; it is created
    /// on the first write.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            cadet_hub: SnapshotHub::new(),
            attendance_hub: SnapshotHub::new(),
        };
        // a corrupt file fails here, not on first use
        store.load()?;
        Ok(store)
    }

    fn load(&self) -> AppResult<LocalData> {
        if !self.path.exists() {
            return Ok(LocalData::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(LocalData::default());
        }
        let mut data: LocalData = serde_json::from_str(&raw)?;
        data.cadets.iter_mut().for_each(Cadet::ensure_id);
        Ok(data)
    }

    fn save(&self, data: &LocalData) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| storage_error(&format!("replace {}", self.path.display()), e))?;
        Ok(())
    }

    /// Load, mutate, save.
    fn modify<T>(&self, f: impl FnOnce(&mut LocalData) -> AppResult<T>) -> AppResult<T> {
        let mut data = self.load()?;
        let out = f(&mut data)?;
        self.save(&data)?;
        Ok(out)
    }
}

impl CadetStore for LocalStore {
    fn subscribe_cadets(&self) -> AppResult<Subscription<Cadet>> {
        Ok(self.cadet_hub.subscribe(self.load()?.cadets))
    }

    fn list_cadets(&self) -> AppResult<Vec<Cadet>> {
        Ok(self.load()?.cadets)
    }

    fn get_cadet(&self, id: &str) -> AppResult<Option<Cadet>> {
        Ok(self.load()?.cadets.into_iter().find(|c| c.id == id))
    }

    fn insert_cadet(&mut self, mut cadet: Cadet) -> AppResult<Cadet> {
        cadet.id = new_record_id();
        let stored = cadet.clone();
        let snapshot = self.modify(|data| {
            data.cadets.push(cadet);
            Ok(data.cadets.clone())
        })?;
        self.cadet_hub.publish(&snapshot);
        Ok(stored)
    }

    fn update_cadet(&mut self, cadet: &Cadet) -> AppResult<()> {
        let snapshot = self.modify(|data| {
            let slot = data
                .cadets
                .iter_mut()
                .find(|c| c.id == cadet.id)
                .ok_or_else(|| AppError::CadetNotFound(cadet.id.clone()))?;
            *slot = cadet.clone();
            Ok(data.cadets.clone())
        })?;
        self.cadet_hub.publish(&snapshot);
        Ok(())
    }

    fn delete_cadet(&mut self, id: &str) -> AppResult<()> {
        let snapshot = self.modify(|data| {
            let before = data.cadets.len();
            data.cadets.retain(|c| c.id != id);
            if data.cadets.len() == before {
                return Err(AppError::CadetNotFound(id.to_string()));
            }
            Ok(data.cadets.clone())
        })?;
        self.cadet_hub.publish(&snapshot);
        Ok(())
    }
}

impl AttendanceStore for LocalStore {
    fn subscribe_attendance(&self) -> AppResult<Subscription<AttendanceRecord>> {
        let mut records = self.load()?.attendance;
        records.sort_by_key(|r| r.date);
        Ok(self.attendance_hub.subscribe(records))
    }

    fn list_attendance(&self) -> AppResult<Vec<AttendanceRecord>> {
        let mut records = self.load()?.attendance;
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    fn get_attendance(&self, date: NaiveDate) -> AppResult<Option<AttendanceRecord>> {
        Ok(self.load()?.attendance.into_iter().find(|r| r.date == date))
    }

    fn upsert_attendance(&mut self, record: &AttendanceRecord) -> AppResult<()> {
        let snapshot = self.modify(|data| {
            match data.attendance.iter_mut().find(|r| r.date == record.date) {
                Some(existing) => *existing = record.clone(),
                None => data.attendance.push(record.clone()),
            }
            let mut all = data.attendance.clone();
            all.sort_by_key(|r| r.date);
            Ok(all)
        })?;
        self.attendance_hub.publish(&snapshot);
        Ok(())
    }

    fn delete_attendance(&mut self, date: NaiveDate) -> AppResult<bool> {
        let mut data = self.load()?;
        let before = data.attendance.len();
        data.attendance.retain(|r| r.date != date);
        if data.attendance.len() == before {
            return Ok(false);
        }
        self.save(&data)?;
        data.attendance.sort_by_key(|r| r.date);
        self.attendance_hub.publish(&data.attendance);
        Ok(true)
    }
}

impl CounterStore for LocalStore {
    fn current_counter(&self, category: IdCategory) -> AppResult<u64> {
        let mut data = self.load()?;
        Ok(*data.counter_mut(category))
    }

    fn next_counter(&mut self, category: IdCategory) -> AppResult<u64> {
        self.modify(|data| {
            let counter = data.counter_mut(category);
            *counter += 1;
            Ok(*counter)
        })
    }
}

impl AuditLog for LocalStore {
    fn write_log(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.modify(|data| {
            let id = data.log.last().map(|e| e.id + 1).unwrap_or(1);
            data.log.push(LogEntry {
                id,
                date: Local::now().to_rfc3339(),
                operation: operation.to_string(),
                target: target.to_string(),
                message: message.to_string(),
            });
            Ok(())
        })
    }

    fn log_entries(&self) -> AppResult<Vec<LogEntry>> {
        Ok(self.load()?.log)
    }
}

impl Backend for LocalStore {
    fn describe(&self) -> String {
        format!("local store (JSON) at {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reconcile::status_of;
    use crate::models::attendance::StatusEntry;
    use crate::models::cadet::CadetForm;
    use crate::models::gender::Gender;
    use crate::models::status::AttendanceStatus;
    use std::env;

    fn temp_store(name: &str) -> PathBuf {
        let mut p = env::temp_dir();
        p.push(format!("{name}_cadetroster_local.json"));
        fs::remove_file(&p).ok();
        p
    }

    fn cadet(reg: &str) -> Cadet {
        Cadet::from_form(
            String::new(),
            format!("SW/{reg}"),
            CadetForm {
                full_name: format!("Cadet {reg}"),
                gender: Gender::Female,
                regimental_number: reg.into(),
                phone: "1".into(),
                email: "c@x.in".into(),
                university_roll_number: None,
                department: None,
                date_of_birth: None,
                father_name: None,
            },
        )
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn missing_file_is_empty_store() {
        let path = temp_store("local_missing");
        let store = LocalStore::open(&path).unwrap();
        assert!(store.list_cadets().unwrap().is_empty());
        assert!(store.list_attendance().unwrap().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn data_persists_across_handles() {
        let path = temp_store("local_persist");
        let mut a = LocalStore::open(&path).unwrap();
        let c = a.insert_cadet(cadet("11")).unwrap();

        let b = LocalStore::open(&path).unwrap();
        assert_eq!(b.get_cadet(&c.id).unwrap(), Some(c));
    }

    #[test]
    fn reads_legacy_browser_export() {
        let path = temp_store("local_legacy");
        fs::write(
            &path,
            r#"{
              "cadets": [],
              "attendance": [{"date":"2024-01-05","presentCadets":["x"],"savedAt":"t"}],
              "sdCounter": 4
            }"#,
        )
        .unwrap();
        let store = LocalStore::open(&path).unwrap();
        assert_eq!(store.current_counter(IdCategory::Sd).unwrap(), 4);
        assert_eq!(store.current_counter(IdCategory::Sw).unwrap(), 0);
        assert_eq!(store.list_attendance().unwrap()[0].date, d("2024-01-05"));
    }

    #[test]
    fn cadets_without_id_match_legacy_present_lists() {
        let path = temp_store("local_no_id");
        fs::write(
            &path,
            r#"{"cadets":[{"uniqueId":"SD1","fullName":"Asha","gender":"Male","regimentalNumber":"001","phone":"1","email":"a@x.in"}],
                "attendance":[{"date":"2024-01-05","presentCadets":["SD1"]}],
                "sdCounter":1}"#,
        )
        .unwrap();
        let store = LocalStore::open(&path).unwrap();
        let cadets = store.list_cadets().unwrap();
        assert_eq!(cadets[0].id, "SD1");
        assert!(store.get_cadet("SD1").unwrap().is_some());

        let records = store.list_attendance().unwrap();
        assert_eq!(
            status_of(&cadets[0].id, d("2024-01-05"), &records),
            AttendanceStatus::Present
        );
    }

    #[test]
    fn upsert_replaces_same_date() {
        let path = temp_store("local_upsert");
        let mut store = LocalStore::open(&path).unwrap();
        store
            .upsert_attendance(&AttendanceRecord::legacy(d("2025-06-02"), vec!["a".into()]))
            .unwrap();
        store
            .upsert_attendance(&AttendanceRecord::current(
                d("2025-06-02"),
                vec![StatusEntry::new("a", AttendanceStatus::Remarks)],
            ))
            .unwrap();
        assert_eq!(store.list_attendance().unwrap().len(), 1);
        assert!(store.delete_attendance(d("2025-06-02")).unwrap());
        assert!(!store.delete_attendance(d("2025-06-02")).unwrap());
    }

    #[test]
    fn counter_is_not_reused_after_delete() {
        let path = temp_store("local_counter");
        let mut store = LocalStore::open(&path).unwrap();
        assert_eq!(store.next_counter(IdCategory::Sw).unwrap(), 1);
        let c = store.insert_cadet(cadet("12")).unwrap();
        store.delete_cadet(&c.id).unwrap();
        assert_eq!(store.next_counter(IdCategory::Sw).unwrap(), 2);
    }

    #[test]
    fn attendance_subscription_sees_latest_snapshot() {
        let path = temp_store("local_sub");
        let mut store = LocalStore::open(&path).unwrap();
        let mut sub = store.subscribe_attendance().unwrap();
        store
            .upsert_attendance(&AttendanceRecord::legacy(d("2025-06-03"), vec![]))
            .unwrap();
        store
            .upsert_attendance(&AttendanceRecord::legacy(d("2025-06-01"), vec![]))
            .unwrap();
        let dates: Vec<_> = sub.latest().iter().map(|r| r.date_key()).collect();
        assert_eq!(dates, vec!["2025-06-01", "2025-06-03"]);
    }

    #[test]
    fn log_ids_increase() {
        let path = temp_store("local_log");
        let mut store = LocalStore::open(&path).unwrap();
        store.write_log("add", "SW/1", "Cadet added").unwrap();
        store.write_log("del", "SW/1", "Cadet deleted").unwrap();
        let ids: Vec<_> = store.log_entries().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
