use super::status::AttendanceStatus;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// One cadet's status inside a current-shape record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub cadet_id: String,
    pub status: AttendanceStatus,
}

impl StatusEntry {
    pub fn new(cadet_id: impl Into<String>, status: AttendanceStatus) -> Self {
        Self {
            cadet_id: cadet_id.into(),
            status,
        }
    }
}

/// The two historical shapes of a day's attendance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceEntries {
    /// Ids of cadets marked present; everyone else is absent.
    Legacy(Vec<String>),
    /// Explicit status per cadet.
    Current(Vec<StatusEntry>),
}

/// Attendance for a single calendar day. The date is the natural key: a
/// store holds at most one record per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredAttendance", into = "StoredAttendance")]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub entries: AttendanceEntries,
    pub saved_at: String,
}

impl AttendanceRecord {
    pub fn current(date: NaiveDate, records: Vec<StatusEntry>) -> Self {
        Self {
            date,
            entries: AttendanceEntries::Current(records),
            saved_at: Local::now().to_rfc3339(),
        }
    }

    pub fn legacy(date: NaiveDate, present_cadets: Vec<String>) -> Self {
        Self {
            date,
            entries: AttendanceEntries::Legacy(present_cadets),
            saved_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_empty(&self) -> bool {
        match &self.entries {
            AttendanceEntries::Legacy(ids) => ids.is_empty(),
            AttendanceEntries::Current(recs) => recs.is_empty(),
        }
    }
}

/// On-disk document shape. Legacy documents carry `presentCadets`, current
/// ones carry `records`; documents written by the old dual-save carry both,
/// in which case `records` is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAttendance {
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    records: Option<Vec<StatusEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    present_cadets: Option<Vec<String>>,
    #[serde(default)]
    saved_at: String,
}

impl From<StoredAttendance> for AttendanceRecord {
    fn from(doc: StoredAttendance) -> Self {
        let entries = match (doc.records, doc.present_cadets) {
            (Some(records), _) => AttendanceEntries::Current(records),
            (None, Some(present)) => AttendanceEntries::Legacy(present),
            (None, None) => AttendanceEntries::Current(Vec::new()),
        };
        Self {
            date: doc.date,
            entries,
            saved_at: doc.saved_at,
        }
    }
}

impl From<AttendanceRecord> for StoredAttendance {
    fn from(rec: AttendanceRecord) -> Self {
        let (records, present_cadets) = match rec.entries {
            AttendanceEntries::Current(r) => (Some(r), None),
            AttendanceEntries::Legacy(p) => (None, Some(p)),
        };
        Self {
            date: rec.date,
            records,
            present_cadets,
            saved_at: rec.saved_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn reads_legacy_document() {
        let json = r#"{"date":"2025-06-02","presentCadets":["a","b"],"savedAt":"x"}"#;
        let rec: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.date, d("2025-06-02"));
        assert_eq!(
            rec.entries,
            AttendanceEntries::Legacy(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn merged_document_prefers_status_list() {
        let json = r#"{
            "date":"2025-06-02",
            "records":[{"cadetId":"a","status":"M"}],
            "presentCadets":["b"],
            "savedAt":"x"
        }"#;
        let rec: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            rec.entries,
            AttendanceEntries::Current(vec![StatusEntry::new("a", AttendanceStatus::Medical)])
        );
    }

    #[test]
    fn document_without_entries_is_empty_current() {
        let rec: AttendanceRecord = serde_json::from_str(r#"{"date":"2025-06-02"}"#).unwrap();
        assert_eq!(rec.entries, AttendanceEntries::Current(vec![]));
        assert!(rec.is_empty());
    }

    #[test]
    fn writes_only_the_active_shape() {
        let rec = AttendanceRecord::current(
            d("2025-06-03"),
            vec![StatusEntry::new("a", AttendanceStatus::Present)],
        );
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["date"], "2025-06-03");
        assert_eq!(v["records"][0]["cadetId"], "a");
        assert_eq!(v["records"][0]["status"], "P");
        assert!(v.get("presentCadets").is_none());
    }
}
