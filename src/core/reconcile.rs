//! Resolve a cadet's status for a day from stored attendance records.
//!
//! Absent is the default everywhere: no record for the day, or no entry for
//! the cadet inside a record, both resolve to `A`.

use crate::models::attendance::{AttendanceEntries, AttendanceRecord};
use crate::models::status::AttendanceStatus;
use chrono::NaiveDate;

/// Status of `cadet_id` on `date`, looked up among `records`.
pub fn status_of(cadet_id: &str, date: NaiveDate, records: &[AttendanceRecord]) -> AttendanceStatus {
    status_in_record(cadet_id, records.iter().find(|r| r.date == date))
}

/// Status of `cadet_id` within one day's record (if the day has one).
pub fn status_in_record(cadet_id: &str, record: Option<&AttendanceRecord>) -> AttendanceStatus {
    match record.map(|r| &r.entries) {
        None => AttendanceStatus::Absent,
        Some(AttendanceEntries::Current(entries)) => entries
            .iter()
            .find(|e| e.cadet_id == cadet_id)
            .map(|e| e.status)
            .unwrap_or(AttendanceStatus::Absent),
        Some(AttendanceEntries::Legacy(present)) => {
            if present.iter().any(|id| id == cadet_id) {
                AttendanceStatus::Present
            } else {
                AttendanceStatus::Absent
            }
        }
    }
}
