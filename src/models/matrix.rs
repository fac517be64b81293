use super::status::AttendanceStatus;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// One cadet's line in the monthly report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub cadet_id: String,
    pub unique_id: String,
    pub name: String,
    pub attendance: BTreeMap<NaiveDate, AttendanceStatus>,
    pub total_present: usize,
}

impl MatrixRow {
    pub fn status_on(&self, date: &NaiveDate) -> Option<AttendanceStatus> {
        self.attendance.get(date).copied()
    }

    /// Recount `P` across the row.
    pub fn count_present(&self) -> usize {
        self.attendance.values().filter(|s| s.is_present()).count()
    }
}
