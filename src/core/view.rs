//! Read-side projection over the live store subscriptions.
//!
//! A view only ever exposes the most recently delivered snapshot. Work that
//! must not change underneath itself (report generation, export) takes a
//! [`RosterSnapshot`], an owned copy frozen at the moment it was taken.

use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::models::cadet::Cadet;
use crate::store::{Backend, Subscription};

#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot {
    pub cadets: Vec<Cadet>,
    pub attendance: Vec<AttendanceRecord>,
}

impl RosterSnapshot {
    /// Resolve a cadet by store id or display ID (case-insensitive).
    pub fn find_cadet(&self, reference: &str) -> Option<&Cadet> {
        self.cadets.iter().find(|c| c.is_referenced_by(reference))
    }

    pub fn attendance_on(&self, date: chrono::NaiveDate) -> Option<&AttendanceRecord> {
        self.attendance.iter().find(|r| r.date == date)
    }
}

pub struct RosterView {
    cadets: Subscription<Cadet>,
    attendance: Subscription<AttendanceRecord>,
}

impl RosterView {
    pub fn open(backend: &dyn Backend) -> AppResult<Self> {
        Ok(Self {
            cadets: backend.subscribe_cadets()?,
            attendance: backend.subscribe_attendance()?,
        })
    }

    pub fn cadets(&mut self) -> &[Cadet] {
        self.cadets.latest()
    }

    pub fn attendance(&mut self) -> &[AttendanceRecord] {
        self.attendance.latest()
    }

    /// Owned copy of the newest roster and attendance.
    pub fn snapshot(&mut self) -> RosterSnapshot {
        RosterSnapshot {
            cadets: self.cadets.latest().to_vec(),
            attendance: self.attendance.latest().to_vec(),
        }
    }
}
