//! Daily attendance marking.
//!
//! A day is edited as a full status list: every cadet on the roster starts
//! from what the stored record says (absent when the day has no record),
//! then the requested changes are applied and the whole day is written back.

use crate::core::log::audit;
use crate::core::reconcile::status_in_record;
use crate::core::view::RosterSnapshot;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceEntries, AttendanceRecord, StatusEntry};
use crate::models::cadet::Cadet;
use crate::models::status::AttendanceStatus;
use crate::store::{AttendanceStore, AuditLog, CadetStore};
use chrono::NaiveDate;

/// What to change on a day before saving it.
#[derive(Debug, Clone, Default)]
pub struct MarkRequest {
    /// Applied to every cadet first.
    pub all: Option<AttendanceStatus>,
    /// Per-cadet overrides (cadet reference, status), applied after `all`.
    pub set: Vec<(String, AttendanceStatus)>,
    /// Save as the old present-list shape.
    pub legacy: bool,
}

#[derive(Debug, Clone)]
pub struct MarkSummary {
    pub record: AttendanceRecord,
    pub present: usize,
    pub others: usize,
}

/// One line of a day view.
#[derive(Debug, Clone)]
pub struct DayLine {
    pub cadet: Cadet,
    pub status: AttendanceStatus,
}

pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Status list for `cadets` as currently stored for the day.
    pub fn day_statuses(cadets: &[Cadet], existing: Option<&AttendanceRecord>) -> Vec<StatusEntry> {
        cadets
            .iter()
            .map(|c| StatusEntry::new(c.id.clone(), status_in_record(&c.id, existing)))
            .collect()
    }

    /// Apply `request` on top of the day's current statuses and save the
    /// day. Every reference is resolved before anything is written.
    pub fn mark<S>(store: &mut S, date: NaiveDate, request: &MarkRequest) -> AppResult<MarkSummary>
    where
        S: CadetStore + AttendanceStore + AuditLog + ?Sized,
    {
        let cadets = store.list_cadets()?;
        if cadets.is_empty() {
            return Err(AppError::Validation(
                "No cadets found. Please add cadets first.".into(),
            ));
        }
        let existing = store.get_attendance(date)?;
        let mut entries = Self::day_statuses(&cadets, existing.as_ref());

        if let Some(status) = request.all {
            for e in entries.iter_mut() {
                e.status = status;
            }
        }

        for (reference, status) in &request.set {
            let cadet = cadets
                .iter()
                .find(|c| c.is_referenced_by(reference))
                .ok_or_else(|| AppError::CadetNotFound(reference.clone()))?;
            if let Some(e) = entries.iter_mut().find(|e| e.cadet_id == cadet.id) {
                e.status = *status;
            }
        }

        let present = entries.iter().filter(|e| e.status.is_present()).count();
        let others = entries.len() - present;

        // keep what the day recorded for cadets no longer on the roster
        if let Some(AttendanceEntries::Current(old)) = existing.as_ref().map(|r| &r.entries) {
            for e in old {
                if !cadets.iter().any(|c| c.id == e.cadet_id) {
                    entries.push(e.clone());
                }
            }
        }
        if let Some(AttendanceEntries::Legacy(old)) = existing.as_ref().map(|r| &r.entries) {
            for id in old {
                if !cadets.iter().any(|c| &c.id == id) {
                    entries.push(StatusEntry::new(id.clone(), AttendanceStatus::Present));
                }
            }
        }

        let record = if request.legacy {
            let present_ids = entries
                .iter()
                .filter(|e| e.status.is_present())
                .map(|e| e.cadet_id.clone())
                .collect();
            AttendanceRecord::legacy(date, present_ids)
        } else {
            AttendanceRecord::current(date, entries)
        };

        store.upsert_attendance(&record)?;
        audit(
            store,
            "mark",
            &record.date_key(),
            &format!("Attendance saved ({present} present, {others} others)"),
        );

        Ok(MarkSummary {
            record,
            present,
            others,
        })
    }

    /// Per-cadet statuses for a recorded day, in roster order.
    pub fn day_view(snapshot: &RosterSnapshot, date: NaiveDate) -> AppResult<Vec<DayLine>> {
        let record = snapshot
            .attendance_on(date)
            .ok_or_else(|| AppError::NoAttendanceForDate(date.to_string()))?;

        Ok(snapshot
            .cadets
            .iter()
            .map(|c| DayLine {
                cadet: c.clone(),
                status: status_in_record(&c.id, Some(record)),
            })
            .collect())
    }

    /// Remove the day's record.
    pub fn unmark<S>(store: &mut S, date: NaiveDate) -> AppResult<()>
    where
        S: AttendanceStore + AuditLog + ?Sized,
    {
        if !store.delete_attendance(date)? {
            return Err(AppError::NoAttendanceForDate(date.to_string()));
        }
        audit(store, "unmark", &date.to_string(), "Attendance record deleted");
        Ok(())
    }

    /// Cadets resolved present on `date`, in roster order.
    pub fn present_on(snapshot: &RosterSnapshot, date: NaiveDate) -> Vec<Cadet> {
        let record = snapshot.attendance_on(date);
        snapshot
            .cadets
            .iter()
            .filter(|c| status_in_record(&c.id, record).is_present())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::IdScheme;
    use crate::core::roster::{RosterLogic, tests_support::form};
    use crate::core::view::RosterView;
    use crate::models::status::AttendanceStatus::*;
    use crate::store::DocumentStore;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn seeded() -> (DocumentStore, Cadet, Cadet) {
        let mut store = DocumentStore::in_memory().unwrap();
        let a = RosterLogic::add(&mut store, IdScheme::Derived, form("Asha", "001")).unwrap();
        let b = RosterLogic::add(&mut store, IdScheme::Derived, form("Ravi", "002")).unwrap();
        (store, a, b)
    }

    #[test]
    fn new_day_starts_absent_then_applies_all_and_set() {
        let (mut store, a, b) = seeded();
        let req = MarkRequest {
            all: Some(Present),
            set: vec![("sd/002".into(), Medical)],
            legacy: false,
        };
        let summary = AttendanceLogic::mark(&mut store, d("2025-06-01"), &req).unwrap();
        assert_eq!((summary.present, summary.others), (1, 1));

        let rec = store.get_attendance(d("2025-06-01")).unwrap().unwrap();
        assert_eq!(status_in_record(&a.id, Some(&rec)), Present);
        assert_eq!(status_in_record(&b.id, Some(&rec)), Medical);
    }

    #[test]
    fn remarking_starts_from_the_stored_day() {
        let (mut store, a, b) = seeded();
        store
            .upsert_attendance(&AttendanceRecord::legacy(d("2025-06-01"), vec![a.id.clone()]))
            .unwrap();

        let req = MarkRequest {
            set: vec![(b.unique_id.clone(), Camp)],
            ..Default::default()
        };
        let summary = AttendanceLogic::mark(&mut store, d("2025-06-01"), &req).unwrap();
        assert!(matches!(summary.record.entries, AttendanceEntries::Current(_)));

        let rec = store.get_attendance(d("2025-06-01")).unwrap().unwrap();
        assert_eq!(status_in_record(&a.id, Some(&rec)), Present);
        assert_eq!(status_in_record(&b.id, Some(&rec)), Camp);
    }

    #[test]
    fn legacy_save_keeps_only_present_ids() {
        let (mut store, a, _) = seeded();
        let req = MarkRequest {
            set: vec![("SD/001".into(), Present)],
            legacy: true,
            ..Default::default()
        };
        AttendanceLogic::mark(&mut store, d("2025-06-01"), &req).unwrap();
        let rec = store.get_attendance(d("2025-06-01")).unwrap().unwrap();
        assert_eq!(rec.entries, AttendanceEntries::Legacy(vec![a.id]));
    }

    #[test]
    fn unknown_reference_writes_nothing() {
        let (mut store, _, _) = seeded();
        let req = MarkRequest {
            all: Some(Present),
            set: vec![("SD/999".into(), Absent)],
            legacy: false,
        };
        let err = AttendanceLogic::mark(&mut store, d("2025-06-01"), &req).unwrap_err();
        assert!(matches!(err, AppError::CadetNotFound(_)));
        assert!(store.get_attendance(d("2025-06-01")).unwrap().is_none());
    }

    #[test]
    fn marking_with_empty_roster_is_rejected() {
        let mut store = DocumentStore::in_memory().unwrap();
        let err = AttendanceLogic::mark(&mut store, d("2025-06-01"), &MarkRequest::default())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn deleted_cadet_history_survives_remark() {
        let (mut store, a, b) = seeded();
        let all_present = MarkRequest {
            all: Some(Present),
            ..Default::default()
        };
        AttendanceLogic::mark(&mut store, d("2025-06-01"), &all_present).unwrap();
        RosterLogic::delete(&mut store, &b.unique_id).unwrap();

        AttendanceLogic::mark(&mut store, d("2025-06-01"), &MarkRequest::default()).unwrap();
        let rec = store.get_attendance(d("2025-06-01")).unwrap().unwrap();
        assert_eq!(status_in_record(&a.id, Some(&rec)), Present);
        assert_eq!(status_in_record(&b.id, Some(&rec)), Present);
    }

    #[test]
    fn day_view_and_unmark() {
        let (mut store, a, _) = seeded();
        let mut view = RosterView::open(&store).unwrap();
        assert!(matches!(
            AttendanceLogic::day_view(&view.snapshot(), d("2025-06-01")),
            Err(AppError::NoAttendanceForDate(_))
        ));

        store
            .upsert_attendance(&AttendanceRecord::legacy(d("2025-06-01"), vec![a.id.clone()]))
            .unwrap();
        let snap = view.snapshot();
        let lines = AttendanceLogic::day_view(&snap, d("2025-06-01")).unwrap();
        let statuses: Vec<_> = lines.iter().map(|l| l.status).collect();
        assert_eq!(statuses, vec![Present, Absent]);

        let present = AttendanceLogic::present_on(&snap, d("2025-06-01"));
        assert_eq!(present.len(), 1);
        assert_eq!(present[0].id, a.id);

        AttendanceLogic::unmark(&mut store, d("2025-06-01")).unwrap();
        assert!(matches!(
            AttendanceLogic::unmark(&mut store, d("2025-06-01")),
            Err(AppError::NoAttendanceForDate(_))
        ));
    }
}
