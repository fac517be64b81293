use crate::core::matrix::{build_matrix, generate_date_range};
use crate::core::view::RosterSnapshot;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::matrix::MatrixRow;
use chrono::{Datelike, NaiveDate};

/// Monthly matrix plus the facts the caller needs to present it.
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<MatrixRow>,
    /// Whether any attendance record existed in the range. The matrix is
    /// built either way; this only drives the "no records" message.
    pub had_records: bool,
}

/// Build the report from a snapshot taken at invocation time.
pub fn generate_report(
    snapshot: &RosterSnapshot,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<MonthlyReport> {
    let dates = generate_date_range(from, to)?;

    if snapshot.cadets.is_empty() {
        return Err(AppError::Validation(
            "No cadets found. Please add cadets first.".into(),
        ));
    }

    let in_range: Vec<AttendanceRecord> = snapshot
        .attendance
        .iter()
        .filter(|r| r.date >= from && r.date <= to)
        .cloned()
        .collect();

    let rows = build_matrix(&snapshot.cadets, &dates, &in_range);

    Ok(MonthlyReport {
        from,
        to,
        dates,
        rows,
        had_records: !in_range.is_empty(),
    })
}

/// Default report period: first day of `today`'s month through `today`.
pub fn default_period(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    (first, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::roster::{RosterLogic, tests_support::form};
    use crate::core::identity::IdScheme;
    use crate::core::view::RosterView;
    use crate::models::status::AttendanceStatus;
    use crate::store::{AttendanceStore, DocumentStore};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn inverted_range_checked_before_roster() {
        let snap = RosterSnapshot::default();
        let err = generate_report(&snap, d("2025-06-05"), d("2025-06-01")).unwrap_err();
        assert!(matches!(err, AppError::InvertedRange { .. }));
    }

    #[test]
    fn empty_roster_is_reported() {
        let snap = RosterSnapshot::default();
        let err = generate_report(&snap, d("2025-06-01"), d("2025-06-05")).unwrap_err();
        assert_eq!(err.to_string(), "No cadets found. Please add cadets first.");
    }

    #[test]
    fn no_records_still_builds_matrix() {
        let mut store = DocumentStore::in_memory().unwrap();
        RosterLogic::add(&mut store, IdScheme::Derived, form("Asha", "001")).unwrap();
        let mut view = RosterView::open(&store).unwrap();

        let report = generate_report(&view.snapshot(), d("2025-06-01"), d("2025-06-03")).unwrap();
        assert!(!report.had_records);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].attendance.len(), 3);
    }

    #[test]
    fn report_uses_snapshot_taken_at_invocation() {
        let mut store = DocumentStore::in_memory().unwrap();
        let a = RosterLogic::add(&mut store, IdScheme::Derived, form("Asha", "001")).unwrap();
        let mut view = RosterView::open(&store).unwrap();
        let snapshot = view.snapshot();

        // later pushes do not touch the captured snapshot
        RosterLogic::add(&mut store, IdScheme::Derived, form("Ravi", "002")).unwrap();
        store
            .upsert_attendance(&AttendanceRecord::legacy(d("2025-06-01"), vec![a.id.clone()]))
            .unwrap();

        let report = generate_report(&snapshot, d("2025-06-01"), d("2025-06-01")).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert!(!report.had_records);

        // a fresh snapshot sees both writes
        let fresh = generate_report(&view.snapshot(), d("2025-06-01"), d("2025-06-01")).unwrap();
        assert_eq!(fresh.rows.len(), 2);
        assert!(fresh.had_records);
        assert_eq!(
            fresh.rows[0].status_on(&d("2025-06-01")),
            Some(AttendanceStatus::Present)
        );
    }

    #[test]
    fn default_period_starts_on_first_of_month() {
        assert_eq!(
            default_period(d("2025-06-17")),
            (d("2025-06-01"), d("2025-06-17"))
        );
    }
}
