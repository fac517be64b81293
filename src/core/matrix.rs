//! Cadet × date status grid for the monthly report.

use crate::core::reconcile::status_in_record;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::cadet::Cadet;
use crate::models::matrix::MatrixRow;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Every calendar day from `from` to `to`, inclusive.
pub fn generate_date_range(from: NaiveDate, to: NaiveDate) -> AppResult<Vec<NaiveDate>> {
    if from > to {
        return Err(AppError::InvertedRange {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let mut out = Vec::new();
    let mut d = from;
    while d <= to {
        out.push(d);
        d = match d.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    Ok(out)
}

/// One row per cadet (input order kept), each date resolved through the
/// reconciler. An empty `records` slice still yields a full all-absent grid.
pub fn build_matrix(
    cadets: &[Cadet],
    dates: &[NaiveDate],
    records: &[AttendanceRecord],
) -> Vec<MatrixRow> {
    let by_date: HashMap<NaiveDate, &AttendanceRecord> =
        records.iter().map(|r| (r.date, r)).collect();

    cadets
        .iter()
        .map(|cadet| {
            let mut attendance = BTreeMap::new();
            let mut total_present = 0;

            for date in dates {
                let status = status_in_record(&cadet.id, by_date.get(date).copied());
                if status.is_present() {
                    total_present += 1;
                }
                attendance.insert(*date, status);
            }

            MatrixRow {
                cadet_id: cadet.id.clone(),
                unique_id: cadet.unique_id.clone(),
                name: cadet.full_name.clone(),
                attendance,
                total_present,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::StatusEntry;
    use crate::models::cadet::CadetForm;
    use crate::models::gender::Gender;
    use crate::models::status::AttendanceStatus::{self, *};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn cadet(id: &str) -> Cadet {
        let mut c = Cadet::from_form(
            String::new(),
            format!("SD/{id}"),
            CadetForm {
                full_name: format!("Cadet {id}"),
                gender: Gender::Male,
                regimental_number: id.into(),
                phone: "1".into(),
                email: "e@x.in".into(),
                university_roll_number: None,
                department: None,
                date_of_birth: None,
                father_name: None,
            },
        );
        c.id = id.into();
        c
    }

    #[test]
    fn single_day_range() {
        let day = d("2025-02-28");
        assert_eq!(generate_date_range(day, day).unwrap(), vec![day]);
    }

    #[test]
    fn range_crosses_month_and_leap_day() {
        let dates = generate_date_range(d("2024-02-27"), d("2024-03-01")).unwrap();
        let keys: Vec<_> = dates.iter().map(|d| d.to_string()).collect();
        assert_eq!(keys, vec!["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn inverted_range_is_a_validation_error() {
        let err = generate_date_range(d("2025-06-02"), d("2025-06-01")).unwrap_err();
        assert!(matches!(err, AppError::InvertedRange { .. }));
    }

    #[test]
    fn two_cadets_two_days_scenario() {
        let cadets = vec![cadet("A"), cadet("B")];
        let dates = generate_date_range(d("2025-06-01"), d("2025-06-02")).unwrap();
        let records = vec![AttendanceRecord::legacy(d("2025-06-01"), vec!["A".into()])];

        let rows = build_matrix(&cadets, &dates, &records);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].status_on(&d("2025-06-01")), Some(Present));
        assert_eq!(rows[0].status_on(&d("2025-06-02")), Some(Absent));
        assert_eq!(rows[0].total_present, 1);

        assert_eq!(rows[1].status_on(&d("2025-06-01")), Some(Absent));
        assert_eq!(rows[1].status_on(&d("2025-06-02")), Some(Absent));
        assert_eq!(rows[1].total_present, 0);
    }

    #[test]
    fn empty_records_still_produce_rows() {
        let cadets = vec![cadet("A"), cadet("B"), cadet("C")];
        let dates = generate_date_range(d("2025-06-01"), d("2025-06-30")).unwrap();
        let rows = build_matrix(&cadets, &dates, &[]);
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.attendance.len(), 30);
            assert!(row.attendance.values().all(|s| *s == Absent));
            assert_eq!(row.total_present, 0);
        }
    }

    #[test]
    fn rows_keep_order_and_cover_range_exactly() {
        let cadets = vec![cadet("Z"), cadet("A"), cadet("M")];
        let dates = generate_date_range(d("2025-06-01"), d("2025-06-05")).unwrap();
        let statuses: [AttendanceStatus; 5] = [Present, Medical, Present, Camp, Remarks];
        let records: Vec<_> = dates
            .iter()
            .zip(statuses)
            .map(|(day, st)| AttendanceRecord::current(*day, vec![StatusEntry::new("Z", st)]))
            .collect();

        let rows = build_matrix(&cadets, &dates, &records);
        let ids: Vec<_> = rows.iter().map(|r| r.cadet_id.as_str()).collect();
        assert_eq!(ids, vec!["Z", "A", "M"]);

        for row in &rows {
            let keys: Vec<_> = row.attendance.keys().copied().collect();
            assert_eq!(keys, dates);
            assert_eq!(row.total_present, row.count_present());
        }
        assert_eq!(rows[0].total_present, 2);
        assert_eq!(rows[0].status_on(&d("2025-06-04")), Some(Camp));
    }

    #[test]
    fn records_outside_the_range_are_ignored() {
        let cadets = vec![cadet("A")];
        let dates = generate_date_range(d("2025-06-01"), d("2025-06-01")).unwrap();
        let records = vec![AttendanceRecord::legacy(d("2025-05-31"), vec!["A".into()])];
        let rows = build_matrix(&cadets, &dates, &records);
        assert_eq!(rows[0].attendance.len(), 1);
        assert_eq!(rows[0].total_present, 0);
    }
}
