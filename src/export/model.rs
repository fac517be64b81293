// src/export/model.rs

use crate::core::report::MonthlyReport;
use crate::errors::AppResult;
use crate::models::cadet::Cadet;
use chrono::NaiveDate;
use serde::Serialize;

pub(crate) const ROSTER_HEADERS: [&str; 9] = [
    "Unique ID",
    "Name",
    "Regimental Number",
    "Phone",
    "Email",
    "University Roll",
    "Department",
    "DOB",
    "Father Name",
];

/// Flat, format-independent table ready to be written out.
#[derive(Debug, Clone)]
pub struct ExportSheet {
    pub name: &'static str,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Columns kept visible when scrolling right (besides the header row).
    pub frozen_cols: u16,
    /// Columns written as numbers in spreadsheets.
    pub numeric_cols: Vec<usize>,
    /// Typed records for JSON output.
    pub json: serde_json::Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresentCadet<'a> {
    attendance_date: String,
    #[serde(flatten)]
    cadet: &'a Cadet,
}

fn opt(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}

pub(crate) fn cadet_to_row(c: &Cadet) -> Vec<String> {
    vec![
        c.unique_id.clone(),
        c.full_name.clone(),
        c.regimental_number.clone(),
        c.phone.clone(),
        c.email.clone(),
        opt(&c.university_roll_number),
        opt(&c.department),
        opt(&c.date_of_birth),
        opt(&c.father_name),
    ]
}

fn headers<const N: usize>(h: [&str; N]) -> Vec<String> {
    h.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn roster_sheet(cadets: &[Cadet]) -> AppResult<ExportSheet> {
    Ok(ExportSheet {
        name: "Cadets",
        headers: headers(ROSTER_HEADERS),
        rows: cadets.iter().map(cadet_to_row).collect(),
        frozen_cols: 0,
        numeric_cols: Vec::new(),
        json: serde_json::to_value(cadets)?,
    })
}

/// Present cadets of one day: roster columns plus the date.
pub(crate) fn attendance_sheet(present: &[Cadet], date: NaiveDate) -> AppResult<ExportSheet> {
    let day = date.format("%Y-%m-%d").to_string();

    let mut hdr = headers(ROSTER_HEADERS);
    hdr.push("Attendance Date".into());

    let rows = present
        .iter()
        .map(|c| {
            let mut row = cadet_to_row(c);
            row.push(day.clone());
            row
        })
        .collect();

    let records: Vec<PresentCadet> = present
        .iter()
        .map(|cadet| PresentCadet {
            attendance_date: day.clone(),
            cadet,
        })
        .collect();

    Ok(ExportSheet {
        name: "Cadets",
        headers: hdr,
        rows,
        frozen_cols: 0,
        numeric_cols: Vec::new(),
        json: serde_json::to_value(&records)?,
    })
}

/// Unique ID, Name, one column per date, Total Present.
pub(crate) fn monthly_sheet(report: &MonthlyReport) -> AppResult<ExportSheet> {
    let mut hdr = vec!["Unique ID".to_string(), "Name".to_string()];
    hdr.extend(report.dates.iter().map(|d| d.format("%Y-%m-%d").to_string()));
    hdr.push("Total Present".into());

    let rows = report
        .rows
        .iter()
        .map(|r| {
            let mut row = vec![r.unique_id.clone(), r.name.clone()];
            row.extend(
                report
                    .dates
                    .iter()
                    .map(|d| r.status_on(d).map(|s| s.code().to_string()).unwrap_or_default()),
            );
            row.push(r.total_present.to_string());
            row
        })
        .collect();

    Ok(ExportSheet {
        name: "Monthly Attendance",
        numeric_cols: vec![hdr.len() - 1],
        headers: hdr,
        rows,
        frozen_cols: 2,
        json: serde_json::to_value(&report.rows)?,
    })
}
