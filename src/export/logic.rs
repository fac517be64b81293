// src/export/logic.rs

use crate::core::attendance::AttendanceLogic;
use crate::core::report::generate_report;
use crate::core::view::RosterSnapshot;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ExportSheet, attendance_sheet, monthly_sheet, roster_sheet};
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::date::file_stamp;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

/// What to export.
#[derive(Debug, Clone)]
pub enum ExportTarget {
    /// Roster details, optionally limited to the given cadet references.
    Roster { select: Vec<String> },
    /// Cadets present on one day.
    Attendance { date: NaiveDate },
    /// Cadet × date matrix.
    Monthly { from: NaiveDate, to: NaiveDate },
}

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub target: ExportTarget,
    pub format: ExportFormat,
    pub dir: PathBuf,
    pub force: bool,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// File name without extension.
    ///
    /// - roster: `attendance_<YYYY>_<MM>_<DD>` of the export day
    /// - attendance: `attendance_<YYYY>_<MM>_<DD>` of the exported date
    /// - monthly: `monthly_attendance_<from>_<to>`, dashes as underscores
    pub fn file_stem(target: &ExportTarget, today: NaiveDate) -> String {
        match target {
            ExportTarget::Roster { .. } => format!("attendance_{}", file_stamp(today)),
            ExportTarget::Attendance { date } => format!("attendance_{}", file_stamp(*date)),
            ExportTarget::Monthly { from, to } => {
                format!("monthly_attendance_{}_{}", file_stamp(*from), file_stamp(*to))
            }
        }
    }

    /// `--dir` first, then the configured export directory, then the
    /// current directory.
    pub fn resolve_dir(cli_dir: Option<&str>, cfg_dir: Option<&str>) -> PathBuf {
        match cli_dir.or(cfg_dir) {
            Some(d) => expand_tilde(d),
            None => PathBuf::from("."),
        }
    }

    /// Build the table for `target` from a snapshot; nothing touches disk.
    pub fn build_sheet(snapshot: &RosterSnapshot, target: &ExportTarget) -> AppResult<ExportSheet> {
        match target {
            ExportTarget::Roster { select } => {
                if snapshot.cadets.is_empty() {
                    return Err(AppError::Validation(
                        "No cadets found. Please add cadets first.".into(),
                    ));
                }
                if select.is_empty() {
                    return roster_sheet(&snapshot.cadets);
                }
                let chosen: Vec<_> = snapshot
                    .cadets
                    .iter()
                    .filter(|c| select.iter().any(|r| c.is_referenced_by(r)))
                    .cloned()
                    .collect();
                if chosen.is_empty() {
                    return Err(AppError::Validation(
                        "Please select at least one cadet to export".into(),
                    ));
                }
                roster_sheet(&chosen)
            }
            ExportTarget::Attendance { date } => {
                let present = AttendanceLogic::present_on(snapshot, *date);
                if present.is_empty() {
                    return Err(AppError::Validation(format!(
                        "No cadets marked present on {date}"
                    )));
                }
                attendance_sheet(&present, *date)
            }
            ExportTarget::Monthly { from, to } => {
                let report = generate_report(snapshot, *from, *to)?;
                if !report.had_records {
                    warning(format!(
                        "No attendance records found between {from} and {to}"
                    ));
                }
                monthly_sheet(&report)
            }
        }
    }

    /// Write the export and return the path of the created file.
    pub fn export(
        snapshot: &RosterSnapshot,
        request: &ExportRequest,
        today: NaiveDate,
    ) -> AppResult<PathBuf> {
        let sheet = Self::build_sheet(snapshot, &request.target)?;

        fs::create_dir_all(&request.dir)?;
        let path = request.dir.join(format!(
            "{}.{}",
            Self::file_stem(&request.target, today),
            request.format.as_str()
        ));

        ensure_writable(&path, request.force)?;

        match request.format {
            ExportFormat::Xlsx => export_xlsx(&sheet, &path)?,
            ExportFormat::Csv => export_csv(&sheet, &path)?,
            ExportFormat::Json => export_json(&sheet, &path)?,
        }

        Ok(path)
    }
}
