use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::{AttendanceLogic, MarkRequest};
use crate::errors::{AppError, AppResult};
use crate::models::status::AttendanceStatus;
use crate::store::open_backend;
use crate::ui::messages::success;
use crate::utils::date::parse_date_arg;

fn parse_status(s: &str) -> AppResult<AttendanceStatus> {
    AttendanceStatus::from_input(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
}

/// `CADET=STATUS`; the split is on the last `=` so references may contain one.
fn parse_assignment(s: &str) -> AppResult<(String, AttendanceStatus)> {
    let (cadet, status) = s
        .rsplit_once('=')
        .ok_or_else(|| AppError::Validation(format!("Expected CADET=STATUS, got '{s}'")))?;
    Ok((cadet.trim().to_string(), parse_status(status)?))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Mark {
        date,
        all,
        set,
        legacy,
    } = cmd
    {
        let day = parse_date_arg(date)?;
        let request = MarkRequest {
            all: all.as_deref().map(parse_status).transpose()?,
            set: set
                .iter()
                .map(|s| parse_assignment(s))
                .collect::<AppResult<Vec<_>>>()?,
            legacy: *legacy,
        };

        let mut backend = open_backend(cfg)?;
        let summary = AttendanceLogic::mark(backend.as_mut(), day, &request)?;

        success(format!(
            "Attendance saved for {} ({} present, {} others)",
            summary.record.date_key(),
            summary.present,
            summary.others
        ));
    }
    Ok(())
}
