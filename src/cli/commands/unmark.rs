use super::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::errors::AppResult;
use crate::store::open_backend;
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date_arg;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Unmark { date, yes } = cmd {
        let day = parse_date_arg(date)?;

        let prompt = format!("Delete the attendance record of {day}? This action is irreversible.");
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut backend = open_backend(cfg)?;
        AttendanceLogic::unmark(backend.as_mut(), day)?;
        success(format!("Attendance for {day} has been deleted."));
    }
    Ok(())
}
