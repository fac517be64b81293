use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::core::view::RosterView;
use crate::errors::{AppError, AppResult};
use crate::store::open_backend;
use crate::ui::messages::{header, info};
use crate::utils::colors::colorize_status;
use crate::utils::date::parse_date_arg;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { date, search } = cmd {
        let day = parse_date_arg(date)?;
        let backend = open_backend(cfg)?;
        let snapshot = RosterView::open(backend.as_ref())?.snapshot();

        let lines = match AttendanceLogic::day_view(&snapshot, day) {
            Ok(lines) => lines,
            Err(AppError::NoAttendanceForDate(_)) => {
                info("No attendance found for this date.");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let present = lines.iter().filter(|l| l.status.is_present()).count();
        header(format!("Attendance for {day}"));

        let mut table = Table::with_headers(&["ID", "Name", "Status"]);
        for l in lines
            .iter()
            .filter(|l| search.as_deref().is_none_or(|s| l.cadet.matches_search(s)))
        {
            table.add_row(vec![
                l.cadet.unique_id.clone(),
                l.cadet.full_name.clone(),
                colorize_status(l.status),
            ]);
        }
        print!("{}", table.render());
        println!("\n{} present, {} others", present, lines.len() - present);
    }
    Ok(())
}
