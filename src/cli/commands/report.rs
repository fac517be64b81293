use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{MonthlyReport, default_period, generate_report};
use crate::core::view::RosterView;
use crate::errors::AppResult;
use crate::models::status::AttendanceStatus;
use crate::store::open_backend;
use crate::ui::messages::{header, warning};
use crate::utils::colors::colorize_status;
use crate::utils::date::{parse_date_arg, today};
use crate::utils::table::Table;
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { from, to } = cmd {
        let (default_from, default_to) = default_period(today());
        let from = from.as_deref().map(parse_date_arg).transpose()?.unwrap_or(default_from);
        let to = to.as_deref().map(parse_date_arg).transpose()?.unwrap_or(default_to);

        let backend = open_backend(cfg)?;
        let snapshot = RosterView::open(backend.as_ref())?.snapshot();
        let report = generate_report(&snapshot, from, to)?;

        if !report.had_records {
            warning(format!(
                "No attendance records found between {from} and {to}"
            ));
        }

        header(format!("Attendance {from} → {to}"));
        print!("{}", matrix_table(&report).render());
        print_legend();
    }
    Ok(())
}

/// Day-of-month column headers keep the matrix narrow.
fn matrix_table(report: &MonthlyReport) -> Table {
    let day_headers: Vec<String> = report.dates.iter().map(|d| format!("{:02}", d.day())).collect();
    let mut headers: Vec<&str> = vec!["ID", "Name"];
    headers.extend(day_headers.iter().map(String::as_str));
    headers.push("Total");

    let mut table = Table::with_headers(&headers);
    for row in &report.rows {
        let mut cells = vec![row.unique_id.clone(), row.name.clone()];
        cells.extend(
            report
                .dates
                .iter()
                .map(|d| row.status_on(d).map(colorize_status).unwrap_or_default()),
        );
        cells.push(row.total_present.to_string());
        table.add_row(cells);
    }
    table
}

fn print_legend() {
    let legend: Vec<String> = AttendanceStatus::ALL
        .iter()
        .map(|s| format!("{} = {}", colorize_status(*s), s.label()))
        .collect();
    println!("\n{}", legend.join("  "));
}
