use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::errors::AppResult;
use crate::models::cadet::Cadet;
use crate::store::open_backend;
use crate::ui::messages::info;
use crate::utils::colors::colorize_optional;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { search } = cmd {
        let backend = open_backend(cfg)?;
        let cadets = RosterLogic::list(backend.as_ref(), search.as_deref())?;

        if cadets.is_empty() {
            match search {
                Some(s) => info(format!("No cadets match '{s}'.")),
                None => info("No cadets found. Please add cadets first."),
            }
            return Ok(());
        }

        print!("{}", roster_table(&cadets).render());
        println!("\n{} cadet(s)", cadets.len());
    }
    Ok(())
}

fn roster_table(cadets: &[Cadet]) -> Table {
    let mut table = Table::with_headers(&[
        "ID", "Name", "Gender", "Regimental", "Phone", "Email", "Dept",
    ]);
    for c in cadets {
        table.add_row(vec![
            c.unique_id.clone(),
            c.full_name.clone(),
            c.gender.to_string(),
            c.regimental_number.clone(),
            c.phone.clone(),
            c.email.clone(),
            colorize_optional(c.department.as_deref()),
        ]);
    }
    table
}
