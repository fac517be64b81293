use super::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::errors::AppResult;
use crate::store::open_backend;
use crate::ui::messages::{info, success};
use std::collections::HashSet;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { cadets, yes } = cmd {
        let mut backend = open_backend(cfg)?;

        // resolve everything first so a typo deletes nothing
        let mut targets = cadets
            .iter()
            .map(|r| RosterLogic::resolve(backend.as_ref(), r))
            .collect::<AppResult<Vec<_>>>()?;
        // the same cadet may be named twice (e.g. by id and display ID)
        let mut seen = HashSet::new();
        targets.retain(|c| seen.insert(c.id.clone()));

        let names: Vec<String> = targets
            .iter()
            .map(|c| format!("{} ({})", c.full_name, c.unique_id))
            .collect();
        let prompt = format!(
            "Delete {}? Attendance history is kept.",
            names.join(", ")
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        for c in &targets {
            RosterLogic::delete(backend.as_mut(), &c.id)?;
            success(format!("Cadet {} ({}) deleted.", c.full_name, c.unique_id));
        }
    }
    Ok(())
}
