use super::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::errors::AppResult;
use crate::store::{CadetStore, open_backend};
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dedupe { yes } = cmd {
        let mut backend = open_backend(cfg)?;

        let duplicates = RosterLogic::find_duplicates(&backend.list_cadets()?);
        if duplicates.is_empty() {
            info("No duplicate regimental numbers found.");
            return Ok(());
        }

        for c in &duplicates {
            println!(
                "  {} {} (Regimental Number {})",
                c.unique_id, c.full_name, c.regimental_number
            );
        }

        let prompt = format!(
            "Remove {} duplicate cadet(s)? The first cadet of each regimental number is kept.",
            duplicates.len()
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = RosterLogic::dedupe(backend.as_mut())?;
        success(format!("Removed {} duplicate cadet(s).", removed.len()));
    }
    Ok(())
}
