use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::store::open_backend;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let backend = open_backend(cfg)?;
        LogLogic::print_log(backend.as_ref())?;
    }

    Ok(())
}
