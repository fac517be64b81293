use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::log::audit;
use crate::errors::AppResult;
use crate::store::{Backend, open_backend};
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the selected store, applying pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let storage = cli.storage.unwrap_or_default();
    let cfg = Config::init_all(cli.db.as_deref(), cli.test, storage)?;

    println!("⚙️  Initializing cadetroster…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Store       : {}", cfg.active_store_path());

    let mut backend = open_backend(&cfg)?;
    audit(
        backend.as_mut(),
        "init",
        "",
        &format!("Store initialized at {}", cfg.active_store_path()),
    );

    success(format!("Initialized {}", backend.describe()));
    Ok(())
}
