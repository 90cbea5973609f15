use pab_config::BridgeConfig;

use crate::cli::{Commands, GlobalFlags};

mod demo;
mod projects;
mod sync;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, config: &BridgeConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Projects => projects::list(config, flags).await,
        Commands::Project { uid } => projects::get(&uid, config, flags).await,
        Commands::Sync { uid } => sync::by_uid(&uid, config, flags).await,
        Commands::SyncByName { name } => sync::by_name(&name, config, flags).await,
        Commands::SyncPayload { path } => sync::payload(&path, config, flags).await,
        Commands::Demo { dry_run } => demo::run(dry_run, config, flags).await,
    }
}
