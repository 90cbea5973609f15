use pab_config::BridgeConfig;

use crate::cli::GlobalFlags;
use crate::context;
use crate::output::output;

pub async fn list(config: &BridgeConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = context::live_service(config)?;
    let projects = service.list_projects().await?;
    output(&projects, flags.format)
}

pub async fn get(uid: &str, config: &BridgeConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = context::live_service(config)?;
    let project = service.get_project(uid).await?;
    output(&project, flags.format)
}
