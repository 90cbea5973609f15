//! Config bootstrap and service wiring for command handlers.

use std::sync::Arc;

use anyhow::Context;
use pab_config::BridgeConfig;
use pab_devops::DevOpsClient;
use pab_pwa::ProjectOnlineClient;
use pab_sync::BridgeService;
use pab_sync::memory::{InMemoryProjectSource, InMemoryWorkItemStore};

/// Service over the live Project Online and Azure DevOps APIs.
pub type LiveService = BridgeService<ProjectOnlineClient, DevOpsClient>;

pub fn load_config() -> anyhow::Result<BridgeConfig> {
    Ok(BridgeConfig::load_with_dotenv()?)
}

pub fn live_service(config: &BridgeConfig) -> anyhow::Result<LiveService> {
    let source = pwa_client(config)?;
    let target = devops_client(config)?;
    Ok(BridgeService::new(Arc::new(source), Arc::new(target), &config.sync))
}

/// Service that writes to Azure DevOps but has no source projects.
pub fn target_only_service(
    config: &BridgeConfig,
) -> anyhow::Result<BridgeService<InMemoryProjectSource, DevOpsClient>> {
    let target = devops_client(config)?;
    Ok(BridgeService::new(
        Arc::new(InMemoryProjectSource::default()),
        Arc::new(target),
        &config.sync,
    ))
}

/// Service with no external calls at all.
pub fn dry_run_service(config: &BridgeConfig) -> BridgeService<InMemoryProjectSource, InMemoryWorkItemStore> {
    BridgeService::new(
        Arc::new(InMemoryProjectSource::default()),
        Arc::new(InMemoryWorkItemStore::new()),
        &config.sync,
    )
}

fn pwa_client(config: &BridgeConfig) -> anyhow::Result<ProjectOnlineClient> {
    let pwa = config.require_pwa()?;
    ProjectOnlineClient::from_config(pwa).context("failed to build Project Online client")
}

fn devops_client(config: &BridgeConfig) -> anyhow::Result<DevOpsClient> {
    let devops = config.require_devops()?;
    DevOpsClient::from_config(devops).context("failed to build Azure DevOps client")
}
