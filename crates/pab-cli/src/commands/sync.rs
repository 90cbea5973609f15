use std::io::Read;
use std::path::Path;

use anyhow::Context;
use pab_config::BridgeConfig;
use pab_core::ProjectPayload;

use crate::cli::GlobalFlags;
use crate::context;
use crate::output::output;

pub async fn by_uid(uid: &str, config: &BridgeConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = context::live_service(config)?;
    output(&service.sync_by_uid(uid).await, flags.format)
}

pub async fn by_name(name: &str, config: &BridgeConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = context::live_service(config)?;
    output(&service.sync_by_name(name).await, flags.format)
}

pub async fn payload(path: &Path, config: &BridgeConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = read_payload(path)?;
    if needs_source(&raw) {
        let service = context::live_service(config)?;
        output(&service.sync_payload_json(&raw).await, flags.format)
    } else {
        let service = context::target_only_service(config)?;
        output(&service.sync_payload_json(&raw).await, flags.format)
    }
}

/// Only a well-formed source-to-target payload reads Project Online. Target-only
/// and unparseable payloads are handled without source credentials.
fn needs_source(raw: &str) -> bool {
    serde_json::from_str::<ProjectPayload>(raw)
        .is_ok_and(|payload| payload.mode.unwrap_or_default().reads_source())
}

fn read_payload(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read payload from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read payload file {}", path.display()))
}
