use pab_config::BridgeConfig;

use crate::cli::GlobalFlags;
use crate::context;
use crate::output::output;

pub async fn run(dry_run: bool, config: &BridgeConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = if dry_run {
        let service = context::dry_run_service(config);
        let result = service.sync_demo().await;
        if !flags.quiet {
            let written = service.engine().gateway().store().items().len();
            eprintln!("dry run: {written} work items recorded in memory, nothing sent to Azure DevOps");
        }
        result
    } else {
        context::target_only_service(config)?.sync_demo().await
    };
    output(&result, flags.format)
}
