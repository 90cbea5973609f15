use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `pab` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pab",
    version,
    about = "Project Online to Azure DevOps bridge"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["pab", "--format", "raw", "--verbose", "projects"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Projects));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["pab", "sync", "6f1c", "--quiet"]).expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Sync { uid } if uid == "6f1c"));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["pab", "--format", "table", "projects"]).is_err());
    }

    #[test]
    fn sync_by_name_takes_one_positional() {
        let cli = Cli::try_parse_from(["pab", "sync-by-name", "Acme Rollout"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::SyncByName { name } if name == "Acme Rollout"));
    }

    #[test]
    fn sync_payload_accepts_stdin_marker() {
        let cli = Cli::try_parse_from(["pab", "sync-payload", "-"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::SyncPayload { path } if path == PathBuf::from("-")));
    }

    #[test]
    fn demo_dry_run_flag() {
        let cli = Cli::try_parse_from(["pab", "demo", "--dry-run"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Demo { dry_run: true }));
    }

    #[test]
    fn missing_positional_is_rejected() {
        assert!(Cli::try_parse_from(["pab", "project"]).is_err());
    }
}
