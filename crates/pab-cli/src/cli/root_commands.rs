use std::path::PathBuf;

use clap::Subcommand;

/// Top-level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List projects published in Project Online.
    Projects,

    /// Show one Project Online project with its tasks.
    Project {
        /// Project identifier (GUID).
        uid: String,
    },

    /// Sync a Project Online project, by identifier, into Azure DevOps.
    Sync {
        /// Project identifier (GUID).
        uid: String,
    },

    /// Sync the one Project Online project with this name (case-insensitive).
    SyncByName {
        /// Project name.
        name: String,
    },

    /// Sync a project described by a JSON payload.
    SyncPayload {
        /// Payload file, or `-` for stdin.
        path: PathBuf,
    },

    /// Sync a built-in sample project.
    Demo {
        /// Run against in-memory adapters instead of Azure DevOps.
        #[arg(long)]
        dry_run: bool,
    },
}
