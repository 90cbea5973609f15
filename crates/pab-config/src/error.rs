//! Errors raised while loading or checking bridge configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML layer or `PAB_*` variable could not be read into [`crate::BridgeConfig`].
    #[error("failed to load pab configuration: {0}")]
    Load(#[from] figment::Error),

    /// A section the command needs is incomplete. `missing` holds the
    /// environment variables that would fill the empty fields.
    #[error("[{section}] is not configured; set {}", missing.join(", "))]
    NotConfigured {
        section: &'static str,
        missing: Vec<&'static str>,
    },

    /// A field is present but unusable.
    #[error("{field} is invalid: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
