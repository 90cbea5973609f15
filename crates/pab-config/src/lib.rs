//! # pab-config
//!
//! Layered configuration loading for the bridge using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PAB_*` prefix, `__` as separator)
//! 2. Project-level `.pab/config.toml`
//! 3. User-level `~/.config/pab/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PAB_DEVOPS__PERSONAL_ACCESS_TOKEN` -> `devops.personal_access_token`,
//! `PAB_SYNC__LOOKUP_FAILURE` -> `sync.lookup_failure`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use pab_config::BridgeConfig;
//!
//! let config = BridgeConfig::load_with_dotenv().expect("config");
//!
//! if config.devops.is_configured() {
//!     println!("Target: {}/{}", config.devops.organization_url, config.devops.project);
//! }
//! ```

mod devops;
mod error;
mod pwa;
mod sync;

pub use devops::DevOpsConfig;
pub use error::ConfigError;
pub use pwa::PwaConfig;
pub use sync::SyncConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub devops: DevOpsConfig,
    #[serde(default)]
    pub pwa: PwaConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

impl BridgeConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".pab/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PAB_").split("__"))
    }

    /// Require the target section, as the sync commands cannot run without it.
    ///
    /// # Errors
    ///
    /// See [`DevOpsConfig::validate`].
    pub fn require_devops(&self) -> Result<&DevOpsConfig, ConfigError> {
        self.devops.validate()?;
        Ok(&self.devops)
    }

    /// Require the source section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when URL or token is missing.
    pub fn require_pwa(&self) -> Result<&PwaConfig, ConfigError> {
        let missing = self.pwa.missing_env();
        if missing.is_empty() {
            Ok(&self.pwa)
        } else {
            Err(ConfigError::NotConfigured {
                section: "pwa",
                missing,
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pab").join("config.toml"))
    }

    /// Load `.env` from the current directory, silently doing nothing if absent.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}
