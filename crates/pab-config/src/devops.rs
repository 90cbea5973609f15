//! Azure DevOps (target system) configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_api_version() -> String {
    "7.1".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Deserialize, Serialize)]
pub struct DevOpsConfig {
    /// Organization URL (e.g., `https://dev.azure.com/contoso`).
    #[serde(default)]
    pub organization_url: String,

    /// Team project that receives the work items.
    #[serde(default)]
    pub project: String,

    /// Personal access token with work-item read/write scope.
    #[serde(default)]
    pub personal_access_token: String,

    /// REST API version sent as `api-version`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DevOpsConfig {
    fn default() -> Self {
        Self {
            organization_url: String::new(),
            project: String::new(),
            personal_access_token: String::new(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for DevOpsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevOpsConfig")
            .field("organization_url", &self.organization_url)
            .field("project", &self.project)
            .field("personal_access_token", &redacted(&self.personal_access_token))
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DevOpsConfig {
    /// Check if the DevOps config has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        self.missing_env().is_empty()
    }

    /// Environment variables for the required fields that are still empty.
    #[must_use]
    pub fn missing_env(&self) -> Vec<&'static str> {
        [
            (&self.organization_url, "PAB_DEVOPS__ORGANIZATION_URL"),
            (&self.project, "PAB_DEVOPS__PROJECT"),
            (&self.personal_access_token, "PAB_DEVOPS__PERSONAL_ACCESS_TOKEN"),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, var)| var)
        .collect()
    }

    /// Reject configurations the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when a required field is empty
    /// and [`ConfigError::InvalidValue`] for a non-HTTP organization URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = self.missing_env();
        if !missing.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "devops",
                missing,
            });
        }
        let url = self.organization_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "devops.organization_url",
                reason: format!("expected an http(s) URL, got '{url}'"),
            });
        }
        Ok(())
    }
}

pub(crate) fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}
