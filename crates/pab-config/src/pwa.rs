//! Project Online (source system) configuration.

use serde::{Deserialize, Serialize};

use crate::devops::redacted;

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Deserialize, Serialize)]
pub struct PwaConfig {
    /// PWA site URL (e.g., `https://contoso.sharepoint.com/sites/pwa`).
    #[serde(default)]
    pub url: String,

    /// Bearer token for the `ProjectServer` REST API. Acquiring it is out of
    /// scope; supply a token minted elsewhere.
    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PwaConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            access_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for PwaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PwaConfig")
            .field("url", &self.url)
            .field("access_token", &redacted(&self.access_token))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl PwaConfig {
    /// Check if the PWA config has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        self.missing_env().is_empty()
    }

    /// Environment variables for the required fields that are still empty.
    #[must_use]
    pub fn missing_env(&self) -> Vec<&'static str> {
        [(&self.url, "PAB_PWA__URL"), (&self.access_token, "PAB_PWA__ACCESS_TOKEN")]
            .into_iter()
            .filter(|(value, _)| value.trim().is_empty())
            .map(|(_, var)| var)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!PwaConfig::default().is_configured());
    }

    #[test]
    fn configured_when_url_and_token_set() {
        let config = PwaConfig {
            url: "https://contoso.sharepoint.com/sites/pwa".into(),
            access_token: "eyJ0eXAi".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn missing_env_lists_only_empty_fields() {
        let config = PwaConfig {
            url: "https://contoso.sharepoint.com/sites/pwa".into(),
            ..Default::default()
        };
        assert_eq!(config.missing_env(), vec!["PAB_PWA__ACCESS_TOKEN"]);
    }
}
