//! Personal access token credential for Azure DevOps.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pab_core::CredentialError;
use pab_core::ports::CredentialProvider;

/// Sends a PAT as HTTP Basic auth with an empty user name.
#[derive(Clone)]
pub struct PersonalAccessToken {
    token: String,
}

impl PersonalAccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PersonalAccessToken(<redacted>)")
    }
}

impl CredentialProvider for PersonalAccessToken {
    fn authorization(&self) -> Result<String, CredentialError> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(CredentialError::Missing);
        }
        Ok(format!("Basic {}", STANDARD.encode(format!(":{token}"))))
    }
}
