//! Static bearer token credential for the `ProjectServer` REST API.

use pab_core::CredentialError;
use pab_core::ports::CredentialProvider;

/// Sends a pre-acquired access token as `Bearer`.
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

impl CredentialProvider for BearerToken {
    fn authorization(&self) -> Result<String, CredentialError> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(CredentialError::Missing);
        }
        Ok(format!("Bearer {token}"))
    }
}
