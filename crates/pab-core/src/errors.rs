//! Cross-cutting error types for the bridge.
//!
//! Each port has its own error enum ([`SourceError`], [`TargetError`],
//! [`CredentialError`]) so adapters stay independent. [`SyncError`] is the
//! taxonomy the caller-facing surface converts into a
//! [`crate::SyncResult`].

use thiserror::Error;

use crate::enums::ErrorCode;

/// Failure to produce an `Authorization` header value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("credential is not configured")]
    Missing,

    #[error("credential unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by a [`crate::ports::ProjectSource`] adapter.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source rejected the credential (401/403).
    #[error("source authentication failed ({status})")]
    Auth { status: u16 },

    /// Source API returned a non-success status code.
    #[error("source API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a source response.
    #[error("source parse error: {0}")]
    Parse(String),

    /// Connection-level failure (DNS, TLS, timeout).
    #[error("source transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Errors raised by a [`crate::ports::WorkItemStore`] adapter.
#[derive(Debug, Error)]
pub enum TargetError {
    /// The target rejected the credential (401/403).
    #[error("target authentication failed ({status})")]
    Auth { status: u16 },

    /// A work-item write returned a non-success status.
    #[error("work item write failed ({status}): {body}")]
    WriteFailed { status: u16, body: String },

    /// A work-item query returned a non-success status.
    #[error("work item query failed ({status}): {body}")]
    QueryFailed { status: u16, body: String },

    /// A success response did not have the expected shape.
    #[error("malformed target response: {0}")]
    MalformedResponse(String),

    /// Connection-level failure (DNS, TLS, timeout).
    #[error("target transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl TargetError {
    /// Whether a failed parent lookup may fall back to creation.
    ///
    /// Only "the query ran but its answer is unusable" qualifies. Credential
    /// and connection failures would fail the creation the same way.
    #[must_use]
    pub const fn is_lookup_fallback_candidate(&self) -> bool {
        matches!(self, Self::QueryFailed { .. } | Self::MalformedResponse(_))
    }
}

/// Failure taxonomy surfaced to callers of the sync flows.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Pre-write validation rejected the project.
    #[error("validation failed: {}", .0.join(" "))]
    ValidationFailed(Vec<String>),

    /// A source entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Credential or authentication failure against either system.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// A target write returned a non-success status.
    #[error("write failed ({status}): {body}")]
    WriteFailed { status: u16, body: String },

    /// The caller violated the input contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Catch-all for anything else.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl SyncError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ValidationFailed(_) => ErrorCode::ValidationFailed,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::AuthFailed(_) => ErrorCode::AuthFailed,
            Self::WriteFailed { .. } => ErrorCode::WriteFailed,
            Self::InvalidArgument(_) => ErrorCode::InvalidPayload,
            Self::Unexpected(_) => ErrorCode::UnexpectedError,
        }
    }
}

impl From<SourceError> for SyncError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Auth { .. } | SourceError::Credential(_) => Self::AuthFailed(err.to_string()),
            SourceError::Api { .. } | SourceError::Parse(_) | SourceError::Transport(_) => {
                Self::Unexpected(err.to_string())
            }
        }
    }
}

impl From<TargetError> for SyncError {
    fn from(err: TargetError) -> Self {
        match err {
            TargetError::Auth { .. } | TargetError::Credential(_) => Self::AuthFailed(err.to_string()),
            TargetError::WriteFailed { status, body } => Self::WriteFailed { status, body },
            TargetError::QueryFailed { .. }
            | TargetError::MalformedResponse(_)
            | TargetError::Transport(_) => Self::Unexpected(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_classify_as_auth_failed() {
        let from_source: SyncError = SourceError::Auth { status: 401 }.into();
        let from_target: SyncError = TargetError::Auth { status: 403 }.into();
        let from_credential: SyncError = TargetError::Credential(CredentialError::Missing).into();

        assert_eq!(from_source.code(), ErrorCode::AuthFailed);
        assert_eq!(from_target.code(), ErrorCode::AuthFailed);
        assert_eq!(from_credential.code(), ErrorCode::AuthFailed);
    }

    #[test]
    fn write_failure_keeps_status_and_body() {
        let err: SyncError = TargetError::WriteFailed {
            status: 400,
            body: "TF401320: Rule Error".to_string(),
        }
        .into();

        assert_eq!(err.code(), ErrorCode::WriteFailed);
        let message = err.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("TF401320"));
    }

    #[test]
    fn transport_failures_are_unexpected() {
        let err: SyncError = SourceError::Transport("connection reset".to_string()).into();
        assert_eq!(err.code(), ErrorCode::UnexpectedError);
    }

    #[test]
    fn only_unusable_query_answers_allow_fallback() {
        assert!(TargetError::QueryFailed { status: 500, body: String::new() }.is_lookup_fallback_candidate());
        assert!(TargetError::MalformedResponse("x".to_string()).is_lookup_fallback_candidate());
        assert!(!TargetError::Auth { status: 401 }.is_lookup_fallback_candidate());
        assert!(!TargetError::Transport("down".to_string()).is_lookup_fallback_candidate());
    }

    #[test]
    fn validation_message_joins_entries() {
        let err = SyncError::ValidationFailed(vec!["a.".to_string(), "b.".to_string()]);
        assert_eq!(err.to_string(), "validation failed: a. b.");
    }
}
