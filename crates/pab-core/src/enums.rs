//! Closed enums for sync mode, error codes, and lookup policy.
//!
//! All enums use `snake_case` serialization except [`ErrorCode`], which keeps
//! the PascalCase codes existing callers already match on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// SyncMode
// ---------------------------------------------------------------------------

/// Where the project data for a sync comes from.
///
/// - `SourceToTarget`: the project is looked up in the source system and
///   missing fields are filled from it before pushing to the target.
/// - `TargetOnly`: the caller's payload is pushed as-is; the source system is
///   never contacted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    #[default]
    #[serde(alias = "PwaProjectToDevOps")]
    SourceToTarget,
    #[serde(alias = "DevOpsOnly")]
    TargetOnly,
}

impl SyncMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SourceToTarget => "source_to_target",
            Self::TargetOnly => "target_only",
        }
    }

    /// Whether the sync needs to read the source system first.
    #[must_use]
    pub const fn reads_source(self) -> bool {
        match self {
            Self::SourceToTarget => true,
            Self::TargetOnly => false,
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "source_to_target" | "PwaProjectToDevOps" => Ok(Self::SourceToTarget),
            "target_only" | "DevOpsOnly" => Ok(Self::TargetOnly),
            other => Err(format!(
                "unknown sync mode '{other}' (expected source_to_target or target_only)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// ErrorCode
// ---------------------------------------------------------------------------

/// Machine-readable failure code attached to a [`crate::SyncResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    ValidationFailed,
    InvalidPayload,
    #[serde(alias = "ProjectNotFound")]
    NotFound,
    AmbiguousName,
    AuthFailed,
    WriteFailed,
    UnexpectedError,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "ValidationFailed",
            Self::InvalidPayload => "InvalidPayload",
            Self::NotFound => "NotFound",
            Self::AmbiguousName => "AmbiguousName",
            Self::AuthFailed => "AuthFailed",
            Self::WriteFailed => "WriteFailed",
            Self::UnexpectedError => "UnexpectedError",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LookupFailurePolicy
// ---------------------------------------------------------------------------

/// What the gateway does when the parent lookup query cannot be completed.
///
/// ```text
/// create_on_failure: lookup error → warn → create parent (may duplicate)
/// abort:             lookup error → project fails, nothing created
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupFailurePolicy {
    #[default]
    CreateOnFailure,
    Abort,
}

impl LookupFailurePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateOnFailure => "create_on_failure",
            Self::Abort => "abort",
        }
    }
}

impl fmt::Display for LookupFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("\"source_to_target\"", SyncMode::SourceToTarget)]
    #[case("\"PwaProjectToDevOps\"", SyncMode::SourceToTarget)]
    #[case("\"target_only\"", SyncMode::TargetOnly)]
    #[case("\"DevOpsOnly\"", SyncMode::TargetOnly)]
    fn sync_mode_accepts_current_and_legacy_names(#[case] json: &str, #[case] expected: SyncMode) {
        let mode: SyncMode = serde_json::from_str(json).unwrap();
        assert_eq!(mode, expected);
    }

    #[test]
    fn sync_mode_rejects_unknown_names() {
        assert!(serde_json::from_str::<SyncMode>("\"both_ways\"").is_err());
        assert!("both_ways".parse::<SyncMode>().is_err());
    }

    #[test]
    fn sync_mode_from_str_trims() {
        assert_eq!(" DevOpsOnly ".parse::<SyncMode>().unwrap(), SyncMode::TargetOnly);
    }

    #[test]
    fn only_source_to_target_reads_source() {
        assert!(SyncMode::SourceToTarget.reads_source());
        assert!(!SyncMode::TargetOnly.reads_source());
    }

    #[test]
    fn error_code_serializes_pascal_case() {
        let json = serde_json::to_string(&ErrorCode::ValidationFailed).unwrap();
        assert_eq!(json, "\"ValidationFailed\"");
        assert_eq!(ErrorCode::AuthFailed.to_string(), "AuthFailed");
    }

    #[test]
    fn lookup_policy_defaults_to_create() {
        assert_eq!(LookupFailurePolicy::default(), LookupFailurePolicy::CreateOnFailure);
        let policy: LookupFailurePolicy = serde_json::from_str("\"abort\"").unwrap();
        assert_eq!(policy, LookupFailurePolicy::Abort);
    }
}
