//! The aggregate returned by every sync flow.

use serde::{Deserialize, Serialize};

use crate::enums::ErrorCode;
use crate::errors::SyncError;

/// Message used when a batch finished without errors.
pub const MESSAGE_COMPLETED: &str = "Sync completed.";
/// Message used when a batch finished with at least one error.
pub const MESSAGE_COMPLETED_WITH_ERRORS: &str = "Sync completed with some errors.";

/// Counts and errors accumulated over one batch sync call.
///
/// One instance is created per call and never shared. Partial success
/// (parent created, some tasks failed) shows up as nonzero
/// `work_items_created` together with nonzero `errors` and `success = false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    #[serde(default)]
    pub validation_errors: Vec<String>,
    pub projects_processed: u32,
    pub work_items_created: u32,
    /// No update path exists yet, so this stays zero.
    pub work_items_updated: u32,
    pub errors: u32,
}

impl SyncResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Result for a project rejected by pre-write validation.
    #[must_use]
    pub fn validation_failed(validation_errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: Some(validation_errors.join(" ")),
            error_code: Some(ErrorCode::ValidationFailed),
            errors: count(validation_errors.len()),
            validation_errors,
            ..Self::default()
        }
    }

    /// Result for a request that failed before any project was processed.
    #[must_use]
    pub fn failure(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            error_code: Some(code),
            errors: 1,
            ..Self::default()
        }
    }

    /// Convert a [`SyncError`] raised outside the batch loop.
    #[must_use]
    pub fn from_error(err: &SyncError) -> Self {
        match err {
            SyncError::ValidationFailed(messages) => Self::validation_failed(messages.clone()),
            other => Self::failure(other.to_string(), other.code()),
        }
    }

    /// Record one failed item.
    pub const fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Record one created work item.
    pub const fn record_created(&mut self) {
        self.work_items_created += 1;
    }

    /// Record the validation messages of one rejected project.
    pub fn record_validation(&mut self, messages: Vec<String>) {
        self.errors += count(messages.len());
        self.validation_errors.extend(messages);
    }

    /// Set the success flag and a default message.
    ///
    /// A message already present is kept.
    pub fn finalize(&mut self) {
        self.success = self.errors == 0;
        if self.message.as_deref().is_none_or(|m| m.trim().is_empty()) {
            let message = if self.errors == 0 {
                MESSAGE_COMPLETED
            } else {
                MESSAGE_COMPLETED_WITH_ERRORS
            };
            self.message = Some(message.to_string());
        }
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
