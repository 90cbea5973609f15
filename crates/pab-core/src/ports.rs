//! Ports implemented by the source and target adapters.
//!
//! The sync engine only talks to these traits. HTTP transports live in
//! `pab-pwa` and `pab-devops`; in-memory adapters live in `pab-sync::memory`.

use async_trait::async_trait;

use crate::entities::{ProjectRecord, ProjectSummary, WorkItemId, WorkItemRef};
use crate::errors::{CredentialError, SourceError, TargetError};
use crate::patch::PatchDocument;

/// Read access to the project-management source system.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Lists all published projects, without tasks.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport, authentication, or parse failure.
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, SourceError>;

    /// Loads one project with its tasks.
    ///
    /// Returns `None` when the project does not exist.
    async fn get_project_with_tasks(&self, uid: &str) -> Result<Option<ProjectRecord>, SourceError>;
}

/// Query and write access to the work-tracking target system.
#[async_trait]
pub trait WorkItemStore: Send + Sync {
    /// Finds work items of `work_item_type` whose title equals `title`,
    /// compared case-sensitively.
    ///
    /// Results keep the order the target's index returned them in.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::QueryFailed`] for a non-success response and
    /// [`TargetError::MalformedResponse`] for an unreadable body.
    async fn find_by_title(
        &self,
        work_item_type: &str,
        title: &str,
    ) -> Result<Vec<WorkItemRef>, TargetError>;

    /// Creates a work item from a patch document and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::WriteFailed`] with status and body for a
    /// non-success response, or [`TargetError::MalformedResponse`] when the
    /// success body carries no integer `id`.
    async fn create_work_item(
        &self,
        work_item_type: &str,
        document: &PatchDocument,
    ) -> Result<WorkItemId, TargetError>;

    /// Resource URL of a work item, as used in relation links.
    fn work_item_url(&self, id: WorkItemId) -> String;
}

/// Supplies the `Authorization` header value for outgoing requests.
///
/// Injected into a transport at construction so the engine never handles
/// credentials.
pub trait CredentialProvider: Send + Sync {
    /// Full header value, e.g. `Basic ...` or `Bearer ...`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when no credential is available.
    fn authorization(&self) -> Result<String, CredentialError>;
}
