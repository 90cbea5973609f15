//! Batch synchronization of projects and their tasks.

use std::slice;
use std::sync::Arc;

use pab_config::SyncConfig;
use pab_core::ports::WorkItemStore;
use pab_core::validation::validate_project;
use pab_core::{ProjectRecord, SyncResult};

use crate::gateway::WorkItemGateway;

/// Drives validation, parent resolution, and child creation for a batch.
///
/// Projects and tasks are processed one at a time in input order. Failures
/// are counted into the returned [`SyncResult`]; nothing escapes a batch.
pub struct SyncEngine<S> {
    gateway: WorkItemGateway<S>,
}

impl<S: WorkItemStore> SyncEngine<S> {
    #[must_use]
    pub const fn new(gateway: WorkItemGateway<S>) -> Self {
        Self { gateway }
    }

    #[must_use]
    pub fn from_config(store: Arc<S>, config: &SyncConfig) -> Self {
        Self::new(WorkItemGateway::new(store, config))
    }

    #[must_use]
    pub const fn gateway(&self) -> &WorkItemGateway<S> {
        &self.gateway
    }

    /// Sync every project in `projects`.
    pub async fn sync_batch(&self, projects: &[ProjectRecord]) -> SyncResult {
        let mut result = SyncResult::new();

        for project in projects {
            result.projects_processed += 1;
            tracing::info!(uid = %project.uid, name = %project.name, tasks = project.tasks.len(), "syncing project");

            let messages = validate_project(project);
            if !messages.is_empty() {
                tracing::warn!(uid = %project.uid, errors = messages.len(), "project failed validation");
                result.record_validation(messages);
                continue;
            }

            let parent = match self.gateway.get_or_create_parent(project).await {
                Ok(id) if id.is_valid() => id,
                Ok(id) => {
                    tracing::error!(uid = %project.uid, %id, "target returned an invalid parent id");
                    result.record_error();
                    continue;
                }
                Err(err) => {
                    tracing::error!(uid = %project.uid, %err, "parent work item failed");
                    result.record_error();
                    continue;
                }
            };
            result.record_created();

            for task in &project.tasks {
                match self.gateway.create_child(task, parent).await {
                    Ok(_) => result.record_created(),
                    Err(err) => {
                        tracing::error!(task_uid = %task.uid, task_name = %task.name, %err, "child work item failed");
                        result.record_error();
                    }
                }
            }
        }

        result.finalize();
        result
    }

    /// Sync a single project, rejecting it up front when invalid.
    ///
    /// A rejected project is not counted as processed.
    pub async fn sync_one(&self, project: &ProjectRecord) -> SyncResult {
        let messages = validate_project(project);
        if !messages.is_empty() {
            return SyncResult::validation_failed(messages);
        }
        self.sync_batch(slice::from_ref(project)).await
    }
}
