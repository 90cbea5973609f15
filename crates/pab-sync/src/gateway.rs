//! Idempotent parent resolution and child creation against a [`WorkItemStore`].

use std::sync::Arc;

use pab_config::SyncConfig;
use pab_core::ports::WorkItemStore;
use pab_core::{LookupFailurePolicy, ProjectRecord, TargetError, TaskRecord, WorkItemId};

use crate::mapper;

/// Creates work items for projects and tasks.
///
/// The project name is the idempotency key for parents: a parent whose title
/// already matches is reused. Children are always created.
pub struct WorkItemGateway<S> {
    store: Arc<S>,
    parent_type: String,
    child_type: String,
    source_label: String,
    lookup_failure: LookupFailurePolicy,
}

impl<S: WorkItemStore> WorkItemGateway<S> {
    #[must_use]
    pub fn new(store: Arc<S>, config: &SyncConfig) -> Self {
        Self {
            store,
            parent_type: config.parent_work_item_type.clone(),
            child_type: config.child_work_item_type.clone(),
            source_label: config.source_label.clone(),
            lookup_failure: config.lookup_failure,
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the id of the parent titled like the project, creating it if
    /// none exists. The first match wins when several exist.
    ///
    /// # Errors
    ///
    /// Creation errors always propagate. Lookup errors propagate when they
    /// are not fallback candidates or the policy is
    /// [`LookupFailurePolicy::Abort`].
    pub async fn get_or_create_parent(&self, project: &ProjectRecord) -> Result<WorkItemId, TargetError> {
        let name = project.name.trim();
        if !name.is_empty() {
            match self.store.find_by_title(&self.parent_type, name).await {
                Ok(found) => {
                    if let Some(existing) = found.first() {
                        tracing::info!(project = name, id = %existing.id, "reusing existing parent");
                        return Ok(existing.id);
                    }
                }
                Err(err) if err.is_lookup_fallback_candidate() => match self.lookup_failure {
                    LookupFailurePolicy::CreateOnFailure => {
                        tracing::warn!(project = name, %err, "parent lookup failed, creating a new parent");
                    }
                    LookupFailurePolicy::Abort => return Err(err),
                },
                Err(err) => return Err(err),
            }
        }

        let document = mapper::build_parent_patch(project, &self.source_label);
        let id = self.store.create_work_item(&self.parent_type, &document).await?;
        tracing::info!(project = %project.name, %id, work_item_type = %self.parent_type, "created parent");
        Ok(id)
    }

    /// Create the child work item for `task` under `parent`.
    ///
    /// # Errors
    ///
    /// Propagates the store's creation error.
    pub async fn create_child(&self, task: &TaskRecord, parent: WorkItemId) -> Result<WorkItemId, TargetError> {
        let parent_url = self.store.work_item_url(parent);
        let document = mapper::build_child_patch(task, &parent_url, &self.source_label);
        let id = self.store.create_work_item(&self.child_type, &document).await?;
        tracing::info!(task = %task.name, %id, %parent, "created child");
        Ok(id)
    }
}
