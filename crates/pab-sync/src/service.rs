//! Caller-facing sync flows.
//!
//! Each flow resolves its input against the source system, validates it, and
//! hands it to the [`SyncEngine`]. Business failures come back as a failed
//! [`SyncResult`] with an [`ErrorCode`], never as an `Err`.

use std::sync::Arc;

use chrono::Utc;
use pab_config::SyncConfig;
use pab_core::ports::{ProjectSource, WorkItemStore};
use pab_core::validation::PROJECT_NAME_REQUIRED;
use pab_core::{
    ErrorCode, ProjectPayload, ProjectRecord, ProjectSummary, SourceError, SyncError, SyncMode,
    SyncResult,
};
use uuid::Uuid;

use crate::demo::demo_projects;
use crate::orchestrator::SyncEngine;

pub const INVALID_PAYLOAD: &str = "Invalid project payload.";
pub const AMBIGUOUS_NAME: &str = "Multiple projects share that name. Please specify a unique one.";
pub const TASKS_NOT_LOADED: &str = "The project was found but its tasks could not be loaded.";

/// Sync flows over one source and one target.
pub struct BridgeService<Src, St> {
    source: Arc<Src>,
    engine: SyncEngine<St>,
    source_label: String,
}

impl<Src, St> BridgeService<Src, St>
where
    Src: ProjectSource,
    St: WorkItemStore,
{
    #[must_use]
    pub fn new(source: Arc<Src>, store: Arc<St>, config: &SyncConfig) -> Self {
        Self {
            source,
            engine: SyncEngine::from_config(store, config),
            source_label: config.source_label.clone(),
        }
    }

    #[must_use]
    pub const fn engine(&self) -> &SyncEngine<St> {
        &self.engine
    }

    /// All projects published in the source system.
    ///
    /// # Errors
    ///
    /// Returns the classified source failure.
    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>, SyncError> {
        Ok(self.source.list_projects().await?)
    }

    /// One project with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotFound`] when the source has no such project.
    pub async fn get_project(&self, uid: &str) -> Result<ProjectRecord, SyncError> {
        self.source
            .get_project_with_tasks(uid)
            .await?
            .ok_or_else(|| SyncError::NotFound {
                entity: "project".to_string(),
                id: uid.to_string(),
            })
    }

    /// Parse a JSON payload and sync it. `null` and unparsable bodies are
    /// rejected as invalid payloads.
    pub async fn sync_payload_json(&self, raw: &str) -> SyncResult {
        match serde_json::from_str::<Option<ProjectPayload>>(raw) {
            Ok(payload) => self.sync_payload(payload).await,
            Err(err) => {
                tracing::warn!(%err, "unreadable project payload");
                SyncResult::failure(format!("{INVALID_PAYLOAD} {err}"), ErrorCode::InvalidPayload)
            }
        }
    }

    /// Sync a caller-supplied project.
    ///
    /// In [`SyncMode::SourceToTarget`] the name must match a source project,
    /// which fills in a missing identifier and dates. In
    /// [`SyncMode::TargetOnly`] a missing identifier is generated.
    pub async fn sync_payload(&self, payload: Option<ProjectPayload>) -> SyncResult {
        let Some(mut payload) = payload else {
            return SyncResult::failure(INVALID_PAYLOAD, ErrorCode::InvalidPayload);
        };
        let Some(name) = payload.trimmed_name().map(str::to_string) else {
            return SyncResult::validation_failed(vec![PROJECT_NAME_REQUIRED.to_string()]);
        };
        let mode = payload.mode.unwrap_or_default();

        let uid = match mode {
            SyncMode::SourceToTarget => {
                let projects = match self.source.list_projects().await {
                    Ok(projects) => projects,
                    Err(err) => return self.source_failure(&name, err),
                };
                let Some(matched) = projects.into_iter().find(|p| same_name(&p.name, &name)) else {
                    return self.name_not_found(&name);
                };
                payload.start_date = payload.start_date.or(matched.start_date);
                payload.finish_date = payload.finish_date.or(matched.finish_date);
                payload.uid.take().filter(|uid| !uid.trim().is_empty()).unwrap_or(matched.uid)
            }
            SyncMode::TargetOnly => payload
                .uid
                .take()
                .filter(|uid| !uid.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
        };

        let record = payload.into_record(uid);
        tracing::info!(uid = %record.uid, name = %record.name, %mode, "syncing project payload");
        self.engine.sync_one(&record).await
    }

    /// Sync the source project with identifier `uid`.
    pub async fn sync_by_uid(&self, uid: &str) -> SyncResult {
        let project = match self.source.get_project_with_tasks(uid).await {
            Ok(Some(project)) => project,
            Ok(None) => {
                return SyncResult::failure(
                    format!("Project {uid} not found in {}.", self.source_label),
                    ErrorCode::NotFound,
                );
            }
            Err(err) => return self.source_failure(uid, err),
        };
        self.engine.sync_one(&project).await
    }

    /// Sync the one source project whose name matches `name`, ignoring case.
    pub async fn sync_by_name(&self, name: &str) -> SyncResult {
        let name = name.trim();
        if name.is_empty() {
            return SyncResult::failure(PROJECT_NAME_REQUIRED, ErrorCode::InvalidPayload);
        }

        let projects = match self.source.list_projects().await {
            Ok(projects) => projects,
            Err(err) => return self.source_failure(name, err),
        };
        let mut matches: Vec<ProjectSummary> = projects
            .into_iter()
            .filter(|p| same_name(&p.name, name))
            .collect();
        let matched = match matches.len() {
            0 => return self.name_not_found(name),
            1 => matches.remove(0),
            count => {
                tracing::warn!(name, count, "project name is ambiguous");
                return SyncResult::failure(AMBIGUOUS_NAME, ErrorCode::AmbiguousName);
            }
        };

        let project = match self.source.get_project_with_tasks(&matched.uid).await {
            Ok(Some(project)) => project,
            Ok(None) => return SyncResult::failure(TASKS_NOT_LOADED, ErrorCode::NotFound),
            Err(err) => return self.source_failure(name, err),
        };
        self.engine.sync_one(&project).await
    }

    /// Sync the built-in sample batch.
    pub async fn sync_demo(&self) -> SyncResult {
        self.engine.sync_batch(&demo_projects(Utc::now())).await
    }

    fn name_not_found(&self, name: &str) -> SyncResult {
        SyncResult::failure(
            format!("No {} project was found with the name '{name}'.", self.source_label),
            ErrorCode::NotFound,
        )
    }

    fn source_failure(&self, subject: &str, err: SourceError) -> SyncResult {
        tracing::error!(subject, %err, "source request failed");
        let err = SyncError::from(err);
        let message = match err.code() {
            ErrorCode::AuthFailed => format!(
                "An authentication error occurred while contacting {}.",
                self.source_label
            ),
            _ => format!("Unexpected error while querying {}.", self.source_label),
        };
        SyncResult::failure(message, err.code())
    }
}

/// Case-insensitive name comparison, ignoring surrounding whitespace.
fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
