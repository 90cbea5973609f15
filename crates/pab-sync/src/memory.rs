//! In-memory adapters for the source and target ports.
//!
//! Used by tests and by `pab demo --dry-run`. The store records every call
//! and can be scripted to fail specific creations or the title lookup.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pab_core::patch::{FIELD_TITLE, PatchDocument};
use pab_core::ports::{ProjectSource, WorkItemStore};
use pab_core::{
    ProjectRecord, ProjectSummary, SourceError, TargetError, WorkItemId, WorkItemRef,
};

/// Scripted failure of the title lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFault {
    /// Non-success query response.
    QueryFailed,
    /// Success response with an unreadable body.
    Malformed,
    /// Rejected credential.
    Unauthorized,
}

impl LookupFault {
    fn to_error(self) -> TargetError {
        match self {
            Self::QueryFailed => TargetError::QueryFailed {
                status: 500,
                body: "scripted query failure".to_string(),
            },
            Self::Malformed => TargetError::MalformedResponse("scripted malformed body".to_string()),
            Self::Unauthorized => TargetError::Auth { status: 401 },
        }
    }
}

/// A work item held by [`InMemoryWorkItemStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredWorkItem {
    pub id: WorkItemId,
    pub work_item_type: String,
    pub document: PatchDocument,
}

impl StoredWorkItem {
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.document.field(FIELD_TITLE)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    items: Vec<StoredWorkItem>,
    lookups: usize,
    create_attempts: usize,
    failing_creates: BTreeSet<usize>,
    lookup_fault: Option<LookupFault>,
    invalid_ids: bool,
}

/// Thread-safe in-memory work-item store.
///
/// Title matching is exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkItemStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryWorkItemStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `attempt`-th creation (1-based, counted across all types).
    #[must_use]
    pub fn failing_create(self, attempt: usize) -> Self {
        self.lock().failing_creates.insert(attempt);
        self
    }

    #[must_use]
    pub fn failing_lookup(self, fault: LookupFault) -> Self {
        self.lock().lookup_fault = Some(fault);
        self
    }

    /// Report `0` as the id of every created item.
    #[must_use]
    pub fn returning_invalid_ids(self) -> Self {
        self.lock().invalid_ids = true;
        self
    }

    /// Insert an existing work item, as if created out-of-band.
    pub fn seed(&self, work_item_type: &str, title: &str) -> WorkItemId {
        let mut state = self.lock();
        let id = next_id(&state);
        state.items.push(StoredWorkItem {
            id,
            work_item_type: work_item_type.to_string(),
            document: std::iter::once(pab_core::patch::PatchOperation::add_field(FIELD_TITLE, title))
                .collect(),
        });
        id
    }

    /// All stored items in creation order.
    #[must_use]
    pub fn items(&self) -> Vec<StoredWorkItem> {
        self.lock().items.clone()
    }

    #[must_use]
    pub fn items_of_type(&self, work_item_type: &str) -> Vec<StoredWorkItem> {
        self.lock()
            .items
            .iter()
            .filter(|item| item.work_item_type == work_item_type)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lock().lookups
    }

    /// Creation attempts, including scripted failures.
    #[must_use]
    pub fn create_attempts(&self) -> usize {
        self.lock().create_attempts
    }

    /// Total gateway-visible calls: lookups plus creation attempts.
    #[must_use]
    pub fn call_count(&self) -> usize {
        let state = self.lock();
        state.lookups + state.create_attempts
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn next_id(state: &StoreState) -> WorkItemId {
    let count = i64::try_from(state.items.len()).unwrap_or(i64::MAX - 1);
    WorkItemId(count + 1)
}

#[async_trait]
impl WorkItemStore for InMemoryWorkItemStore {
    async fn find_by_title(
        &self,
        work_item_type: &str,
        title: &str,
    ) -> Result<Vec<WorkItemRef>, TargetError> {
        let mut state = self.lock();
        state.lookups += 1;
        if let Some(fault) = state.lookup_fault {
            return Err(fault.to_error());
        }

        Ok(state
            .items
            .iter()
            .filter(|item| item.work_item_type == work_item_type)
            .filter(|item| item.title() == Some(title))
            .map(|item| WorkItemRef {
                id: item.id,
                url: Some(self.work_item_url(item.id)),
            })
            .collect())
    }

    async fn create_work_item(
        &self,
        work_item_type: &str,
        document: &PatchDocument,
    ) -> Result<WorkItemId, TargetError> {
        let mut state = self.lock();
        state.create_attempts += 1;
        if state.failing_creates.contains(&state.create_attempts) {
            return Err(TargetError::WriteFailed {
                status: 400,
                body: format!("scripted failure of create #{}", state.create_attempts),
            });
        }

        let id = next_id(&state);
        state.items.push(StoredWorkItem {
            id,
            work_item_type: work_item_type.to_string(),
            document: document.clone(),
        });
        if state.invalid_ids {
            return Ok(WorkItemId(0));
        }
        Ok(id)
    }

    fn work_item_url(&self, id: WorkItemId) -> String {
        format!("memory://workitems/{id}")
    }
}

/// In-memory project source holding fixed records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectSource {
    projects: Arc<Vec<ProjectRecord>>,
    unauthorized: bool,
}

impl InMemoryProjectSource {
    #[must_use]
    pub fn new(projects: impl IntoIterator<Item = ProjectRecord>) -> Self {
        Self {
            projects: Arc::new(projects.into_iter().collect()),
            unauthorized: false,
        }
    }

    /// Reject every call with a 401.
    #[must_use]
    pub fn unauthorized(mut self) -> Self {
        self.unauthorized = true;
        self
    }

    fn check(&self) -> Result<(), SourceError> {
        if self.unauthorized {
            return Err(SourceError::Auth { status: 401 });
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectSource for InMemoryProjectSource {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, SourceError> {
        self.check()?;
        Ok(self
            .projects
            .iter()
            .map(|p| ProjectSummary {
                uid: p.uid.clone(),
                name: p.name.clone(),
                start_date: p.start_date,
                finish_date: p.finish_date,
            })
            .collect())
    }

    async fn get_project_with_tasks(&self, uid: &str) -> Result<Option<ProjectRecord>, SourceError> {
        self.check()?;
        Ok(self.projects.iter().find(|p| p.uid == uid).cloned())
    }
}
