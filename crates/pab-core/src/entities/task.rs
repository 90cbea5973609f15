use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task belonging to a source project.
///
/// Tasks have no identity outside their project's task list; the owning
/// project is the implicit parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskRecord {
    /// Source-system task identifier.
    #[serde(default, alias = "TaskUid", alias = "taskUid")]
    pub uid: String,
    #[serde(default, alias = "TaskName", alias = "taskName")]
    pub name: String,
    #[serde(
        default,
        alias = "StartDate",
        alias = "start",
        alias = "startDate",
        with = "crate::timestamps::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        alias = "FinishDate",
        alias = "finish",
        alias = "finishDate",
        with = "crate::timestamps::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub finish_date: Option<DateTime<Utc>>,
}

impl TaskRecord {
    #[must_use]
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            start_date: None,
            finish_date: None,
        }
    }

    #[must_use]
    pub const fn with_dates(
        mut self,
        start_date: Option<DateTime<Utc>>,
        finish_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_date = start_date;
        self.finish_date = finish_date;
        self
    }

    /// True when both dates are present and start is after finish.
    #[must_use]
    pub fn has_inverted_dates(&self) -> bool {
        matches!((self.start_date, self.finish_date), (Some(start), Some(finish)) if start > finish)
    }
}
