use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TaskRecord;
use crate::enums::SyncMode;

/// A source project together with the tasks to push to the target system.
///
/// Built by the source reader or supplied by a caller. The sync engine only
/// ever borrows it, so one record stays unchanged for the whole sync call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectRecord {
    /// Source-system project identifier.
    pub uid: String,
    pub name: String,
    #[serde(
        default,
        with = "crate::timestamps::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "crate::timestamps::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub finish_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub mode: SyncMode,
}

impl ProjectRecord {
    #[must_use]
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            start_date: None,
            finish_date: None,
            tasks: Vec::new(),
            mode: SyncMode::default(),
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

    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = TaskRecord>) -> Self {
        self.tasks = tasks.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: SyncMode) -> Self {
        self.mode = mode;
        self
    }

    /// True when both dates are present and start is after finish.
    #[must_use]
    pub fn has_inverted_dates(&self) -> bool {
        matches!((self.start_date, self.finish_date), (Some(start), Some(finish)) if start > finish)
    }
}

/// A project as listed by the source system, without its tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectSummary {
    pub uid: String,
    pub name: String,
    #[serde(
        default,
        with = "crate::timestamps::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "crate::timestamps::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub finish_date: Option<DateTime<Utc>>,
}

/// Caller-supplied project payload for the payload sync flow.
///
/// Every field is optional on the wire: missing identifiers and dates are
/// filled in from the source system or generated before the payload becomes
/// a [`ProjectRecord`]. The legacy PascalCase field names are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectPayload {
    #[serde(default, alias = "ProjectUid", alias = "projectUid")]
    pub uid: Option<String>,
    #[serde(default, alias = "ProjectName", alias = "projectName")]
    pub name: Option<String>,
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
    #[serde(default, alias = "Tasks")]
    pub tasks: Vec<TaskRecord>,
    /// Absent means [`SyncMode::SourceToTarget`].
    #[serde(default, alias = "Mode")]
    pub mode: Option<SyncMode>,
}

impl ProjectPayload {
    /// Trimmed project name, `None` when missing or blank.
    #[must_use]
    pub fn trimmed_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }

    /// Convert into a record, using `uid` for the identifier.
    #[must_use]
    pub fn into_record(self, uid: String) -> ProjectRecord {
        ProjectRecord {
            uid,
            name: self.name.unwrap_or_default(),
            start_date: self.start_date,
            finish_date: self.finish_date,
            tasks: self.tasks,
            mode: self.mode.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn inverted_dates_detected_only_when_both_present() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let finish = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert!(ProjectRecord::new("p", "P").with_dates(Some(start), Some(finish)).has_inverted_dates());
        assert!(!ProjectRecord::new("p", "P").with_dates(Some(finish), Some(start)).has_inverted_dates());
        assert!(!ProjectRecord::new("p", "P").with_dates(Some(start), None).has_inverted_dates());
        assert!(!ProjectRecord::new("p", "P").with_dates(Some(start), Some(start)).has_inverted_dates());
    }

    #[test]
    fn payload_accepts_legacy_field_names() {
        let json = r#"{
            "ProjectUid": "6f1c",
            "ProjectName": "Acme Rollout",
            "StartDate": "2024-01-01",
            "Mode": "DevOpsOnly",
            "Tasks": [{ "TaskUid": "t-1", "TaskName": "Design", "FinishDate": "2024-01-05T00:00:00" }]
        }"#;

        let payload: ProjectPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.uid.as_deref(), Some("6f1c"));
        assert_eq!(payload.trimmed_name(), Some("Acme Rollout"));
        assert_eq!(payload.mode, Some(SyncMode::TargetOnly));
        assert_eq!(payload.tasks.len(), 1);
        assert_eq!(payload.tasks[0].name, "Design");
        assert!(payload.tasks[0].start_date.is_none());
        assert!(payload.tasks[0].finish_date.is_some());
    }

    #[test]
    fn payload_without_mode_defaults_to_source_to_target() {
        let payload: ProjectPayload = serde_json::from_str(r#"{"name": "X"}"#).unwrap();
        let record = payload.into_record("uid-1".to_string());
        assert_eq!(record.mode, SyncMode::SourceToTarget);
        assert_eq!(record.uid, "uid-1");
    }

    #[test]
    fn blank_payload_name_is_none() {
        let payload = ProjectPayload {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(payload.trimmed_name(), None);
    }

    #[test]
    fn absent_dates_are_not_serialized() {
        let json = serde_json::to_value(ProjectRecord::new("p", "P")).unwrap();
        assert!(json.get("start_date").is_none());
        assert!(json.get("finish_date").is_none());
    }
}
