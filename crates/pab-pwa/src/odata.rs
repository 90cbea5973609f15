//! `ProjectServer` OData payloads (`odata=nometadata`) and their mapping to
//! bridge records.

use chrono::{DateTime, Utc};
use pab_core::{ProjectRecord, ProjectSummary, SourceError, SyncMode, TaskRecord};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// `Accept` header value selecting the compact JSON format.
pub const ACCEPT_NOMETADATA: &str = "application/json;odata=nometadata";

#[derive(Debug, Deserialize)]
struct Collection<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ODataProject {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "pab_core::timestamps::lenient")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "pab_core::timestamps::lenient")]
    pub finish_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ODataTask {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "pab_core::timestamps::lenient")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, with = "pab_core::timestamps::lenient")]
    pub finish: Option<DateTime<Utc>>,
}

impl ODataProject {
    #[must_use]
    pub fn into_summary(self) -> ProjectSummary {
        ProjectSummary {
            uid: self.id,
            name: self.name.unwrap_or_default(),
            start_date: self.start_date,
            finish_date: self.finish_date,
        }
    }

    /// Build a record; projects read from the source always sync source-to-target.
    #[must_use]
    pub fn into_record(self, tasks: Vec<ODataTask>) -> ProjectRecord {
        ProjectRecord {
            uid: self.id,
            name: self.name.unwrap_or_default(),
            start_date: self.start_date,
            finish_date: self.finish_date,
            tasks: tasks.into_iter().map(ODataTask::into_record).collect(),
            mode: SyncMode::SourceToTarget,
        }
    }
}

impl ODataTask {
    #[must_use]
    pub fn into_record(self) -> TaskRecord {
        TaskRecord::new(self.id, self.name.unwrap_or_default()).with_dates(self.start, self.finish)
    }
}

/// Parse a `{"value": [...]}` collection body.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] for any other shape.
pub fn parse_collection<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, SourceError> {
    serde_json::from_str::<Collection<T>>(body)
        .map(|c| c.value)
        .map_err(|e| SourceError::Parse(e.to_string()))
}

/// Parse a single entity body.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] when the body does not match `T`.
pub fn parse_entity<T: DeserializeOwned>(body: &str) -> Result<T, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))
}

/// Quote a key for an OData `('...')` segment.
#[must_use]
pub fn quote_key(key: &str) -> String {
    urlencoding::encode(&key.replace('\'', "''")).into_owned()
}
