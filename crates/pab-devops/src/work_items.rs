//! Work-item create responses and the title batch read used to narrow
//! WIQL hits to exact matches.

use std::collections::HashMap;

use pab_core::patch::FIELD_TITLE;
use pab_core::{TargetError, WorkItemId, WorkItemRef};
use serde::{Deserialize, Serialize};

/// Content type the work-item create endpoint requires.
pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

/// Most ids the batch endpoint accepts per request.
pub const BATCH_LIMIT: usize = 200;

/// Request body of `_apis/wit/workitemsbatch`, reading titles only.
#[derive(Debug, Serialize)]
pub struct TitleBatchRequest {
    pub ids: Vec<WorkItemId>,
    pub fields: [&'static str; 1],
}

impl TitleBatchRequest {
    #[must_use]
    pub fn new(refs: &[WorkItemRef]) -> Self {
        Self {
            ids: refs.iter().map(|r| r.id).collect(),
            fields: [FIELD_TITLE],
        }
    }
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    #[serde(default)]
    value: Vec<BatchItem>,
}

#[derive(Debug, Deserialize)]
struct BatchItem {
    id: WorkItemId,
    #[serde(default)]
    fields: HashMap<String, serde_json::Value>,
}

/// Titles by id from a batch response body.
///
/// # Errors
///
/// Returns [`TargetError::MalformedResponse`] when the body is not the
/// expected JSON shape.
pub fn parse_titles(body: &str) -> Result<HashMap<WorkItemId, String>, TargetError> {
    let resp: BatchResponse = serde_json::from_str(body)
        .map_err(|e| TargetError::MalformedResponse(format!("batch response: {e}")))?;
    Ok(resp
        .value
        .into_iter()
        .filter_map(|item| {
            let title = item.fields.get(FIELD_TITLE)?.as_str()?.to_string();
            Some((item.id, title))
        })
        .collect())
}

/// Keep the refs whose title equals `title` exactly, in their original order.
///
/// WIQL string comparison ignores case, so the query alone over-matches.
#[must_use]
pub fn exact_title_matches(
    refs: Vec<WorkItemRef>,
    titles: &HashMap<WorkItemId, String>,
    title: &str,
) -> Vec<WorkItemRef> {
    refs.into_iter()
        .filter(|r| titles.get(&r.id).is_some_and(|t| t == title))
        .collect()
}

#[derive(Debug, Deserialize)]
struct CreatedWorkItem {
    id: Option<i64>,
}

/// Extract the assigned identifier from a create response body.
///
/// # Errors
///
/// Returns [`TargetError::MalformedResponse`] when the body is not JSON or
/// carries no integer `id`.
pub fn parse_created_id(body: &str) -> Result<WorkItemId, TargetError> {
    let created: CreatedWorkItem = serde_json::from_str(body)
        .map_err(|e| TargetError::MalformedResponse(format!("create response: {e}")))?;
    created
        .id
        .map(WorkItemId)
        .ok_or_else(|| TargetError::MalformedResponse("create response has no 'id' field".to_string()))
}
