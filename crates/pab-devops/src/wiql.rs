//! WIQL title lookup: query construction and response parsing.

use pab_core::{TargetError, WorkItemRef};
use serde::{Deserialize, Serialize};

/// Request body of the WIQL endpoint.
#[derive(Debug, Serialize)]
pub struct WiqlRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WiqlResponse {
    #[serde(default)]
    work_items: Vec<WorkItemRef>,
}

/// Quote a string literal for WIQL by doubling embedded single quotes.
#[must_use]
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Query for work items of one type in one team project with an exact title.
#[must_use]
pub fn title_lookup_query(team_project: &str, work_item_type: &str, title: &str) -> String {
    format!(
        "SELECT [System.Id] FROM WorkItems WHERE [System.TeamProject] = '{}' \
         AND [System.WorkItemType] = '{}' AND [System.Title] = '{}'",
        escape_literal(team_project),
        escape_literal(work_item_type),
        escape_literal(title),
    )
}

/// Parse a WIQL response body, keeping the index-assigned order.
///
/// # Errors
///
/// Returns [`TargetError::MalformedResponse`] when the body is not the
/// expected JSON shape.
pub fn parse_response(body: &str) -> Result<Vec<WorkItemRef>, TargetError> {
    serde_json::from_str::<WiqlResponse>(body)
        .map(|resp| resp.work_items)
        .map_err(|e| TargetError::MalformedResponse(format!("WIQL response: {e}")))
}
