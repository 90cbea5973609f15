//! Pre-write validation rules.
//!
//! All rules run and every message is collected; an empty list means the
//! project may be written. A non-empty list rejects the whole project.

use crate::entities::ProjectRecord;

pub const PROJECT_NAME_REQUIRED: &str = "Project name is required.";
pub const PROJECT_DATES_INVERTED: &str =
    "Project start date must be earlier than or equal to the project finish date.";
pub const TASK_NAME_REQUIRED: &str = "Task name is required for all tasks.";

/// Validate a project and its tasks.
#[must_use]
pub fn validate_project(project: &ProjectRecord) -> Vec<String> {
    let mut errors = Vec::new();

    if project.name.trim().is_empty() {
        errors.push(PROJECT_NAME_REQUIRED.to_string());
    }

    if project.has_inverted_dates() {
        errors.push(PROJECT_DATES_INVERTED.to_string());
    }

    for task in &project.tasks {
        if task.name.trim().is_empty() {
            errors.push(TASK_NAME_REQUIRED.to_string());
        }

        if task.has_inverted_dates() {
            errors.push(format!(
                "Start date must be earlier than or equal to the finish date for task '{}'.",
                task.name
            ));
        }
    }

    errors
}
