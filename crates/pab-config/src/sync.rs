//! Sync engine settings.

use pab_core::LookupFailurePolicy;
use serde::{Deserialize, Serialize};

fn default_parent_type() -> String {
    "Epic".to_string()
}

fn default_child_type() -> String {
    "Task".to_string()
}

fn default_source_label() -> String {
    "Project Online".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Work-item type created once per project.
    #[serde(default = "default_parent_type")]
    pub parent_work_item_type: String,

    /// Work-item type created once per task.
    #[serde(default = "default_child_type")]
    pub child_work_item_type: String,

    /// Source name written into descriptions ("Imported from <label>. ...").
    #[serde(default = "default_source_label")]
    pub source_label: String,

    /// Behavior when the parent lookup query fails.
    #[serde(default)]
    pub lookup_failure: LookupFailurePolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            parent_work_item_type: default_parent_type(),
            child_work_item_type: default_child_type(),
            source_label: default_source_label(),
            lookup_failure: LookupFailurePolicy::default(),
        }
    }
}
