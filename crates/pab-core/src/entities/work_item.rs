use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a work item by the target system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkItemId(pub i64);

impl WorkItemId {
    /// The target system only assigns positive identifiers.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A work item reference returned by the target system's query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemRef {
    pub id: WorkItemId,
    #[serde(default)]
    pub url: Option<String>,
}
