//! JSON-patch documents accepted by the work-item create endpoint.
//!
//! A document is an ordered list of `add` operations. Field operations carry
//! a string value under `/fields/<FieldName>`; the parent link is a single
//! relation operation under `/relations/-`.

use serde::{Deserialize, Serialize};

/// Work-item title.
pub const FIELD_TITLE: &str = "System.Title";
/// Work-item description (HTML allowed).
pub const FIELD_DESCRIPTION: &str = "System.Description";
/// Scheduled start date.
pub const FIELD_START_DATE: &str = "Microsoft.VSTS.Scheduling.StartDate";
/// Scheduled due date, fed by the task's finish date.
pub const FIELD_DUE_DATE: &str = "Microsoft.VSTS.Scheduling.DueDate";
/// Relation type pointing from a child to its parent.
pub const REL_HIERARCHY_REVERSE: &str = "System.LinkTypes.Hierarchy-Reverse";

/// Patch operation verb. Only `add` is ever emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
}

/// Attributes attached to a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationAttributes {
    pub comment: String,
}

/// A link from the work item being created to another work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub rel: String,
    pub url: String,
    pub attributes: RelationAttributes,
}

/// Value of a patch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatchValue {
    Text(String),
    Relation(Relation),
}

/// One operation of a patch document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    pub value: PatchValue,
}

impl PatchOperation {
    /// `add` of a string value to `/fields/<field>`.
    #[must_use]
    pub fn add_field(field: &str, value: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Add,
            path: format!("/fields/{field}"),
            value: PatchValue::Text(value.into()),
        }
    }

    /// `add` of a relation to the end of `/relations`.
    #[must_use]
    pub fn add_relation(rel: &str, url: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Add,
            path: "/relations/-".to_string(),
            value: PatchValue::Relation(Relation {
                rel: rel.to_string(),
                url: url.into(),
                attributes: RelationAttributes {
                    comment: comment.into(),
                },
            }),
        }
    }
}

/// Ordered list of patch operations, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(Vec<PatchOperation>);

impl PatchDocument {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, operation: PatchOperation) {
        self.0.push(operation);
    }

    #[must_use]
    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String value written to `/fields/<field>`, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        let path = format!("/fields/{field}");
        self.0.iter().find_map(|op| match &op.value {
            PatchValue::Text(text) if op.path == path => Some(text.as_str()),
            _ => None,
        })
    }

    /// All relations in document order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.0.iter().filter_map(|op| match &op.value {
            PatchValue::Relation(relation) => Some(relation),
            PatchValue::Text(_) => None,
        })
    }
}

impl FromIterator<PatchOperation> for PatchDocument {
    fn from_iter<I: IntoIterator<Item = PatchOperation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn serializes_as_json_patch_array() {
        let doc: PatchDocument = [
            PatchOperation::add_field(FIELD_TITLE, "Design"),
            PatchOperation::add_relation(
                REL_HIERARCHY_REVERSE,
                "https://dev.azure.com/org/_apis/wit/workitems/42",
                "Imported from Project Online",
            ),
        ]
        .into_iter()
        .collect();

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!([
                { "op": "add", "path": "/fields/System.Title", "value": "Design" },
                {
                    "op": "add",
                    "path": "/relations/-",
                    "value": {
                        "rel": "System.LinkTypes.Hierarchy-Reverse",
                        "url": "https://dev.azure.com/org/_apis/wit/workitems/42",
                        "attributes": { "comment": "Imported from Project Online" }
                    }
                }
            ])
        );
    }

    #[test]
    fn field_lookup_ignores_relations() {
        let mut doc = PatchDocument::new();
        doc.push(PatchOperation::add_field(FIELD_TITLE, "Acme"));
        doc.push(PatchOperation::add_relation(REL_HIERARCHY_REVERSE, "u", "c"));

        assert_eq!(doc.field(FIELD_TITLE), Some("Acme"));
        assert_eq!(doc.field(FIELD_DUE_DATE), None);
        assert_eq!(doc.relations().count(), 1);
        assert_eq!(doc.len(), 2);
    }
}
