//! Project and task records to work-item patch documents.
//!
//! Operation order is fixed: title, description, then for children the
//! parent relation and the optional schedule fields. Parents carry title and
//! description only. Absent dates produce no operation.

use chrono::{DateTime, Utc};
use pab_core::patch::{
    FIELD_DESCRIPTION, FIELD_DUE_DATE, FIELD_START_DATE, FIELD_TITLE, PatchDocument,
    PatchOperation, REL_HIERARCHY_REVERSE,
};
use pab_core::timestamps::format_timestamp;
use pab_core::{ProjectRecord, TaskRecord};

/// `"Imported from <source>. Identifier: <uid>"`
#[must_use]
pub fn import_description(source_label: &str, uid: &str) -> String {
    format!("Imported from {source_label}. Identifier: {uid}")
}

/// Patch document for the top-level work item of a project.
///
/// Project dates are not written: the parent type has no schedule fields.
#[must_use]
pub fn build_parent_patch(project: &ProjectRecord, source_label: &str) -> PatchDocument {
    let mut doc = PatchDocument::new();
    doc.push(PatchOperation::add_field(FIELD_TITLE, project.name.as_str()));
    doc.push(PatchOperation::add_field(
        FIELD_DESCRIPTION,
        import_description(source_label, &project.uid),
    ));
    doc
}

/// Patch document for a task's child work item, linked to `parent_url`.
#[must_use]
pub fn build_child_patch(task: &TaskRecord, parent_url: &str, source_label: &str) -> PatchDocument {
    let mut doc = PatchDocument::new();
    doc.push(PatchOperation::add_field(FIELD_TITLE, task.name.as_str()));
    doc.push(PatchOperation::add_field(
        FIELD_DESCRIPTION,
        import_description(source_label, &task.uid),
    ));
    doc.push(PatchOperation::add_relation(
        REL_HIERARCHY_REVERSE,
        parent_url,
        format!("Imported from {source_label}"),
    ));
    push_schedule(&mut doc, task.start_date, task.finish_date);
    doc
}

fn push_schedule(
    doc: &mut PatchDocument,
    start: Option<DateTime<Utc>>,
    finish: Option<DateTime<Utc>>,
) {
    if let Some(start) = start {
        doc.push(PatchOperation::add_field(FIELD_START_DATE, format_timestamp(&start)));
    }
    if let Some(finish) = finish {
        doc.push(PatchOperation::add_field(FIELD_DUE_DATE, format_timestamp(&finish)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn jan(day: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap())
    }

    #[test]
    fn parent_patch_is_title_and_description_only() {
        let project = ProjectRecord::new("6f1c", "Acme Rollout").with_dates(jan(1), jan(31));
        let doc = build_parent_patch(&project, "Project Online");

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.field(FIELD_TITLE), Some("Acme Rollout"));
        assert_eq!(
            doc.field(FIELD_DESCRIPTION),
            Some("Imported from Project Online. Identifier: 6f1c")
        );
        assert_eq!(doc.field(FIELD_START_DATE), None);
        assert_eq!(doc.field(FIELD_DUE_DATE), None);
        assert_eq!(doc.relations().count(), 0);
    }

    #[test]
    fn child_patch_links_to_parent() {
        let task = TaskRecord::new("t-1", "Design");
        let doc = build_child_patch(&task, "https://dev.azure.com/contoso/_apis/wit/workitems/7", "PWA");

        let relations: Vec<_> = doc.relations().collect();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].rel, REL_HIERARCHY_REVERSE);
        assert_eq!(relations[0].url, "https://dev.azure.com/contoso/_apis/wit/workitems/7");
        assert_eq!(relations[0].attributes.comment, "Imported from PWA");
    }

    #[test]
    fn absent_dates_are_omitted() {
        let task = TaskRecord::new("t-1", "Design").with_dates(jan(2), None);
        let doc = build_child_patch(&task, "u", "PWA");

        assert_eq!(doc.field(FIELD_START_DATE), Some("2024-01-02T00:00:00Z"));
        assert_eq!(doc.field(FIELD_DUE_DATE), None);

        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("DueDate"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn child_patch_wire_order() {
        let task = TaskRecord::new("t-9", "Build").with_dates(jan(3), jan(4));
        let doc = build_child_patch(&task, "u", "Project Online");

        let paths: Vec<&str> = doc.operations().iter().map(|op| op.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/fields/System.Title",
                "/fields/System.Description",
                "/relations/-",
                "/fields/Microsoft.VSTS.Scheduling.StartDate",
                "/fields/Microsoft.VSTS.Scheduling.DueDate",
            ]
        );
    }
}
