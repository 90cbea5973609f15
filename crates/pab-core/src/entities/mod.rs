//! Records exchanged between the source reader, the sync engine, and the
//! work-item gateway.

mod project;
mod task;
mod work_item;

pub use project::{ProjectPayload, ProjectRecord, ProjectSummary};
pub use task::TaskRecord;
pub use work_item::{WorkItemId, WorkItemRef};
