//! Sample batch used by `pab demo`.

use chrono::{DateTime, Duration, Utc};
use pab_core::{ProjectRecord, TaskRecord};
use uuid::Uuid;

pub const DEMO_PROJECT_NAME: &str = "Demo PWA Project";

/// One project with two consecutive tasks spanning ten days from `now`.
#[must_use]
pub fn demo_projects(now: DateTime<Utc>) -> Vec<ProjectRecord> {
    let day = |n: i64| Some(now + Duration::days(n));

    vec![
        ProjectRecord::new(Uuid::new_v4().to_string(), DEMO_PROJECT_NAME)
            .with_dates(day(0), day(10))
            .with_tasks([
                TaskRecord::new(Uuid::new_v4().to_string(), "Initial planning").with_dates(day(0), day(3)),
                TaskRecord::new(Uuid::new_v4().to_string(), "Development work").with_dates(day(3), day(10)),
            ]),
    ]
}
