//! Caller-facing flows over in-memory source and target adapters.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use pab_config::SyncConfig;
use pab_core::patch::{FIELD_DESCRIPTION, FIELD_START_DATE};
use pab_core::{ErrorCode, ProjectPayload, ProjectRecord, SyncError, SyncMode, TaskRecord};
use pab_sync::BridgeService;
use pab_sync::memory::{InMemoryProjectSource, InMemoryWorkItemStore};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

type TestService = BridgeService<InMemoryProjectSource, InMemoryWorkItemStore>;

fn acme() -> ProjectRecord {
    ProjectRecord::new("6f1c", "Acme Rollout")
        .with_dates(Some(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()), None)
        .with_tasks([TaskRecord::new("t-1", "Design"), TaskRecord::new("t-2", "Build")])
}

fn service_over(source: InMemoryProjectSource) -> TestService {
    BridgeService::new(
        Arc::new(source),
        Arc::new(InMemoryWorkItemStore::new()),
        &SyncConfig::default(),
    )
}

#[fixture]
fn service() -> TestService {
    service_over(InMemoryProjectSource::new([
        acme(),
        ProjectRecord::new("b-1", "Beta"),
        ProjectRecord::new("b-2", "BETA"),
        ProjectRecord::new("bad", "Broken").with_tasks([TaskRecord::new("t", "")]),
    ]))
}

fn named(name: &str) -> ProjectPayload {
    ProjectPayload {
        name: Some(name.to_string()),
        ..ProjectPayload::default()
    }
}

#[rstest]
#[tokio::test]
async fn null_payload_is_invalid(service: TestService) {
    let result = service.sync_payload(None).await;
    assert_eq!(result.error_code, Some(ErrorCode::InvalidPayload));
    assert_eq!(result.errors, 1);

    let result = service.sync_payload_json("null").await;
    assert_eq!(result.error_code, Some(ErrorCode::InvalidPayload));
}

#[rstest]
#[tokio::test]
async fn unknown_mode_is_invalid(service: TestService) {
    let result = service.sync_payload_json(r#"{"name":"Acme Rollout","mode":"Sideways"}"#).await;
    assert_eq!(result.error_code, Some(ErrorCode::InvalidPayload));
}

#[rstest]
#[tokio::test]
async fn blank_payload_name_fails_validation(service: TestService) {
    let result = service.sync_payload(Some(named("  "))).await;
    assert_eq!(result.error_code, Some(ErrorCode::ValidationFailed));
    assert_eq!(result.validation_errors, vec!["Project name is required.".to_string()]);
}

#[rstest]
#[tokio::test]
async fn payload_fills_identifier_from_source(service: TestService) {
    let result = service.sync_payload(Some(named("acme rollout"))).await;

    assert!(result.success, "{result:?}");
    assert_eq!(result.work_items_created, 1);

    let parents = service.engine().gateway().store().items_of_type("Epic");
    assert_eq!(
        parents[0].document.field(FIELD_DESCRIPTION),
        Some("Imported from Project Online. Identifier: 6f1c")
    );
    assert_eq!(parents[0].document.field(FIELD_START_DATE), None, "parents carry no schedule");
}

#[rstest]
#[tokio::test]
async fn payload_without_source_match_is_not_found(service: TestService) {
    let result = service.sync_payload(Some(named("Gamma"))).await;
    assert_eq!(result.error_code, Some(ErrorCode::NotFound));
    assert_eq!(
        result.message.as_deref(),
        Some("No Project Online project was found with the name 'Gamma'.")
    );
}

#[rstest]
#[tokio::test]
async fn target_only_payload_generates_identifier(service: TestService) {
    let payload = ProjectPayload {
        mode: Some(SyncMode::TargetOnly),
        tasks: vec![TaskRecord::new("t-1", "Design")],
        ..named("Gamma")
    };

    let result = service.sync_payload(Some(payload)).await;

    assert!(result.success);
    assert_eq!(result.work_items_created, 2);
    let parents = service.engine().gateway().store().items_of_type("Epic");
    let description = parents[0].document.field(FIELD_DESCRIPTION).unwrap();
    let uid = description.rsplit("Identifier: ").next().unwrap();
    assert_eq!(uid.len(), 36, "uuid expected, got {uid}");
}

#[rstest]
#[tokio::test]
async fn sync_by_uid_creates_parent_and_children(service: TestService) {
    let result = service.sync_by_uid("6f1c").await;
    assert!(result.success);
    assert_eq!(result.projects_processed, 1);
    assert_eq!(result.work_items_created, 3);
}

#[rstest]
#[tokio::test]
async fn sync_by_unknown_uid_is_not_found(service: TestService) {
    let result = service.sync_by_uid("nope").await;
    assert_eq!(result.error_code, Some(ErrorCode::NotFound));
    assert_eq!(result.projects_processed, 0);
}

#[rstest]
#[tokio::test]
async fn sync_by_uid_validates_source_data(service: TestService) {
    let result = service.sync_by_uid("bad").await;
    assert_eq!(result.error_code, Some(ErrorCode::ValidationFailed));
    assert_eq!(service.engine().gateway().store().call_count(), 0);
}

#[rstest]
#[case("", ErrorCode::InvalidPayload)]
#[case("Gamma", ErrorCode::NotFound)]
#[case("beta", ErrorCode::AmbiguousName)]
#[tokio::test]
async fn sync_by_name_rejections(service: TestService, #[case] name: &str, #[case] code: ErrorCode) {
    let result = service.sync_by_name(name).await;
    assert!(!result.success);
    assert_eq!(result.error_code, Some(code));
    assert_eq!(service.engine().gateway().store().call_count(), 0);
}

#[rstest]
#[tokio::test]
async fn sync_by_name_ignores_case(service: TestService) {
    let result = service.sync_by_name("ACME ROLLOUT").await;
    assert!(result.success);
    assert_eq!(result.work_items_created, 3);
}

#[tokio::test]
async fn source_auth_failure_is_reported() {
    let service = service_over(InMemoryProjectSource::new([acme()]).unauthorized());

    let result = service.sync_by_name("Acme Rollout").await;
    assert_eq!(result.error_code, Some(ErrorCode::AuthFailed));
    assert_eq!(
        result.message.as_deref(),
        Some("An authentication error occurred while contacting Project Online.")
    );

    let err = service.list_projects().await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AuthFailed);
}

#[rstest]
#[tokio::test]
async fn get_project_reports_missing(service: TestService) {
    assert_eq!(service.get_project("6f1c").await.unwrap().tasks.len(), 2);
    assert!(matches!(
        service.get_project("zzz").await,
        Err(SyncError::NotFound { .. })
    ));
}

#[rstest]
#[tokio::test]
async fn demo_batch_creates_three_items(service: TestService) {
    let result = service.sync_demo().await;
    assert!(result.success);
    assert_eq!(result.work_items_created, 3);
}
