//! # pab-devops
//!
//! Azure DevOps work-item client for the bridge.
//!
//! Implements [`WorkItemStore`] over the REST API:
//! - `POST {org}/{project}/_apis/wit/wiql` for the title lookup, narrowed to
//!   case-sensitive matches with `POST {org}/{project}/_apis/wit/workitemsbatch`
//! - `POST {org}/{project}/_apis/wit/workitems/${type}` for creation, with a
//!   JSON-patch body
//!
//! Authentication comes from an injected [`CredentialProvider`]; the client
//! never stores a header of its own.

pub mod credential;
pub mod wiql;
pub mod work_items;

mod http;

pub use credential::PersonalAccessToken;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pab_config::DevOpsConfig;
use pab_core::patch::PatchDocument;
use pab_core::ports::{CredentialProvider, WorkItemStore};
use pab_core::{TargetError, WorkItemId, WorkItemRef};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::http::{check_response, query_failed, read_body, transport, write_failed};

/// HTTP client for the work-item endpoints of one team project.
pub struct DevOpsClient {
    http: reqwest::Client,
    organization_url: String,
    project: String,
    api_version: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl DevOpsClient {
    /// Create a client for `project` under `organization_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::Transport`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(
        organization_url: &str,
        project: &str,
        api_version: &str,
        timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, TargetError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pab/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            http,
            organization_url: organization_url.trim().trim_end_matches('/').to_string(),
            project: project.trim().to_string(),
            api_version: api_version.to_string(),
            credentials,
        })
    }

    /// Create a client from configuration, authenticating with the PAT.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &DevOpsConfig) -> Result<Self, TargetError> {
        Self::new(
            &config.organization_url,
            &config.project,
            &config.api_version,
            Duration::from_secs(config.timeout_secs),
            Arc::new(PersonalAccessToken::new(config.personal_access_token.clone())),
        )
    }

    /// `{org}/{project}/_apis/wit/wiql?api-version=...`
    #[must_use]
    pub fn wiql_url(&self) -> String {
        format!(
            "{}/{}/_apis/wit/wiql?api-version={}",
            self.organization_url,
            urlencoding::encode(&self.project),
            self.api_version
        )
    }

    /// `{org}/{project}/_apis/wit/workitemsbatch?api-version=...`
    #[must_use]
    pub fn batch_url(&self) -> String {
        format!(
            "{}/{}/_apis/wit/workitemsbatch?api-version={}",
            self.organization_url,
            urlencoding::encode(&self.project),
            self.api_version
        )
    }

    /// Read the titles of `refs`, in batches the endpoint accepts.
    async fn fetch_titles(&self, refs: &[WorkItemRef]) -> Result<HashMap<WorkItemId, String>, TargetError> {
        let mut titles = HashMap::with_capacity(refs.len());
        for chunk in refs.chunks(work_items::BATCH_LIMIT) {
            let resp = self
                .http
                .post(self.batch_url())
                .header(AUTHORIZATION, self.credentials.authorization()?)
                .json(&work_items::TitleBatchRequest::new(chunk))
                .send()
                .await
                .map_err(transport)?;
            let resp = check_response(resp, query_failed).await?;
            titles.extend(work_items::parse_titles(&read_body(resp).await?)?);
        }
        Ok(titles)
    }

    /// `{org}/{project}/_apis/wit/workitems/${type}?api-version=...`
    #[must_use]
    pub fn create_url(&self, work_item_type: &str) -> String {
        format!(
            "{}/{}/_apis/wit/workitems/${}?api-version={}",
            self.organization_url,
            urlencoding::encode(&self.project),
            urlencoding::encode(work_item_type),
            self.api_version
        )
    }
}

#[async_trait]
impl WorkItemStore for DevOpsClient {
    async fn find_by_title(
        &self,
        work_item_type: &str,
        title: &str,
    ) -> Result<Vec<WorkItemRef>, TargetError> {
        let request = wiql::WiqlRequest {
            query: wiql::title_lookup_query(&self.project, work_item_type, title),
        };

        tracing::debug!(work_item_type, title, "querying work items by title");
        let resp = self
            .http
            .post(self.wiql_url())
            .header(AUTHORIZATION, self.credentials.authorization()?)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;
        let resp = check_response(resp, query_failed).await?;

        let refs = wiql::parse_response(&read_body(resp).await?)?;
        if refs.is_empty() {
            tracing::debug!(work_item_type, title, "title lookup found nothing");
            return Ok(refs);
        }

        let candidates = refs.len();
        let titles = self.fetch_titles(&refs).await?;
        let refs = work_items::exact_title_matches(refs, &titles, title);
        tracing::debug!(work_item_type, title, candidates, matches = refs.len(), "title lookup finished");
        Ok(refs)
    }

    async fn create_work_item(
        &self,
        work_item_type: &str,
        document: &PatchDocument,
    ) -> Result<WorkItemId, TargetError> {
        let body = serde_json::to_vec(document)
            .map_err(|e| TargetError::MalformedResponse(format!("patch document: {e}")))?;

        let resp = self
            .http
            .post(self.create_url(work_item_type))
            .header(AUTHORIZATION, self.credentials.authorization()?)
            .header(CONTENT_TYPE, work_items::JSON_PATCH_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(transport)?;

        let resp = match check_response(resp, write_failed).await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::error!(work_item_type, %err, "work item create failed");
                return Err(err);
            }
        };

        let id = work_items::parse_created_id(&read_body(resp).await?)?;
        tracing::info!(work_item_type, %id, "created work item");
        Ok(id)
    }

    fn work_item_url(&self, id: WorkItemId) -> String {
        format!("{}/_apis/wit/workitems/{id}", self.organization_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DevOpsClient {
        DevOpsClient::new(
            "https://dev.azure.com/contoso/",
            "Delivery Team",
            "7.1",
            Duration::from_secs(5),
            Arc::new(PersonalAccessToken::new("pat")),
        )
        .unwrap()
    }

    #[test]
    fn urls_encode_project_and_type() {
        let client = client();
        assert_eq!(
            client.wiql_url(),
            "https://dev.azure.com/contoso/Delivery%20Team/_apis/wit/wiql?api-version=7.1"
        );
        assert_eq!(
            client.batch_url(),
            "https://dev.azure.com/contoso/Delivery%20Team/_apis/wit/workitemsbatch?api-version=7.1"
        );
        assert_eq!(
            client.create_url("User Story"),
            "https://dev.azure.com/contoso/Delivery%20Team/_apis/wit/workitems/$User%20Story?api-version=7.1"
        );
    }

    #[test]
    fn parent_url_is_organization_scoped() {
        assert_eq!(
            client().work_item_url(WorkItemId(42)),
            "https://dev.azure.com/contoso/_apis/wit/workitems/42"
        );
    }

    #[test]
    fn from_config_uses_configured_values() {
        let config = DevOpsConfig {
            organization_url: "https://dev.azure.com/fabrikam".into(),
            project: "Ops".into(),
            personal_access_token: "pat".into(),
            ..Default::default()
        };
        let client = DevOpsClient::from_config(&config).unwrap();
        assert_eq!(
            client.create_url("Epic"),
            "https://dev.azure.com/fabrikam/Ops/_apis/wit/workitems/$Epic?api-version=7.1"
        );
    }

    #[tokio::test]
    async fn missing_credential_fails_before_sending() {
        let client = DevOpsClient::new(
            "http://127.0.0.1:9",
            "Ops",
            "7.1",
            Duration::from_secs(1),
            Arc::new(PersonalAccessToken::new("")),
        )
        .unwrap();

        let err = client.find_by_title("Epic", "Acme").await.unwrap_err();
        assert!(matches!(err, TargetError::Credential(_)));
    }

    #[tokio::test]
    #[ignore] // requires network + PAB_DEVOPS__* credentials
    async fn live_title_lookup() {
        let config = pab_config::BridgeConfig::load_with_dotenv().unwrap();
        let client = DevOpsClient::from_config(config.require_devops().unwrap()).unwrap();
        let refs = client.find_by_title("Epic", "Demo PWA Project").await.unwrap();
        println!("found {} epics", refs.len());
    }
}
