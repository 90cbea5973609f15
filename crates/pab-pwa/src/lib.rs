//! # pab-pwa
//!
//! Project Online (PWA) reader for the bridge.
//!
//! Implements [`ProjectSource`] over the `ProjectServer` REST API:
//! - `GET {pwa}/_api/ProjectServer/Projects` for the project list
//! - `GET {pwa}/_api/ProjectServer/Projects('{uid}')` and `.../Tasks` for a
//!   single project with its tasks
//!
//! Responses are requested as `odata=nometadata` JSON, so collections arrive
//! under a plain `value` array.

pub mod credential;
pub mod odata;

mod http;

pub use credential::BearerToken;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pab_config::PwaConfig;
use pab_core::ports::{CredentialProvider, ProjectSource};
use pab_core::{ProjectRecord, ProjectSummary, SourceError};
use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::http::{read_body, read_entity, transport};
use crate::odata::{ACCEPT_NOMETADATA, ODataProject, ODataTask};

const PROJECT_FIELDS: &str = "Id,Name,StartDate,FinishDate";
const TASK_FIELDS: &str = "Id,Name,Start,Finish";

/// HTTP client for one PWA site.
pub struct ProjectOnlineClient {
    http: reqwest::Client,
    site_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl ProjectOnlineClient {
    /// Create a client for the PWA site at `site_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Transport`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(
        site_url: &str,
        timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pab/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            http,
            site_url: site_url.trim().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Create a client from configuration, authenticating with the bearer token.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &PwaConfig) -> Result<Self, SourceError> {
        Self::new(
            &config.url,
            Duration::from_secs(config.timeout_secs),
            Arc::new(BearerToken::new(config.access_token.clone())),
        )
    }

    #[must_use]
    pub fn projects_url(&self) -> String {
        format!(
            "{}/_api/ProjectServer/Projects?$select={PROJECT_FIELDS}",
            self.site_url
        )
    }

    #[must_use]
    pub fn project_url(&self, uid: &str) -> String {
        format!(
            "{}/_api/ProjectServer/Projects('{}')?$select={PROJECT_FIELDS}",
            self.site_url,
            odata::quote_key(uid)
        )
    }

    #[must_use]
    pub fn tasks_url(&self, uid: &str) -> String {
        format!(
            "{}/_api/ProjectServer/Projects('{}')/Tasks?$select={TASK_FIELDS}",
            self.site_url,
            odata::quote_key(uid)
        )
    }

    /// Send an authenticated GET and return the raw response.
    async fn get(&self, url: String) -> Result<reqwest::Response, SourceError> {
        self.http
            .get(url)
            .header(AUTHORIZATION, self.credentials.authorization()?)
            .header(ACCEPT, ACCEPT_NOMETADATA)
            .send()
            .await
            .map_err(transport)
    }
}

#[async_trait]
impl ProjectSource for ProjectOnlineClient {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, SourceError> {
        let body = read_body(self.get(self.projects_url()).await?).await?;
        let projects: Vec<ODataProject> = odata::parse_collection(&body)?;
        tracing::debug!(count = projects.len(), "listed source projects");
        Ok(projects.into_iter().map(ODataProject::into_summary).collect())
    }

    async fn get_project_with_tasks(&self, uid: &str) -> Result<Option<ProjectRecord>, SourceError> {
        let Some(body) = read_entity(self.get(self.project_url(uid)).await?).await? else {
            tracing::debug!(uid, "source project not found");
            return Ok(None);
        };
        let project: ODataProject = odata::parse_entity(&body)?;

        let body = read_body(self.get(self.tasks_url(uid)).await?).await?;
        let tasks: Vec<ODataTask> = odata::parse_collection(&body)?;
        tracing::debug!(uid, tasks = tasks.len(), "loaded source project");
        Ok(Some(project.into_record(tasks)))
    }
}
