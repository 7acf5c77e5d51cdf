//! GitHub Contents API client.
//!
//! Lists course directories and commits lesson files with upsert semantics:
//! updating an existing file requires its current blob sha, so writes are
//! preceded by a metadata lookup.

use crate::config::GithubSettings;
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use service_core::retry::{retry_request, RetryConfig};

/// Error type for GitHub operations.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitHub API error {status}: {body}")]
    Api { status: StatusCode, body: String },
}

impl From<GithubError> for AppError {
    fn from(err: GithubError) -> Self {
        AppError::UpstreamError(format!("GitHub API request failed: {}", err))
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: String,
}

#[derive(Debug, Deserialize)]
struct ContentMetadata {
    sha: String,
}

#[derive(Debug, Serialize)]
struct PutContentRequest {
    message: String,
    content: String,
    branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

/// Response of a successful create/update commit.
#[derive(Debug, Deserialize)]
pub struct PutContentResponse {
    #[serde(default)]
    pub content: Option<ResourceLink>,
    #[serde(default)]
    pub commit: Option<ResourceLink>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceLink {
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Clone)]
pub struct GithubClient {
    settings: GithubSettings,
    client: Client,
    retry: RetryConfig,
}

impl GithubClient {
    pub fn new(settings: GithubSettings) -> Self {
        let client = Client::builder()
            .user_agent(concat!("lesson-service/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            settings,
            client,
            retry: RetryConfig::default(),
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.settings.api_base_url, self.settings.owner, self.settings.repo, path
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/vnd.github.v3+json");

        if self.settings.token.is_empty() {
            builder
        } else {
            builder.header(
                header::AUTHORIZATION,
                format!("token {}", self.settings.token),
            )
        }
    }

    /// List the contents of a repository directory on the configured branch.
    pub async fn list_directory(&self, path: &str) -> Result<Vec<RepoEntry>, GithubError> {
        let url = self.contents_url(path);

        let response = retry_request(&self.retry, "list_directory", || async {
            self.request(Method::GET, &url)
                .query(&[("ref", self.settings.branch.as_str())])
                .send()
                .await
        })
        .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Api { status, body });
        }

        Ok(response.json().await?)
    }

    /// Look up the current blob sha for a file, if it exists.
    ///
    /// Lookup failures are treated as "file does not exist yet" so the
    /// subsequent write becomes a create rather than an update.
    async fn lookup_sha(&self, url: &str) -> Option<String> {
        let response = retry_request(&self.retry, "lookup_sha", || async {
            self.request(Method::GET, url).send().await
        })
        .await;

        match response {
            Ok(response) if response.status().is_success() => response
                .json::<ContentMetadata>()
                .await
                .map(|meta| meta.sha)
                .ok(),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Could not look up sha, assuming new file");
                None
            }
        }
    }

    /// Create or update a file at `path` with the given commit message.
    pub async fn upsert_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<PutContentResponse, GithubError> {
        use base64::Engine;

        let url = self.contents_url(path);
        let sha = self.lookup_sha(&url).await;

        let payload = PutContentRequest {
            message: message.to_string(),
            content: base64::engine::general_purpose::STANDARD.encode(content),
            branch: self.settings.branch.clone(),
            sha,
        };

        let response = retry_request(&self.retry, "upsert_file", || async {
            self.request(Method::PUT, &url).json(&payload).send().await
        })
        .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Api { status, body });
        }

        tracing::info!(path = %path, "Committed file to GitHub");

        Ok(response.json().await?)
    }
}
