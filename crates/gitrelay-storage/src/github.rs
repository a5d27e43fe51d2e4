use crate::traits::{name_of, validate_path, ContentStore, Lookup, StoreError, StoreResult};
use crate::StoreBackend;
use async_trait::async_trait;
use base64::Engine;
use gitrelay_core::models::RemoteObjectRecord;
use gitrelay_core::StoreConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

const GITHUB_API_VERSION: &str = "2022-11-28";

/// Content item as returned by the repository contents endpoint
#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    sha: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    download_url: Option<String>,
    #[serde(rename = "type", default)]
    kind: String,
}

impl From<ContentItem> for RemoteObjectRecord {
    fn from(item: ContentItem) -> Self {
        RemoteObjectRecord {
            path: item.path,
            name: item.name,
            size: item.size,
            sha: item.sha,
            download_url: item.download_url,
        }
    }
}

/// A contents GET answers with an object for files and an array for directories
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Directory(Vec<ContentItem>),
    File(ContentItem),
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    content: ContentItem,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Content store backed by the GitHub repository contents API
///
/// Owner, repository and branch are fixed at construction. Writes create commits on the
/// configured branch; reads always target that branch through the `ref` query parameter.
#[derive(Clone)]
pub struct GitHubContentStore {
    http_client: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    branch: String,
}

impl Debug for GitHubContentStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GitHubContentStore")
            .field("api_base", &self.api_base)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .finish()
    }
}

impl GitHubContentStore {
    /// Create a new store from the repository coordinates and access token
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let token = config
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| StoreError::ConfigError("GITHUB_TOKEN not configured".to_string()))?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| StoreError::ConfigError(format!("Invalid GITHUB_TOKEN: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("gitrelay/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                StoreError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
        })
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// Turn a non-success response into an API error carrying GitHub's message
    async fn api_error(response: Response) -> StoreError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                if text.is_empty() {
                    "Unknown error".to_string()
                } else {
                    text
                }
            });
        StoreError::Api { status, message }
    }

    async fn fetch(&self, path: &str) -> StoreResult<Option<ContentsResponse>> {
        let response = self
            .http_client
            .get(self.contents_url(path))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        response
            .json::<ContentsResponse>()
            .await
            .map(Some)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// GitHub answers a sha-less PUT on an existing path with 422 `"sha" wasn't supplied`.
/// Other 422s (bad content, bad path) and 409 branch conflicts are plain API errors.
fn is_missing_sha(err: &StoreError) -> bool {
    matches!(
        err,
        StoreError::Api { status: 422, message } if message.contains("\"sha\" wasn't supplied")
    )
}

#[async_trait]
impl ContentStore for GitHubContentStore {
    async fn get(&self, path: &str) -> StoreResult<Lookup> {
        validate_path(path)?;

        match self.fetch(path).await? {
            None => Ok(Lookup::NotFound),
            Some(ContentsResponse::File(item)) => Ok(Lookup::Found(item.into())),
            Some(ContentsResponse::Directory(_)) => Err(StoreError::InvalidPath(format!(
                "{} is a directory",
                path
            ))),
        }
    }

    async fn put(
        &self,
        path: &str,
        data: &[u8],
        message: &str,
    ) -> StoreResult<RemoteObjectRecord> {
        validate_path(path)?;

        let start = std::time::Instant::now();
        let body = json!({
            "message": message,
            "content": base64::engine::general_purpose::STANDARD.encode(data),
            "branch": self.branch,
        });

        let response = self
            .http_client
            .put(self.contents_url(path))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    path = %path,
                    size_bytes = data.len(),
                    "GitHub commit request failed"
                );
                StoreError::Transport(e.to_string())
            })?;

        if !response.status().is_success() {
            let err = Self::api_error(response).await;
            if is_missing_sha(&err) {
                // Create without a sha is rejected once the path exists
                return Err(StoreError::AlreadyExists(path.to_string()));
            }
            tracing::error!(error = %err, path = %path, "GitHub commit rejected");
            return Err(err);
        }

        let commit: CommitResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        tracing::info!(
            repo = %format!("{}/{}", self.owner, self.repo),
            branch = %self.branch,
            path = %path,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GitHub commit successful"
        );

        Ok(commit.content.into())
    }

    async fn delete(&self, path: &str, sha: &str, message: &str) -> StoreResult<()> {
        validate_path(path)?;

        let body = json!({
            "message": message,
            "sha": sha,
            "branch": self.branch,
        });

        let response = self
            .http_client
            .delete(self.contents_url(path))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        match response.status() {
            // 409: the sha no longer matches the branch head
            StatusCode::NOT_FOUND | StatusCode::CONFLICT => {
                Err(StoreError::NotFound(path.to_string()))
            }
            status if status.is_success() => {
                tracing::info!(
                    branch = %self.branch,
                    path = %path,
                    "GitHub delete successful"
                );
                Ok(())
            }
            _ => Err(Self::api_error(response).await),
        }
    }

    async fn list(&self, directory: &str) -> StoreResult<Vec<RemoteObjectRecord>> {
        let directory = directory.trim_matches('/');
        validate_path(directory)?;

        match self.fetch(directory).await? {
            None => Ok(Vec::new()),
            Some(ContentsResponse::Directory(items)) => Ok(items
                .into_iter()
                .filter(|item| item.kind == "file")
                .map(RemoteObjectRecord::from)
                .collect()),
            Some(ContentsResponse::File(item)) => Err(StoreError::InvalidPath(format!(
                "{} is a file",
                name_of(&item.path)
            ))),
        }
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::GitHub
    }
}
