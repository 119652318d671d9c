use std::time::Duration;

use fider_core::{Post, SearchRequest};
use fider_logging::{shell_debug, shell_warn};
use futures_util::StreamExt;
use reqwest::Url;

use crate::{FailureKind, SearchError};

const POSTS_ENDPOINT: &str = "api/v1/posts";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Site root the API lives under, e.g. `https://feedback.example.com/`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Backend search operation.
#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Post>, SearchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchClient {
    endpoint: Url,
    max_bytes: u64,
    client: reqwest::Client,
}

impl ReqwestSearchClient {
    pub fn new(settings: ClientSettings) -> Result<Self, SearchError> {
        let endpoint = endpoint_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SearchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            endpoint,
            max_bytes: settings.max_bytes,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.endpoint.clone();
        let query = request.to_query_string();
        url.set_query((!query.is_empty()).then_some(query.as_str()));
        url
    }
}

#[async_trait::async_trait]
impl SearchClient for ReqwestSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Post>, SearchError> {
        let url = self.request_url(request);
        shell_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            shell_warn!("search failed with status {}", status);
            return Err(SearchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(too_large(self.max_bytes, content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(too_large(self.max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }

        let posts: Vec<Post> = serde_json::from_slice(&body)
            .map_err(|err| SearchError::new(FailureKind::Decode, err.to_string()))?;
        shell_debug!("search returned {} posts ({} bytes)", posts.len(), body.len());
        Ok(posts)
    }
}

fn endpoint_url(base_url: &str) -> Result<Url, SearchError> {
    let mut base = Url::parse(base_url)
        .map_err(|err| SearchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(SearchError::new(
            FailureKind::InvalidUrl,
            format!("{base_url} cannot be a base url"),
        ));
    }
    // Without a trailing slash `join` would replace the last path segment.
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(POSTS_ENDPOINT)
        .map_err(|err| SearchError::new(FailureKind::InvalidUrl, err.to_string()))
}

fn too_large(max_bytes: u64, actual: u64) -> SearchError {
    SearchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::new(FailureKind::Timeout, err.to_string());
    }
    SearchError::new(FailureKind::Network, err.to_string())
}
