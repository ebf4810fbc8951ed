//! HTTP client for the cluster snapshot API

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use sweep_core::{Config, ConfigError, DeleteError, FetchError, Snapshot, SnapshotRepository};

/// Per-request timeout on delete calls
pub const DELETE_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest error body kept in a `FetchError::Status`
const BODY_EXCERPT_CHARS: usize = 512;

/// `SnapshotRepository` backed by the cluster's REST API
pub struct ElasticClient {
    client: Client,
    base_url: Url,
    repository: String,
    delete_timeout: Duration,
}

impl ElasticClient {
    /// Create a client for `repository` on `endpoint`
    ///
    /// `endpoint` is either `host:port` (plain HTTP) or a full `http(s)://`
    /// URL. Loopback endpoints bypass any proxy configured in the
    /// environment.
    pub fn new(endpoint: &str, repository: &str) -> Result<Self, ConfigError> {
        let base_url = parse_endpoint(endpoint)?;

        let mut builder = Client::builder();
        if is_loopback(&base_url) {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Client { source: Box::new(e) })?;

        Ok(Self {
            client,
            base_url,
            repository: repository.to_string(),
            delete_timeout: DELETE_TIMEOUT,
        })
    }

    /// Create a client from a resolved configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(&config.endpoint, &config.repository)
    }

    /// Override the per-delete timeout
    pub fn with_delete_timeout(mut self, timeout: Duration) -> Self {
        self.delete_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for the catalog listing
    pub fn list_url(&self) -> Url {
        let mut url = self.url(&["_cat", "snapshots", &self.repository]);
        url.query_pairs_mut().append_pair("format", "json");
        url
    }

    /// URL for deleting one snapshot
    pub fn delete_url(&self, id: &str) -> Url {
        self.url(&["_snapshot", &self.repository, id])
    }

    /// Append percent-encoded path segments to the base URL
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl SnapshotRepository for ElasticClient {
    fn name(&self) -> &str {
        &self.repository
    }

    async fn list_snapshots(&self) -> Result<Vec<Snapshot>, FetchError> {
        let url = self.list_url();
        tracing::debug!(%url, "Listing snapshots");

        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        };

        let response = self.client.get(url.clone()).send().await.map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode { source: Box::new(e) })
    }

    async fn delete_snapshot(&self, id: &str) -> Result<(), DeleteError> {
        let url = self.delete_url(id);
        tracing::debug!(%url, "Deleting snapshot");

        let response = self
            .client
            .delete(url)
            .timeout(self.delete_timeout)
            .send()
            .await
            .map_err(|e| DeleteError::Transport {
                id: id.to_string(),
                source: Box::new(e),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DeleteError::Status {
                id: id.to_string(),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    if endpoint.trim().is_empty() {
        return Err(invalid("endpoint is empty".to_string()));
    }

    let candidate = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{endpoint}")
    };

    let url = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }

    Ok(url)
}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some(host) if host.eq_ignore_ascii_case("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => false,
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
