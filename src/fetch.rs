use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::model::{Launch, Launchpad, Payload, Rocket};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only access to the launch data collections.
#[async_trait]
pub trait LaunchSource: Send + Sync {
    async fn launches(&self) -> Result<Vec<Launch>, FetchError>;

    /// A single launch; `None` when the API answers with JSON `null`.
    async fn launch(&self, id: &str) -> Result<Option<Launch>, FetchError>;

    async fn rockets(&self) -> Result<Vec<Rocket>, FetchError>;

    async fn launchpads(&self) -> Result<Vec<Launchpad>, FetchError>;

    async fn payloads(&self) -> Result<Vec<Payload>, FetchError>;
}

#[derive(Clone)]
pub struct SpaceXClient {
    http: Client,
    base_url: Url,
}

impl fmt::Debug for SpaceXClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceXClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SpaceXClient {
    pub fn from_config(cfg: &Config) -> Result<Self, FetchError> {
        let base_url = Url::parse(cfg.api.base_url.trim()).map_err(|e| FetchError::Url(e.to_string()))?;
        let mut builder = Client::builder().user_agent(cfg.api.user_agent.clone());
        if let Some(secs) = cfg.api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self::with_client(builder.build()?, base_url))
    }

    pub fn with_client(http: Client, mut base_url: Url) -> Self {
        // Url::join drops the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a collection endpoint, e.g. `launches`.
    pub fn collection_url(&self, collection: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(collection)
            .map_err(|e| FetchError::Url(e.to_string()))
    }

    /// URL of a single launch; the id is percent-encoded as one segment.
    pub fn launch_url(&self, id: &str) -> Result<Url, FetchError> {
        let mut url = self.collection_url("launches")?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Url(format!("{} cannot be a base", self.base_url)))?
            .push(id);
        Ok(url)
    }

    pub fn build_request(&self, url: Url) -> Result<reqwest::Request, FetchError> {
        Ok(self
            .http
            .get(url)
            .header("Accept", "application/json")
            .build()?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let request = self.build_request(url)?;
        debug!(url = %request.url(), "GET");
        let res = self.http.execute(request).await.map_err(|err| {
            warn!(?err, "request failed");
            FetchError::Transport(err)
        })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(%status, "remote returned an error status");
            return Err(FetchError::Status { status, body });
        }

        let body = res.text().await?;
        let parsed = serde_json::from_str(&body).map_err(|err| {
            warn!(?err, "response body is not the expected JSON");
            FetchError::Decode(err)
        })?;
        Ok(parsed)
    }

    async fn get_collection<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, FetchError> {
        let url = self.collection_url(collection)?;
        let items: Vec<T> = self.get_json(url).await?;
        info!(collection, count = items.len(), "fetched collection");
        Ok(items)
    }
}

#[async_trait]
impl LaunchSource for SpaceXClient {
    async fn launches(&self) -> Result<Vec<Launch>, FetchError> {
        self.get_collection("launches").await
    }

    async fn launch(&self, id: &str) -> Result<Option<Launch>, FetchError> {
        let url = self.launch_url(id)?;
        self.get_json(url).await
    }

    async fn rockets(&self) -> Result<Vec<Rocket>, FetchError> {
        self.get_collection("rockets").await
    }

    async fn launchpads(&self) -> Result<Vec<Launchpad>, FetchError> {
        self.get_collection("launchpads").await
    }

    async fn payloads(&self) -> Result<Vec<Payload>, FetchError> {
        self.get_collection("payloads").await
    }
}
