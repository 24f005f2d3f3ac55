//! HTTP fetch client with timeouts.

use serde::de::DeserializeOwned;

use crate::timeout::{TimeoutConfig, TimeoutError};

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error(transparent)]
    Timeout(#[from] TimeoutError),

    /// Transport-level failure. Displays the bare message so it can be shown
    /// to users as-is.
    #[error("{0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

/// Fetch policy for a client.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Honour `HTTP_PROXY` / `HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig) -> Self {
        Self {
            timeout,
            use_system_proxy: true,
        }
    }

    /// Bypass any proxy configured in the environment.
    pub fn without_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::new(TimeoutConfig::default())
    }
}

/// Outbound fetch client.
///
/// One GET per call, decoded as JSON. Errors are classified into
/// [`FetchError`] so callers can surface a readable message.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    policy: FetchPolicy,
}

impl FetchClient {
    /// Create a new fetch client with the default policy.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_policy(FetchPolicy::default())
    }

    /// Create a client with an explicit policy.
    pub fn with_policy(policy: FetchPolicy) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(policy.timeout.connect)
            .timeout(policy.timeout.total);
        if !policy.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self { http, policy })
    }

    /// Fetch `url` and decode the body as `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(url, "fetch started");
        let started = std::time::Instant::now();

        let resp = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "fetch returned error status");
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| self.classify(e))?;
        let result: T = serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::Deserialization(e.to_string()))?;

        tracing::debug!(
            url,
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetch finished"
        );
        Ok(result)
    }

    /// The policy this client was built with.
    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            if e.is_connect() {
                TimeoutError::Connect(self.policy.timeout.connect).into()
            } else {
                TimeoutError::Total(self.policy.timeout.total).into()
            }
        } else if e.is_connect() || e.is_body() || e.is_decode() {
            FetchError::Network(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}
