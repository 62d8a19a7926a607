//! Resource Loader
//!
//! HTTP transport over reqwest's blocking client. Each request runs on
//! smol's blocking thread pool so the single-threaded navigation loop keeps
//! servicing timers while a page downloads.

use std::future::Future;
use std::time::Duration;

use crate::{NetError, Response, Transport};

/// Loader configuration
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// User agent string
    pub user_agent: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Headers sent with every request
    pub default_headers: Vec<(String, String)>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("docnav/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
            default_headers: vec![("Accept".into(), "text/html,application/xhtml+xml".into())],
        }
    }
}

impl LoaderConfig {
    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = ua.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn default_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Load pages over HTTP
#[derive(Clone)]
pub struct ResourceLoader {
    client: reqwest::blocking::Client,
    config: LoaderConfig,
}

impl ResourceLoader {
    /// Create a loader with default settings
    pub fn new() -> Result<Self, NetError> {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a loader with custom config
    pub fn with_config(config: LoaderConfig) -> Result<Self, NetError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| NetError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn fetch_blocking(
        client: reqwest::blocking::Client,
        headers: Vec<(String, String)>,
        url: String,
    ) -> Result<Response, NetError> {
        let parsed = url::Url::parse(&url).map_err(|e| NetError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NetError::InvalidUrl(format!("Invalid scheme: {url}")));
        }

        let mut request = client.get(parsed);
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().map_err(|e| NetError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response.headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response.bytes()
            .map_err(|e| NetError::Network(e.to_string()))?
            .to_vec();

        Ok(Response { status, headers, body })
    }
}

impl Transport for ResourceLoader {
    fn get(&self, url: &str) -> impl Future<Output = Result<Response, NetError>> {
        tracing::info!("HTTP GET {}", url);
        let client = self.client.clone();
        let headers = self.config.default_headers.clone();
        let url = url.to_string();

        async move {
            let response = smol::unblock(move || Self::fetch_blocking(client, headers, url)).await?;
            tracing::debug!("HTTP {} ({} bytes)", response.status, response.body.len());
            Ok(response)
        }
    }
}
