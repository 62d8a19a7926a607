//! docnav Networking
//!
//! The [`Transport`] seam through which pages are fetched, an HTTP
//! implementation backed by reqwest, and an in-memory implementation for
//! fixtures and embedding.

mod loader;
mod memory;

use std::future::Future;

pub use loader::{LoaderConfig, ResourceLoader};
pub use memory::MemoryTransport;
pub use url::Url;

/// A single-GET page transport
pub trait Transport {
    /// Fetch `url` with GET. Non-2xx statuses are returned as responses,
    /// not errors; only transport-level failures are `Err`.
    fn get(&self, url: &str) -> impl Future<Output = Result<Response, NetError>>;
}

/// HTTP Response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Check if response is OK (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turn a non-2xx response into [`NetError::HttpError`]
    pub fn error_for_status(self) -> Result<Self, NetError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(NetError::HttpError { status: self.status })
        }
    }
}

/// Network error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl NetError {
    /// HTTP status carried by the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            NetError::HttpError { status } => Some(*status),
            _ => None,
        }
    }
}
