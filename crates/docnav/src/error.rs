//! Error types
//!
//! `NavError` covers failures that abort an in-place transition; every one of
//! them is recovered by falling back to a full page load. Missing regions are
//! reported as [`Degradation`] values and never raised.

use docnav_dom::SelectorError;
use docnav_net::NetError;

use crate::page::ContentRegion;

/// Navigation error
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: NetError,
    },

    #[error("invalid navigation target {target:?}: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid selector: {0}")]
    Selector(#[from] SelectorError),

    #[error("config error: {0}")]
    Config(String),
}

impl NavError {
    /// HTTP status of a failed fetch, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            NavError::Fetch { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Third-party widget reinitialization failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{widget} reinitialization failed: {reason}")]
pub struct ReinitError {
    pub widget: String,
    pub reason: String,
}

impl ReinitError {
    pub fn new(widget: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { widget: widget.into(), reason: reason.into() }
    }
}

/// A region that could not be swapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// The fetched page has no such region
    MissingInFetched(ContentRegion),
    /// The live page has no such region
    MissingInLive(ContentRegion),
}

impl Degradation {
    pub fn region(&self) -> ContentRegion {
        match self {
            Degradation::MissingInFetched(r) | Degradation::MissingInLive(r) => *r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_status() {
        let err = NavError::Fetch {
            url: "https://d.test/x".into(),
            source: NetError::HttpError { status: 404 },
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "fetch failed for https://d.test/x: HTTP error: 404");

        let err = NavError::Fetch {
            url: "https://d.test/x".into(),
            source: NetError::Network("reset".into()),
        };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_reinit_error_display() {
        let err = ReinitError::new("mermaid", "syntax error in graph");
        assert_eq!(err.to_string(), "mermaid reinitialization failed: syntax error in graph");
    }
}
