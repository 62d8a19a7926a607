//! In-memory transport
//!
//! Serves pre-registered pages by exact URL. Clones share the same routes and
//! request log, so a test can hand one clone to the engine and inspect the
//! other.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use smol::Timer;

use crate::{NetError, Response, Transport};

#[derive(Debug, Clone)]
enum Route {
    Page { status: u16, body: String },
    Unreachable(String),
}

#[derive(Debug, Default)]
struct Inner {
    routes: HashMap<String, Route>,
    latency: HashMap<String, Duration>,
    requests: Vec<String>,
}

/// Transport answering from an in-memory route table
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 at `url`
    pub fn page(self, url: &str, body: &str) -> Self {
        self.route(url, 200, body)
    }

    /// Serve `body` with an explicit status at `url`
    pub fn route(self, url: &str, status: u16, body: &str) -> Self {
        self.inner.borrow_mut().routes.insert(
            url.to_string(),
            Route::Page { status, body: body.to_string() },
        );
        self
    }

    /// Fail requests for `url` at the transport level
    pub fn unreachable(self, url: &str, reason: &str) -> Self {
        self.inner.borrow_mut().routes.insert(url.to_string(), Route::Unreachable(reason.to_string()));
        self
    }

    /// Delay responses for `url`
    pub fn latency(self, url: &str, delay: Duration) -> Self {
        self.inner.borrow_mut().latency.insert(url.to_string(), delay);
        self
    }

    /// Number of requests issued for `url`
    pub fn request_count(&self, url: &str) -> usize {
        self.inner.borrow().requests.iter().filter(|u| u.as_str() == url).count()
    }

    /// Every requested URL, in order
    pub fn requests(&self) -> Vec<String> {
        self.inner.borrow().requests.clone()
    }
}

impl Transport for MemoryTransport {
    fn get(&self, url: &str) -> impl Future<Output = Result<Response, NetError>> {
        let (route, delay) = {
            let mut inner = self.inner.borrow_mut();
            inner.requests.push(url.to_string());
            (inner.routes.get(url).cloned(), inner.latency.get(url).copied())
        };
        tracing::debug!("memory GET {}", url);

        async move {
            if let Some(delay) = delay {
                Timer::after(delay).await;
            }
            match route {
                Some(Route::Page { status, body }) => Ok(Response {
                    status,
                    headers: vec![("Content-Type".into(), "text/html; charset=utf-8".into())],
                    body: body.into_bytes(),
                }),
                Some(Route::Unreachable(reason)) => Err(NetError::Network(reason)),
                None => Ok(Response {
                    status: 404,
                    headers: Vec::new(),
                    body: b"Not Found".to_vec(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serves_registered_page() {
        let transport = MemoryTransport::new().page("https://d.test/a.html", "<p>a</p>");
        let response = smol::block_on(transport.get("https://d.test/a.html")).unwrap();

        assert!(response.is_success());
        assert_eq!(response.text(), "<p>a</p>");
        assert_eq!(transport.request_count("https://d.test/a.html"), 1);
    }

    #[test]
    fn test_unknown_route_is_404() {
        let transport = MemoryTransport::new();
        let response = smol::block_on(transport.get("https://d.test/missing")).unwrap();
        assert_eq!(response.status, 404);
    }

    #[test]
    fn test_unreachable_route_errors() {
        let transport = MemoryTransport::new().unreachable("https://d.test/x", "connection reset");
        let err = smol::block_on(transport.get("https://d.test/x")).unwrap_err();
        assert_eq!(err, NetError::Network("connection reset".into()));
    }

    #[test]
    fn test_clones_share_request_log() {
        let transport = MemoryTransport::new().page("https://d.test/", "");
        let observer = transport.clone();
        smol::block_on(transport.get("https://d.test/")).unwrap();
        smol::block_on(transport.get("https://d.test/")).unwrap();
        assert_eq!(observer.request_count("https://d.test/"), 2);
        assert_eq!(observer.requests().len(), 2);
    }
}
