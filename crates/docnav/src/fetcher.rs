//! Page Fetcher
//!
//! Cache-first retrieval of parsed pages. A page is fetched over the network
//! at most once per session; every later request for the same URL string is
//! served from the [`PageCache`].

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use docnav_net::Transport;

use crate::cache::PageCache;
use crate::error::NavError;
use crate::page::{CachedDocument, RegionSelectors};

/// Cache-first page fetcher
#[derive(Debug)]
pub struct PageFetcher<T: Transport> {
    transport: T,
    cache: RefCell<PageCache>,
    selectors: Rc<RegionSelectors>,
    network_fetches: Cell<usize>,
}

impl<T: Transport> PageFetcher<T> {
    pub fn new(transport: T, selectors: Rc<RegionSelectors>) -> Self {
        Self {
            transport,
            cache: RefCell::new(PageCache::new()),
            selectors,
            network_fetches: Cell::new(0),
        }
    }

    /// Get the parsed page at `url`, from the cache when present.
    ///
    /// Non-2xx responses and transport failures are errors and are never
    /// cached, so a later request retries the network.
    pub async fn fetch(&self, url: &str) -> Result<Rc<CachedDocument>, NavError> {
        if let Some(page) = self.cache.borrow().get(url) {
            tracing::debug!("Cache hit: {}", url);
            return Ok(page);
        }

        self.network_fetches.set(self.network_fetches.get() + 1);
        let response = self.transport.get(url).await
            .and_then(|r| r.error_for_status())
            .map_err(|source| NavError::Fetch { url: url.to_string(), source })?;

        let page = Rc::new(CachedDocument::from_html(url, &response.text(), &self.selectors));
        self.cache.borrow_mut().put(url, page.clone());
        Ok(page)
    }

    /// Warm the cache for `url`. Returns true when a network fetch succeeded.
    /// Failures are logged and otherwise ignored.
    pub async fn prefetch(&self, url: &str) -> bool {
        if self.is_cached(url) {
            return false;
        }
        match self.fetch(url).await {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!("Prefetch failed: {}", err);
                false
            }
        }
    }

    /// Store a page obtained without a fetch, such as the initially loaded one
    pub fn seed(&self, url: &str, page: CachedDocument) {
        self.cache.borrow_mut().put(url, Rc::new(page));
    }

    pub fn is_cached(&self, url: &str) -> bool {
        self.cache.borrow().contains(url)
    }

    /// Borrow the page cache
    pub fn cache(&self) -> Ref<'_, PageCache> {
        self.cache.borrow()
    }

    /// Number of network requests issued so far
    pub fn network_fetches(&self) -> usize {
        self.network_fetches.get()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn selectors(&self) -> &RegionSelectors {
        &self.selectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NavConfig;
    use crate::page::ContentRegion;
    use docnav_net::MemoryTransport;

    const A: &str = "https://d.test/a.html";

    fn fetcher(transport: MemoryTransport) -> PageFetcher<MemoryTransport> {
        let selectors = NavConfig::default().region_selectors().unwrap();
        PageFetcher::new(transport, Rc::new(selectors))
    }

    #[test]
    fn test_second_fetch_served_from_cache() {
        let fetcher = fetcher(MemoryTransport::new().page(A, r#"<title>A</title><div class="main">a</div>"#));

        smol::block_on(async {
            let first = fetcher.fetch(A).await.unwrap();
            let second = fetcher.fetch(A).await.unwrap();
            assert!(Rc::ptr_eq(&first, &second));
            assert!(first.region(ContentRegion::Content).is_some());
        });

        assert_eq!(fetcher.network_fetches(), 1);
        assert_eq!(fetcher.transport().request_count(A), 1);
    }

    #[test]
    fn test_error_status_not_cached() {
        let fetcher = fetcher(MemoryTransport::new().route(A, 500, "oops"));

        let err = smol::block_on(fetcher.fetch(A)).unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!fetcher.is_cached(A));

        smol::block_on(fetcher.fetch(A)).unwrap_err();
        assert_eq!(fetcher.transport().request_count(A), 2);
    }

    #[test]
    fn test_network_failure() {
        let fetcher = fetcher(MemoryTransport::new().unreachable(A, "connection refused"));
        let err = smol::block_on(fetcher.fetch(A)).unwrap_err();
        assert!(matches!(err, NavError::Fetch { .. }));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_prefetch_skips_cached() {
        let fetcher = fetcher(MemoryTransport::new().page(A, "<title>A</title>"));

        assert!(smol::block_on(fetcher.prefetch(A)));
        assert!(!smol::block_on(fetcher.prefetch(A)));
        assert_eq!(fetcher.network_fetches(), 1);
        assert_eq!(fetcher.cache().len(), 1);
    }

    #[test]
    fn test_seeded_page_not_fetched() {
        let fetcher = fetcher(MemoryTransport::new());
        let page = CachedDocument::from_html(A, "<title>Seeded</title>", fetcher.selectors());
        fetcher.seed(A, page);

        let page = smol::block_on(fetcher.fetch(A)).unwrap();
        assert_eq!(page.title(), "Seeded");
        assert_eq!(fetcher.network_fetches(), 0);
    }

    #[test]
    fn test_prefetch_swallows_errors() {
        let fetcher = fetcher(MemoryTransport::new());
        assert!(!smol::block_on(fetcher.prefetch(A)));
        assert!(fetcher.cache().is_empty());
    }
}
