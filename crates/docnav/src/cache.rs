//! Page Cache
//!
//! Session-scoped memo of parsed pages keyed by the exact URL string.
//! There is no TTL and no eviction: a page is assumed static for the lifetime
//! of the session, and the cache is dropped together with the navigator that
//! owns it.

use std::collections::HashMap;
use std::rc::Rc;

use crate::page::CachedDocument;

/// Page cache
#[derive(Debug, Default)]
pub struct PageCache {
    entries: HashMap<String, Rc<CachedDocument>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached page
    pub fn get(&self, url: &str) -> Option<Rc<CachedDocument>> {
        self.entries.get(url).cloned()
    }

    /// Check if URL is cached
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Store a page, returning the entry it replaced
    pub fn put(&mut self, url: &str, doc: Rc<CachedDocument>) -> Option<Rc<CachedDocument>> {
        self.entries.insert(url.to_string(), doc)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached URLs, in no particular order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NavConfig;

    fn page(url: &str, html: &str) -> Rc<CachedDocument> {
        let selectors = NavConfig::default().region_selectors().unwrap();
        Rc::new(CachedDocument::from_html(url, html, &selectors))
    }

    #[test]
    fn test_cache_basic() {
        let mut cache = PageCache::new();
        assert!(cache.is_empty());

        cache.put("https://d.test/a.html", page("https://d.test/a.html", "<title>A</title>"));

        assert!(cache.contains("https://d.test/a.html"));
        assert_eq!(cache.get("https://d.test/a.html").unwrap().title(), "A");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_exact_keys() {
        let mut cache = PageCache::new();
        cache.put("https://d.test/a.html", page("https://d.test/a.html", ""));

        assert!(!cache.contains("https://d.test/a.html#install"));
        assert!(!cache.contains("https://d.test/A.html"));
    }

    #[test]
    fn test_put_overwrites() {
        let mut cache = PageCache::new();
        cache.put("u", page("u", "<title>one</title>"));
        let old = cache.put("u", page("u", "<title>two</title>"));

        assert_eq!(old.unwrap().title(), "one");
        assert_eq!(cache.get("u").unwrap().title(), "two");
        assert_eq!(cache.urls().count(), 1);
    }
}
