//! Browsing context seam
//!
//! [`Window`] is everything the navigator needs from the host page: the live
//! document, the address, history, scrolling and full navigation.
//! [`HeadlessWindow`] is the in-process implementation used by the CLI and
//! by tests.

use docnav_dom::Document;
use docnav_html::HtmlParser;
use url::Url;

use crate::history::SessionHistory;

/// Host browsing context
pub trait Window {
    /// The live document
    fn document(&self) -> &Document;

    /// The live document, mutably
    fn document_mut(&mut self) -> &mut Document;

    /// Current address
    fn location(&self) -> &Url;

    /// Add a history entry and update the address without reloading
    fn push_state(&mut self, url: &Url, title: &str);

    /// Scroll the viewport
    fn scroll_to(&mut self, x: f32, y: f32);

    /// Full browser navigation, unloading the current page
    fn assign(&mut self, url: &Url);
}

/// Headless browsing context
#[derive(Debug)]
pub struct HeadlessWindow {
    document: Document,
    location: Url,
    history: SessionHistory,
    scroll_x: f32,
    scroll_y: f32,
    full_navigations: Vec<Url>,
}

impl HeadlessWindow {
    /// Open `document` at `location`
    pub fn new(location: Url, document: Document) -> Self {
        let history = SessionHistory::new(location.clone(), &document.title());
        Self {
            document,
            location,
            history,
            scroll_x: 0.0,
            scroll_y: 0.0,
            full_navigations: Vec::new(),
        }
    }

    /// Open a page from its HTML source
    pub fn from_html(location: Url, html: &str) -> Self {
        let document = HtmlParser::new().parse_with_url(html, location.as_str());
        Self::new(location, document)
    }

    /// Replace the whole page after a full load, keeping session history
    pub fn load(&mut self, location: Url, document: Document) {
        self.history.push_state(location.clone(), &document.title());
        self.document = document;
        self.location = location;
        self.scroll_x = 0.0;
        self.scroll_y = 0.0;
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn scroll_position(&self) -> (f32, f32) {
        (self.scroll_x, self.scroll_y)
    }

    /// Full navigations requested so far, oldest first
    pub fn full_navigations(&self) -> &[Url] {
        &self.full_navigations
    }

    /// Drain the pending full navigation, if any
    pub fn take_full_navigation(&mut self) -> Option<Url> {
        let url = self.full_navigations.pop();
        self.full_navigations.clear();
        url
    }

    /// Browser back button. Returns true when popstate must be dispatched.
    pub fn back(&mut self) -> bool {
        let Some(entry) = self.history.back() else {
            return false;
        };
        self.location = entry.url.clone();
        self.document.set_url(entry.url.as_str());
        true
    }

    /// Browser forward button. Returns true when popstate must be dispatched.
    pub fn forward(&mut self) -> bool {
        let Some(entry) = self.history.forward() else {
            return false;
        };
        self.location = entry.url.clone();
        self.document.set_url(entry.url.as_str());
        true
    }
}

impl Window for HeadlessWindow {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    fn location(&self) -> &Url {
        &self.location
    }

    fn push_state(&mut self, url: &Url, title: &str) {
        self.history.push_state(url.clone(), title);
        self.location = url.clone();
        self.document.set_url(url.as_str());
    }

    fn scroll_to(&mut self, x: f32, y: f32) {
        self.scroll_x = x.max(0.0);
        self.scroll_y = y.max(0.0);
    }

    fn assign(&mut self, url: &Url) {
        tracing::info!("Full navigation to {}", url);
        self.full_navigations.push(url.clone());
    }
}
