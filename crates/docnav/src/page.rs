//! Content regions and parsed pages

use docnav_dom::{Document, NodeId, Selector};
use docnav_html::HtmlParser;

/// One of the three swappable page regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentRegion {
    /// Main article content
    Content,
    /// Right-side table of contents
    Toc,
    /// Left sidebar navigation tree
    Sidebar,
}

impl ContentRegion {
    /// Swap order: content first, then the two navigation panes
    pub const ALL: [ContentRegion; 3] = [ContentRegion::Content, ContentRegion::Toc, ContentRegion::Sidebar];

    pub fn name(&self) -> &'static str {
        match self {
            ContentRegion::Content => "content",
            ContentRegion::Toc => "toc",
            ContentRegion::Sidebar => "sidebar",
        }
    }
}

impl std::fmt::Display for ContentRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Compiled selectors for the three regions
#[derive(Debug, Clone)]
pub struct RegionSelectors {
    pub content: Selector,
    pub toc: Selector,
    pub sidebar: Selector,
}

impl RegionSelectors {
    pub fn get(&self, region: ContentRegion) -> &Selector {
        match region {
            ContentRegion::Content => &self.content,
            ContentRegion::Toc => &self.toc,
            ContentRegion::Sidebar => &self.sidebar,
        }
    }

    /// Find one region in a document
    pub fn locate_one(&self, document: &Document, region: ContentRegion) -> Option<NodeId> {
        let tree = document.tree();
        tree.query_selector(tree.root(), self.get(region))
    }

    /// Find all three regions in a document
    pub fn locate(&self, document: &Document) -> RegionHandles {
        let mut handles = RegionHandles::default();
        for region in ContentRegion::ALL {
            handles.set(region, self.locate_one(document, region));
        }
        handles
    }
}

/// Node handles for the regions of one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionHandles {
    content: Option<NodeId>,
    toc: Option<NodeId>,
    sidebar: Option<NodeId>,
}

impl RegionHandles {
    pub fn get(&self, region: ContentRegion) -> Option<NodeId> {
        match region {
            ContentRegion::Content => self.content,
            ContentRegion::Toc => self.toc,
            ContentRegion::Sidebar => self.sidebar,
        }
    }

    pub fn set(&mut self, region: ContentRegion, node: Option<NodeId>) {
        match region {
            ContentRegion::Content => self.content = node,
            ContentRegion::Toc => self.toc = node,
            ContentRegion::Sidebar => self.sidebar = node,
        }
    }

    /// Regions with no handle
    pub fn missing(&self) -> Vec<ContentRegion> {
        ContentRegion::ALL.into_iter().filter(|r| self.get(*r).is_none()).collect()
    }
}

/// A fetched and parsed page, ready to be swapped in
#[derive(Debug)]
pub struct CachedDocument {
    url: String,
    title: String,
    document: Document,
    regions: RegionHandles,
}

impl CachedDocument {
    /// Parse `html` fetched from `url` and locate its regions
    pub fn from_html(url: &str, html: &str, selectors: &RegionSelectors) -> Self {
        let document = HtmlParser::new().parse_with_url(html, url);
        Self::from_document(document, selectors)
    }

    /// Wrap an already parsed document
    pub fn from_document(document: Document, selectors: &RegionSelectors) -> Self {
        let regions = selectors.locate(&document);
        let missing = regions.missing();
        if !missing.is_empty() {
            tracing::debug!("{} lacks regions {:?}", document.url(), missing);
        }

        Self {
            url: document.url().to_string(),
            title: document.title(),
            document,
            regions,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn region(&self, region: ContentRegion) -> Option<NodeId> {
        self.regions.get(region)
    }

    pub fn regions(&self) -> RegionHandles {
        self.regions
    }
}
