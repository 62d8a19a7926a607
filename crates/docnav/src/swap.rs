//! Fragment Swapper
//!
//! Replaces the inner markup of the content regions of the live page with
//! the matching regions of a fetched page. Region containers themselves are
//! kept, so their attributes and classes (including transition markers)
//! survive the swap.

use std::rc::Rc;

use docnav_dom::{Document, NodeId};
use url::Url;

use crate::error::Degradation;
use crate::page::{CachedDocument, ContentRegion, RegionSelectors};
use crate::reinit::{ReinitRegistry, ReinitReport};
use crate::window::Window;

/// Whether a swap adds a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryUpdate {
    /// Link navigation: push a new entry
    Push,
    /// History traversal: the browser already moved the cursor
    Keep,
}

/// What a swap did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapReport {
    /// Regions whose markup was replaced, in swap order
    pub swapped: Vec<ContentRegion>,
    /// Regions left untouched
    pub skipped: Vec<Degradation>,
    /// Reinitialization results
    pub reinit: ReinitReport,
}

impl SwapReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Fragment swapper
#[derive(Debug)]
pub struct FragmentSwapper {
    selectors: Rc<RegionSelectors>,
    reinit: ReinitRegistry,
}

impl FragmentSwapper {
    pub fn new(selectors: Rc<RegionSelectors>, reinit: ReinitRegistry) -> Self {
        Self { selectors, reinit }
    }

    pub fn reinit(&self) -> &ReinitRegistry {
        &self.reinit
    }

    /// Swap `page` into the live document of `window` and commit `url`
    pub fn swap<W: Window>(&self, page: &CachedDocument, url: &Url, window: &mut W, history: HistoryUpdate) -> SwapReport {
        let mut report = SwapReport::default();
        let live = window.document_mut();

        for region in ContentRegion::ALL {
            let Some(src) = page.region(region) else {
                report.skipped.push(Degradation::MissingInFetched(region));
                continue;
            };
            // Looked up per region: an earlier swap may have replaced a
            // container nested inside it.
            let Some(dst) = self.selectors.locate_one(live, region) else {
                report.skipped.push(Degradation::MissingInLive(region));
                continue;
            };
            let count = replace_region(live, dst, page.document(), src);
            tracing::debug!("Swapped {} ({} nodes)", region, count);
            report.swapped.push(region);
        }
        for skipped in &report.skipped {
            tracing::debug!("Skipped region: {:?}", skipped);
        }

        live.set_title(page.title());
        if history == HistoryUpdate::Push {
            window.push_state(url, page.title());
        }
        window.scroll_to(0.0, 0.0);

        report.reinit = self.reinit.run(window.document_mut());
        report
    }
}

/// Replace the children of `dst` with a copy of the children of `src`
fn replace_region(live: &mut Document, dst: NodeId, fetched: &Document, src: NodeId) -> usize {
    let tree = live.tree_mut();
    tree.remove_children(dst);
    tree.import_children(dst, fetched.tree(), src)
}
