//! Transition Orchestrator
//!
//! Sequences fade-out, fetch, swap and fade-in for one navigation, and turns
//! click, hover and popstate events into navigations or prefetches.
//!
//! Everything runs on one thread. Navigations are plain futures returned to
//! the caller, who spawns them on a local executor; overlapping navigations
//! run independently and the last swap to complete wins, unless
//! [`NavConfig::supersede_stale`] is set.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

use docnav_dom::{NodeId, Selector};
use docnav_net::Transport;
use smol::Timer;
use smol::future::{self, BoxedLocal, FutureExt};
use url::Url;

use crate::NavConfig;
use crate::cache::PageCache;
use crate::classify::{Interaction, LinkCandidate, LinkClassifier, Modifiers, Rejection, Verdict};
use crate::error::NavError;
use crate::fetcher::PageFetcher;
use crate::page::{CachedDocument, ContentRegion};
use crate::reinit::ReinitRegistry;
use crate::swap::{FragmentSwapper, HistoryUpdate, SwapReport};
use crate::window::Window;

/// Transition state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    /// No navigation in progress
    #[default]
    Idle,
    /// Content marked as fading out; fetch in flight
    FadingOut,
    /// Regions being replaced
    Swapping,
    /// Content marked as fading in
    FadingIn,
}

/// Why a navigation was handed to the browser
#[derive(Debug)]
pub enum FallbackReason {
    /// The live page has no content region to swap into
    NoContentRegion,
    /// The destination could not be fetched
    FetchFailed(NavError),
}

/// How a navigation ended
#[derive(Debug)]
pub enum NavigationOutcome {
    /// Regions replaced in place
    Swapped(SwapReport),
    /// Full browser navigation requested
    FullNavigation(FallbackReason),
    /// A newer navigation started first; nothing was swapped
    Superseded,
}

impl NavigationOutcome {
    pub fn is_swapped(&self) -> bool {
        matches!(self, NavigationOutcome::Swapped(_))
    }
}

/// What happened to a click
pub enum ClickDisposition {
    /// Left to the browser
    Native(Rejection),
    /// Default prevented; the navigation future must be driven to completion
    Intercepted(BoxedLocal<NavigationOutcome>),
}

impl ClickDisposition {
    pub fn is_intercepted(&self) -> bool {
        matches!(self, ClickDisposition::Intercepted(_))
    }
}

impl std::fmt::Debug for ClickDisposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClickDisposition::Native(reason) => f.debug_tuple("Native").field(reason).finish(),
            ClickDisposition::Intercepted(_) => f.write_str("Intercepted"),
        }
    }
}

/// In-place navigation controller for one browsing context.
///
/// Cloning is cheap; clones share the window, cache and state.
pub struct Navigator<W: Window, T: Transport> {
    inner: Rc<Inner<W, T>>,
}

impl<W: Window, T: Transport> Clone for Navigator<W, T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

struct Inner<W: Window, T: Transport> {
    config: NavConfig,
    window: RefCell<W>,
    fetcher: PageFetcher<T>,
    swapper: FragmentSwapper,
    classifier: LinkClassifier,
    anchor: Selector,
    state: Cell<TransitionState>,
    generation: Cell<u64>,
}

impl<W: Window + 'static, T: Transport + 'static> Navigator<W, T> {
    /// Create a navigator with the default reinitialization hooks
    pub fn new(window: W, transport: T, config: NavConfig) -> Result<Self, NavError> {
        let reinit = ReinitRegistry::defaults(&config)?;
        Self::with_reinit(window, transport, config, reinit)
    }

    /// Create a navigator with custom reinitialization hooks
    pub fn with_reinit(window: W, transport: T, config: NavConfig, reinit: ReinitRegistry) -> Result<Self, NavError> {
        config.validate()?;
        let selectors = Rc::new(config.region_selectors()?);
        let anchor = Selector::parse("a[href]")?;

        // History traversal back to the first page is served without a fetch
        let fetcher = PageFetcher::new(transport, selectors.clone());
        let location = window.location().as_str().to_string();
        fetcher.seed(&location, CachedDocument::from_document(window.document().clone(), &selectors));

        Ok(Self {
            inner: Rc::new(Inner {
                fetcher,
                swapper: FragmentSwapper::new(selectors, reinit),
                classifier: LinkClassifier::new(),
                window: RefCell::new(window),
                anchor,
                state: Cell::new(TransitionState::Idle),
                generation: Cell::new(0),
                config,
            }),
        })
    }

    /// Navigate in place to `url`, pushing a history entry
    pub fn navigate(&self, url: Url) -> BoxedLocal<NavigationOutcome> {
        self.inner.clone().run(url, HistoryUpdate::Push).boxed_local()
    }

    /// Resolve `target` against the current location and navigate to it
    pub fn navigate_to(&self, target: &str) -> Result<BoxedLocal<NavigationOutcome>, NavError> {
        let url = self.inner.window.borrow().location().join(target)
            .map_err(|source| NavError::InvalidTarget { target: target.to_string(), source })?;
        Ok(self.navigate(url))
    }

    /// Click on `target` with `modifiers` held
    pub fn on_click(&self, target: NodeId, modifiers: Modifiers) -> ClickDisposition {
        match self.inner.classify(target, Interaction::Click(modifiers)) {
            Verdict::Intercept(url) => ClickDisposition::Intercepted(self.navigate(url)),
            Verdict::Reject(reason) => {
                tracing::trace!("Click left to browser: {:?}", reason);
                ClickDisposition::Native(reason)
            }
        }
    }

    /// Pointer entered `target`. Returns a cache-warming future when the
    /// hovered link qualifies and is not cached yet.
    pub fn on_hover(&self, target: NodeId) -> Option<BoxedLocal<bool>> {
        let Verdict::Intercept(url) = self.inner.classify(target, Interaction::Hover) else {
            return None;
        };
        if self.inner.fetcher.is_cached(url.as_str()) {
            return None;
        }
        tracing::debug!("Prefetching {}", url);
        let inner = self.inner.clone();
        Some(async move { inner.fetcher.prefetch(url.as_str()).await }.boxed_local())
    }

    /// The browser moved through history; the location is already updated
    pub fn on_popstate(&self) -> BoxedLocal<NavigationOutcome> {
        let url = self.inner.window.borrow().location().clone();
        self.inner.clone().run(url, HistoryUpdate::Keep).boxed_local()
    }

    /// Initial page-load signal
    pub fn on_load(&self) {
        let mut window = self.inner.window.borrow_mut();
        let document = window.document_mut();
        let body = document.body();
        if let Some(elem) = document.tree_mut().element_mut(body) {
            elem.add_class(&self.inner.config.loaded_class);
        }
    }

    pub fn state(&self) -> TransitionState {
        self.inner.state.get()
    }

    pub fn config(&self) -> &NavConfig {
        &self.inner.config
    }

    /// Borrow the page cache
    pub fn cache(&self) -> Ref<'_, PageCache> {
        self.inner.fetcher.cache()
    }

    /// Network requests issued so far
    pub fn network_fetches(&self) -> usize {
        self.inner.fetcher.network_fetches()
    }

    pub fn transport(&self) -> &T {
        self.inner.fetcher.transport()
    }

    /// Borrow the window. Do not hold across an await.
    pub fn window(&self) -> Ref<'_, W> {
        self.inner.window.borrow()
    }

    /// Mutably borrow the window. Do not hold across an await.
    pub fn window_mut(&self) -> RefMut<'_, W> {
        self.inner.window.borrow_mut()
    }
}

impl<W: Window, T: Transport> Inner<W, T> {
    fn classify(&self, target: NodeId, interaction: Interaction) -> Verdict {
        let window = self.window.borrow();
        let tree = window.document().tree();
        let candidate = tree.closest(target, &self.anchor)
            .and_then(|id| tree.element(id))
            .map(LinkCandidate::from_element);
        self.classifier.classify(candidate.as_ref(), window.location(), interaction)
    }

    async fn run(self: Rc<Self>, url: Url, history: HistoryUpdate) -> NavigationOutcome {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        tracing::info!("Navigating to {}", url);

        if !self.has_content_region() {
            return self.fall_back(generation, &url, FallbackReason::NoContentRegion);
        }

        self.mark(Some(self.config.transition_out_class.as_str()), None);
        self.set_state(generation, TransitionState::FadingOut);

        let (_, fetched) = future::zip(
            Timer::after(self.config.fade_out()),
            self.fetcher.fetch(url.as_str()),
        ).await;

        let page = match fetched {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!("{}", err);
                return self.fall_back(generation, &url, FallbackReason::FetchFailed(err));
            }
        };

        if self.config.supersede_stale && self.generation.get() != generation {
            tracing::info!("Navigation to {} superseded", url);
            return NavigationOutcome::Superseded;
        }

        self.set_state(generation, TransitionState::Swapping);
        let report = {
            let mut window = self.window.borrow_mut();
            self.swapper.swap(&page, &url, &mut *window, history)
        };

        self.mark(Some(self.config.transition_in_class.as_str()), Some(self.config.transition_out_class.as_str()));
        self.set_state(generation, TransitionState::FadingIn);

        Timer::after(self.config.fade_in()).await;

        self.mark(None, Some(self.config.transition_in_class.as_str()));
        self.set_state(generation, TransitionState::Idle);

        NavigationOutcome::Swapped(report)
    }

    fn has_content_region(&self) -> bool {
        let window = self.window.borrow();
        self.fetcher.selectors().locate_one(window.document(), ContentRegion::Content).is_some()
    }

    /// Toggle transition markers on the content region
    fn mark(&self, add: Option<&str>, remove: Option<&str>) {
        let mut window = self.window.borrow_mut();
        let document = window.document_mut();
        let Some(content) = self.fetcher.selectors().locate_one(document, ContentRegion::Content) else {
            return;
        };
        if let Some(elem) = document.tree_mut().element_mut(content) {
            if let Some(class) = remove {
                elem.remove_class(class);
            }
            if let Some(class) = add {
                elem.add_class(class);
            }
        }
    }

    /// Only the most recent navigation reports its phase
    fn set_state(&self, generation: u64, state: TransitionState) {
        if self.generation.get() == generation {
            self.state.set(state);
        }
    }

    fn fall_back(&self, generation: u64, url: &Url, reason: FallbackReason) -> NavigationOutcome {
        tracing::warn!("Falling back to full navigation: {}", url);
        self.window.borrow_mut().assign(url);
        self.set_state(generation, TransitionState::Idle);
        NavigationOutcome::FullNavigation(reason)
    }
}
