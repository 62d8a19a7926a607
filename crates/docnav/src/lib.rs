//! docnav - In-place page transitions for static documentation sites
//!
//! Intercepts same-origin link clicks, fetches the destination page (from a
//! session cache when possible) and replaces the content, table-of-contents
//! and sidebar regions of the live page instead of performing a full load.
//!
//! ```text
//! click ──► LinkClassifier ──► Navigator ──► PageFetcher ──► PageCache
//!                                  │              │
//! hover ──► LinkClassifier ────────┼──────────────┘
//!                                  ▼
//! popstate ─────────────────► FragmentSwapper ──► ReinitRegistry
//! ```
//!
//! Any failure during an in-place transition falls back to a full browser
//! navigation through [`Window::assign`].

mod cache;
mod classify;
mod config;
mod error;
mod fetcher;
mod history;
mod orchestrator;
mod page;
mod reinit;
mod swap;
mod window;

pub use cache::PageCache;
pub use classify::{Interaction, LinkCandidate, LinkClassifier, Modifiers, Rejection, Verdict};
pub use config::{DEFAULT_TRANSITION_MS, NavConfig};
pub use error::{Degradation, NavError, ReinitError};
pub use fetcher::PageFetcher;
pub use history::{HistoryEntry, SessionHistory};
pub use orchestrator::{ClickDisposition, FallbackReason, NavigationOutcome, Navigator, TransitionState};
pub use page::{CachedDocument, ContentRegion, RegionHandles, RegionSelectors};
pub use reinit::{CopyButtonReset, DiagramReinit, DiagramRenderer, ReinitRegistry, ReinitReport, Reinitializer};
pub use swap::{FragmentSwapper, HistoryUpdate, SwapReport};
pub use window::{HeadlessWindow, Window};

pub use docnav_dom::{Document, NodeId};
pub use docnav_net::{MemoryTransport, Transport};
pub use url::Url;
