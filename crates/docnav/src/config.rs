//! Navigation Configuration
//!
//! Selectors and class names are the contract with the page template and its
//! stylesheet. The fade durations must match the CSS transition length.

use std::path::Path;
use std::time::Duration;

use docnav_dom::Selector;
use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::page::RegionSelectors;

/// Default fade duration, matching the theme stylesheet
pub const DEFAULT_TRANSITION_MS: u64 = 180;

/// Navigation engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Main content container
    pub content_selector: String,

    /// Right-side table of contents
    pub toc_selector: String,

    /// Left sidebar navigation tree
    pub sidebar_selector: String,

    /// Marker class while the content fades out
    pub transition_out_class: String,

    /// Marker class while the content fades in
    pub transition_in_class: String,

    /// Class added to `<body>` on the initial page-load signal
    pub loaded_class: String,

    /// Fade-out duration in milliseconds
    pub fade_out_ms: u64,

    /// Fade-in duration in milliseconds
    pub fade_in_ms: u64,

    /// Skip the swap of a navigation that a newer one has overtaken
    pub supersede_stale: bool,

    /// Diagram containers re-rendered after a swap
    pub diagram_selector: String,

    /// Copy-to-clipboard buttons whose state is reset after a swap
    pub copy_button_selector: String,

    /// Attribute holding a copy button's "copied" state
    pub copy_button_state_attr: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            content_selector: ".main".into(),
            toc_selector: ".toc-tree".into(),
            sidebar_selector: ".sidebar-tree".into(),
            transition_out_class: "page-transitioning-out".into(),
            transition_in_class: "page-transitioning-in".into(),
            loaded_class: "page-loaded".into(),
            fade_out_ms: DEFAULT_TRANSITION_MS,
            fade_in_ms: DEFAULT_TRANSITION_MS,
            supersede_stale: false,
            diagram_selector: ".mermaid".into(),
            copy_button_selector: ".copybtn".into(),
            copy_button_state_attr: "data-clipboard-copied".into(),
        }
    }
}

impl NavConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, NavError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| NavError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NavError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| NavError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Check that every selector parses and class names are usable
    pub fn validate(&self) -> Result<(), NavError> {
        self.region_selectors()?;
        Selector::parse(&self.diagram_selector)?;
        Selector::parse(&self.copy_button_selector)?;
        for class in [&self.transition_out_class, &self.transition_in_class, &self.loaded_class] {
            if class.is_empty() || class.contains(char::is_whitespace) {
                return Err(NavError::Config(format!("invalid class name {class:?}")));
            }
        }
        Ok(())
    }

    /// Compile the three region selectors
    pub fn region_selectors(&self) -> Result<RegionSelectors, NavError> {
        Ok(RegionSelectors {
            content: Selector::parse(&self.content_selector)?,
            toc: Selector::parse(&self.toc_selector)?,
            sidebar: Selector::parse(&self.sidebar_selector)?,
        })
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    /// Set both fade durations
    pub fn with_transition(mut self, duration: Duration) -> Self {
        let ms = duration.as_millis() as u64;
        self.fade_out_ms = ms;
        self.fade_in_ms = ms;
        self
    }

    pub fn with_supersede_stale(mut self, enabled: bool) -> Self {
        self.supersede_stale = enabled;
        self
    }
}
