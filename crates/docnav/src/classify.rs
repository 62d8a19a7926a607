//! Link Classifier
//!
//! Pure predicate deciding whether an anchor interaction is taken over by the
//! navigator or left to the browser.

use docnav_dom::ElementData;
use url::Url;

/// Modifier keys held during an interaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { ctrl: false, meta: false, shift: false, alt: false };

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::NONE }
    }

    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

/// Kind of pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Click(Modifiers),
    Hover,
}

/// The parts of an anchor the classifier looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCandidate {
    /// Raw `href` attribute
    pub href: Option<String>,
    /// Raw `target` attribute
    pub target: Option<String>,
}

impl LinkCandidate {
    pub fn new(href: &str) -> Self {
        Self { href: Some(href.to_string()), target: None }
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn from_element(elem: &ElementData) -> Self {
        Self {
            href: elem.get_attr("href").map(str::to_string),
            target: elem.get_attr("target").map(str::to_string),
        }
    }
}

/// Why an interaction was left to the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ModifierHeld,
    NoAnchor,
    MissingHref,
    FragmentOnly,
    ScriptLink,
    NewBrowsingContext,
    Unresolvable,
    CrossOrigin,
    SamePath,
}

/// Classifier decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Take over navigation to this absolute URL
    Intercept(Url),
    /// Leave the interaction alone
    Reject(Rejection),
}

impl Verdict {
    pub fn is_intercept(&self) -> bool {
        matches!(self, Verdict::Intercept(_))
    }
}

/// Link classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkClassifier;

impl LinkClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify an interaction with `link` on the page at `current`
    pub fn classify(&self, link: Option<&LinkCandidate>, current: &Url, interaction: Interaction) -> Verdict {
        if let Interaction::Click(mods) = interaction {
            if mods.any() {
                return Verdict::Reject(Rejection::ModifierHeld);
            }
        }

        let Some(link) = link else {
            return Verdict::Reject(Rejection::NoAnchor);
        };
        let href = match link.href.as_deref().map(str::trim) {
            Some(href) if !href.is_empty() => href,
            _ => return Verdict::Reject(Rejection::MissingHref),
        };
        if href.starts_with('#') {
            return Verdict::Reject(Rejection::FragmentOnly);
        }
        if href.get(..11).is_some_and(|p| p.eq_ignore_ascii_case("javascript:")) {
            return Verdict::Reject(Rejection::ScriptLink);
        }
        if link.target.as_deref().is_some_and(|t| t.trim().eq_ignore_ascii_case("_blank")) {
            return Verdict::Reject(Rejection::NewBrowsingContext);
        }

        let Ok(resolved) = current.join(href) else {
            return Verdict::Reject(Rejection::Unresolvable);
        };
        if resolved.origin() != current.origin() {
            return Verdict::Reject(Rejection::CrossOrigin);
        }
        // Same document: a click is an in-page jump and a prefetch would
        // only store the current page under another key
        if resolved.path() == current.path() {
            return Verdict::Reject(Rejection::SamePath);
        }

        Verdict::Intercept(resolved)
    }
}
