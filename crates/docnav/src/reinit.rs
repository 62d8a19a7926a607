//! Reinitialization Hooks
//!
//! Widgets that keep state bound to DOM nodes (diagram renderers, copy
//! buttons) lose it when a region's markup is replaced. Each registered
//! [`Reinitializer`] is re-run after every swap, in isolation: an error or a
//! panic in one never prevents the others from running.

use std::panic::{self, AssertUnwindSafe};

use docnav_dom::{Document, NodeId, Selector};

use crate::NavConfig;
use crate::error::{NavError, ReinitError};

/// A widget that must be re-run after region markup changes
pub trait Reinitializer {
    /// Widget name for logs
    fn name(&self) -> &str;

    /// Re-bind the widget to the current document
    fn reinitialize(&self, document: &mut Document) -> Result<(), ReinitError>;
}

/// Renders diagram sources found in diagram containers
pub trait DiagramRenderer {
    fn render(&self, document: &mut Document, containers: &[NodeId]) -> Result<(), ReinitError>;
}

/// Outcome of one reinitialization pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReinitReport {
    /// Widgets that completed
    pub completed: Vec<String>,
    /// Widgets that failed or panicked
    pub failed: Vec<String>,
}

/// Ordered registry of reinitializers
#[derive(Default)]
pub struct ReinitRegistry {
    entries: Vec<Box<dyn Reinitializer>>,
}

impl ReinitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagram and copy-button hooks configured from `config`
    pub fn defaults(config: &NavConfig) -> Result<Self, NavError> {
        let mut registry = Self::new();
        registry.register(DiagramReinit::new(Selector::parse(&config.diagram_selector)?));
        registry.register(CopyButtonReset::new(
            Selector::parse(&config.copy_button_selector)?,
            &config.copy_button_state_attr,
        ));
        Ok(registry)
    }

    pub fn register(&mut self, entry: impl Reinitializer + 'static) {
        self.entries.push(Box::new(entry));
    }

    pub fn with(mut self, entry: impl Reinitializer + 'static) -> Self {
        self.register(entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every entry against `document`
    pub fn run(&self, document: &mut Document) -> ReinitReport {
        let mut report = ReinitReport::default();
        for entry in &self.entries {
            let name = entry.name().to_string();
            match panic::catch_unwind(AssertUnwindSafe(|| entry.reinitialize(document))) {
                Ok(Ok(())) => report.completed.push(name),
                Ok(Err(err)) => {
                    tracing::warn!("{}", err);
                    report.failed.push(name);
                }
                Err(_) => {
                    tracing::warn!("{} reinitialization panicked", name);
                    report.failed.push(name);
                }
            }
        }
        report
    }
}

impl std::fmt::Debug for ReinitRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter().map(|e| e.name())).finish()
    }
}

/// Re-runs the diagram renderer over diagram containers.
/// Without a renderer this is a no-op, like a page that never loaded one.
pub struct DiagramReinit {
    selector: Selector,
    renderer: Option<Box<dyn DiagramRenderer>>,
}

impl DiagramReinit {
    pub fn new(selector: Selector) -> Self {
        Self { selector, renderer: None }
    }

    pub fn with_renderer(mut self, renderer: impl DiagramRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }
}

impl Reinitializer for DiagramReinit {
    fn name(&self) -> &str {
        "diagrams"
    }

    fn reinitialize(&self, document: &mut Document) -> Result<(), ReinitError> {
        let Some(renderer) = &self.renderer else {
            return Ok(());
        };
        let tree = document.tree();
        let containers = tree.query_selector_all(tree.root(), &self.selector);
        if containers.is_empty() {
            return Ok(());
        }
        tracing::debug!("Rendering {} diagrams", containers.len());
        renderer.render(document, &containers)
    }
}

/// Clears the "copied" indicator on copy-to-clipboard buttons so the first
/// click after a swap shows the copy feedback again.
pub struct CopyButtonReset {
    selector: Selector,
    state_attr: String,
}

impl CopyButtonReset {
    pub fn new(selector: Selector, state_attr: &str) -> Self {
        Self { selector, state_attr: state_attr.to_string() }
    }
}

impl Reinitializer for CopyButtonReset {
    fn name(&self) -> &str {
        "copy-buttons"
    }

    fn reinitialize(&self, document: &mut Document) -> Result<(), ReinitError> {
        let tree = document.tree_mut();
        let buttons = tree.query_selector_all(tree.root(), &self.selector);
        for id in buttons {
            if let Some(elem) = tree.element_mut(id) {
                elem.set_attr(&self.state_attr, "");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use docnav_html::HtmlParser;

    struct Failing;

    impl Reinitializer for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn reinitialize(&self, _document: &mut Document) -> Result<(), ReinitError> {
            Err(ReinitError::new("failing", "not loaded"))
        }
    }

    struct Panicking;

    impl Reinitializer for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }

        fn reinitialize(&self, _document: &mut Document) -> Result<(), ReinitError> {
            panic!("widget bug")
        }
    }

    struct Counting(Rc<Cell<usize>>);

    impl DiagramRenderer for Counting {
        fn render(&self, _document: &mut Document, containers: &[NodeId]) -> Result<(), ReinitError> {
            self.0.set(self.0.get() + containers.len());
            Ok(())
        }
    }

    fn doc() -> Document {
        HtmlParser::new().parse(
            r#"<div class="mermaid">graph TD; A-->B</div>
               <button class="copybtn" data-clipboard-copied="true">copy</button>
               <button class="copybtn">copy</button>"#,
        )
    }

    #[test]
    fn test_failures_isolated() {
        let registry = ReinitRegistry::new()
            .with(Failing)
            .with(Panicking)
            .with(CopyButtonReset::new(Selector::parse(".copybtn").unwrap(), "data-clipboard-copied"));
        let mut document = doc();

        let report = registry.run(&mut document);

        assert_eq!(report.failed, vec!["failing", "panicking"]);
        assert_eq!(report.completed, vec!["copy-buttons"]);
    }

    #[test]
    fn test_copy_buttons_reset() {
        let mut document = doc();
        CopyButtonReset::new(Selector::parse(".copybtn").unwrap(), "data-clipboard-copied")
            .reinitialize(&mut document)
            .unwrap();

        for id in document.query_selector_all(".copybtn").unwrap() {
            let elem = document.tree().element(id).unwrap();
            assert_eq!(elem.get_attr("data-clipboard-copied"), Some(""));
        }
    }

    #[test]
    fn test_diagrams_without_renderer_noop() {
        let mut document = doc();
        let hook = DiagramReinit::new(Selector::parse(".mermaid").unwrap());
        assert!(hook.reinitialize(&mut document).is_ok());
    }

    #[test]
    fn test_diagrams_rendered() {
        let rendered = Rc::new(Cell::new(0));
        let hook = DiagramReinit::new(Selector::parse(".mermaid").unwrap())
            .with_renderer(Counting(rendered.clone()));
        let mut document = doc();

        hook.reinitialize(&mut document).unwrap();
        assert_eq!(rendered.get(), 1);
    }

    #[test]
    fn test_defaults() {
        let registry = ReinitRegistry::defaults(&NavConfig::default()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(format!("{registry:?}"), r#"["diagrams", "copy-buttons"]"#);
    }
}
