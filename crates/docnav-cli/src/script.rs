//! Command line and interaction scripts
//!
//! A session is a start URL followed by steps replayed against the page:
//!
//! ```text
//! docnav [--config nav.json] [--transition-ms 50] https://docs.example.com/ \
//!     hover:guide/install.html click:guide/install.html back forward ctrl-click:#faq
//! ```
//!
//! A step's link is either the literal `href` of an anchor on the current
//! page or `#id` of any element.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};
use docnav::{Document, Modifiers, NodeId};
use url::Url;

pub const USAGE: &str = "usage: docnav [--config PATH] [--transition-ms N] <start-url> [click:LINK | ctrl-click:LINK | hover:LINK | back | forward]...";

/// One scripted interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Click { link: String, modifiers: Modifiers },
    Hover(String),
    Back,
    Forward,
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "back" => return Ok(Step::Back),
            "forward" => return Ok(Step::Forward),
            _ => {}
        }

        let (action, link) = s.split_once(':')
            .with_context(|| format!("unknown step {s:?}"))?;
        if link.is_empty() {
            bail!("step {s:?} has no link");
        }
        if action == "hover" {
            return Ok(Step::Hover(link.to_string()));
        }

        let mut parts: Vec<&str> = action.split('-').collect();
        if parts.pop() != Some("click") {
            bail!("unknown step {s:?}");
        }
        let mut modifiers = Modifiers::NONE;
        for part in parts {
            match part {
                "ctrl" => modifiers.ctrl = true,
                "meta" => modifiers.meta = true,
                "shift" => modifiers.shift = true,
                "alt" => modifiers.alt = true,
                other => bail!("unknown modifier {other:?} in {s:?}"),
            }
        }
        Ok(Step::Click { link: link.to_string(), modifiers })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Click { link, modifiers } => {
                for (held, name) in [
                    (modifiers.ctrl, "ctrl"),
                    (modifiers.meta, "meta"),
                    (modifiers.shift, "shift"),
                    (modifiers.alt, "alt"),
                ] {
                    if held {
                        write!(f, "{name}-")?;
                    }
                }
                write!(f, "click:{link}")
            }
            Step::Hover(link) => write!(f, "hover:{link}"),
            Step::Back => f.write_str("back"),
            Step::Forward => f.write_str("forward"),
        }
    }
}

/// Parsed command line
#[derive(Debug)]
pub struct Args {
    pub start: Url,
    pub config: Option<PathBuf>,
    pub transition_ms: Option<u64>,
    pub steps: Vec<Step>,
}

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut args = args.into_iter();
        let mut start = None;
        let mut config = None;
        let mut transition_ms = None;
        let mut steps = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    config = Some(PathBuf::from(args.next().context("--config needs a path")?));
                }
                "--transition-ms" => {
                    let value = args.next().context("--transition-ms needs a value")?;
                    transition_ms = Some(value.parse().with_context(|| format!("invalid duration {value:?}"))?);
                }
                _ if start.is_none() => {
                    start = Some(Url::parse(&arg).with_context(|| format!("invalid start URL {arg:?}"))?);
                }
                _ => steps.push(arg.parse()?),
            }
        }

        let start = start.context(USAGE)?;
        Ok(Self { start, config, transition_ms, steps })
    }
}

/// Find the element a step refers to
pub fn find_link(document: &Document, link: &str) -> Option<NodeId> {
    if let Some(id) = link.strip_prefix('#') {
        return document.get_element_by_id(id);
    }
    let tree = document.tree();
    document.query_selector_all("a").ok()?
        .into_iter()
        .find(|&a| tree.element(a).and_then(|e| e.get_attr("href")) == Some(link))
}

/// Markup of the first element matching `selector`, for logging
pub fn region_html(document: &Document, selector: &str) -> Option<String> {
    let node = document.query_selector(selector).ok()??;
    Some(docnav_html::outer_html(document.tree(), node))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> anyhow::Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!("back".parse::<Step>().unwrap(), Step::Back);
        assert_eq!("hover:faq.html".parse::<Step>().unwrap(), Step::Hover("faq.html".into()));
        assert_eq!(
            "click:https://x.test/a?b=c".parse::<Step>().unwrap(),
            Step::Click { link: "https://x.test/a?b=c".into(), modifiers: Modifiers::NONE }
        );
        assert_eq!(
            "ctrl-shift-click:#faq".parse::<Step>().unwrap(),
            Step::Click { link: "#faq".into(), modifiers: Modifiers { shift: true, ..Modifiers::ctrl() } }
        );
    }

    #[test]
    fn test_bad_steps() {
        assert!("jump".parse::<Step>().is_err());
        assert!("click:".parse::<Step>().is_err());
        assert!("hyper-click:a.html".parse::<Step>().is_err());
        assert!("tap:a.html".parse::<Step>().is_err());
    }

    #[test]
    fn test_step_display() {
        for text in ["back", "forward", "hover:a.html", "click:a.html", "ctrl-alt-click:#x"] {
            assert_eq!(text.parse::<Step>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["--transition-ms", "20", "https://docs.test/", "click:guide.html", "back"]).unwrap();
        assert_eq!(parsed.start.as_str(), "https://docs.test/");
        assert_eq!(parsed.transition_ms, Some(20));
        assert_eq!(parsed.steps, vec![Step::Click { link: "guide.html".into(), modifiers: Modifiers::NONE }, Step::Back]);
        assert!(parsed.config.is_none());
    }

    #[test]
    fn test_missing_start_url() {
        let err = args(&["--config", "nav.json"]).unwrap_err();
        assert_eq!(err.to_string(), USAGE);
        assert!(args(&["not a url"]).is_err());
    }

    #[test]
    fn test_find_link() {
        let document = docnav_html::parse(r#"<a href="a.html">A</a><a id="b" href="b.html">B</a>"#);
        let a = find_link(&document, "a.html").unwrap();
        assert_eq!(document.tree().text_content(a), "A");
        let b = find_link(&document, "#b").unwrap();
        assert_eq!(document.tree().text_content(b), "B");
        assert!(find_link(&document, "c.html").is_none());
    }

    #[test]
    fn test_region_html() {
        let document = docnav_html::parse(r#"<div class="main"><h1>Guide</h1></div>"#);
        assert_eq!(region_html(&document, ".main").as_deref(), Some(r#"<div class="main"><h1>Guide</h1></div>"#));
        assert!(region_html(&document, ".toc-tree").is_none());
        assert!(region_html(&document, "main >").is_none());
    }
}
