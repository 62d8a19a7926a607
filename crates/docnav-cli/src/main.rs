//! docnav - Headless navigation driver
//!
//! Loads a documentation page over HTTP, then replays clicks, hovers and
//! history traversal through the in-place navigator, printing the location
//! and title after every step.

mod script;

use std::time::Duration;

use anyhow::{Context, Result};
use docnav::{
    ClickDisposition, Document, HeadlessWindow, NavConfig, NavigationOutcome, Navigator, Transport, Url, Window,
};
use docnav_net::ResourceLoader;
use tracing_subscriber::EnvFilter;

use script::{Args, Step};

type Session = Navigator<HeadlessWindow, ResourceLoader>;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let mut config = match &args.config {
        Some(path) => NavConfig::load(path)?,
        None => NavConfig::default(),
    };
    if let Some(ms) = args.transition_ms {
        config = config.with_transition(Duration::from_millis(ms));
    }

    let loader = ResourceLoader::new()?;
    smol::block_on(run(args, config, loader))
}

async fn run(args: Args, config: NavConfig, loader: ResourceLoader) -> Result<()> {
    tracing::info!("Starting docnav session at {}", args.start);

    let document = load_page(&loader, &args.start).await?;
    let window = HeadlessWindow::new(args.start.clone(), document);
    let navigator = Navigator::new(window, loader.clone(), config)?;
    navigator.on_load();
    print_status(&navigator, "load");

    for step in &args.steps {
        perform(&navigator, step).await?;

        // The navigator gave up on an in-place transition; do what the
        // browser would and load the page in full.
        let pending = navigator.window_mut().take_full_navigation();
        if let Some(url) = pending {
            let document = load_page(&loader, &url).await?;
            navigator.window_mut().load(url, document);
        }

        print_status(&navigator, &step.to_string());
        log_content(&navigator);
    }

    Ok(())
}

async fn perform(navigator: &Session, step: &Step) -> Result<()> {
    match step {
        Step::Click { link, modifiers } => {
            let target = locate(navigator, link)?;
            match navigator.on_click(target, *modifiers) {
                ClickDisposition::Intercepted(navigation) => log_outcome(&navigation.await),
                ClickDisposition::Native(reason) => {
                    tracing::info!("Click on {} left to the browser ({:?})", link, reason);
                }
            }
        }
        Step::Hover(link) => {
            let target = locate(navigator, link)?;
            if let Some(prefetch) = navigator.on_hover(target) {
                let fetched = prefetch.await;
                tracing::debug!("Prefetch of {} fetched={}", link, fetched);
            }
        }
        Step::Back | Step::Forward => {
            let moved = {
                let mut window = navigator.window_mut();
                if *step == Step::Back { window.back() } else { window.forward() }
            };
            if moved {
                log_outcome(&navigator.on_popstate().await);
            } else {
                tracing::info!("No history entry for {}", step);
            }
        }
    }
    Ok(())
}

fn locate(navigator: &Session, link: &str) -> Result<docnav::NodeId> {
    let window = navigator.window();
    script::find_link(window.document(), link)
        .with_context(|| format!("no link {link:?} on {}", window.location()))
}

async fn load_page(loader: &ResourceLoader, url: &Url) -> Result<Document> {
    let response = loader.get(url.as_str()).await
        .with_context(|| format!("failed to load {url}"))?;
    if !response.is_success() {
        tracing::warn!("{} answered HTTP {}", url, response.status);
    }
    Ok(docnav_html::parse_with_url(&response.text(), url.as_str()))
}

fn log_outcome(outcome: &NavigationOutcome) {
    match outcome {
        NavigationOutcome::Swapped(report) => {
            tracing::info!("Swapped {:?}", report.swapped);
            for skipped in &report.skipped {
                tracing::info!("Kept live region: {:?}", skipped);
            }
            for widget in &report.reinit.failed {
                tracing::warn!("Widget {} failed to reinitialize", widget);
            }
        }
        NavigationOutcome::FullNavigation(reason) => tracing::info!("Full navigation: {:?}", reason),
        NavigationOutcome::Superseded => tracing::info!("Navigation superseded"),
    }
}

fn log_content(navigator: &Session) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    let window = navigator.window();
    if let Some(html) = script::region_html(window.document(), &navigator.config().content_selector) {
        tracing::debug!("Content region now:\n{}", html);
    }
}

fn print_status(navigator: &Session, label: &str) {
    let window = navigator.window();
    println!("{label:<24} {}  {:?}", window.location(), window.document().title());
}
