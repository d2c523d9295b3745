//! Sequential page → image → file pipeline for one deck.

use crate::deck::{DeckCatalog, DeckSpec};
use crate::error::{FetchError, Result};
use crate::scrape::AttributeQuery;
use crate::utils::files::{card_path, ensure_output_dir, existing_cards, write_image};
use crate::utils::http::HttpClient;
use crate::utils::images::validate_image;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DOMAIN_ROOT: &str = "https://cardscans.piwigo.com/";

/// A Piwigo gallery, addressed by its domain root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    domain_root: String,
}

impl Site {
    /// The root always ends with a single `/`
    pub fn new(domain_root: &str) -> Self {
        let mut domain_root = domain_root.to_string();
        if !domain_root.ends_with('/') {
            domain_root.push('/');
        }
        Self { domain_root }
    }

    pub fn domain_root(&self) -> &str {
        &self.domain_root
    }

    pub fn page_base(&self) -> String {
        format!("{}picture?/", self.domain_root)
    }

    pub fn page_url(&self, deck: &DeckSpec, index: u32) -> String {
        format!("{}{}{}", self.page_base(), index, deck.gallery_path)
    }

    /// Resolve a site-root-relative reference by dropping its first character.
    pub fn image_url(&self, reference: &str) -> String {
        let mut chars = reference.chars();
        chars.next();
        format!("{}{}", self.domain_root, chars.as_str())
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAIN_ROOT)
    }
}

/// What happens when one index of the range fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the run on the first error
    #[default]
    FailFast,
    /// Record the error and continue with the next index
    KeepGoing,
}

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub output_dir: PathBuf,
    pub policy: FailurePolicy,
    pub skip_existing: bool,
    pub verify: bool,
    /// Pause between consecutive cards
    pub delay: Option<Duration>,
    pub show_progress: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            policy: FailurePolicy::FailFast,
            skip_existing: false,
            verify: false,
            delay: None,
            show_progress: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct CrawlReport {
    pub deck_id: u32,
    /// Written files, in index order
    pub saved: Vec<PathBuf>,
    pub skipped_existing: usize,
    /// Only populated under `FailurePolicy::KeepGoing`
    pub failures: Vec<(u32, FetchError)>,
}

impl CrawlReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Download every card of `deck_id` into `options.output_dir`.
///
/// The deck is looked up before any request is made. Cards are processed one
/// at a time in ascending index order.
pub async fn crawl_deck<C: HttpClient + ?Sized>(
    client: &C,
    site: &Site,
    catalog: &DeckCatalog,
    deck_id: u32,
    options: &CrawlOptions,
) -> Result<CrawlReport> {
    let deck = catalog.lookup(deck_id)?;
    let query = AttributeQuery::main_image()?;

    let mut report = CrawlReport {
        deck_id,
        ..Default::default()
    };
    if deck.card_count() == 0 {
        return Ok(report);
    }

    ensure_output_dir(&options.output_dir)?;

    let existing = if options.skip_existing {
        existing_cards(&options.output_dir, deck)
    } else {
        HashSet::new()
    };

    tracing::info!(
        deck = deck.id,
        start = deck.start,
        end = deck.end,
        existing = existing.len(),
        "Starting deck crawl"
    );

    let pb = progress_bar(deck.card_count(), options.show_progress);
    let mut first = true;

    for index in deck.indices() {
        if existing.contains(&index) {
            report.skipped_existing += 1;
            pb.inc(1);
            continue;
        }

        if let Some(delay) = options.delay {
            if !first {
                tokio::time::sleep(delay).await;
            }
        }
        first = false;

        pb.suspend(|| {
            println!(
                "Getting image URL for card {} from {}",
                index, deck.gallery_path
            )
        });

        match fetch_card(client, site, &query, deck, index, options).await {
            Ok(path) => report.saved.push(path),
            Err(e) => match options.policy {
                FailurePolicy::FailFast => {
                    pb.abandon();
                    return Err(e);
                }
                FailurePolicy::KeepGoing => {
                    pb.suspend(|| eprintln!("Failed to fetch card {}: {}", index, e));
                    report.failures.push((index, e));
                }
            },
        }
        pb.inc(1);
    }

    pb.finish_with_message("Download complete!");
    Ok(report)
}

async fn fetch_card<C: HttpClient + ?Sized>(
    client: &C,
    site: &Site,
    query: &AttributeQuery,
    deck: &DeckSpec,
    index: u32,
    options: &CrawlOptions,
) -> Result<PathBuf> {
    let page_url = site.page_url(deck, index);
    let markup = client.get_text(&page_url).await?;

    let reference = query
        .extract(&markup)
        .ok_or_else(|| FetchError::Extraction {
            url: page_url.clone(),
        })?;
    let image_url = site.image_url(&reference);
    tracing::debug!(index, image_url = %image_url, "Resolved image URL");

    let bytes = client.get_bytes(&image_url).await?;

    if options.verify {
        validate_image(&bytes).map_err(|reason| FetchError::InvalidImage {
            url: image_url.clone(),
            reason,
        })?;
    }

    let path = card_path(&options.output_dir, deck, index);
    write_image(&path, &bytes)?;
    tracing::debug!(index, path = %path.display(), bytes = bytes.len(), "Saved card image");

    Ok(path)
}
