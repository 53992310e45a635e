// src/fetch/mod.rs
//! Review fetch layer: turns a store URL into a list of review texts.
//! The analysis core never calls into this module.

pub mod providers;
pub mod store_url;
pub mod types;

use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{info, warn};

use crate::fetch::types::{FetchResult, Platform, ReviewProvider};

pub use store_url::{detect_platform, parse_app_store_id, parse_play_store_id, resolve};

/// Separator between reviews in pasted text.
pub const REVIEW_DELIMITER: &str = "─────";

/// Failures surfaced to the user. Each variant has its own message.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("URL parameter is required")]
    MissingUrl,
    #[error("Invalid URL. Please provide a Google Play Store or Apple App Store link.")]
    InvalidUrl,
    #[error("Could not extract app ID from {0} URL.")]
    MissingAppId(Platform),
    #[error("Fetching reviews from the {0} is not supported by this server. Paste the reviews instead.")]
    Unsupported(Platform),
    #[error("No reviews found for this app. The app may have no reviews, or the URL might be incorrect.")]
    NoReviews,
    #[error("Failed to fetch reviews. Please check the URL and try again.")]
    Network(String),
}

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("fetch_pages_total", "Non-empty review pages fetched from stores.");
        describe_counter!("fetch_errors_total", "Store page requests that failed.");
        describe_histogram!("fetch_page_ms", "Store page fetch+parse time in milliseconds.");
    });
}

/// Decode HTML entities, fold CR/LF runs into one space, trim.
pub fn normalize_review_text(s: &str) -> String {
    static RE_NL: OnceCell<regex::Regex> = OnceCell::new();
    let re_nl = RE_NL.get_or_init(|| regex::Regex::new(r"[\r\n]+").unwrap());
    let decoded = html_escape::decode_html_entities(s);
    re_nl.replace_all(&decoded, " ").trim().to_string()
}

/// Split pasted text on [`REVIEW_DELIMITER`], trimming and dropping blanks.
pub fn split_pasted_reviews(text: &str) -> Vec<String> {
    text.split(REVIEW_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Walk pages `start_page..start_page + max_pages` until one is empty or fails.
///
/// A failure on the first page is a network error; a later failure just ends
/// the walk with what was collected.
pub async fn fetch_reviews(
    provider: &dyn ReviewProvider,
    app_id: &str,
    start_page: u32,
    max_pages: u32,
) -> Result<FetchResult, FetchError> {
    ensure_metrics_described();

    let start = start_page.max(1);
    let last = start.saturating_add(max_pages.max(1) - 1);
    let mut reviews = Vec::new();
    let mut has_more = false;

    for page in start..=last {
        match provider.fetch_page(app_id, page).await {
            Ok(batch) if batch.is_empty() => break,
            Ok(batch) => {
                counter!("fetch_pages_total").increment(1);
                reviews.extend(batch);
                has_more = page == last;
            }
            Err(e) => {
                warn!(target: "fetch", error = ?e, page, platform = %provider.platform(), "page fetch failed");
                counter!("fetch_errors_total").increment(1);
                if page == start {
                    return Err(FetchError::Network(e.to_string()));
                }
                break;
            }
        }
    }

    if reviews.is_empty() {
        return Err(FetchError::NoReviews);
    }
    // the window may end at u32::MAX, past which there is no next page
    let next_page = if has_more { last.checked_add(1) } else { None };
    let has_more = next_page.is_some();

    info!(target: "fetch", platform = %provider.platform(), count = reviews.len(), has_more, "fetched reviews");
    Ok(FetchResult {
        platform: provider.platform(),
        count: reviews.len(),
        reviews,
        has_more,
        next_page,
    })
}

/// Per-platform backends. A platform without one is reported as unsupported.
#[derive(Clone, Default)]
pub struct Providers {
    pub app_store: Option<Arc<dyn ReviewProvider>>,
    pub play_store: Option<Arc<dyn ReviewProvider>>,
}

impl Providers {
    pub fn get(&self, platform: Platform) -> Result<Arc<dyn ReviewProvider>, FetchError> {
        let p = match platform {
            Platform::AppStore => self.app_store.clone(),
            Platform::PlayStore => self.play_store.clone(),
        };
        p.ok_or(FetchError::Unsupported(platform))
    }

    /// Resolve `url`, pick the backend and fetch.
    pub async fn fetch_url(
        &self,
        url: &str,
        start_page: u32,
        max_pages: u32,
    ) -> Result<FetchResult, FetchError> {
        let (platform, app_id) = resolve(url)?;
        let provider = self.get(platform)?;
        info!(target: "fetch", %platform, %app_id, start_page, "fetching store reviews");
        fetch_reviews(provider.as_ref(), &app_id, start_page, max_pages).await
    }
}
