// src/fetch/providers/app_store.rs
//! Apple customer-reviews RSS feed (JSON flavour), one request per page.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::histogram;
use serde::Deserialize;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::fetch::normalize_review_text;
use crate::fetch::types::{FetchedReview, Platform, ReviewProvider};

/// Title Apple puts on the feed's own metadata entry.
const STORE_ENTRY_TITLE: &str = "iTunes Store";

#[derive(Debug, Deserialize)]
struct Doc {
    feed: Option<Feed>,
}

#[derive(Debug, Deserialize)]
struct Feed {
    // a lone entry comes back as an object, not a list
    entry: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Entry {
    author: Option<Author>,
    #[serde(rename = "im:rating")]
    rating: Option<Label>,
    title: Option<Label>,
    content: Option<Label>,
    updated: Option<Label>,
}

#[derive(Debug, Deserialize)]
struct Author {
    name: Option<Label>,
}

#[derive(Debug, Deserialize)]
struct Label {
    label: String,
}

fn label(l: &Option<Label>) -> Option<&str> {
    l.as_ref().map(|l| l.label.as_str()).filter(|s| !s.is_empty())
}

/// Parse one feed page. Pages without an entry list yield no reviews.
pub fn parse_feed(json: &str) -> Result<Vec<FetchedReview>> {
    let doc: Doc = serde_json::from_str(json).context("parsing app store review feed")?;
    let items = match doc.feed.and_then(|f| f.entry) {
        Some(serde_json::Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let Ok(e) = serde_json::from_value::<Entry>(item) else {
            continue;
        };
        let title = label(&e.title);
        let Some(content) = label(&e.content) else {
            continue;
        };
        if title == Some(STORE_ENTRY_TITLE) {
            continue;
        }
        let raw = match title {
            Some(t) => format!("{t} - {content}"),
            None => content.to_string(),
        };
        out.push(FetchedReview {
            text: normalize_review_text(&raw),
            score: label(&e.rating).and_then(|r| r.trim().parse::<u8>().ok()),
            author: e
                .author
                .as_ref()
                .and_then(|a| label(&a.name))
                .unwrap_or("Anonymous")
                .to_string(),
            date: label(&e.updated)
                .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                .map(|d| d.with_timezone(&Utc)),
        });
    }
    Ok(out)
}

pub struct AppStoreProvider {
    client: reqwest::Client,
    base_url: String,
    country: String,
}

impl AppStoreProvider {
    pub fn new(cfg: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("building app store http client")?;
        Ok(Self {
            client,
            base_url: cfg.feed_base_url.trim_end_matches('/').to_string(),
            country: cfg.country.clone(),
        })
    }

    pub fn feed_url(&self, app_id: &str, page: u32) -> String {
        format!(
            "{}/{}/rss/customerreviews/page={}/id={}/sortby=mostrecent/json",
            self.base_url, self.country, page, app_id
        )
    }
}

#[async_trait]
impl ReviewProvider for AppStoreProvider {
    async fn fetch_page(&self, app_id: &str, page: u32) -> Result<Vec<FetchedReview>> {
        let t0 = std::time::Instant::now();
        let url = self.feed_url(app_id, page);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("requesting app store feed page {page}"))?;
        if !resp.status().is_success() {
            tracing::debug!(target: "fetch", status = %resp.status(), page, "feed page unavailable");
            return Ok(Vec::new());
        }
        let body = resp.text().await.context("reading app store feed body")?;
        let reviews = parse_feed(&body)?;

        histogram!("fetch_page_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        Ok(reviews)
    }

    fn platform(&self) -> Platform {
        Platform::AppStore
    }
}
