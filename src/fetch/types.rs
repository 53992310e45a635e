// src/fetch/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    PlayStore,
    AppStore,
}

impl Platform {
    /// Wire name, as used in query strings and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::PlayStore => "playstore",
            Platform::AppStore => "appstore",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "playstore" => Some(Platform::PlayStore),
            "appstore" => Some(Platform::AppStore),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::PlayStore => "Play Store",
            Platform::AppStore => "App Store",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedReview {
    pub text: String,   // normalized, single line
    pub score: Option<u8>, // star rating 1..=5 when the store reports it
    pub author: String,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    pub platform: Platform,
    pub count: usize,
    pub reviews: Vec<FetchedReview>,
    pub has_more: bool,
    pub next_page: Option<u32>,
}

/// One page of reviews from a store backend. Pages are 1-based; an empty
/// page means the feed is exhausted.
#[async_trait::async_trait]
pub trait ReviewProvider: Send + Sync {
    async fn fetch_page(&self, app_id: &str, page: u32) -> Result<Vec<FetchedReview>>;
    fn platform(&self) -> Platform;
}
