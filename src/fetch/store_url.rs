// src/fetch/store_url.rs
//! Store URL recognition and app id extraction.

use once_cell::sync::OnceCell;
use regex::Regex;

use super::types::Platform;
use super::FetchError;

pub fn detect_platform(url: &str) -> Option<Platform> {
    if url.contains("play.google.com") {
        Some(Platform::PlayStore)
    } else if url.contains("apps.apple.com") || url.contains("itunes.apple.com") {
        Some(Platform::AppStore)
    } else {
        None
    }
}

/// `https://play.google.com/store/apps/details?id=com.example.app` → `com.example.app`
pub fn parse_play_store_id(url: &str) -> Option<String> {
    static RE: OnceCell<Regex> = OnceCell::new();
    let re = RE.get_or_init(|| Regex::new(r"[?&]id=([a-zA-Z0-9._]+)").unwrap());
    re.captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// `https://apps.apple.com/us/app/name/id123456789` → `123456789`
pub fn parse_app_store_id(url: &str) -> Option<String> {
    static RE: OnceCell<Regex> = OnceCell::new();
    let re = RE.get_or_init(|| Regex::new(r"/id(\d+)").unwrap());
    re.captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Validate a store URL into `(platform, app_id)`.
pub fn resolve(url: &str) -> Result<(Platform, String), FetchError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FetchError::MissingUrl);
    }
    let platform = detect_platform(url).ok_or(FetchError::InvalidUrl)?;
    let id = match platform {
        Platform::PlayStore => parse_play_store_id(url),
        Platform::AppStore => parse_app_store_id(url),
    };
    id.map(|id| (platform, id))
        .ok_or(FetchError::MissingAppId(platform))
}
