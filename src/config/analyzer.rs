// src/config/analyzer.rs
//! Service configuration (TOML or JSON).
//!
//! ```toml
//! [analysis]
//! min_reviews = 2
//!
//! [fetch]
//! max_pages = 5
//! country = "us"
//! timeout_secs = 10
//! feed_base_url = "https://itunes.apple.com"
//! ```
//!
//! Missing keys fall back to the defaults above.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "ANALYZER_CONFIG_PATH";
pub const ENV_MIN_REVIEWS: &str = "ANALYZER_MIN_REVIEWS";

fn default_min_reviews() -> usize {
    2
}
fn default_max_pages() -> u32 {
    5
}
fn default_country() -> String {
    "us".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_feed_base_url() -> String {
    "https://itunes.apple.com".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Smallest corpus the service will analyze.
    #[serde(default = "default_min_reviews")]
    pub min_reviews: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_reviews: default_min_reviews(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_feed_base_url")]
    pub feed_base_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            country: default_country(),
            timeout_secs: default_timeout_secs(),
            feed_base_url: default_feed_base_url(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl AnalyzerConfig {
    /// Load from an explicit path; format picked by extension (`.toml` / `.json`).
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading analyzer config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = Self::parse(&content, &ext)
            .with_context(|| format!("parsing analyzer config {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Env var + fallbacks, then env overrides:
    /// 1) $ANALYZER_CONFIG_PATH
    /// 2) config/analyzer.toml
    /// 3) config/analyzer.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let toml_p = PathBuf::from("config/analyzer.toml");
            let json_p = PathBuf::from("config/analyzer.json");
            if toml_p.exists() {
                Self::load_from(&toml_p)?
            } else if json_p.exists() {
                Self::load_from(&json_p)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn parse(s: &str, hint_ext: &str) -> Result<Self> {
        match hint_ext {
            "toml" => Ok(toml::from_str(s)?),
            "json" => Ok(serde_json::from_str(s)?),
            _ => serde_json::from_str::<Self>(s)
                .ok()
                .or_else(|| toml::from_str::<Self>(s).ok())
                .ok_or_else(|| anyhow!("unsupported analyzer config format")),
        }
    }

    /// `ANALYZER_MIN_REVIEWS` wins over the file when it parses.
    pub fn apply_env_overrides(&mut self) {
        if let Some(n) = parse_min_reviews_env(std::env::var(ENV_MIN_REVIEWS).ok()) {
            self.analysis.min_reviews = n;
        }
    }

    fn sanitized(mut self) -> Self {
        self.analysis.min_reviews = self.analysis.min_reviews.max(1);
        self.fetch.max_pages = self.fetch.max_pages.max(1);
        if self.fetch.timeout_secs == 0 {
            self.fetch.timeout_secs = default_timeout_secs();
        }
        if self.fetch.country.trim().is_empty() {
            self.fetch.country = default_country();
        }
        self
    }
}

fn parse_min_reviews_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .map(|n| n.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = AnalyzerConfig::parse("[fetch]\nmax_pages = 3\n", "toml").unwrap();
        assert_eq!(cfg.fetch.max_pages, 3);
        assert_eq!(cfg.fetch.country, "us");
        assert_eq!(cfg.analysis.min_reviews, 2);
    }

    #[test]
    fn json_and_unknown_extension() {
        let json = r#"{"analysis":{"min_reviews":5}}"#;
        assert_eq!(AnalyzerConfig::parse(json, "json").unwrap().analysis.min_reviews, 5);
        assert_eq!(AnalyzerConfig::parse(json, "").unwrap().analysis.min_reviews, 5);
        assert!(AnalyzerConfig::parse("{{nope", "").is_err());
    }

    #[test]
    fn sanitize_clamps_zeroes() {
        let mut cfg = AnalyzerConfig::default();
        cfg.analysis.min_reviews = 0;
        cfg.fetch.max_pages = 0;
        cfg.fetch.timeout_secs = 0;
        let s = cfg.sanitized();
        assert_eq!(s.analysis.min_reviews, 1);
        assert_eq!(s.fetch.max_pages, 1);
        assert_eq!(s.fetch.timeout_secs, 10);
    }

    #[test]
    fn env_value_parsing() {
        assert_eq!(parse_min_reviews_env(Some(" 4 ".into())), Some(4));
        assert_eq!(parse_min_reviews_env(Some("0".into())), Some(1));
        assert_eq!(parse_min_reviews_env(Some("many".into())), None);
        assert_eq!(parse_min_reviews_env(None), None);
    }
}
