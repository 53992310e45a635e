//! Dev-only diagnostics helpers shared by the analysis and fetch modules.
//!
//! Review text is user content: logs carry a short hash of it, never the text.

use sha2::{Digest, Sha256};
use std::fmt::Write as _;

pub const ENV_DEV_LOG: &str = "ANALYZER_DEV_LOG";

/// Dev logging gate: `ANALYZER_DEV_LOG=1` AND dev env
/// (debug build or `SHUTTLE_ENV` in {local, development, dev}).
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// 12-hex-char fingerprint over all parts (order-sensitive).
pub fn anon_hash<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Sha256::new();
    for p in parts {
        hasher.update(p.as_bytes());
        hasher.update([0u8]);
    }
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub fn truncate_vec<T: ToString>(v: &[T], max: usize) -> Vec<String> {
    v.iter().take(max).map(|x| x.to_string()).collect()
}
