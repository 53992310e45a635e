//! Fixed catalog of complaint categories and their trigger keywords.
//!
//! Keywords are lowercase and matched as literal substrings of the
//! lowercased review, so multi-word phrases ("customer service") work as-is.

use aho_corasick::{AhoCorasick, MatchKind};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::sync::Arc;

static BUILTIN_CATALOG: Lazy<Arc<Catalog>> =
    Lazy::new(|| Arc::new(Catalog::new(CATEGORIES).expect("valid builtin category catalog")));

/// Static catalog row.
#[derive(Debug, Clone, Copy)]
pub struct CategoryDef {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub keywords: &'static [&'static str],
}

pub const CATEGORIES: &[CategoryDef] = &[
    CategoryDef {
        id: "crashes",
        name: "App Crashes & Freezing",
        icon: "💥",
        keywords: &[
            "crash", "crashed", "crashes", "crashing", "freeze", "freezes", "freezing", "froze",
            "frozen", "hang", "hangs", "hanging", "stuck", "unresponsive", "force close",
            "force quit", "shut down", "shuts down", "stopped working", "not responding",
            "black screen", "white screen",
        ],
    },
    CategoryDef {
        id: "performance",
        name: "Performance & Speed",
        icon: "🐌",
        keywords: &[
            "slow", "slower", "slowest", "lag", "lags", "lagging", "laggy", "sluggish", "buffer",
            "buffering", "loading", "takes forever", "long time", "wait", "waiting", "delay",
            "delayed", "delays", "heavy", "resource", "memory", "ram", "cpu",
        ],
    },
    CategoryDef {
        id: "bugs",
        name: "Bugs & Glitches",
        icon: "🐛",
        keywords: &[
            "bug", "bugs", "buggy", "glitch", "glitches", "glitchy", "error", "errors", "broken",
            "break", "breaks", "breaking", "defect", "defects", "fault", "faulty", "malfunction",
            "issue", "issues", "problem", "problems", "not working", "does not work",
            "doesnt work", "doesn't work", "fails", "failed", "failing",
        ],
    },
    CategoryDef {
        id: "ui_ux",
        name: "UI/UX Design Issues",
        icon: "🎨",
        keywords: &[
            "ugly", "confusing", "confused", "hard to use", "difficult to use", "complicated",
            "unintuitive", "not intuitive", "bad design", "poor design", "layout", "navigation",
            "navigate", "interface", "cluttered", "messy", "small text", "small font",
            "hard to read", "hard to find", "too small", "too big", "redesign",
        ],
    },
    CategoryDef {
        id: "battery",
        name: "Battery & Resource Drain",
        icon: "🔋",
        keywords: &[
            "battery", "drain", "draining", "drains", "drained", "power", "consumption",
            "overheat", "overheating", "hot", "heats up", "heating", "warm", "energy",
        ],
    },
    CategoryDef {
        id: "ads",
        name: "Ads & Monetization",
        icon: "📢",
        keywords: &[
            "ads", "ad", "advertisement", "advertisements", "advertising", "popup", "popups",
            "pop-up", "pop-ups", "banner", "banners", "intrusive", "annoying ads", "too many ads",
            "full screen ad", "video ad", "unskippable", "pay to win", "paywall",
            "microtransaction", "in-app purchase", "subscription", "overpriced", "expensive",
            "costly", "money grab", "cash grab", "greedy", "ripoff", "rip-off", "rip off",
        ],
    },
    CategoryDef {
        id: "privacy",
        name: "Privacy & Security",
        icon: "🔒",
        keywords: &[
            "privacy", "private", "data", "tracking", "track", "tracks", "spy", "spying",
            "spyware", "malware", "virus", "hack", "hacked", "hacking", "security", "insecure",
            "unsafe", "permission", "permissions", "access", "collect", "collecting", "personal",
            "identity", "stolen", "leak", "leaked", "breach", "suspicious",
        ],
    },
    CategoryDef {
        id: "updates",
        name: "Update Issues",
        icon: "🔄",
        keywords: &[
            "update", "updated", "updates", "updating", "new version", "latest version",
            "after update", "since update", "last update", "recent update", "downgrade",
            "rollback", "revert", "old version", "previous version", "worse after", "ruined",
            "changed", "removed feature", "missing feature",
        ],
    },
    CategoryDef {
        id: "login",
        name: "Login & Account Issues",
        icon: "🔑",
        keywords: &[
            "login", "log in", "signin", "sign in", "signup", "sign up", "register",
            "registration", "account", "password", "forgot password", "reset password",
            "verification", "verify", "otp", "authentication", "two factor", "2fa", "locked out",
            "cant login", "can't login", "access denied", "logout", "log out", "session",
        ],
    },
    CategoryDef {
        id: "notifications",
        name: "Notification Problems",
        icon: "🔔",
        keywords: &[
            "notification", "notifications", "notify", "alert", "alerts", "push notification",
            "spam", "spamming", "spammy", "too many notifications", "constant", "nonstop",
            "annoying notification", "unwanted", "reminder", "reminders",
        ],
    },
    CategoryDef {
        id: "connectivity",
        name: "Network & Connectivity",
        icon: "📡",
        keywords: &[
            "connection", "connect", "connected", "connecting", "disconnect", "disconnected",
            "disconnects", "offline", "online", "wifi", "wi-fi", "network", "internet", "server",
            "servers", "timeout", "timed out", "sync", "syncing", "synced", "load",
            "loading failed", "cant connect", "can't connect", "no connection",
        ],
    },
    CategoryDef {
        id: "content",
        name: "Content & Feature Gaps",
        icon: "📝",
        keywords: &[
            "missing", "lacks", "lacking", "limited", "limitation", "limitations", "feature",
            "features", "need", "needs", "want", "wanted", "wish", "wished", "hoping", "hope",
            "add", "should have", "doesnt have", "doesn't have", "no option", "no way", "basic",
            "incomplete", "half-baked", "unfinished",
        ],
    },
    CategoryDef {
        id: "support",
        name: "Customer Support",
        icon: "🎧",
        keywords: &[
            "support", "customer service", "customer support", "help", "response", "respond",
            "responding", "replied", "reply", "contact", "email", "ticket", "complaint",
            "complained", "resolution", "resolve", "resolved", "unresolved", "ignored", "ignore",
            "ignores", "unhelpful", "rude", "unprofessional",
        ],
    },
];

/// A category with its compiled keyword matcher.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub keywords: Vec<String>,
    matcher: AhoCorasick,
}

impl Category {
    /// Keyword indices present anywhere in `lowered`, ascending (catalog order).
    pub fn matches(&self, lowered: &str) -> Vec<usize> {
        let mut hit = vec![false; self.keywords.len()];
        for m in self.matcher.find_overlapping_iter(lowered) {
            hit[m.pattern().as_usize()] = true;
        }
        hit.iter()
            .enumerate()
            .filter_map(|(i, &h)| h.then_some(i))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn builtin() -> Arc<Catalog> {
        BUILTIN_CATALOG.clone()
    }

    /// Build matchers for each row. Keywords are lowercased and de-duplicated
    /// (first occurrence kept).
    pub fn new(defs: &[CategoryDef]) -> Result<Self> {
        let mut categories = Vec::with_capacity(defs.len());
        for d in defs {
            let mut keywords: Vec<String> = Vec::with_capacity(d.keywords.len());
            for kw in d.keywords {
                let kw = kw.to_lowercase();
                if !kw.is_empty() && !keywords.contains(&kw) {
                    keywords.push(kw);
                }
            }
            let matcher = AhoCorasick::builder()
                .match_kind(MatchKind::Standard)
                .build(&keywords)
                .with_context(|| format!("building keyword matcher for category {}", d.id))?;
            categories.push(Category {
                id: d.id.to_string(),
                name: d.name.to_string(),
                icon: d.icon.to_string(),
                keywords,
                matcher,
            });
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
