// src/lib.rs
// Public library surface for the service binary and integration tests.

pub mod api;
pub mod config;
pub mod debug;
pub mod fetch;
pub mod metrics;
pub mod problems;
pub mod report;
pub mod samples;
pub mod sentiment;
pub mod tally;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::problems::{ProblemExtractor, ProblemReport};
pub use crate::report::{AnalysisReport, Analyzer};
pub use crate::sentiment::{CorpusSentiment, Label, ReviewResult, SentimentScorer};

use axum::Router;
use tracing::info;

use crate::config::AnalyzerConfig;

/// Build the full in-process app: config from env/files, the API router and,
/// with `DEBUG_ROUTES=1`, the Prometheus `/metrics` route.
pub async fn app() -> anyhow::Result<Router> {
    let config = AnalyzerConfig::load_default()?;
    info!(
        min_reviews = config.analysis.min_reviews,
        max_pages = config.fetch.max_pages,
        country = %config.fetch.country,
        "analyzer config loaded"
    );

    let state = AppState::from_config(config)?;
    let mut app = router(state);

    if std::env::var("DEBUG_ROUTES").ok().as_deref() == Some("1") {
        let m = crate::metrics::Metrics::init()?;
        app = app.merge(m.router());
    }
    Ok(app)
}
