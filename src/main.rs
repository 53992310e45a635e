//! App Review Analyzer: binary entrypoint.
//! Boots the Axum HTTP server via Shuttle.

use app_review_analyzer::debug::ENV_DEV_LOG;
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - ANALYZER_DEV_LOG=1
fn enable_dev_tracing() {
    if !app_review_analyzer::debug::dev_logging_enabled() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("api=info,fetch=info,sentiment=debug,problems=debug,warn")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();

    tracing::info!(flag = ENV_DEV_LOG, "dev tracing enabled");
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    let router = app_review_analyzer::app().await?;
    Ok(router.into())
}
