use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::AnalyzerConfig;
use crate::debug::anon_hash;
use crate::fetch::providers::AppStoreProvider;
use crate::fetch::types::{FetchResult, Platform};
use crate::fetch::{split_pasted_reviews, FetchError, Providers};
use crate::report::{AnalysisReport, Analyzer};
use crate::samples::SampleSet;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub config: Arc<AnalyzerConfig>,
    pub providers: Providers,
}

impl AppState {
    /// Built-in reference data plus the App Store backend from `config`.
    pub fn from_config(config: AnalyzerConfig) -> anyhow::Result<Self> {
        let app_store = AppStoreProvider::new(&config.fetch)?;
        Ok(Self {
            analyzer: Arc::new(Analyzer::default()),
            config: Arc::new(config),
            providers: Providers {
                app_store: Some(Arc::new(app_store)),
                play_store: None,
            },
        })
    }
}

/// Errors returned to HTTP clients as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Please enter some reviews to analyze!")]
    NoReviews,
    #[error("Please enter at least {min} reviews for meaningful analysis.")]
    TooFewReviews { min: usize, got: usize },
    #[error("Unknown platform '{0}'. Use 'playstore' or 'appstore'.")]
    UnknownPlatform(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Fetch(FetchError::NoReviews) => StatusCode::NOT_FOUND,
            ApiError::Fetch(FetchError::Network(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Fetch(_) => StatusCode::BAD_REQUEST,
            ApiError::NoReviews | ApiError::UnknownPlatform(_) => StatusCode::BAD_REQUEST,
            ApiError::TooFewReviews { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .route("/api/reviews", get(fetch_reviews))
        .route("/samples", get(samples))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Default, serde::Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    reviews: Option<Vec<String>>,
    /// Pasted reviews separated by the `─────` delimiter.
    #[serde(default)]
    text: Option<String>,
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let reviews = match (body.reviews, body.text) {
        (Some(list), _) => list,
        (None, Some(text)) => split_pasted_reviews(&text),
        (None, None) => Vec::new(),
    };

    if reviews.is_empty() {
        return Err(ApiError::NoReviews);
    }
    let min = state.config.analysis.min_reviews;
    if reviews.len() < min {
        return Err(ApiError::TooFewReviews {
            min,
            got: reviews.len(),
        });
    }

    let report = state.analyzer.analyze(&reviews);
    info!(
        target: "api",
        corpus = %anon_hash(reviews.iter().map(String::as_str)),
        total = report.summary.total,
        with_problems = report.summary.reviews_with_problems,
        "analysis served"
    );
    Ok(Json(report))
}

async fn fetch_reviews(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<FetchResult>, ApiError> {
    let url = q.get("url").map(String::as_str).unwrap_or_default();
    let page = q
        .get("page")
        .and_then(|p| p.trim().parse::<u32>().ok())
        .unwrap_or(1);

    match state
        .providers
        .fetch_url(url, page, state.config.fetch.max_pages)
        .await
    {
        Ok(res) => Ok(Json(res)),
        Err(e) => {
            warn!(target: "api", error = %e, "review fetch rejected");
            Err(e.into())
        }
    }
}

async fn samples(Query(q): Query<HashMap<String, String>>) -> Result<Json<SampleSet>, ApiError> {
    let platform = match q.get("platform") {
        None => Platform::PlayStore,
        Some(p) => Platform::parse(p).ok_or_else(|| ApiError::UnknownPlatform(p.clone()))?,
    };
    Ok(Json(SampleSet::new(platform)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses_are_distinct_per_failure() {
        assert_eq!(
            ApiError::from(FetchError::InvalidUrl).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(FetchError::NoReviews).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(FetchError::Network("boom".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::TooFewReviews { min: 2, got: 1 }.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn too_few_message_names_minimum() {
        let e = ApiError::TooFewReviews { min: 3, got: 1 };
        assert_eq!(
            e.to_string(),
            "Please enter at least 3 reviews for meaningful analysis."
        );
    }
}
