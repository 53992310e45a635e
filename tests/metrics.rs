// tests/metrics.rs
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

// Single test in this binary: the Prometheus recorder is process-global.
#[tokio::test]
async fn metrics_route_reports_analysis_series() {
    std::env::set_var("DEBUG_ROUTES", "1");
    let app = app_review_analyzer::app()
        .await
        .expect("app() should build Router in tests");

    let resp = app
        .clone()
        .oneshot(
            Request::post("/analyze")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"reviews":["love it","it keeps crashing"]}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    for needle in ["analysis_runs_total", "analysis_reviews_total", "analysis_ms"] {
        assert!(text.contains(needle), "missing {needle} in:\n{text}");
    }
}
