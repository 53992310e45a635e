// tests/api_http.rs
//
// HTTP contract of the router, exercised in-process with `oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use app_review_analyzer::config::AnalyzerConfig;
use app_review_analyzer::fetch::types::{FetchedReview, Platform, ReviewProvider};
use app_review_analyzer::fetch::Providers;
use app_review_analyzer::{router, Analyzer, AppState};

struct OnePage;

#[async_trait::async_trait]
impl ReviewProvider for OnePage {
    async fn fetch_page(&self, _app_id: &str, page: u32) -> anyhow::Result<Vec<FetchedReview>> {
        if page > 1 {
            return Ok(Vec::new());
        }
        Ok(vec![
            FetchedReview {
                text: "Love it - works great".into(),
                score: Some(5),
                author: "a".into(),
                date: None,
            },
            FetchedReview {
                text: "Crashes on launch - terrible".into(),
                score: Some(1),
                author: "b".into(),
                date: None,
            },
        ])
    }

    fn platform(&self) -> Platform {
        Platform::AppStore
    }
}

fn state() -> AppState {
    AppState {
        analyzer: Arc::new(Analyzer::default()),
        config: Arc::new(AnalyzerConfig::default()),
        providers: Providers {
            app_store: Some(Arc::new(OnePage)),
            play_store: None,
        },
    }
}

async fn send(req: Request<Body>) -> (StatusCode, Value) {
    let res = router(state()).oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(uri: &str, v: Value) -> (StatusCode, Value) {
    send(
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn health_is_plain_ok() {
    let res = router(state())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn analyze_review_list() {
    let (status, body) = post_json(
        "/analyze",
        json!({ "reviews": ["Great app, love it!", "Terrible, it crashes constantly."] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"]["total"], 2);
    assert_eq!(body["sentiment"]["positive"], 1);
    assert_eq!(body["sentiment"]["negative"], 1);
    assert_eq!(body["problems"]["categories"][0]["id"], "crashes");
    assert_eq!(body["summary"]["rows"][0]["index"], 1);
}

#[tokio::test]
async fn analyze_pasted_text() {
    let text = "Fast and clean\n─────\nAds everywhere, annoying\n─────\n";
    let (status, body) = post_json("/analyze", json!({ "text": text })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["total"], 2);
    assert_eq!(body["problems"]["totalReviews"], 2);
}

#[tokio::test]
async fn analyze_rejects_empty_and_too_few() {
    let (status, body) = post_json("/analyze", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter some reviews to analyze!");

    let (status, body) = post_json("/analyze", json!({ "reviews": ["only one"] })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "Please enter at least 2 reviews for meaningful analysis."
    );
}

#[tokio::test]
async fn reviews_endpoint_errors() {
    let (status, body) = get("/api/reviews").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "URL parameter is required");

    let (status, _) = get("/api/reviews?url=https%3A%2F%2Fexample.com%2Fapp").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) =
        get("/api/reviews?url=https%3A%2F%2Fplay.google.com%2Fstore%2Fapps%2Fdetails%3Fid%3Dcom.x")
            .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Play Store"));
}

#[tokio::test]
async fn reviews_endpoint_fetches_app_store() {
    let (status, body) =
        get("/api/reviews?url=https%3A%2F%2Fapps.apple.com%2Fus%2Fapp%2Fx%2Fid42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["platform"], "appstore");
    assert_eq!(body["count"], 2);
    assert_eq!(body["hasMore"], false);
    assert_eq!(body["nextPage"], Value::Null);
    assert_eq!(body["reviews"][1]["text"], "Crashes on launch - terrible");
}

#[tokio::test]
async fn reviews_past_the_end_is_not_found() {
    let (status, body) =
        get("/api/reviews?url=https%3A%2F%2Fapps.apple.com%2Fus%2Fapp%2Fx%2Fid42&page=3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().starts_with("No reviews found"));
}

#[tokio::test]
async fn huge_page_number_is_answered_not_panicked() {
    let (status, body) = get(
        "/api/reviews?url=https%3A%2F%2Fapps.apple.com%2Fus%2Fapp%2Fx%2Fid42&page=4294967295",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().starts_with("No reviews found"));
}

#[tokio::test]
async fn samples_per_platform() {
    let (status, body) = get("/samples").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["platform"], "playstore");
    assert_eq!(body["reviews"].as_array().unwrap().len(), 25);

    let (_, body) = get("/samples?platform=appstore").await;
    assert_eq!(body["reviews"].as_array().unwrap().len(), 20);

    let (status, _) = get("/samples?platform=windows").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
