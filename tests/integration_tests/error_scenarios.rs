//! Error scenario integration tests
//!
//! Tests failure modes and how they surface:
//! 1. Unknown hashtags (404)
//! 2. Invalid periods, limits and filters (400)
//! 3. Fallback results for windows too short to analyze
//! 4. Counts beyond the storable range

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use hashpulse::analytics::{PredictionResult, TrendAnalysis};
use hashpulse::api::{create_router, AppState};
use hashpulse::error::{Error, ErrorCategory, HashpulseErrorTrait};
use hashpulse::models::{Category, Platform};
use hashpulse::store::create_memory_store;

use crate::common::{create_snapshot, create_test_service};

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let service = create_test_service(create_memory_store());
    service
        .record_snapshot(&create_snapshot("solo", Platform::Twitter, Category::Other, 0, 9))
        .unwrap();

    let response = create_router(AppState::new(service))
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_unknown_hashtag_is_404() {
    for uri in [
        "/api/analytics/trends/missing",
        "/api/analytics/predictions/missing",
        "/api/hashtags/missing",
        "/api/hashtags/missing/timeseries",
        "/api/analytics/trends/solo?platform=youtube",
    ] {
        let (status, json) = get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json["success"], false, "{uri}");
    }
}

#[tokio::test]
async fn test_invalid_input_is_400() {
    for uri in [
        "/api/analytics/trends/solo?days=0",
        "/api/analytics/growth?days=0",
        "/api/hashtags/trending?limit=0",
        "/api/analytics/growth?platform=myspace",
        "/api/analytics/sentiment?category=astrology",
    ] {
        let (status, json) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["success"], false, "{uri}");
    }
}

#[tokio::test]
async fn test_single_observation_falls_back() {
    let (status, json) = get("/api/analytics/trends/solo").await;
    assert_eq!(status, StatusCode::OK);
    let analysis: TrendAnalysis = serde_json::from_value(json["data"]["analysis"].clone()).unwrap();
    assert_eq!(analysis, TrendAnalysis::degenerate());

    let (status, json) = get("/api/analytics/predictions/solo").await;
    assert_eq!(status, StatusCode::OK);
    let predictions: PredictionResult =
        serde_json::from_value(json["data"]["predictions"].clone()).unwrap();
    assert_eq!(predictions, PredictionResult::insufficient());
}

#[tokio::test]
async fn test_oversized_counts_are_400() {
    let body = serde_json::json!([
        {
            "hashtag": "solo",
            "platform": "twitter",
            "metrics": { "mentions": 3, "likes": u64::MAX, "shares": 1 }
        }
    ]);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/hashtags/snapshots")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let (status, json) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("storable maximum"));
}

#[test]
fn test_error_categories() {
    let not_found = Error::not_found("missing", Some(Platform::Youtube));
    assert_eq!(not_found.category(), ErrorCategory::NotFound);
    assert!(!not_found.is_recoverable());
    assert_eq!(not_found.to_string(), "Hashtag not found: #missing on youtube");

    assert_eq!(
        Error::invalid("days must be positive").category(),
        ErrorCategory::Validation
    );
}
