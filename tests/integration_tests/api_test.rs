//! HTTP API integration tests
//!
//! Requests are driven through the full router with `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use hashpulse::config::ServerConfig;
use hashpulse::models::{Category, Platform};
use hashpulse::server::AnalyticsServer;
use hashpulse::store::create_memory_store;

use crate::common::{create_series, create_test_service};

fn app() -> Router {
    let service = create_test_service(create_memory_store());
    let mut snapshots = create_series("rust", Platform::Twitter, Category::Technology, &[10, 20, 40]);
    snapshots.extend(create_series(
        "rust",
        Platform::Youtube,
        Category::Technology,
        &[5, 5],
    ));
    snapshots.extend(create_series(
        "tennis",
        Platform::Instagram,
        Category::Sports,
        &[80, 40],
    ));
    service.ingest(&snapshots).unwrap();

    AnalyticsServer::new(ServerConfig::default(), service)
        .unwrap()
        .build_router()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_trend_endpoint() {
    let (status, json) = get(app(), "/api/analytics/trends/rust?platform=twitter&days=30").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["hashtag"], "rust");
    assert_eq!(json["data"]["platform"], "twitter");
    assert_eq!(json["data"]["analysis"]["growthRate"], 300.0);
    assert_eq!(json["data"]["analysis"]["trend"], "rising");
    assert_eq!(json["data"]["analysis"]["totalMentions"], 70);
    assert_eq!(json["data"]["timeSeries"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_predictions_endpoint() {
    let (status, json) = get(app(), "/api/analytics/predictions/rust?platform=twitter").await;

    assert_eq!(status, StatusCode::OK);
    let predictions = &json["data"]["predictions"];
    assert_eq!(predictions["next_24h"]["mentions_prediction"], 53);
    assert_eq!(predictions["next_24h"]["confidence"], 0.85);
    assert_eq!(predictions["next_week"]["mentions_prediction"], 143);
}

#[tokio::test]
async fn test_growth_endpoint() {
    let (status, json) = get(app(), "/api/analytics/growth?days=30").await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["fastestGrowing"][0]["hashtag"], "rust");
    assert_eq!(data["fastestGrowing"][0]["growthRate"], 300.0);
    assert_eq!(data["declining"][0]["hashtag"], "tennis");
    assert_eq!(data["declining"][0]["growthRate"], -50.0);
    assert_eq!(data["period"], "30 days");

    let (_, sports) = get(app(), "/api/analytics/growth?category=sports").await;
    assert!(sports["data"]["fastestGrowing"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_hashtag_endpoints() {
    let (status, json) = get(app(), "/api/hashtags/RUST").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let (status, json) = get(app(), "/api/hashtags/tennis/timeseries?days=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["timeSeries"].as_array().unwrap().len(), 2);

    let (status, json) = get(app(), "/api/hashtags/trending?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let (status, json) = get(app(), "/api/hashtags/search/ten").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["hashtag"], "tennis");
}

#[tokio::test]
async fn test_report_endpoints() {
    let (status, json) = get(app(), "/api/analytics/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["totalHashtags"], 3);

    let (status, json) = get(app(), "/api/analytics/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let (status, json) = get(app(), "/api/analytics/platforms/comparison").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    let (status, json) = get(app(), "/api/analytics/sentiment?platform=instagram").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["overall"]["totalMentions"], 40);
}

#[tokio::test]
async fn test_post_snapshots() {
    let app = app();
    let body = serde_json::json!([
        {
            "hashtag": "#NewTag",
            "platform": "tiktok",
            "category": "entertainment",
            "metrics": { "mentions": 12, "likes": 3, "engagement_rate": 1.5 },
            "sentiment": { "positive": 2, "overall_score": 0.2 }
        }
    ]);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/hashtags/snapshots")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let (status, json) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["ingested"], 1);
    assert_eq!(json["data"]["tracked"], 4);

    let (status, json) = get(app, "/api/hashtags/newtag?platform=tiktok").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["category"], "entertainment");
    assert_eq!(json["data"][0]["sentiment"]["positive_count"], 2);
    assert_eq!(json["data"][0]["polarity"], "positive");
    assert_eq!(json["data"][0]["trend_direction"], "stable");
}
