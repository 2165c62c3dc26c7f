//! Pipeline integration tests
//!
//! Snapshots go through the service into an on-disk SQLite store, and every
//! query reads them back from there.

use std::sync::Arc;

use tempfile::TempDir;

use hashpulse::analytics::TrendDirection;
use hashpulse::models::{Category, Platform};
use hashpulse::service::AnalyticsService;
use hashpulse::store::{create_memory_store, SqliteObservationStore};

use crate::common::{create_series, create_snapshot, create_test_service};

fn sqlite_service(dir: &TempDir) -> AnalyticsService {
    let store = SqliteObservationStore::new(dir.path().join("hashpulse.db")).unwrap();
    create_test_service(Arc::new(store))
}

fn seed(service: &AnalyticsService) {
    let mut snapshots = Vec::new();
    snapshots.extend(create_series(
        "rust",
        Platform::Twitter,
        Category::Technology,
        &[100, 120, 150, 200],
    ));
    snapshots.extend(create_series(
        "worldcup",
        Platform::Twitter,
        Category::Sports,
        &[900, 600, 300],
    ));
    snapshots.extend(create_series(
        "election",
        Platform::Youtube,
        Category::Politics,
        &[50, 50, 50],
    ));
    service.ingest(&snapshots).unwrap();
}

#[test]
fn test_ingest_then_query_sqlite() {
    let dir = TempDir::new().unwrap();
    let service = sqlite_service(&dir);
    seed(&service);

    assert_eq!(service.store().count().unwrap(), 3);

    let trend = service.compute_trend("#Rust", None, Some(30)).unwrap();
    assert_eq!(trend.time_series.len(), 4);
    assert_eq!(trend.analysis.growth_rate, 100.0);
    assert_eq!(trend.analysis.trend, TrendDirection::Rising);
    assert_eq!(trend.analysis.total_mentions, Some(570));

    let falling = service.compute_trend("worldcup", None, None).unwrap();
    assert_eq!(falling.analysis.trend, TrendDirection::Falling);

    let flat = service
        .compute_trend("election", Some(Platform::Youtube), None)
        .unwrap();
    assert_eq!(flat.analysis.volatility, 0.0);
}

#[test]
fn test_predictions_and_growth_sqlite() {
    let dir = TempDir::new().unwrap();
    let service = sqlite_service(&dir);
    seed(&service);

    let prediction = service.compute_predictions("rust", None).unwrap();
    // Last three points 120, 150, 200: slope 40, intercept 76.67.
    assert_eq!(prediction.predictions.next_24h.mentions_prediction, 237);
    assert_eq!(prediction.predictions.next_24h.confidence, 0.6);
    assert_eq!(prediction.predictions.next_week.confidence, 0.2);

    let growth = service.compute_growth_ranking(None, None, Some(30)).unwrap();
    let rising: Vec<&str> = growth
        .ranking
        .fastest_growing
        .iter()
        .map(|e| e.subject.hashtag.as_str())
        .collect();
    let declining: Vec<&str> = growth
        .ranking
        .declining
        .iter()
        .map(|e| e.subject.hashtag.as_str())
        .collect();
    assert_eq!(rising, vec!["rust"]);
    assert_eq!(declining, vec!["worldcup"]);
    assert_eq!(growth.ranking.declining[0].growth_rate, -66.67);
}

#[test]
fn test_reports_after_ingest() {
    let service = create_test_service(create_memory_store());
    seed(&service);

    let overview = service.overview().unwrap();
    assert_eq!(overview.total_hashtags, 3);
    assert_eq!(overview.total_mentions, 200 + 300 + 50);

    let categories = service.category_report(None, None).unwrap();
    assert_eq!(categories[0].category, Category::Sports);

    let platforms = service.platform_report(None).unwrap();
    assert_eq!(platforms[0].platform, Platform::Twitter);
    assert_eq!(platforms[0].hashtag_count, 2);

    let sentiment = service
        .sentiment_report(None, Some(Category::Technology), None)
        .unwrap();
    assert_eq!(sentiment.overall.positive_count, 6);
}

#[test]
fn test_reingest_keeps_first_seen() {
    let dir = TempDir::new().unwrap();
    let service = sqlite_service(&dir);

    let first = service
        .record_snapshot(&create_snapshot("ai", Platform::Tiktok, Category::Technology, 3, 10))
        .unwrap();
    let second = service
        .record_snapshot(&create_snapshot("ai", Platform::Tiktok, Category::Technology, 0, 25))
        .unwrap();

    assert_eq!(first.metadata.first_seen, second.metadata.first_seen);
    assert_eq!(second.metadata.total_mentions, 35);
    assert_eq!(second.metadata.peak_mentions, 25);
    assert_eq!(second.metrics.mentions, 25);
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    seed(&sqlite_service(&dir));

    let reopened = sqlite_service(&dir);
    let series = reopened
        .time_series("worldcup", Some(Platform::Twitter), Some(7))
        .unwrap();
    let mentions: Vec<u64> = series.time_series.mentions().collect();
    assert_eq!(mentions, vec![900, 600, 300]);
}
