//! Common test utilities

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use hashpulse::analytics::ObservationWindow;
use hashpulse::config::AnalyticsConfig;
use hashpulse::models::{
    AggregateMetrics, Category, HashtagSnapshot, Observation, Platform, SentimentSummary,
};
use hashpulse::service::AnalyticsService;
use hashpulse::store::SharedObservationStore;

/// Fixed "now" shared by all integration tests
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Window of daily observations ending the day before `test_now()`
pub fn daily_window(mentions: &[u64]) -> ObservationWindow {
    let start = test_now() - Duration::days(mentions.len() as i64);
    mentions
        .iter()
        .enumerate()
        .map(|(i, &m)| Observation::new(start + Duration::days(i as i64), m, m / 2))
        .collect()
}

/// Service over `store` whose clock is pinned to `test_now()`
pub fn create_test_service(store: SharedObservationStore) -> AnalyticsService {
    AnalyticsService::new(store, AnalyticsConfig::default()).with_clock(Arc::new(test_now))
}

/// Snapshot observed `days_ago` days before `test_now()`
pub fn create_snapshot(
    hashtag: &str,
    platform: Platform,
    category: Category,
    days_ago: i64,
    mentions: u64,
) -> HashtagSnapshot {
    HashtagSnapshot {
        hashtag: hashtag.to_string(),
        platform,
        category,
        metrics: AggregateMetrics {
            mentions,
            likes: mentions / 2,
            shares: mentions / 10,
            comments: mentions / 5,
            views: mentions * 10,
            engagement_rate: 3.5,
            reach: mentions * 4,
        },
        sentiment: SentimentSummary {
            positive_count: 6,
            negative_count: 2,
            neutral_count: 2,
            overall_score: 0.4,
        },
        observation: Some(Observation::new(
            test_now() - Duration::days(days_ago),
            mentions,
            mentions / 2,
        )),
    }
}

/// Series of daily snapshots, oldest first, ending `test_now()`
pub fn create_series(
    hashtag: &str,
    platform: Platform,
    category: Category,
    mentions: &[u64],
) -> Vec<HashtagSnapshot> {
    let n = mentions.len() as i64;
    mentions
        .iter()
        .enumerate()
        .map(|(i, &m)| create_snapshot(hashtag, platform, category, n - 1 - i as i64, m))
        .collect()
}
