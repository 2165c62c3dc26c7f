//! Analytics service
//!
//! Binds the observation store to the pure analytics functions. The service
//! fetches windows, applies caller filters and period defaults, runs the
//! analytics and records query metrics. It is the single entry point shared by
//! the CLI and the HTTP API.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::analytics::{
    self, analyze_trend, predict, rank_by_growth, trend::latest_change_direction, CategoryStats,
    GrowthRanking, ObservationWindow, OverviewStats, PlatformStats, PredictionResult,
    SentimentOverview, TrendAnalysis, TrendDirection,
};
use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::metrics::{self, Outcome};
use crate::models::{Category, HashtagRecord, HashtagSnapshot, Observation, Platform, Polarity};
use crate::store::{HashtagFilter, SharedObservationStore};

/// Source of the current instant
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Trend analysis together with the window it was computed from
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub hashtag: String,
    pub platform: Platform,
    pub time_series: ObservationWindow,
    pub analysis: TrendAnalysis,
}

/// Forecasts over a hashtag's full history
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub hashtag: String,
    pub platform: Platform,
    pub predictions: PredictionResult,
}

/// Identity carried through the growth ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthSubject {
    pub hashtag: String,
    pub platform: Platform,
    pub category: Category,
    #[serde(rename = "currentMentions")]
    pub current_mentions: u64,
    pub trending_score: f64,
}

impl From<&HashtagRecord> for GrowthSubject {
    fn from(record: &HashtagRecord) -> Self {
        Self {
            hashtag: record.hashtag.clone(),
            platform: record.platform,
            category: record.category,
            current_mentions: record.metrics.mentions,
            trending_score: record.trending_score,
        }
    }
}

/// Growth ranking with the period it covers
#[derive(Debug, Clone, Serialize)]
pub struct GrowthReport {
    #[serde(flatten)]
    pub ranking: GrowthRanking<GrowthSubject>,
    pub period: String,
}

/// Stored record plus display labels: the direction of its latest change
/// and the polarity of its sentiment
#[derive(Debug, Clone, Serialize)]
pub struct HashtagView {
    #[serde(flatten)]
    pub record: HashtagRecord,
    pub trend_direction: TrendDirection,
    pub polarity: Polarity,
}

/// Windowed observations of one hashtag
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub hashtag: String,
    pub platform: Platform,
    pub time_series: ObservationWindow,
}

/// Result of ingesting a batch of snapshots
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestSummary {
    pub ingested: usize,
    pub tracked: usize,
}

/// Analytics queries and ingestion over a shared store
#[derive(Clone)]
pub struct AnalyticsService {
    store: SharedObservationStore,
    config: AnalyticsConfig,
    clock: Clock,
}

impl AnalyticsService {
    pub fn new(store: SharedObservationStore, config: AnalyticsConfig) -> Self {
        Self {
            store,
            config,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the clock used for windows and ingestion timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &SharedObservationStore {
        &self.store
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn observe<T>(&self, operation: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let _timer = metrics::start_query_timer(operation);
        let result = f();
        let outcome = Outcome::of(&result);
        metrics::record_query(operation, outcome);

        match &result {
            Ok(_) => tracing::debug!(operation, "Query completed"),
            Err(e) if outcome == Outcome::Error => {
                tracing::error!(operation, error = %e, "Query failed")
            }
            Err(e) => tracing::debug!(operation, error = %e, "Query rejected"),
        }
        result
    }

    fn require(&self, hashtag: &str, platform: Option<Platform>) -> Result<HashtagRecord> {
        self.store
            .find_hashtag(hashtag, platform)?
            .ok_or_else(|| Error::not_found(crate::models::normalize_hashtag(hashtag), platform))
    }

    fn window_since(&self, record: &HashtagRecord, since: DateTime<Utc>) -> Result<ObservationWindow> {
        Ok(ObservationWindow::new(
            self.store.observations(&record.key(), Some(since))?,
        ))
    }

    /// Trend metrics for the most recently updated matching hashtag
    ///
    /// `days` defaults to the configured trend period and must be positive.
    pub fn compute_trend(
        &self,
        hashtag: &str,
        platform: Option<Platform>,
        days: Option<u32>,
    ) -> Result<TrendReport> {
        self.observe("trend", || {
            let period = period(days, self.config.trend_period_days)?;
            let record = self.require(hashtag, platform)?;
            let time_series = self.window_since(&record, self.now() - period)?;
            let analysis = analyze_trend(&time_series);

            tracing::debug!(
                hashtag = %record.hashtag,
                platform = %record.platform,
                points = time_series.len(),
                trend = %analysis.trend,
                "Trend computed"
            );

            Ok(TrendReport {
                hashtag: record.hashtag,
                platform: record.platform,
                time_series,
                analysis,
            })
        })
    }

    /// Forecasts over the full observation history
    pub fn compute_predictions(
        &self,
        hashtag: &str,
        platform: Option<Platform>,
    ) -> Result<PredictionReport> {
        self.observe("predict", || {
            let record = self.require(hashtag, platform)?;
            let history = ObservationWindow::new(self.store.observations(&record.key(), None)?);

            Ok(PredictionReport {
                predictions: predict(&history),
                hashtag: record.hashtag,
                platform: record.platform,
            })
        })
    }

    /// Fastest-growing and declining hashtags updated within the period
    pub fn compute_growth_ranking(
        &self,
        platform: Option<Platform>,
        category: Option<Category>,
        days: Option<u32>,
    ) -> Result<GrowthReport> {
        self.observe("growth", || {
            let days = positive_days(days, self.config.growth_period_days)?;
            let since = self.now() - Duration::days(i64::from(days));
            let filter = HashtagFilter::default()
                .platform(platform)
                .category(category)
                .updated_since(since);

            // One snapshot of every matching window before ranking.
            let entries: Vec<(GrowthSubject, ObservationWindow)> = self
                .store
                .histories(&filter, Some(since))?
                .into_iter()
                .map(|(record, history)| {
                    (GrowthSubject::from(&record), ObservationWindow::new(history))
                })
                .collect();

            tracing::debug!(candidates = entries.len(), days, "Ranking growth");

            Ok(GrowthReport {
                ranking: rank_by_growth(entries, self.config.ranking_limit),
                period: format!("{days} days"),
            })
        })
    }

    /// Record one snapshot and refresh the hashtag's bookkeeping
    ///
    /// A snapshot without an explicit observation is recorded as one taken
    /// now from its aggregate metrics.
    pub fn record_snapshot(&self, snapshot: &HashtagSnapshot) -> Result<HashtagRecord> {
        self.observe("ingest", || {
            let record = self.apply_snapshot(snapshot)?;
            metrics::record_ingest(1, self.store.count()?);
            Ok(record)
        })
    }

    fn apply_snapshot(&self, snapshot: &HashtagSnapshot) -> Result<HashtagRecord> {
        let key = snapshot.key();
        if key.hashtag.is_empty() {
            return Err(Error::invalid("hashtag must not be empty"));
        }

        let now = self.now();
        let observation = snapshot.observation.clone().unwrap_or_else(|| {
            Observation::new(
                now,
                snapshot.metrics.mentions,
                snapshot.metrics.total_engagement(),
            )
            .with_sentiment(snapshot.sentiment.overall_score)
        });

        // Bookkeeping is derived from the history inside the store's atomic step.
        let record = self.store.record_observation(&key, &observation, &|current, history| {
            let mut record =
                current.unwrap_or_else(|| HashtagRecord::new(&key, snapshot.category, now));
            record.category = snapshot.category;
            record.metrics = snapshot.metrics.clone();
            record.sentiment = snapshot.sentiment.clone();
            refresh_metadata(&mut record, history, now);
            record.trending_score =
                analytics::scoring::score_hashtag(&record.metrics, &record.sentiment, history, now);
            Ok(record)
        })?;

        tracing::info!(
            hashtag = %key,
            mentions = observation.mentions,
            trending_score = record.trending_score,
            "Snapshot recorded"
        );
        Ok(record)
    }

    /// Record a batch of snapshots in order, stopping at the first failure
    pub fn ingest(&self, snapshots: &[HashtagSnapshot]) -> Result<IngestSummary> {
        self.observe("ingest_batch", || {
            for snapshot in snapshots {
                self.apply_snapshot(snapshot)?;
            }
            let tracked = self.store.count()?;
            metrics::record_ingest(snapshots.len() as u64, tracked);

            Ok(IngestSummary {
                ingested: snapshots.len(),
                tracked,
            })
        })
    }

    /// Hashtags by trending score, highest first
    pub fn trending(
        &self,
        platform: Option<Platform>,
        category: Option<Category>,
        limit: Option<usize>,
    ) -> Result<Vec<HashtagRecord>> {
        self.observe("trending", || {
            let limit = positive_limit(limit, self.config.trending_limit)?;
            let filter = HashtagFilter::default().platform(platform).category(category);
            let records = self.store.list_hashtags(&filter)?;
            Ok(analytics::top_trending(&records, limit))
        })
    }

    /// Hashtags whose name contains `term`, by trending score
    pub fn search(
        &self,
        term: &str,
        platform: Option<Platform>,
        limit: Option<usize>,
    ) -> Result<Vec<HashtagRecord>> {
        self.observe("search", || {
            let limit = positive_limit(limit, self.config.trending_limit)?;
            let filter = HashtagFilter::default().platform(platform).search(term);
            if filter.search.as_deref().is_none_or(str::is_empty) {
                return Err(Error::invalid("search term must not be empty"));
            }
            let records = self.store.list_hashtags(&filter)?;
            Ok(analytics::top_trending(&records, limit))
        })
    }

    /// Every stored platform record of a hashtag, most recently updated first
    pub fn hashtag_details(
        &self,
        hashtag: &str,
        platform: Option<Platform>,
    ) -> Result<Vec<HashtagView>> {
        self.observe("details", || {
            let filter = HashtagFilter::default().hashtag(hashtag).platform(platform);
            let records = self.store.list_hashtags(&filter)?;
            if records.is_empty() {
                return Err(Error::not_found(
                    crate::models::normalize_hashtag(hashtag),
                    platform,
                ));
            }

            records
                .into_iter()
                .map(|record| {
                    let history = ObservationWindow::new(self.store.observations(&record.key(), None)?);
                    Ok(HashtagView {
                        trend_direction: latest_change_direction(&history),
                        polarity: record.sentiment.polarity(),
                        record,
                    })
                })
                .collect()
        })
    }

    /// Observations of the most recently updated matching hashtag within the period
    pub fn time_series(
        &self,
        hashtag: &str,
        platform: Option<Platform>,
        days: Option<u32>,
    ) -> Result<TimeSeries> {
        self.observe("timeseries", || {
            let period = period(days, self.config.report_period_days)?;
            let record = self.require(hashtag, platform)?;
            let time_series = self.window_since(&record, self.now() - period)?;

            Ok(TimeSeries {
                hashtag: record.hashtag,
                platform: record.platform,
                time_series,
            })
        })
    }

    fn recent_records(
        &self,
        platform: Option<Platform>,
        category: Option<Category>,
        days: Option<u32>,
    ) -> Result<Vec<HashtagRecord>> {
        let period = period(days, self.config.report_period_days)?;
        let filter = HashtagFilter::default()
            .platform(platform)
            .category(category)
            .updated_since(self.now() - period);
        self.store.list_hashtags(&filter)
    }

    /// Per-category statistics for hashtags updated within the period
    pub fn category_report(
        &self,
        platform: Option<Platform>,
        days: Option<u32>,
    ) -> Result<Vec<CategoryStats>> {
        self.observe("categories", || {
            let records = self.recent_records(platform, None, days)?;
            Ok(analytics::category_breakdown(&records))
        })
    }

    /// Per-platform statistics for hashtags updated within the period
    pub fn platform_report(&self, days: Option<u32>) -> Result<Vec<PlatformStats>> {
        self.observe("platforms", || {
            let records = self.recent_records(None, None, days)?;
            Ok(analytics::platform_comparison(&records))
        })
    }

    /// Sentiment totals for hashtags updated within the period
    pub fn sentiment_report(
        &self,
        platform: Option<Platform>,
        category: Option<Category>,
        days: Option<u32>,
    ) -> Result<SentimentOverview> {
        self.observe("sentiment", || {
            let records = self.recent_records(platform, category, days)?;
            Ok(analytics::sentiment_overview(&records))
        })
    }

    /// Totals over every tracked hashtag
    pub fn overview(&self) -> Result<OverviewStats> {
        self.observe("overview", || {
            let records = self.store.list_hashtags(&HashtagFilter::default())?;
            Ok(analytics::overview(&records))
        })
    }
}

/// Recompute ingestion bookkeeping from the full history
fn refresh_metadata(record: &mut HashtagRecord, history: &[Observation], now: DateTime<Utc>) {
    let metadata = &mut record.metadata;
    metadata.last_updated = now;
    metadata.total_mentions = analytics::saturating_sum(history.iter().map(|o| o.mentions));

    // Earliest observation wins a tie for the peak.
    let peak = history
        .iter()
        .fold(None::<&Observation>, |best, o| match best {
            Some(b) if b.mentions > o.mentions => Some(b),
            Some(b) if b.mentions == o.mentions && b.timestamp <= o.timestamp => Some(b),
            _ => Some(o),
        });
    if let Some(peak) = peak {
        metadata.peak_mentions = peak.mentions;
        metadata.peak_date = Some(peak.timestamp);
    }
}

fn positive_days(days: Option<u32>, default: u32) -> Result<u32> {
    match days.unwrap_or(default) {
        0 => Err(Error::invalid("days must be a positive integer")),
        days => Ok(days),
    }
}

fn period(days: Option<u32>, default: u32) -> Result<Duration> {
    positive_days(days, default).map(|d| Duration::days(i64::from(d)))
}

fn positive_limit(limit: Option<usize>, default: usize) -> Result<usize> {
    match limit.unwrap_or(default) {
        0 => Err(Error::invalid("limit must be a positive integer")),
        limit => Ok(limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AggregateMetrics, SentimentSummary};
    use crate::store::create_memory_store;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 20, 12, 0, 0).unwrap()
    }

    fn service() -> AnalyticsService {
        AnalyticsService::new(create_memory_store(), AnalyticsConfig::default())
            .with_clock(Arc::new(fixed_now))
    }

    fn snapshot(tag: &str, platform: Platform, days_ago: i64, mentions: u64) -> HashtagSnapshot {
        HashtagSnapshot {
            hashtag: tag.to_string(),
            platform,
            category: Category::Technology,
            metrics: AggregateMetrics {
                mentions,
                engagement_rate: 2.0,
                ..Default::default()
            },
            sentiment: SentimentSummary {
                overall_score: 0.5,
                ..Default::default()
            },
            observation: Some(Observation::new(
                fixed_now() - Duration::days(days_ago),
                mentions,
                mentions * 2,
            )),
        }
    }

    #[test]
    fn test_record_snapshot_bookkeeping() {
        let svc = service();
        svc.record_snapshot(&snapshot("#Rust", Platform::Twitter, 2, 40))
            .unwrap();
        svc.record_snapshot(&snapshot("rust", Platform::Twitter, 1, 90))
            .unwrap();
        let record = svc
            .record_snapshot(&snapshot("rust", Platform::Twitter, 0, 60))
            .unwrap();

        assert_eq!(record.hashtag, "rust");
        assert_eq!(record.metadata.total_mentions, 190);
        assert_eq!(record.metadata.peak_mentions, 90);
        assert_eq!(
            record.metadata.peak_date,
            Some(fixed_now() - Duration::days(1))
        );
        assert_eq!(record.metadata.last_updated, fixed_now());

        // Only the observation at `now` is inside the last 24h.
        let expected = 0.3 * 2.0 + 0.4 * 60.0 + 0.3 * 0.5;
        assert!((record.trending_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_without_observation_uses_metrics() {
        let svc = service();
        let mut snap = snapshot("ai", Platform::Youtube, 0, 12);
        snap.observation = None;
        snap.metrics.likes = 3;
        snap.metrics.comments = 4;
        svc.record_snapshot(&snap).unwrap();

        let series = svc.time_series("ai", None, Some(1)).unwrap();
        let obs = &series.time_series.observations()[0];
        assert_eq!(obs.timestamp, fixed_now());
        assert_eq!(obs.mentions, 12);
        assert_eq!(obs.engagement, 7);
        assert_eq!(obs.sentiment_score, 0.5);
    }

    #[test]
    fn test_empty_hashtag_is_invalid() {
        let svc = service();
        let err = svc
            .record_snapshot(&snapshot("  # ", Platform::Twitter, 0, 1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_unstorable_snapshot_leaves_state_unchanged() {
        let svc = service();
        let before = svc
            .record_snapshot(&snapshot("rust", Platform::Twitter, 1, 40))
            .unwrap();

        let mut huge = snapshot("rust", Platform::Twitter, 0, 10);
        huge.metrics.likes = u64::MAX;
        huge.metrics.shares = 1;
        huge.observation = None;
        let err = svc.record_snapshot(&huge).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let key = before.key();
        assert_eq!(svc.store().get_hashtag(&key).unwrap(), Some(before));
        assert_eq!(svc.store().observations(&key, None).unwrap().len(), 1);

        let mut fresh = snapshot("fresh", Platform::Tiktok, 0, 5);
        fresh.metrics.mentions = u64::MAX;
        let err = svc.record_snapshot(&fresh).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(svc.store().count().unwrap(), 1);
    }

    #[test]
    fn test_concurrent_snapshots_keep_totals_consistent() {
        let svc = service();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        svc.record_snapshot(&snapshot("race", Platform::Twitter, 0, 1))
                            .unwrap();
                    }
                });
            }
        });

        let record = svc.hashtag_details("race", None).unwrap().remove(0).record;
        let stored = svc.store().observations(&record.key(), None).unwrap();
        assert_eq!(stored.len(), 200);
        assert_eq!(record.metadata.total_mentions, 200);
    }

    #[test]
    fn test_compute_trend_windows_history() {
        let svc = service();
        for (days_ago, mentions) in [(40, 5000), (3, 100), (2, 150), (1, 90)] {
            svc.record_snapshot(&snapshot("rust", Platform::Twitter, days_ago, mentions))
                .unwrap();
        }

        let report = svc.compute_trend("RUST", None, None).unwrap();
        assert_eq!(report.time_series.len(), 3);
        assert_eq!(report.analysis.growth_rate, -10.0);
        assert_eq!(report.analysis.trend, TrendDirection::Stable);

        let err = svc.compute_trend("rust", None, Some(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = svc.compute_trend("missing", Some(Platform::Tiktok), None).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_predictions_use_full_history() {
        let svc = service();
        for (days_ago, mentions) in [(300, 10), (200, 20), (100, 40)] {
            svc.record_snapshot(&snapshot("old", Platform::Twitter, days_ago, mentions))
                .unwrap();
        }

        let report = svc.compute_predictions("old", None).unwrap();
        assert_eq!(report.predictions.next_24h.mentions_prediction, 53);
        assert_eq!(report.predictions.next_week.mentions_prediction, 143);
    }

    #[test]
    fn test_growth_ranking_filters() {
        let svc = service();
        for (tag, first, last) in [("up", 10, 30), ("down", 100, 50), ("flat", 5, 5)] {
            svc.record_snapshot(&snapshot(tag, Platform::Twitter, 5, first))
                .unwrap();
            svc.record_snapshot(&snapshot(tag, Platform::Twitter, 1, last))
                .unwrap();
        }
        svc.record_snapshot(&snapshot("elsewhere", Platform::Instagram, 5, 1))
            .unwrap();
        svc.record_snapshot(&snapshot("elsewhere", Platform::Instagram, 1, 100))
            .unwrap();

        let report = svc
            .compute_growth_ranking(Some(Platform::Twitter), None, Some(30))
            .unwrap();
        assert_eq!(report.period, "30 days");
        assert_eq!(report.ranking.fastest_growing.len(), 1);
        assert_eq!(report.ranking.fastest_growing[0].subject.hashtag, "up");
        assert_eq!(report.ranking.fastest_growing[0].growth_rate, 200.0);
        assert_eq!(report.ranking.declining[0].subject.hashtag, "down");
        assert_eq!(report.ranking.declining[0].growth_rate, -50.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["fastestGrowing"][0]["currentMentions"], 30);
        assert_eq!(json["period"], "30 days");
    }

    #[test]
    fn test_details_and_search() {
        let svc = service();
        svc.record_snapshot(&snapshot("rustlang", Platform::Twitter, 2, 10))
            .unwrap();
        svc.record_snapshot(&snapshot("rustlang", Platform::Twitter, 1, 5))
            .unwrap();
        svc.record_snapshot(&snapshot("rustlang", Platform::Youtube, 0, 8))
            .unwrap();

        let views = svc.hashtag_details("#rustlang", None).unwrap();
        assert_eq!(views.len(), 2);
        let twitter = views
            .iter()
            .find(|v| v.record.platform == Platform::Twitter)
            .unwrap();
        assert_eq!(twitter.trend_direction, TrendDirection::Falling);
        assert_eq!(twitter.polarity, Polarity::Positive);

        let found = svc.search("RUST", None, None).unwrap();
        assert_eq!(found.len(), 2);
        assert!(svc.search("#", None, None).is_err());
        assert!(matches!(
            svc.hashtag_details("nope", None).unwrap_err(),
            Error::NotFound { .. }
        ));
    }

    #[test]
    fn test_search_orders_by_trending_score() {
        use std::sync::atomic::{AtomicI64, Ordering};

        let tick = Arc::new(AtomicI64::new(0));
        let clock_tick = Arc::clone(&tick);
        let svc = AnalyticsService::new(create_memory_store(), AnalyticsConfig::default())
            .with_clock(Arc::new(move || {
                fixed_now() + Duration::minutes(clock_tick.fetch_add(1, Ordering::SeqCst))
            }));

        svc.record_snapshot(&snapshot("rustacean", Platform::Twitter, 0, 30))
            .unwrap();
        svc.record_snapshot(&snapshot("rustlang", Platform::Twitter, 0, 10))
            .unwrap();

        let found = svc.search("rust", None, None).unwrap();
        assert!(found[1].metadata.last_updated > found[0].metadata.last_updated);
        let names: Vec<&str> = found.iter().map(|r| r.hashtag.as_str()).collect();
        assert_eq!(names, vec!["rustacean", "rustlang"]);
        assert!(tick.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_trending_limit() {
        let svc = service();
        for (i, tag) in ["a", "b", "c"].iter().enumerate() {
            svc.record_snapshot(&snapshot(tag, Platform::Twitter, 0, (i as u64 + 1) * 10))
                .unwrap();
        }

        let top: Vec<String> = svc
            .trending(None, None, Some(2))
            .unwrap()
            .into_iter()
            .map(|r| r.hashtag)
            .collect();
        assert_eq!(top, vec!["c", "b"]);
        assert!(svc.trending(None, None, Some(0)).is_err());
    }
}
