//! Observation storage
//!
//! The analytics engine never talks to a database directly. It receives
//! windows fetched through the [`ObservationStore`] trait, which keeps the
//! engine testable with synthetic data and lets the backing store change.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    AnalyticsService                         │
//! │        (trend, prediction, ranking, reports, ingest)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ObservationStore trait                    │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                         │
//!                    ▼                         ▼
//!        ┌─────────────────────┐   ┌─────────────────────┐
//!        │       SQLite        │   │      In-memory      │
//!        │   Implementation    │   │   Implementation    │
//!        └─────────────────────┘   └─────────────────────┘
//! ```
//!
//! Each call observes a consistent snapshot of one hashtag; there is no
//! isolation across hashtags, and none is needed by the analytics. Ingestion
//! goes through [`ObservationStore::record_observation`], which reads,
//! updates and writes one hashtag as a single atomic step.

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::models::{Category, HashtagKey, HashtagRecord, Observation, Platform};

pub use memory::MemoryObservationStore;
pub use sqlite::SqliteObservationStore;

/// Equality filters applied before records reach the analytics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashtagFilter {
    /// Exact normalized hashtag
    pub hashtag: Option<String>,

    pub platform: Option<Platform>,
    pub category: Option<Category>,

    /// Only records updated at or after this instant
    pub updated_since: Option<DateTime<Utc>>,

    /// Case-insensitive substring of the hashtag
    pub search: Option<String>,
}

impl HashtagFilter {
    pub fn hashtag(mut self, hashtag: &str) -> Self {
        self.hashtag = Some(crate::models::normalize_hashtag(hashtag));
        self
    }

    pub fn platform(mut self, platform: Option<Platform>) -> Self {
        self.platform = platform;
        self
    }

    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn updated_since(mut self, since: DateTime<Utc>) -> Self {
        self.updated_since = Some(since);
        self
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search = Some(crate::models::normalize_hashtag(term));
        self
    }

    /// Check a record against every set filter
    pub fn matches(&self, record: &HashtagRecord) -> bool {
        self.hashtag.as_deref().is_none_or(|h| record.hashtag == h)
            && self.platform.is_none_or(|p| record.platform == p)
            && self.category.is_none_or(|c| record.category == c)
            && self
                .updated_since
                .is_none_or(|since| record.metadata.last_updated >= since)
            && self
                .search
                .as_deref()
                .is_none_or(|term| record.hashtag.contains(term))
    }
}

/// Largest count either backend can hold (SQLite integers are signed)
pub const MAX_STORED_COUNT: u64 = i64::MAX as u64;

/// Derives the record to store from the current record, if any, and the
/// full history including the observation being recorded
pub type RecordUpdate<'a> =
    dyn Fn(Option<HashtagRecord>, &[Observation]) -> Result<HashtagRecord> + 'a;

/// Storage for hashtag records and their observation histories
///
/// Listing methods return records most recently updated first.
pub trait ObservationStore: Send + Sync {
    /// Append `observation` to `key` and store the record `update` derives
    ///
    /// The read, the update and both writes happen under one lock (and one
    /// transaction for SQLite). If `update` or any write fails, neither the
    /// record nor the observation is stored.
    fn record_observation(
        &self,
        key: &HashtagKey,
        observation: &Observation,
        update: &RecordUpdate<'_>,
    ) -> Result<HashtagRecord>;

    /// Get the record for an exact key
    fn get_hashtag(&self, key: &HashtagKey) -> Result<Option<HashtagRecord>>;

    /// Most recently updated record for a hashtag, on any platform unless given
    fn find_hashtag(
        &self,
        hashtag: &str,
        platform: Option<Platform>,
    ) -> Result<Option<HashtagRecord>>;

    /// Observations for a key, optionally only those at or after `since`
    ///
    /// Order is not guaranteed; callers build an `ObservationWindow`.
    fn observations(
        &self,
        key: &HashtagKey,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Observation>>;

    /// Records matching a filter
    fn list_hashtags(&self, filter: &HashtagFilter) -> Result<Vec<HashtagRecord>>;

    /// Number of tracked `(hashtag, platform)` pairs
    fn count(&self) -> Result<usize>;

    /// Records matching a filter, each with its observations since `since`
    fn histories(
        &self,
        filter: &HashtagFilter,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<(HashtagRecord, Vec<Observation>)>> {
        self.list_hashtags(filter)?
            .into_iter()
            .map(|record| {
                let observations = self.observations(&record.key(), since)?;
                Ok((record, observations))
            })
            .collect()
    }
}

/// Thread-safe shared store
pub type SharedObservationStore = Arc<dyn ObservationStore>;

/// Create a shared SQLite store
pub fn create_sqlite_store(path: impl AsRef<std::path::Path>) -> Result<SharedObservationStore> {
    Ok(Arc::new(SqliteObservationStore::new(path)?))
}

/// Create a shared in-memory store
pub fn create_memory_store() -> SharedObservationStore {
    Arc::new(MemoryObservationStore::new())
}

/// Reject records for another key and counts past [`MAX_STORED_COUNT`]
pub(crate) fn check_storable(
    key: &HashtagKey,
    record: &HashtagRecord,
    observation: &Observation,
) -> Result<()> {
    if record.key() != *key {
        return Err(Error::invalid(format!(
            "record {} does not match key {key}",
            record.key()
        )));
    }

    let counts = [
        ("mentions", record.metrics.mentions),
        ("likes", record.metrics.likes),
        ("shares", record.metrics.shares),
        ("comments", record.metrics.comments),
        ("views", record.metrics.views),
        ("reach", record.metrics.reach),
        ("positive_count", record.sentiment.positive_count),
        ("negative_count", record.sentiment.negative_count),
        ("neutral_count", record.sentiment.neutral_count),
        ("total_mentions", record.metadata.total_mentions),
        ("peak_mentions", record.metadata.peak_mentions),
        ("observation mentions", observation.mentions),
        ("observation engagement", observation.engagement),
    ];
    match counts.iter().find(|(_, value)| *value > MAX_STORED_COUNT) {
        Some((field, value)) => Err(Error::invalid(format!(
            "{field} {value} exceeds the storable maximum {MAX_STORED_COUNT}"
        ))),
        None => Ok(()),
    }
}

/// Sort records most recently updated first, then by hashtag and platform
pub(crate) fn sort_recent_first(records: &mut [HashtagRecord]) {
    records.sort_by(|a, b| {
        b.metadata
            .last_updated
            .cmp(&a.metadata.last_updated)
            .then_with(|| a.hashtag.cmp(&b.hashtag))
            .then_with(|| a.platform.as_str().cmp(b.platform.as_str()))
    });
}
