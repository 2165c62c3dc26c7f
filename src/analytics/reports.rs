//! Aggregate reports over stored hashtag records
//!
//! These summarise the current aggregate metrics of many hashtags at once:
//! per-category and per-platform rollups, sentiment totals and a global
//! overview. Filtering by platform, category or recency happens before the
//! records reach these functions.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use statrs::statistics::Statistics;

use super::saturating_sum;
use crate::models::{Category, HashtagRecord, Platform};

/// Hashtags listed per category in [`category_breakdown`]
pub const CATEGORY_TOP_N: usize = 5;

/// Hashtags listed per platform in [`platform_comparison`]
pub const PLATFORM_TOP_N: usize = 10;

/// Compact view of a hashtag inside a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHashtag {
    pub hashtag: String,
    pub platform: Platform,
    pub category: Category,
    pub trending_score: f64,
    pub mentions: u64,
}

impl From<&HashtagRecord> for RankedHashtag {
    fn from(record: &HashtagRecord) -> Self {
        Self {
            hashtag: record.hashtag.clone(),
            platform: record.platform,
            category: record.category,
            trending_score: record.trending_score,
            mentions: record.metrics.mentions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: Category,
    pub count: usize,
    pub total_mentions: u64,
    pub avg_trending_score: f64,
    pub avg_sentiment: f64,
    pub top_hashtags: Vec<RankedHashtag>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub platform: Platform,
    pub hashtag_count: usize,
    pub total_mentions: u64,

    /// Likes + shares + comments
    pub total_engagement: u64,
    pub avg_trending_score: f64,
    pub avg_sentiment: f64,
    pub categories: Vec<Category>,
    pub trending_hashtags: Vec<RankedHashtag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentTotals {
    pub positive_count: u64,
    pub negative_count: u64,
    pub neutral_count: u64,
    pub avg_sentiment_score: f64,
    pub total_mentions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySentiment {
    pub category: Category,
    #[serde(flatten)]
    pub totals: SentimentTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentOverview {
    pub overall: SentimentTotals,

    /// Highest mean sentiment first
    pub by_category: Vec<CategorySentiment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCount {
    pub platform: Platform,
    pub count: usize,
    pub total_mentions: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_hashtags: usize,
    pub total_mentions: u64,
    pub avg_trending_score: f64,
    pub top_category: Option<Category>,
    pub platforms: Vec<PlatformCount>,
}

fn mean_of(records: &[&HashtagRecord], f: impl Fn(&HashtagRecord) -> f64) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| f(r)).collect::<Vec<f64>>().mean()
}

fn by_score_desc(a: &&HashtagRecord, b: &&HashtagRecord) -> std::cmp::Ordering {
    b.trending_score
        .total_cmp(&a.trending_score)
        .then_with(|| b.metadata.last_updated.cmp(&a.metadata.last_updated))
}

fn top_by_score(records: &[&HashtagRecord], n: usize) -> Vec<RankedHashtag> {
    let mut sorted = records.to_vec();
    sorted.sort_by(by_score_desc);
    sorted.into_iter().take(n).map(RankedHashtag::from).collect()
}

fn sentiment_totals(records: &[&HashtagRecord]) -> SentimentTotals {
    SentimentTotals {
        positive_count: saturating_sum(records.iter().map(|r| r.sentiment.positive_count)),
        negative_count: saturating_sum(records.iter().map(|r| r.sentiment.negative_count)),
        neutral_count: saturating_sum(records.iter().map(|r| r.sentiment.neutral_count)),
        avg_sentiment_score: mean_of(records, |r| r.sentiment.overall_score),
        total_mentions: saturating_sum(records.iter().map(|r| r.metrics.mentions)),
    }
}

fn group_by<K: Ord>(
    records: &[HashtagRecord],
    key: impl Fn(&HashtagRecord) -> K,
) -> BTreeMap<K, Vec<&HashtagRecord>> {
    let mut groups: BTreeMap<K, Vec<&HashtagRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().push(record);
    }
    groups
}

/// Per-category rollup, highest total mentions first
#[must_use]
pub fn category_breakdown(records: &[HashtagRecord]) -> Vec<CategoryStats> {
    let mut stats: Vec<CategoryStats> = group_by(records, |r| r.category)
        .into_iter()
        .map(|(category, group)| CategoryStats {
            category,
            count: group.len(),
            total_mentions: saturating_sum(group.iter().map(|r| r.metrics.mentions)),
            avg_trending_score: mean_of(&group, |r| r.trending_score),
            avg_sentiment: mean_of(&group, |r| r.sentiment.overall_score),
            top_hashtags: top_by_score(&group, CATEGORY_TOP_N),
        })
        .collect();

    stats.sort_by(|a, b| b.total_mentions.cmp(&a.total_mentions));
    stats
}

/// Per-platform rollup, highest total mentions first
#[must_use]
pub fn platform_comparison(records: &[HashtagRecord]) -> Vec<PlatformStats> {
    let mut stats: Vec<PlatformStats> = group_by(records, |r| r.platform)
        .into_iter()
        .map(|(platform, group)| {
            let categories: BTreeSet<Category> = group.iter().map(|r| r.category).collect();
            PlatformStats {
                platform,
                hashtag_count: group.len(),
                total_mentions: saturating_sum(group.iter().map(|r| r.metrics.mentions)),
                total_engagement: saturating_sum(
                    group.iter().map(|r| r.metrics.total_engagement()),
                ),
                avg_trending_score: mean_of(&group, |r| r.trending_score),
                avg_sentiment: mean_of(&group, |r| r.sentiment.overall_score),
                categories: categories.into_iter().collect(),
                trending_hashtags: top_by_score(&group, PLATFORM_TOP_N),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.total_mentions.cmp(&a.total_mentions));
    stats
}

/// Sentiment totals overall and per category
#[must_use]
pub fn sentiment_overview(records: &[HashtagRecord]) -> SentimentOverview {
    let all: Vec<&HashtagRecord> = records.iter().collect();

    let mut by_category: Vec<CategorySentiment> = group_by(records, |r| r.category)
        .into_iter()
        .map(|(category, group)| CategorySentiment {
            category,
            totals: sentiment_totals(&group),
        })
        .collect();
    by_category.sort_by(|a, b| {
        b.totals
            .avg_sentiment_score
            .total_cmp(&a.totals.avg_sentiment_score)
    });

    SentimentOverview {
        overall: sentiment_totals(&all),
        by_category,
    }
}

/// Global counts across every record
#[must_use]
pub fn overview(records: &[HashtagRecord]) -> OverviewStats {
    let all: Vec<&HashtagRecord> = records.iter().collect();

    let top_category = group_by(records, |r| r.category)
        .into_iter()
        .max_by(|(ca, a), (cb, b)| a.len().cmp(&b.len()).then_with(|| cb.cmp(ca)))
        .map(|(category, _)| category);

    let platforms = group_by(records, |r| r.platform)
        .into_iter()
        .map(|(platform, group)| PlatformCount {
            platform,
            count: group.len(),
            total_mentions: saturating_sum(group.iter().map(|r| r.metrics.mentions)),
        })
        .collect();

    OverviewStats {
        total_hashtags: records.len(),
        total_mentions: saturating_sum(records.iter().map(|r| r.metrics.mentions)),
        avg_trending_score: mean_of(&all, |r| r.trending_score),
        top_category,
        platforms,
    }
}

/// Records ordered by trending score, most recently updated first on ties
#[must_use]
pub fn top_trending(records: &[HashtagRecord], limit: usize) -> Vec<HashtagRecord> {
    let mut sorted: Vec<&HashtagRecord> = records.iter().collect();
    sorted.sort_by(by_score_desc);
    sorted.into_iter().take(limit).cloned().collect()
}
