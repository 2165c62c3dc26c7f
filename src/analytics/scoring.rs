//! Composite trending score
//!
//! The score blends engagement rate, mention volume over the last day and
//! overall sentiment with fixed weights. It is an unbounded relative signal:
//! scores are only comparable with others computed under the same weights.

use chrono::{DateTime, Duration, Utc};

use super::saturating_sum;
use crate::models::{AggregateMetrics, Observation, SentimentSummary};

pub const ENGAGEMENT_WEIGHT: f64 = 0.3;
pub const MENTION_WEIGHT: f64 = 0.4;
pub const SENTIMENT_WEIGHT: f64 = 0.3;

/// Lookback for the mention volume term
pub const RECENT_MENTIONS_HOURS: i64 = 24;

/// `0.3 * engagement_rate + 0.4 * recent_mentions + 0.3 * sentiment_score`
#[must_use]
pub fn trending_score(engagement_rate: f64, recent_mentions: u64, sentiment_score: f64) -> f64 {
    ENGAGEMENT_WEIGHT * engagement_rate
        + MENTION_WEIGHT * recent_mentions as f64
        + SENTIMENT_WEIGHT * sentiment_score
}

/// Sum of mentions observed strictly after `now - 24h`
#[must_use]
pub fn recent_mentions(history: &[Observation], now: DateTime<Utc>) -> u64 {
    let cutoff = now - Duration::hours(RECENT_MENTIONS_HOURS);
    saturating_sum(
        history
            .iter()
            .filter(|o| o.timestamp > cutoff)
            .map(|o| o.mentions),
    )
}

/// Score a hashtag from its current metrics, sentiment and history
#[must_use]
pub fn score_hashtag(
    metrics: &AggregateMetrics,
    sentiment: &SentimentSummary,
    history: &[Observation],
    now: DateTime<Utc>,
) -> f64 {
    trending_score(
        metrics.engagement_rate,
        recent_mentions(history, now),
        sentiment.overall_score,
    )
}
