//! Trend analytics over hashtag observation histories
//!
//! Every function in this module is a pure, synchronous computation over an
//! [`ObservationWindow`] or a slice of stored records. Nothing is cached between
//! calls: windows change as new observations arrive, so results are recomputed
//! per query.
//!
//! - [`trend`] - growth rate, volatility and rising/falling/stable classification
//! - [`prediction`] - least-squares forecasts for the next day and week
//! - [`scoring`] - the composite trending score used for ranking
//! - [`ranking`] - fastest-growing and declining hashtags across a batch
//! - [`reports`] - category, platform and sentiment aggregates

pub mod prediction;
pub mod ranking;
pub mod reports;
pub mod scoring;
pub mod trend;
pub mod window;

pub use prediction::{predict, Forecast, LinearFit, PredictionResult};
pub use ranking::{rank_by_growth, GrowthEntry, GrowthRanking, GROWTH_RANKING_LIMIT};
pub use reports::{
    category_breakdown, overview, platform_comparison, sentiment_overview, top_trending,
    CategoryStats, OverviewStats, PlatformStats, SentimentOverview,
};
pub use scoring::{recent_mentions, trending_score};
pub use trend::{analyze_trend, growth_rate, TrendAnalysis, TrendDirection};
pub use window::ObservationWindow;

/// Round to two decimal places, halves rounding up
///
/// Reported rates, averages and confidences all use this rounding.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Sum of counts, saturating at `u64::MAX` instead of overflowing
#[must_use]
pub fn saturating_sum(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(0, u64::saturating_add)
}
