//! Growth ranking across many hashtags
//!
//! Ranking is a pure mapping over explicit `(subject, window)` pairs, so it can
//! be driven by any store query or by synthetic data. The subject type is
//! opaque to the ranker and carried through to the output unchanged.

use serde::Serialize;

use super::round2;
use super::trend::window_growth_rate;
use super::window::ObservationWindow;

/// Default length of each ranked list
pub const GROWTH_RANKING_LIMIT: usize = 10;

/// A subject paired with its window growth rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthEntry<T> {
    #[serde(flatten)]
    pub subject: T,

    /// Percent change, 2 decimals
    #[serde(rename = "growthRate")]
    pub growth_rate: f64,
}

/// Fastest-growing and declining subjects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRanking<T> {
    /// Positive growth, highest first
    pub fastest_growing: Vec<GrowthEntry<T>>,

    /// Negative growth, most negative first
    pub declining: Vec<GrowthEntry<T>>,
}

impl<T> Default for GrowthRanking<T> {
    fn default() -> Self {
        Self {
            fastest_growing: Vec::new(),
            declining: Vec::new(),
        }
    }
}

/// Rank subjects by the growth rate of their windows
///
/// Growth uses the same first-versus-last rule as trend analysis, rounded to
/// two decimals. Subjects whose rounded growth is exactly zero appear in
/// neither list. Sorting is stable, so equal rates keep their input order.
pub fn rank_by_growth<T, I>(entries: I, limit: usize) -> GrowthRanking<T>
where
    I: IntoIterator<Item = (T, ObservationWindow)>,
{
    let mut ranking = GrowthRanking::default();

    for (subject, window) in entries {
        let growth_rate = round2(window_growth_rate(&window));
        let entry = GrowthEntry {
            subject,
            growth_rate,
        };

        if growth_rate > 0.0 {
            ranking.fastest_growing.push(entry);
        } else if growth_rate < 0.0 {
            ranking.declining.push(entry);
        }
    }

    ranking
        .fastest_growing
        .sort_by(|a, b| b.growth_rate.total_cmp(&a.growth_rate));
    ranking
        .declining
        .sort_by(|a, b| a.growth_rate.total_cmp(&b.growth_rate));

    ranking.fastest_growing.truncate(limit);
    ranking.declining.truncate(limit);
    ranking
}
