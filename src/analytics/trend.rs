//! Trend metrics over an observation window
//!
//! This module provides functionality for:
//! - Growth rate between the first and last observation of a window
//! - Volatility as the population standard deviation of mentions
//! - Classifying a window as rising, falling or stable
//! - Peak, average and total activity in the window

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use super::{round2, saturating_sum};
use super::window::ObservationWindow;

/// Growth above this percentage classifies a window as rising
pub const RISING_THRESHOLD_PCT: f64 = 10.0;

/// Growth below this percentage classifies a window as falling
pub const FALLING_THRESHOLD_PCT: f64 = -10.0;

/// Fewer observations than this carry no trend signal
pub const MIN_TREND_POINTS: usize = 2;

/// Trend direction indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Growth above [`RISING_THRESHOLD_PCT`]
    Rising,

    /// Growth below [`FALLING_THRESHOLD_PCT`]
    Falling,

    /// Anything in between, boundaries included
    #[default]
    Stable,
}

impl TrendDirection {
    /// Determine trend direction from a growth rate in percent
    ///
    /// # Classification
    /// - `growth_rate > 10`: Rising
    /// - `growth_rate < -10`: Falling
    /// - otherwise: Stable
    #[must_use]
    pub fn from_growth_rate(growth_rate: f64) -> Self {
        if growth_rate > RISING_THRESHOLD_PCT {
            Self::Rising
        } else if growth_rate < FALLING_THRESHOLD_PCT {
            Self::Falling
        } else {
            Self::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trend metrics for one window
///
/// Totals are only reported when the window carries a signal; the degenerate
/// result for short windows leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub trend: TrendDirection,

    /// Percent change from first to last mentions, 2 decimals
    pub growth_rate: f64,

    /// Population standard deviation of mentions, 2 decimals
    pub volatility: f64,

    pub peak: u64,

    /// Mean mentions, 2 decimals
    pub average: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_mentions: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_engagement: Option<u64>,
}

impl TrendAnalysis {
    /// Result for windows with fewer than [`MIN_TREND_POINTS`] observations
    #[must_use]
    pub fn degenerate() -> Self {
        Self {
            trend: TrendDirection::Stable,
            growth_rate: 0.0,
            volatility: 0.0,
            peak: 0,
            average: 0.0,
            total_mentions: None,
            total_engagement: None,
        }
    }
}

impl Default for TrendAnalysis {
    fn default() -> Self {
        Self::degenerate()
    }
}

/// Percentage change from `first` to `last` mentions
///
/// A zero baseline yields `0.0` rather than an infinite rate. The same rule
/// applies wherever growth is computed, so trend analysis and growth ranking
/// always agree.
#[must_use]
pub fn growth_rate(first: u64, last: u64) -> f64 {
    if first == 0 {
        return 0.0;
    }
    (last as f64 - first as f64) / first as f64 * 100.0
}

/// Growth rate between the chronologically first and last observations
///
/// Returns `0.0` for windows with fewer than two observations.
#[must_use]
pub fn window_growth_rate(window: &ObservationWindow) -> f64 {
    if window.len() < MIN_TREND_POINTS {
        return 0.0;
    }
    match (window.first(), window.last()) {
        (Some(first), Some(last)) => growth_rate(first.mentions, last.mentions),
        _ => 0.0,
    }
}

/// Compute trend metrics for a window
///
/// Classification uses the unrounded growth rate; reported figures are
/// rounded to two decimals.
#[must_use]
pub fn analyze_trend(window: &ObservationWindow) -> TrendAnalysis {
    if window.len() < MIN_TREND_POINTS {
        return TrendAnalysis::degenerate();
    }

    let mentions: Vec<f64> = window.mentions().map(|m| m as f64).collect();
    let growth = window_growth_rate(window);
    let volatility = mentions.iter().population_std_dev();
    let average = mentions.iter().mean();

    TrendAnalysis {
        trend: TrendDirection::from_growth_rate(growth),
        growth_rate: round2(growth),
        volatility: round2(volatility),
        peak: window.mentions().max().unwrap_or(0),
        average: round2(average),
        total_mentions: Some(saturating_sum(window.mentions())),
        total_engagement: Some(saturating_sum(
            window.observations().iter().map(|o| o.engagement),
        )),
    }
}

/// Direction of the most recent step, from the sign of the last-two delta
///
/// A short-term indicator shown next to stored hashtags; unlike
/// [`analyze_trend`] it applies no threshold.
#[must_use]
pub fn latest_change_direction(window: &ObservationWindow) -> TrendDirection {
    match window.recent(2) {
        [previous, latest] => match latest.mentions.cmp(&previous.mentions) {
            std::cmp::Ordering::Greater => TrendDirection::Rising,
            std::cmp::Ordering::Less => TrendDirection::Falling,
            std::cmp::Ordering::Equal => TrendDirection::Stable,
        },
        _ => TrendDirection::Stable,
    }
}
