//! Short-horizon mention forecasts
//!
//! Fits an ordinary least-squares line through the most recent observations,
//! indexed by position rather than timestamp, and extrapolates it one step and
//! seven steps past the fitted points. Confidence decays with the steepness of
//! the fitted slope.

use serde::{Deserialize, Serialize};

use super::round2;
use super::window::ObservationWindow;

/// Fewer observations than this produce the zero forecast
pub const MIN_PREDICTION_POINTS: usize = 3;

/// Number of most recent observations the line is fitted through
pub const FIT_POINTS: usize = 3;

/// Positions past the last fitted point for the next-day forecast
pub const NEXT_DAY_STEPS: usize = 1;

/// Positions past the last fitted point for the next-week forecast
pub const NEXT_WEEK_STEPS: usize = 7;

/// `|slope|` is divided by this before being subtracted from full confidence
pub const NEXT_DAY_DECAY: f64 = 100.0;
pub const NEXT_WEEK_DECAY: f64 = 50.0;

pub const CONFIDENCE_FLOOR: f64 = 0.1;
pub const NEXT_DAY_CONFIDENCE_CEILING: f64 = 0.9;
pub const NEXT_WEEK_CONFIDENCE_CEILING: f64 = 0.7;

/// Forecast for one horizon
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub mentions_prediction: u64,

    /// In `[0, 1]`; exactly zero only for the insufficient-data fallback
    pub confidence: f64,
}

/// Forecasts for both horizons
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub next_24h: Forecast,
    pub next_week: Forecast,
}

impl PredictionResult {
    /// Zero predictions with zero confidence, used when there is too little data
    #[must_use]
    pub fn insufficient() -> Self {
        Self::default()
    }
}

/// Least-squares line through `(1, y1), (2, y2), ..., (n, yn)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line to values placed at positions `1..=n`
    ///
    /// Returns `None` for fewer than two values, where the slope is undefined.
    #[must_use]
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }

        let n = values.len() as f64;
        let sum_x = n * (n + 1.0) / 2.0;
        let sum_x2 = n * (n + 1.0) * (2.0 * n + 1.0) / 6.0;
        let sum_y: f64 = values.iter().sum();
        let sum_xy: f64 = values
            .iter()
            .enumerate()
            .map(|(i, y)| (i + 1) as f64 * y)
            .sum();

        let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
        let intercept = (sum_y - slope * sum_x) / n;

        Some(Self { slope, intercept })
    }

    /// Value of the fitted line at position `x`
    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

fn forecast(fit: &LinearFit, position: usize, decay: f64, ceiling: f64) -> Forecast {
    // Negative extrapolations floor at zero mentions.
    let projected = fit.at(position as f64).round().max(0.0);
    let confidence = (1.0 - fit.slope.abs() / decay).clamp(CONFIDENCE_FLOOR, ceiling);

    Forecast {
        mentions_prediction: projected as u64,
        confidence: round2(confidence),
    }
}

/// Forecast mentions for the next day and the next week
#[must_use]
pub fn predict(window: &ObservationWindow) -> PredictionResult {
    if window.len() < MIN_PREDICTION_POINTS {
        return PredictionResult::insufficient();
    }

    let recent: Vec<f64> = window
        .recent(FIT_POINTS)
        .iter()
        .map(|o| o.mentions as f64)
        .collect();

    let Some(fit) = LinearFit::fit(&recent) else {
        return PredictionResult::insufficient();
    };

    let n = recent.len();
    PredictionResult {
        next_24h: forecast(
            &fit,
            n + NEXT_DAY_STEPS,
            NEXT_DAY_DECAY,
            NEXT_DAY_CONFIDENCE_CEILING,
        ),
        next_week: forecast(
            &fit,
            n + NEXT_WEEK_STEPS,
            NEXT_WEEK_DECAY,
            NEXT_WEEK_CONFIDENCE_CEILING,
        ),
    }
}
