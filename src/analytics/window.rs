//! Chronologically ordered observation sequences
//!
//! Time bounds are applied by the store query that fetches a window.

use serde::Serialize;

use crate::models::Observation;

/// Observations of one hashtag, sorted ascending by timestamp
///
/// Stores may hold out-of-order insertions, so every constructor sorts. The
/// sort is stable: observations sharing a timestamp keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObservationWindow {
    observations: Vec<Observation>,
}

impl ObservationWindow {
    /// Build a window from observations in any order
    #[must_use]
    pub fn new(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.timestamp);
        Self { observations }
    }

    /// Get the number of observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the window holds no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All observations in chronological order
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    #[must_use]
    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// The most recent `n` observations (fewer if the window is shorter)
    #[must_use]
    pub fn recent(&self, n: usize) -> &[Observation] {
        let start = self.observations.len().saturating_sub(n);
        &self.observations[start..]
    }

    /// Mention counts in chronological order
    pub fn mentions(&self) -> impl Iterator<Item = u64> + '_ {
        self.observations.iter().map(|o| o.mentions)
    }
}

impl FromIterator<Observation> for ObservationWindow {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_new_sorts_by_timestamp() {
        let window = ObservationWindow::new(vec![
            Observation::new(at(5), 50, 0),
            Observation::new(at(1), 10, 0),
            Observation::new(at(3), 30, 0),
        ]);

        let mentions: Vec<u64> = window.mentions().collect();
        assert_eq!(mentions, vec![10, 30, 50]);
        assert_eq!(window.first().unwrap().timestamp, at(1));
        assert_eq!(window.last().unwrap().timestamp, at(5));
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let window = ObservationWindow::new(vec![
            Observation::new(at(2), 7, 0),
            Observation::new(at(2), 3, 0),
        ]);
        let mentions: Vec<u64> = window.mentions().collect();
        assert_eq!(mentions, vec![7, 3]);
    }

    #[test]
    fn test_recent() {
        let window: ObservationWindow = (0..5)
            .map(|h| Observation::new(at(h), u64::from(h), 0))
            .collect();

        let recent: Vec<u64> = window.recent(3).iter().map(|o| o.mentions).collect();
        assert_eq!(recent, vec![2, 3, 4]);
        assert_eq!(window.recent(10).len(), 5);
        assert!(ObservationWindow::default().recent(3).is_empty());
    }
}
