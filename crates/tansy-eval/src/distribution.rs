//! Score distribution and its summary statistics.

use serde::{Deserialize, Serialize};

/// The ordered sequence of trial scores across an experiment's seeds.
///
/// Score `i` belongs to seed `i` of the run that produced it. The
/// distribution is immutable once built; consumers only read.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreDistribution {
    scores: Vec<f64>,
}

/// Summary statistics of a non-empty score distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (midpoint average for even counts).
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Smallest score.
    pub min: f64,
    /// Largest score.
    pub max: f64,
}

impl ScoreDistribution {
    /// Wrap an ordered score sequence.
    #[must_use]
    pub fn new(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    /// Return the scores in seed order.
    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Return the number of scores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Return true when there are no scores.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Consume the distribution, returning the scores.
    #[must_use]
    pub fn into_scores(self) -> Vec<f64> {
        self.scores
    }

    /// Compute summary statistics; `None` for an empty distribution.
    #[must_use]
    pub fn summary(&self) -> Option<ScoreSummary> {
        if self.scores.is_empty() {
            return None;
        }
        let n = self.scores.len() as f64;
        let mean = self.scores.iter().sum::<f64>() / n;
        let variance = self
            .scores
            .iter()
            .map(|&s| (s - mean).powi(2))
            .sum::<f64>()
            / n;

        let mut sorted = self.scores.clone();
        sorted.sort_unstable_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(ScoreSummary {
            mean,
            median,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}
