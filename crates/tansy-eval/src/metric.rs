//! Scoring functions over (ground truth, predictions).
//!
//! A scorer sees predictions either rounded to the nearest class or raw in
//! `[0, 1]`; the built-ins threshold at 0.5 so they accept both forms.

use crate::error::ScoreError;

/// A function of (ground-truth labels, predicted scores) to a scalar.
pub trait Scorer {
    /// Compute the score.
    ///
    /// # Errors
    ///
    /// Returns a [`ScoreError`] for shape problems or inputs on which the
    /// metric is undefined.
    fn score(&self, truth: &[usize], predicted: &[f64]) -> Result<f64, ScoreError>;
}

impl<F> Scorer for F
where
    F: Fn(&[usize], &[f64]) -> Result<f64, ScoreError>,
{
    fn score(&self, truth: &[usize], predicted: &[f64]) -> Result<f64, ScoreError> {
        self(truth, predicted)
    }
}

fn check_inputs(truth: &[usize], predicted: &[f64]) -> Result<(), ScoreError> {
    if truth.is_empty() {
        return Err(ScoreError::EmptyInput);
    }
    if truth.len() != predicted.len() {
        return Err(ScoreError::LengthMismatch {
            truth: truth.len(),
            predicted: predicted.len(),
        });
    }
    for (index, &p) in predicted.iter().enumerate() {
        if !p.is_finite() {
            return Err(ScoreError::NonFinitePrediction { index });
        }
    }
    Ok(())
}

fn predicted_class(p: f64) -> usize {
    usize::from(p.round() >= 1.0)
}

/// Fraction of predictions matching the ground truth.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accuracy;

impl Scorer for Accuracy {
    fn score(&self, truth: &[usize], predicted: &[f64]) -> Result<f64, ScoreError> {
        check_inputs(truth, predicted)?;
        let correct = truth
            .iter()
            .zip(predicted)
            .filter(|&(&t, &p)| predicted_class(p) == t)
            .count();
        Ok(correct as f64 / truth.len() as f64)
    }
}

/// F1 score for the positive class (label 1).
///
/// Precision and recall fall back to 0.0 when their denominators are zero,
/// and F1 is 0.0 when both are zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct F1Score;

impl Scorer for F1Score {
    fn score(&self, truth: &[usize], predicted: &[f64]) -> Result<f64, ScoreError> {
        check_inputs(truth, predicted)?;
        let mut tp = 0usize;
        let mut fp = 0usize;
        let mut fn_ = 0usize;
        for (&t, &p) in truth.iter().zip(predicted) {
            match (t, predicted_class(p)) {
                (1, 1) => tp += 1,
                (0, 1) => fp += 1,
                (1, 0) => fn_ += 1,
                _ => {}
            }
        }
        let precision = if tp + fp == 0 {
            0.0
        } else {
            tp as f64 / (tp + fp) as f64
        };
        let recall = if tp + fn_ == 0 {
            0.0
        } else {
            tp as f64 / (tp + fn_) as f64
        };
        if precision + recall == 0.0 {
            Ok(0.0)
        } else {
            Ok(2.0 * precision * recall / (precision + recall))
        }
    }
}

/// Mean of the per-class recalls.
///
/// Undefined (and therefore an error) when a class is absent from the
/// ground truth, which makes this metric a natural canary for degenerate
/// folds.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedAccuracy;

impl Scorer for BalancedAccuracy {
    fn score(&self, truth: &[usize], predicted: &[f64]) -> Result<f64, ScoreError> {
        check_inputs(truth, predicted)?;
        let mut recalls = [0.0f64; 2];
        for class in 0..2 {
            let support = truth.iter().filter(|&&t| t == class).count();
            if support == 0 {
                return Err(ScoreError::Undefined {
                    reason: format!("class {class} absent from ground truth"),
                });
            }
            let hits = truth
                .iter()
                .zip(predicted)
                .filter(|&(&t, &p)| t == class && predicted_class(p) == class)
                .count();
            recalls[class] = hits as f64 / support as f64;
        }
        Ok((recalls[0] + recalls[1]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_counts_matches() {
        let truth = vec![0, 1, 1, 0];
        let predicted = vec![0.0, 1.0, 0.0, 0.0];
        assert_eq!(Accuracy.score(&truth, &predicted).unwrap(), 0.75);
    }

    #[test]
    fn accuracy_thresholds_raw_scores() {
        let truth = vec![0, 1];
        let predicted = vec![0.2, 0.8];
        assert_eq!(Accuracy.score(&truth, &predicted).unwrap(), 1.0);
    }

    #[test]
    fn f1_known_value() {
        // tp=2, fp=1, fn=1 -> precision 2/3, recall 2/3, f1 2/3.
        let truth = vec![1, 1, 1, 0, 0];
        let predicted = vec![1.0, 1.0, 0.0, 1.0, 0.0];
        let f1 = F1Score.score(&truth, &predicted).unwrap();
        assert!((f1 - 2.0 / 3.0).abs() < 1e-12, "f1 = {f1}");
    }

    #[test]
    fn f1_degenerates_to_zero_without_positives() {
        let truth = vec![0, 0, 0];
        let predicted = vec![0.0, 0.0, 0.0];
        assert_eq!(F1Score.score(&truth, &predicted).unwrap(), 0.0);
    }

    #[test]
    fn balanced_accuracy_known_value() {
        let truth = vec![0, 0, 1, 1];
        let predicted = vec![0.0, 1.0, 1.0, 1.0];
        assert_eq!(BalancedAccuracy.score(&truth, &predicted).unwrap(), 0.75);
    }

    #[test]
    fn balanced_accuracy_undefined_on_single_class() {
        let truth = vec![1, 1, 1];
        let predicted = vec![1.0, 1.0, 1.0];
        let err = BalancedAccuracy.score(&truth, &predicted).unwrap_err();
        assert!(matches!(err, ScoreError::Undefined { .. }));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = Accuracy.score(&[0, 1], &[0.0]).unwrap_err();
        assert!(matches!(err, ScoreError::LengthMismatch { truth: 2, predicted: 1 }));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = Accuracy.score(&[], &[]).unwrap_err();
        assert!(matches!(err, ScoreError::EmptyInput));
    }

    #[test]
    fn closures_are_scorers() {
        let always_half = |_: &[usize], _: &[f64]| -> Result<f64, ScoreError> { Ok(0.5) };
        assert_eq!(always_half.score(&[0], &[0.0]).unwrap(), 0.5);
    }
}
