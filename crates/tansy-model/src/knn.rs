//! k-nearest-neighbour classifier.

use rayon::prelude::*;
use tracing::debug;

use crate::error::ModelError;
use crate::model::{Model, validate_prediction_set, validate_training_set};

/// Classifies by averaging the labels of the k nearest training rows.
///
/// The score for a query row is the fraction of its k nearest neighbours
/// (squared Euclidean distance, ties broken on the lower row index) that
/// belong to class 1. Prediction is parallelised over query rows.
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
    fitted: Option<Fitted>,
}

#[derive(Debug, Clone)]
struct Fitted {
    features: Vec<Vec<f64>>,
    labels: Vec<usize>,
    n_features: usize,
}

impl KnnClassifier {
    /// Create an untrained instance with the given neighbour count.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidHyperparameter`] if `k` is zero.
    pub fn new(k: usize) -> Result<Self, ModelError> {
        if k == 0 {
            return Err(ModelError::InvalidHyperparameter {
                key: "k",
                value: 0.0,
                constraint: "must be at least 1",
            });
        }
        Ok(Self { k, fitted: None })
    }
}

impl Model for KnnClassifier {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[usize]) -> Result<(), ModelError> {
        let n_features = validate_training_set(features, labels)?;
        if features.len() < self.k {
            return Err(ModelError::TooFewSamples {
                needed: self.k,
                got: features.len(),
            });
        }
        debug!(n_train = features.len(), k = self.k, "knn fitted");
        self.fitted = Some(Fitted {
            features: features.to_vec(),
            labels: labels.to_vec(),
            n_features,
        });
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        let fitted = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        validate_prediction_set(features, fitted.n_features)?;

        let scores: Vec<f64> = features
            .par_iter()
            .map(|query| {
                let mut scored: Vec<(f64, usize)> = fitted
                    .features
                    .iter()
                    .enumerate()
                    .map(|(i, row)| {
                        let d: f64 = row
                            .iter()
                            .zip(query)
                            .map(|(a, b)| (a - b) * (a - b))
                            .sum();
                        (d, i)
                    })
                    .collect();
                scored.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

                let votes: usize = scored[..self.k]
                    .iter()
                    .filter(|&&(_, i)| fitted.labels[i] == 1)
                    .count();
                votes as f64 / self.k as f64
            })
            .collect();
        Ok(scores)
    }

    fn name(&self) -> &'static str {
        "knn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_clusters() -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..10 {
            features.push(vec![i as f64 * 0.1, 0.0]);
            labels.push(0);
        }
        for i in 0..10 {
            features.push(vec![5.0 + i as f64 * 0.1, 0.0]);
            labels.push(1);
        }
        (features, labels)
    }

    #[test]
    fn classifies_cluster_members_correctly() {
        let (features, labels) = two_clusters();
        let mut model = KnnClassifier::new(3).unwrap();
        model.fit(&features, &labels).unwrap();

        let preds = model.predict(&[vec![0.3, 0.0], vec![5.4, 0.0]]).unwrap();
        assert_eq!(preds[0], 0.0);
        assert_eq!(preds[1], 1.0);
    }

    #[test]
    fn scores_are_neighbour_fractions() {
        let features = vec![vec![0.0], vec![1.0], vec![2.0]];
        let labels = vec![0, 1, 1];
        let mut model = KnnClassifier::new(3).unwrap();
        model.fit(&features, &labels).unwrap();

        let preds = model.predict(&[vec![1.0]]).unwrap();
        assert!((preds[0] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn k_larger_than_training_set_errors() {
        let features = vec![vec![0.0], vec![1.0]];
        let labels = vec![0, 1];
        let mut model = KnnClassifier::new(5).unwrap();
        let err = model.fit(&features, &labels).unwrap_err();
        assert!(matches!(err, ModelError::TooFewSamples { needed: 5, got: 2 }));
    }

    #[test]
    fn zero_k_is_rejected() {
        assert!(KnnClassifier::new(0).is_err());
    }
}
