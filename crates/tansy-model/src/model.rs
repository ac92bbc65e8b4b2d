//! The fit/predict capability contract and shared input validation.

use crate::error::ModelError;

/// A binary classifier that can be trained and queried for class scores.
///
/// `fit` trains from whatever state the instance is in; callers that need a
/// clean slate build a fresh instance from a
/// [`ModelSpec`](crate::ModelSpec) instead of refitting. `predict` returns
/// one continuous score in `[0, 1]` per input row, where values above 0.5
/// lean towards class 1.
pub trait Model: Send + std::fmt::Debug {
    /// Train on the given dataset.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for shape mismatches, non-finite values,
    /// non-binary labels, or a training set smaller than the family needs.
    fn fit(&mut self, features: &[Vec<f64>], labels: &[usize]) -> Result<(), ModelError>;

    /// Predict class scores for the given rows.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFitted`] before any successful `fit`, or a
    /// shape error if the rows disagree with the training width.
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>, ModelError>;

    /// Short family name for logging.
    fn name(&self) -> &'static str;
}

/// Validate a training set and return its feature width.
pub(crate) fn validate_training_set(
    features: &[Vec<f64>],
    labels: &[usize],
) -> Result<usize, ModelError> {
    if features.is_empty() {
        return Err(ModelError::EmptyDataset);
    }
    if features.len() != labels.len() {
        return Err(ModelError::LabelCountMismatch {
            n_rows: features.len(),
            n_labels: labels.len(),
        });
    }
    let n_features = features[0].len();
    for (sample_index, row) in features.iter().enumerate() {
        if row.len() != n_features {
            return Err(ModelError::FeatureCountMismatch {
                expected: n_features,
                got: row.len(),
                sample_index,
            });
        }
        for (feature_index, &val) in row.iter().enumerate() {
            if !val.is_finite() {
                return Err(ModelError::NonFiniteValue {
                    sample_index,
                    feature_index,
                });
            }
        }
    }
    for (sample_index, &label) in labels.iter().enumerate() {
        if label > 1 {
            return Err(ModelError::NonBinaryLabel { sample_index, label });
        }
    }
    Ok(n_features)
}

/// Validate prediction rows against the fitted feature width.
pub(crate) fn validate_prediction_set(
    features: &[Vec<f64>],
    expected: usize,
) -> Result<(), ModelError> {
    for row in features {
        if row.len() != expected {
            return Err(ModelError::PredictionFeatureMismatch {
                expected,
                got: row.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_accepts_clean_binary_data() {
        let features = vec![vec![0.0, 1.0], vec![2.0, 3.0]];
        let labels = vec![0, 1];
        assert_eq!(validate_training_set(&features, &labels).unwrap(), 2);
    }

    #[test]
    fn validation_rejects_nan() {
        let features = vec![vec![0.0], vec![f64::NAN]];
        let labels = vec![0, 1];
        let err = validate_training_set(&features, &labels).unwrap_err();
        assert!(matches!(
            err,
            ModelError::NonFiniteValue { sample_index: 1, feature_index: 0 }
        ));
    }

    #[test]
    fn validation_rejects_length_mismatch() {
        let features = vec![vec![0.0]];
        let labels = vec![0, 1];
        let err = validate_training_set(&features, &labels).unwrap_err();
        assert!(matches!(err, ModelError::LabelCountMismatch { n_rows: 1, n_labels: 2 }));
    }
}
