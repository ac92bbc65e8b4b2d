//! Majority-class baseline model.

use tracing::debug;

use crate::error::ModelError;
use crate::model::{Model, validate_prediction_set, validate_training_set};

/// Predicts the most frequent training class for every input.
///
/// Useful as a floor for experiment scores; any real model should beat it.
/// Ties go to class 0.
#[derive(Debug, Clone, Default)]
pub struct MajorityClass {
    fitted: Option<Fitted>,
}

#[derive(Debug, Clone)]
struct Fitted {
    prediction: f64,
    n_features: usize,
}

impl MajorityClass {
    /// Create an untrained instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Model for MajorityClass {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[usize]) -> Result<(), ModelError> {
        let n_features = validate_training_set(features, labels)?;
        let ones = labels.iter().filter(|&&l| l == 1).count();
        let prediction = if ones * 2 > labels.len() { 1.0 } else { 0.0 };
        debug!(prediction, "majority class fitted");
        self.fitted = Some(Fitted {
            prediction,
            n_features,
        });
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        let fitted = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        validate_prediction_set(features, fitted.n_features)?;
        Ok(vec![fitted.prediction; features.len()])
    }

    fn name(&self) -> &'static str {
        "majority"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicts_the_majority_label() {
        let features: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let labels = vec![1, 1, 1, 1, 1, 1, 0, 0, 0, 0];
        let mut model = MajorityClass::new();
        model.fit(&features, &labels).unwrap();
        assert_eq!(model.predict(&features).unwrap(), vec![1.0; 10]);
    }

    #[test]
    fn ties_go_to_class_zero() {
        let features = vec![vec![0.0], vec![1.0]];
        let labels = vec![0, 1];
        let mut model = MajorityClass::new();
        model.fit(&features, &labels).unwrap();
        assert_eq!(model.predict(&features).unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn predict_before_fit_errors() {
        let model = MajorityClass::new();
        let err = model.predict(&[vec![0.0]]).unwrap_err();
        assert!(matches!(err, ModelError::NotFitted));
    }

    #[test]
    fn refit_overwrites_previous_state() {
        let features = vec![vec![0.0], vec![1.0], vec![2.0]];
        let mut model = MajorityClass::new();
        model.fit(&features, &[1, 1, 0]).unwrap();
        model.fit(&features, &[0, 0, 1]).unwrap();
        assert_eq!(model.predict(&features).unwrap(), vec![0.0; 3]);
    }
}
