//! Logistic regression trained by full-batch gradient descent.

use tracing::debug;

use crate::error::ModelError;
use crate::model::{Model, validate_prediction_set, validate_training_set};

/// Binary logistic regression with optional L2 regularisation.
///
/// Training is full-batch gradient descent from zero-initialised weights,
/// so fitting is deterministic: the same data always produces the same
/// coefficients. Each `fit` call starts from scratch, discarding any
/// previous coefficients.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    learning_rate: f64,
    epochs: usize,
    l2: f64,
    fitted: Option<Fitted>,
}

#[derive(Debug, Clone)]
struct Fitted {
    weights: Vec<f64>,
    bias: f64,
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl LogisticRegression {
    /// Create an untrained instance.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidHyperparameter`] if `learning_rate` is
    /// not positive and finite, `epochs` is zero, or `l2` is negative or
    /// non-finite.
    pub fn new(learning_rate: f64, epochs: usize, l2: f64) -> Result<Self, ModelError> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(ModelError::InvalidHyperparameter {
                key: "learning_rate",
                value: learning_rate,
                constraint: "must be positive and finite",
            });
        }
        if epochs == 0 {
            return Err(ModelError::InvalidHyperparameter {
                key: "epochs",
                value: 0.0,
                constraint: "must be at least 1",
            });
        }
        if !(l2.is_finite() && l2 >= 0.0) {
            return Err(ModelError::InvalidHyperparameter {
                key: "l2",
                value: l2,
                constraint: "must be non-negative and finite",
            });
        }
        Ok(Self {
            learning_rate,
            epochs,
            l2,
            fitted: None,
        })
    }
}

impl Model for LogisticRegression {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[usize]) -> Result<(), ModelError> {
        let n_features = validate_training_set(features, labels)?;
        let n = features.len() as f64;

        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;

        for _ in 0..self.epochs {
            let mut grad_w = vec![0.0; n_features];
            let mut grad_b = 0.0;
            for (row, &label) in features.iter().zip(labels) {
                let z = bias + row.iter().zip(&weights).map(|(x, w)| x * w).sum::<f64>();
                let residual = sigmoid(z) - label as f64;
                for (g, &x) in grad_w.iter_mut().zip(row) {
                    *g += residual * x;
                }
                grad_b += residual;
            }
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= self.learning_rate * (g / n + self.l2 * *w);
            }
            bias -= self.learning_rate * grad_b / n;
        }

        debug!(n_features, epochs = self.epochs, "logistic regression fitted");
        self.fitted = Some(Fitted { weights, bias });
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        let fitted = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        validate_prediction_set(features, fitted.weights.len())?;
        Ok(features
            .iter()
            .map(|row| {
                let z = fitted.bias
                    + row.iter().zip(&fitted.weights).map(|(x, w)| x * w).sum::<f64>();
                sigmoid(z)
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            features.push(vec![-2.0 - (i as f64) * 0.1]);
            labels.push(0);
        }
        for i in 0..20 {
            features.push(vec![2.0 + (i as f64) * 0.1]);
            labels.push(1);
        }
        (features, labels)
    }

    #[test]
    fn separates_two_clusters() {
        let (features, labels) = separable_data();
        let mut model = LogisticRegression::new(0.5, 500, 0.0).unwrap();
        model.fit(&features, &labels).unwrap();

        let preds = model.predict(&features).unwrap();
        for (p, &label) in preds.iter().zip(&labels) {
            assert_eq!(p.round() as usize, label, "score {p} for label {label}");
        }
    }

    #[test]
    fn scores_are_probabilities() {
        let (features, labels) = separable_data();
        let mut model = LogisticRegression::new(0.1, 100, 0.01).unwrap();
        model.fit(&features, &labels).unwrap();

        for p in model.predict(&features).unwrap() {
            assert!((0.0..=1.0).contains(&p), "score {p}");
        }
    }

    #[test]
    fn refit_is_independent_of_previous_fit() {
        let (features, labels) = separable_data();
        let inverted: Vec<usize> = labels.iter().map(|&l| 1 - l).collect();

        let mut refitted = LogisticRegression::new(0.5, 300, 0.0).unwrap();
        refitted.fit(&features, &inverted).unwrap();
        refitted.fit(&features, &labels).unwrap();

        let mut fresh = LogisticRegression::new(0.5, 300, 0.0).unwrap();
        fresh.fit(&features, &labels).unwrap();

        assert_eq!(
            refitted.predict(&features).unwrap(),
            fresh.predict(&features).unwrap()
        );
    }

    #[test]
    fn invalid_learning_rate_is_rejected() {
        assert!(matches!(
            LogisticRegression::new(0.0, 100, 0.0).unwrap_err(),
            ModelError::InvalidHyperparameter { key: "learning_rate", .. }
        ));
    }

    #[test]
    fn prediction_width_mismatch_is_rejected() {
        let (features, labels) = separable_data();
        let mut model = LogisticRegression::new(0.1, 10, 0.0).unwrap();
        model.fit(&features, &labels).unwrap();
        let err = model.predict(&[vec![0.0, 1.0]]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::PredictionFeatureMismatch { expected: 1, got: 2 }
        ));
    }
}
