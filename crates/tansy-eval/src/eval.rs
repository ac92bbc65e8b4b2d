//! Stratified k-fold cross-validation with a final full-refit score.

use tracing::{info, instrument};

use tansy_model::ModelSpec;

use crate::error::EvalError;
use crate::folds::stratified_folds;
use crate::metric::Scorer;

/// Cross-validation configuration.
///
/// Construct via [`Evaluation::new`], then chain `with_seed` if desired.
#[derive(Debug, Clone)]
pub struct Evaluation {
    n_folds: usize,
    seed: u64,
}

fn round_scores(predicted: &[f64]) -> Vec<f64> {
    predicted.iter().map(|p| p.round()).collect()
}

impl Evaluation {
    /// Create a new evaluation config with the given number of folds.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::InvalidFoldCount`] if `n_folds` < 2.
    pub fn new(n_folds: usize) -> Result<Self, EvalError> {
        if n_folds < 2 {
            return Err(EvalError::InvalidFoldCount { n_folds });
        }
        Ok(Self { n_folds, seed: 0 })
    }

    /// Set the random seed for fold shuffling.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return the number of folds.
    #[must_use]
    pub fn n_folds(&self) -> usize {
        self.n_folds
    }

    /// Cross-validate `spec` on the training partition, then score a final
    /// full refit against the holdout.
    ///
    /// Each fold fits a fresh instance built from `spec` on the fold's
    /// training rows and scores its held-out rows with predictions rounded
    /// to the nearest class. Fold scores are diagnostic only: they are
    /// logged and discarded. A fold whose rounded predictions cannot be
    /// scored is retried once with the raw predictions.
    ///
    /// After the folds, one more fresh instance is fitted on the entire
    /// training partition and scored once against `x_test`/`y_test` with
    /// the same rounding convention. Only that score is returned, so the
    /// result never depends on any fold's held-out rows.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`EvalError::EmptyDataset`] | Zero training samples |
    /// | [`EvalError::TooFewSamplesForFolds`] | A class has fewer samples than folds |
    /// | [`EvalError::Model`] | Spec invalid, or a fit/predict failure |
    /// | [`EvalError::MetricComputation`] | A fold scored on neither rounded nor raw predictions |
    /// | [`EvalError::Score`] | The final holdout scoring failed |
    #[instrument(skip_all, fields(n_folds = self.n_folds, n_train = x_train.len(), n_test = x_test.len()))]
    pub fn train_eval<S>(
        &self,
        spec: &ModelSpec,
        x_train: &[Vec<f64>],
        x_test: &[Vec<f64>],
        y_train: &[usize],
        y_test: &[usize],
        scorer: &S,
    ) -> Result<f64, EvalError>
    where
        S: Scorer + ?Sized,
    {
        if x_train.is_empty() {
            return Err(EvalError::EmptyDataset);
        }

        let assignments = stratified_folds(y_train, self.n_folds, self.seed)?;

        for fold in 0..self.n_folds {
            let mut train_features = Vec::new();
            let mut train_labels = Vec::new();
            let mut held_features = Vec::new();
            let mut held_labels = Vec::new();

            for (i, &assigned) in assignments.iter().enumerate() {
                if assigned == fold {
                    held_features.push(x_train[i].clone());
                    held_labels.push(y_train[i]);
                } else {
                    train_features.push(x_train[i].clone());
                    train_labels.push(y_train[i]);
                }
            }

            // A fresh instance per fold: no fit state crosses fold boundaries.
            let mut model = spec.build()?;
            model.fit(&train_features, &train_labels)?;
            let predicted = model.predict(&held_features)?;
            let rounded = round_scores(&predicted);

            match scorer.score(&held_labels, &rounded) {
                Ok(score) => info!(fold, score, "fold scored"),
                Err(rounded_err) => match scorer.score(&held_labels, &predicted) {
                    Ok(score) => info!(fold, score, "fold scored on raw predictions"),
                    Err(raw) => {
                        return Err(EvalError::MetricComputation {
                            rounded: rounded_err,
                            raw,
                        });
                    }
                },
            }
        }

        // Final refit on the full training partition against the holdout.
        let mut model = spec.build()?;
        model.fit(x_train, y_train)?;
        let predicted = model.predict(x_test)?;
        let final_score = scorer.score(y_test, &round_scores(&predicted))?;

        info!(final_score, "evaluation complete");
        Ok(final_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreError;
    use crate::metric::Accuracy;
    use tansy_model::{ModelFamily, ModelSpec};

    /// 30 class-0 rows at x < 3, 30 class-1 rows at x > 10.
    fn separable_data() -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..30 {
            features.push(vec![i as f64 * 0.1, 0.5]);
            labels.push(0);
        }
        for i in 0..30 {
            features.push(vec![10.0 + i as f64 * 0.1, 0.5]);
            labels.push(1);
        }
        (features, labels)
    }

    #[test]
    fn separable_data_scores_high() {
        let (features, labels) = separable_data();
        let spec = ModelSpec::new(ModelFamily::Knn).with_arg("k", 3.0);
        let eval = Evaluation::new(5).unwrap().with_seed(42);

        let score = eval
            .train_eval(&spec, &features, &features, &labels, &labels, &Accuracy)
            .unwrap();
        assert!(score > 0.95, "score = {score}");
    }

    #[test]
    fn invalid_fold_count() {
        assert!(Evaluation::new(0).is_err());
        assert!(Evaluation::new(1).is_err());
    }

    #[test]
    fn empty_training_partition_errors() {
        let spec = ModelSpec::new(ModelFamily::Majority);
        let eval = Evaluation::new(2).unwrap();
        let err = eval
            .train_eval(&spec, &[], &[], &[], &[], &Accuracy)
            .unwrap_err();
        assert!(matches!(err, EvalError::EmptyDataset));
    }

    #[test]
    fn metric_failing_on_both_forms_is_fatal() {
        let (features, labels) = separable_data();
        let spec = ModelSpec::new(ModelFamily::Majority);
        let eval = Evaluation::new(3).unwrap();

        let broken = |_: &[usize], _: &[f64]| -> Result<f64, ScoreError> {
            Err(ScoreError::Undefined {
                reason: "always fails".to_string(),
            })
        };
        let err = eval
            .train_eval(&spec, &features, &features, &labels, &labels, &broken)
            .unwrap_err();
        assert!(matches!(err, EvalError::MetricComputation { .. }));
    }

    #[test]
    fn deterministic_given_seed() {
        let (features, labels) = separable_data();
        let spec = ModelSpec::new(ModelFamily::Knn).with_arg("k", 3.0);
        let eval = Evaluation::new(4).unwrap().with_seed(9);

        let a = eval
            .train_eval(&spec, &features, &features, &labels, &labels, &Accuracy)
            .unwrap();
        let b = eval
            .train_eval(&spec, &features, &features, &labels, &labels, &Accuracy)
            .unwrap();
        assert_eq!(a, b);
    }
}
