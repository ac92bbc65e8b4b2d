//! The seed-driven experiment runner.

use tracing::{info, instrument};

use tansy_model::ModelSpec;
use tansy_sample::BalanceConfig;

use crate::distribution::ScoreDistribution;
use crate::error::EvalError;
use crate::eval::Evaluation;
use crate::metric::Scorer;
use crate::report::Reporter;

/// A suite of trials, one per seed, over a fixed dataset and model spec.
///
/// Each trial rebalances the dataset with its seed, cross-validates the
/// spec on the resampled partition, and records the final holdout score.
/// Trials are independent: nothing is shared across seeds except the
/// read-only input dataset.
///
/// Seeds run sequentially and the first failing trial aborts the whole
/// run; there is no per-seed isolation.
#[derive(Debug, Clone)]
pub struct Experiments {
    seeds: Vec<u64>,
    spec: ModelSpec,
    n_folds: usize,
    balance: BalanceConfig,
    verbose: bool,
}

impl Experiments {
    /// Create a runner for the given seeds and model spec.
    ///
    /// Defaults: 5 folds, default [`BalanceConfig`], progress narration on.
    #[must_use]
    pub fn new(seeds: Vec<u64>, spec: ModelSpec) -> Self {
        Self {
            seeds,
            spec,
            n_folds: 5,
            balance: BalanceConfig::new(),
            verbose: true,
        }
    }

    // --- Setters ---

    /// Set the number of cross-validation folds per trial.
    #[must_use]
    pub fn with_kfolds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }

    /// Set the rebalancing configuration applied per trial.
    #[must_use]
    pub fn with_balance(mut self, balance: BalanceConfig) -> Self {
        self.balance = balance;
        self
    }

    /// Enable or disable per-seed progress narration.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Return the seeds in trial order.
    #[must_use]
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    /// Run every trial, in seed order.
    ///
    /// The returned distribution has exactly one score per seed, with
    /// score `i` produced by seed `i`.
    ///
    /// # Errors
    ///
    /// Configuration errors ([`EvalError::Model`] for a bad spec,
    /// [`EvalError::InvalidFoldCount`]) surface before any trial starts;
    /// afterwards the first trial failure aborts the remaining seeds.
    #[instrument(skip_all, fields(n_seeds = self.seeds.len(), family = %self.spec.family()))]
    pub fn run<S>(
        &self,
        features: &[Vec<f64>],
        labels: &[usize],
        scorer: &S,
    ) -> Result<ScoreDistribution, EvalError>
    where
        S: Scorer + ?Sized,
    {
        // Surface configuration problems before touching the data.
        self.spec.validate()?;
        let evaluation = Evaluation::new(self.n_folds)?;

        let mut scores = Vec::with_capacity(self.seeds.len());
        for (i, &seed) in self.seeds.iter().enumerate() {
            if self.verbose {
                info!(experiment = i + 1, seed, "running experiment");
            }
            let data = self.balance.balance(features, labels, seed)?;
            let score = evaluation.train_eval(
                &self.spec,
                &data.resampled_features,
                &data.holdout_features,
                &data.resampled_labels,
                &data.holdout_labels,
                scorer,
            )?;
            if self.verbose {
                info!(experiment = i + 1, score, "experiment complete");
            }
            scores.push(score);
        }

        Ok(ScoreDistribution::new(scores))
    }
}

/// Run a full experiment suite in one call.
///
/// Convenience wrapper over [`Experiments`]: runs one trial per seed with
/// the given balance and fold settings, then optionally hands the score
/// distribution to `reporter` for charts and a logged summary.
///
/// # Errors
///
/// Propagates the first trial failure, or a chart-rendering failure.
pub fn run_experiments<S>(
    seeds: &[u64],
    features: &[Vec<f64>],
    labels: &[usize],
    spec: ModelSpec,
    scorer: &S,
    verbose: bool,
    reporter: Option<&Reporter>,
) -> Result<ScoreDistribution, EvalError>
where
    S: Scorer + ?Sized,
{
    let dist = Experiments::new(seeds.to_vec(), spec)
        .with_verbose(verbose)
        .run(features, labels, scorer)?;
    if let Some(reporter) = reporter {
        reporter.render(&dist)?;
    }
    Ok(dist)
}
