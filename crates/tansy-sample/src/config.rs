//! Configuration builder for the rebalancing pipeline.

use crate::balance::{self, BalancedData};
use crate::error::SampleError;

/// Which rows the SMOTE+ENN resampling pass runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleScope {
    /// Resample over the entire original dataset, holdout rows included.
    ///
    /// This reproduces the historical pipeline behaviour: the holdout is
    /// drawn first, but synthesis and cleaning then run over all rows, so
    /// holdout neighbourhoods can influence the resampled training set.
    FullDataset,
    /// Resample over the non-holdout partition only.
    TrainOnly,
}

/// Configuration for [`BalanceConfig::balance`].
///
/// Construct via [`BalanceConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter          | Default       |
/// |--------------------|---------------|
/// | `holdout_fraction` | 0.10          |
/// | `smote_neighbors`  | 5             |
/// | `enn_neighbors`    | 3             |
/// | `scope`            | `FullDataset` |
#[derive(Debug, Clone)]
pub struct BalanceConfig {
    pub(crate) holdout_fraction: f64,
    pub(crate) smote_neighbors: usize,
    pub(crate) enn_neighbors: usize,
    pub(crate) scope: ResampleScope,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceConfig {
    /// Create a config with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            holdout_fraction: 0.10,
            smote_neighbors: 5,
            enn_neighbors: 3,
            scope: ResampleScope::FullDataset,
        }
    }

    // --- Setters ---

    /// Set the fraction of each class reserved for the holdout partition.
    #[must_use]
    pub fn with_holdout_fraction(mut self, holdout_fraction: f64) -> Self {
        self.holdout_fraction = holdout_fraction;
        self
    }

    /// Set the number of minority neighbours used for SMOTE interpolation.
    #[must_use]
    pub fn with_smote_neighbors(mut self, smote_neighbors: usize) -> Self {
        self.smote_neighbors = smote_neighbors;
        self
    }

    /// Set the number of neighbours consulted by the ENN cleaning pass.
    #[must_use]
    pub fn with_enn_neighbors(mut self, enn_neighbors: usize) -> Self {
        self.enn_neighbors = enn_neighbors;
        self
    }

    /// Set which rows the resampling pass runs over.
    #[must_use]
    pub fn with_resample_scope(mut self, scope: ResampleScope) -> Self {
        self.scope = scope;
        self
    }

    // --- Getters ---

    /// Return the holdout fraction.
    #[must_use]
    pub fn holdout_fraction(&self) -> f64 {
        self.holdout_fraction
    }

    /// Return the SMOTE neighbour count.
    #[must_use]
    pub fn smote_neighbors(&self) -> usize {
        self.smote_neighbors
    }

    /// Return the ENN neighbour count.
    #[must_use]
    pub fn enn_neighbors(&self) -> usize {
        self.enn_neighbors
    }

    /// Return the resampling scope.
    #[must_use]
    pub fn resample_scope(&self) -> ResampleScope {
        self.scope
    }

    /// Split off a stratified holdout, then rebalance via SMOTE+ENN.
    ///
    /// `features[sample_idx][feature_idx]` — row-major layout.
    /// `labels[sample_idx]` — binary class labels (0 or 1).
    /// `seed` fixes all randomness (split shuffling and SMOTE sampling).
    ///
    /// Inputs are never mutated; all four output containers are new.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SampleError::EmptyDataset`] | Zero samples |
    /// | [`SampleError::LabelCountMismatch`] | Features/labels length disagree |
    /// | [`SampleError::FeatureCountMismatch`] | Rows have inconsistent widths |
    /// | [`SampleError::NonFiniteValue`] | Any value is NaN or infinite |
    /// | [`SampleError::NonBinaryLabel`] | A label is neither 0 nor 1 |
    /// | [`SampleError::InvalidHoldoutFraction`] | Fraction outside (0.0, 1.0) |
    /// | [`SampleError::InvalidNeighborCount`] | A neighbour count is zero |
    /// | [`SampleError::DataInsufficient`] | A class is absent or too small for the neighbour steps |
    pub fn balance(
        &self,
        features: &[Vec<f64>],
        labels: &[usize],
        seed: u64,
    ) -> Result<BalancedData, SampleError> {
        balance::rebalance(self, features, labels, seed)
    }
}
