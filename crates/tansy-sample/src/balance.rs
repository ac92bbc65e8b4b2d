//! The combined split-then-resample operation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, instrument};

use crate::config::{BalanceConfig, ResampleScope};
use crate::enn::edited_nearest_neighbours;
use crate::error::SampleError;
use crate::smote::oversample;
use crate::split::stratified_holdout;

/// Output of [`BalanceConfig::balance`](crate::BalanceConfig::balance).
///
/// The resampled partition is the SMOTE+ENN-processed training set; the
/// holdout partition is drawn from the original unbalanced data and never
/// touched by resampling.
#[derive(Debug, Clone)]
pub struct BalancedData {
    /// Training feature rows after oversampling and cleaning.
    pub resampled_features: Vec<Vec<f64>>,
    /// Training labels, parallel to `resampled_features`.
    pub resampled_labels: Vec<usize>,
    /// Holdout feature rows in original class proportions.
    pub holdout_features: Vec<Vec<f64>>,
    /// Holdout labels, parallel to `holdout_features`.
    pub holdout_labels: Vec<usize>,
}

impl BalancedData {
    /// Per-class row counts of the resampled partition.
    #[must_use]
    pub fn resampled_counts(&self) -> [usize; 2] {
        class_counts(&self.resampled_labels)
    }
}

pub(crate) fn class_counts(labels: &[usize]) -> [usize; 2] {
    let ones = labels.iter().filter(|&&l| l == 1).count();
    [labels.len() - ones, ones]
}

fn validate(features: &[Vec<f64>], labels: &[usize]) -> Result<(), SampleError> {
    if features.is_empty() {
        return Err(SampleError::EmptyDataset);
    }
    if features.len() != labels.len() {
        return Err(SampleError::LabelCountMismatch {
            n_rows: features.len(),
            n_labels: labels.len(),
        });
    }
    let n_features = features[0].len();
    for (sample_index, row) in features.iter().enumerate() {
        if row.len() != n_features {
            return Err(SampleError::FeatureCountMismatch {
                expected: n_features,
                got: row.len(),
                sample_index,
            });
        }
        for (feature_index, &val) in row.iter().enumerate() {
            if !val.is_finite() {
                return Err(SampleError::NonFiniteValue {
                    sample_index,
                    feature_index,
                });
            }
        }
    }
    for (sample_index, &label) in labels.iter().enumerate() {
        if label > 1 {
            return Err(SampleError::NonBinaryLabel { sample_index, label });
        }
    }
    Ok(())
}

/// Split, oversample, and clean. See [`BalanceConfig::balance`].
#[instrument(skip_all, fields(n_samples = features.len(), seed))]
pub(crate) fn rebalance(
    config: &BalanceConfig,
    features: &[Vec<f64>],
    labels: &[usize],
    seed: u64,
) -> Result<BalancedData, SampleError> {
    validate(features, labels)?;

    if !(config.holdout_fraction > 0.0 && config.holdout_fraction < 1.0) {
        return Err(SampleError::InvalidHoldoutFraction {
            fraction: config.holdout_fraction,
        });
    }
    if config.smote_neighbors == 0 || config.enn_neighbors == 0 {
        return Err(SampleError::InvalidNeighborCount);
    }

    // Both classes must be present and the minority large enough for the
    // neighbour-based steps, before any splitting happens.
    let counts = class_counts(labels);
    let minority = if counts[0] <= counts[1] { 0 } else { 1 };
    if counts[minority] < config.smote_neighbors + 1 {
        return Err(SampleError::DataInsufficient {
            class: minority,
            count: counts[minority],
            needed: config.smote_neighbors + 1,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (train_idx, holdout_idx) = stratified_holdout(labels, config.holdout_fraction, &mut rng);

    // Rows the resampling pass sees. `FullDataset` keeps the historical
    // behaviour of resampling over everything, holdout included.
    let scope_idx: Vec<usize> = match config.scope {
        ResampleScope::FullDataset => (0..labels.len()).collect(),
        ResampleScope::TrainOnly => train_idx,
    };
    let scope_features: Vec<Vec<f64>> = scope_idx.iter().map(|&i| features[i].clone()).collect();
    let scope_labels: Vec<usize> = scope_idx.iter().map(|&i| labels[i]).collect();

    let (synth_features, synth_labels) =
        oversample(&scope_features, &scope_labels, config.smote_neighbors, &mut rng)?;

    let mut combined_features = scope_features;
    let mut combined_labels = scope_labels;
    combined_features.extend(synth_features);
    combined_labels.extend(synth_labels);

    let retained =
        edited_nearest_neighbours(&combined_features, &combined_labels, config.enn_neighbors)?;

    let resampled_features: Vec<Vec<f64>> =
        retained.iter().map(|&i| combined_features[i].clone()).collect();
    let resampled_labels: Vec<usize> = retained.iter().map(|&i| combined_labels[i]).collect();
    let holdout_features: Vec<Vec<f64>> =
        holdout_idx.iter().map(|&i| features[i].clone()).collect();
    let holdout_labels: Vec<usize> = holdout_idx.iter().map(|&i| labels[i]).collect();

    let data = BalancedData {
        resampled_features,
        resampled_labels,
        holdout_features,
        holdout_labels,
    };

    info!(
        counts_before = ?counts,
        counts_after = ?data.resampled_counts(),
        n_holdout = data.holdout_labels.len(),
        "rebalancing complete"
    );
    Ok(data)
}
