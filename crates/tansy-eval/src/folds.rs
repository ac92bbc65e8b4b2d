//! Stratified fold assignment (private module).

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::error::EvalError;

/// Assign each sample to one of `n_folds` folds, preserving class balance.
///
/// Groups indices by class, shuffles within each class, then round-robins
/// across folds so each fold gets approximately equal representation of
/// each class.
///
/// # Errors
///
/// Returns [`EvalError::TooFewSamplesForFolds`] if a non-empty class has
/// fewer samples than folds.
pub(crate) fn stratified_folds(
    labels: &[usize],
    n_folds: usize,
    seed: u64,
) -> Result<Vec<usize>, EvalError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n_classes = labels.iter().max().copied().unwrap_or(0) + 1;

    // Group indices by class.
    let mut class_indices: Vec<Vec<usize>> = vec![vec![]; n_classes];
    for (i, &label) in labels.iter().enumerate() {
        class_indices[label].push(i);
    }

    // Validate: each class needs at least n_folds samples.
    for (class, indices) in class_indices.iter().enumerate() {
        if !indices.is_empty() && indices.len() < n_folds {
            return Err(EvalError::TooFewSamplesForFolds {
                class,
                count: indices.len(),
                n_folds,
            });
        }
    }

    // Shuffle within each class and assign folds round-robin.
    let mut assignments = vec![0usize; labels.len()];
    for indices in &mut class_indices {
        indices.shuffle(&mut rng);
        for (j, &idx) in indices.iter().enumerate() {
            assignments[idx] = j % n_folds;
        }
    }

    Ok(assignments)
}
