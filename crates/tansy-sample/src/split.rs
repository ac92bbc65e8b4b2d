//! Stratified holdout splitting (private module).

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Partition sample indices into (train, holdout) preserving class proportions.
///
/// Indices are grouped by class, shuffled with `rng`, and the first
/// `round(count * fraction)` of each class (clamped to leave at least one
/// training sample) go to the holdout. Both partitions are returned in
/// ascending index order.
pub(crate) fn stratified_holdout(
    labels: &[usize],
    fraction: f64,
    rng: &mut ChaCha8Rng,
) -> (Vec<usize>, Vec<usize>) {
    let mut class_indices: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    for (i, &label) in labels.iter().enumerate() {
        class_indices[label].push(i);
    }

    let mut train = Vec::new();
    let mut holdout = Vec::new();

    for indices in &mut class_indices {
        if indices.is_empty() {
            continue;
        }
        indices.shuffle(rng);
        let n_hold = ((indices.len() as f64) * fraction)
            .round()
            .max(1.0) as usize;
        let n_hold = n_hold.min(indices.len() - 1);
        holdout.extend_from_slice(&indices[..n_hold]);
        train.extend_from_slice(&indices[n_hold..]);
    }

    train.sort_unstable();
    holdout.sort_unstable();
    (train, holdout)
}
