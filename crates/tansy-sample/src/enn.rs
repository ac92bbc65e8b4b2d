//! Edited-nearest-neighbour cleaning (private module).

use rayon::prelude::*;
use tracing::debug;

use crate::error::SampleError;
use crate::neighbors::k_nearest;

/// Return the indices of rows retained by ENN cleaning, in order.
///
/// A row survives when the majority label among its `neighbors` nearest
/// rows agrees with its own label. Ties count as agreement, so a row is
/// only dropped on a strict majority of the opposite label.
///
/// # Errors
///
/// Returns [`SampleError::DataInsufficient`] if the set is too small for
/// every row to have `neighbors` distinct neighbours.
pub(crate) fn edited_nearest_neighbours(
    features: &[Vec<f64>],
    labels: &[usize],
    neighbors: usize,
) -> Result<Vec<usize>, SampleError> {
    let n = labels.len();
    if n <= neighbors {
        let counts = [
            labels.iter().filter(|&&l| l == 0).count(),
            labels.iter().filter(|&&l| l == 1).count(),
        ];
        let class = if counts[0] <= counts[1] { 0 } else { 1 };
        return Err(SampleError::DataInsufficient {
            class,
            count: counts[class],
            needed: neighbors + 1,
        });
    }

    let all: Vec<usize> = (0..n).collect();
    let retained: Vec<usize> = all
        .par_iter()
        .filter(|&&i| {
            let nn = k_nearest(features, &all, &features[i], Some(i), neighbors);
            let disagree = nn.iter().filter(|&&j| labels[j] != labels[i]).count();
            disagree * 2 <= neighbors
        })
        .copied()
        .collect();

    debug!(
        n_before = n,
        n_removed = n - retained.len(),
        "neighbourhood cleaning complete"
    );
    Ok(retained)
}
