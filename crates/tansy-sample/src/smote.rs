//! SMOTE minority oversampling (private module).
//!
//! Synthesizes minority-class rows by interpolating between a minority
//! sample and one of its k nearest minority neighbours, bringing the
//! minority class up to parity with the majority class.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::error::SampleError;
use crate::neighbors::k_nearest;

/// Synthesize minority rows until the classes are balanced.
///
/// Returns the synthetic rows and their labels; the input is untouched.
/// The neighbour table is deterministic, so output depends only on the
/// state of `rng`.
///
/// # Errors
///
/// Returns [`SampleError::DataInsufficient`] if the minority class has
/// fewer than `neighbors + 1` members.
pub(crate) fn oversample(
    features: &[Vec<f64>],
    labels: &[usize],
    neighbors: usize,
    rng: &mut ChaCha8Rng,
) -> Result<(Vec<Vec<f64>>, Vec<usize>), SampleError> {
    let counts = [
        labels.iter().filter(|&&l| l == 0).count(),
        labels.iter().filter(|&&l| l == 1).count(),
    ];
    let minority = if counts[0] <= counts[1] { 0 } else { 1 };
    let deficit = counts[1 - minority] - counts[minority];

    if counts[minority] < neighbors + 1 {
        return Err(SampleError::DataInsufficient {
            class: minority,
            count: counts[minority],
            needed: neighbors + 1,
        });
    }
    if deficit == 0 {
        return Ok((Vec::new(), Vec::new()));
    }

    let minority_idx: Vec<usize> = (0..labels.len())
        .filter(|&i| labels[i] == minority)
        .collect();

    // Neighbour table: for each minority row, its k nearest minority rows.
    let neighbor_table: Vec<Vec<usize>> = minority_idx
        .par_iter()
        .map(|&i| k_nearest(features, &minority_idx, &features[i], Some(i), neighbors))
        .collect();

    let mut synth_features = Vec::with_capacity(deficit);
    let mut synth_labels = Vec::with_capacity(deficit);
    for _ in 0..deficit {
        let pick = rng.gen_range(0..minority_idx.len());
        let base = &features[minority_idx[pick]];
        let nn = &neighbor_table[pick];
        let other = &features[nn[rng.gen_range(0..nn.len())]];
        let t: f64 = rng.r#gen();

        let row: Vec<f64> = base
            .iter()
            .zip(other)
            .map(|(a, b)| a + t * (b - a))
            .collect();
        synth_features.push(row);
        synth_labels.push(minority);
    }

    debug!(
        minority,
        n_synthesized = synth_features.len(),
        "minority oversampling complete"
    );
    Ok((synth_features, synth_labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn clustered_data() -> (Vec<Vec<f64>>, Vec<usize>) {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            features.push(vec![i as f64 * 0.1, 0.0]);
            labels.push(0);
        }
        for i in 0..8 {
            features.push(vec![10.0 + i as f64 * 0.1, 1.0]);
            labels.push(1);
        }
        (features, labels)
    }

    #[test]
    fn synthesizes_exactly_the_deficit() {
        let (features, labels) = clustered_data();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (synth_f, synth_l) = oversample(&features, &labels, 5, &mut rng).unwrap();
        assert_eq!(synth_f.len(), 12);
        assert!(synth_l.iter().all(|&l| l == 1));
    }

    #[test]
    fn synthetic_rows_stay_inside_minority_hull() {
        let (features, labels) = clustered_data();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (synth_f, _) = oversample(&features, &labels, 3, &mut rng).unwrap();
        for row in &synth_f {
            assert!(row[0] >= 10.0 && row[0] <= 10.7, "x = {}", row[0]);
            assert!((row[1] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn balanced_input_synthesizes_nothing() {
        let features = vec![vec![0.0], vec![1.0], vec![10.0], vec![11.0]];
        let labels = vec![0, 0, 1, 1];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let (synth_f, synth_l) = oversample(&features, &labels, 1, &mut rng).unwrap();
        assert!(synth_f.is_empty());
        assert!(synth_l.is_empty());
    }

    #[test]
    fn minority_smaller_than_neighbourhood_errors() {
        let (features, labels) = clustered_data();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let err = oversample(&features, &labels, 8, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SampleError::DataInsufficient { class: 1, count: 8, needed: 9 }
        ));
    }
}
