//! Shared nearest-neighbour search helpers (private module).

/// Squared Euclidean distance between two feature rows.
///
/// Rows are validated upstream, so lengths always match here.
pub(crate) fn euclidean_sq(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Return the `k` candidate indices nearest to `target`, sorted by distance.
///
/// `candidates` are indices into `rows`; `exclude` removes the query row
/// itself when it is part of the candidate set. Distance ties break on the
/// lower index so results are deterministic.
pub(crate) fn k_nearest(
    rows: &[Vec<f64>],
    candidates: &[usize],
    target: &[f64],
    exclude: Option<usize>,
    k: usize,
) -> Vec<usize> {
    let mut scored: Vec<(f64, usize)> = candidates
        .iter()
        .filter(|&&i| Some(i) != exclude)
        .map(|&i| (euclidean_sq(&rows[i], target), i))
        .collect();
    scored.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    scored.truncate(k);
    scored.into_iter().map(|(_, i)| i).collect()
}
