/// Errors from rebalancing operations.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// Returned when the dataset has zero samples.
    #[error("dataset has zero samples")]
    EmptyDataset,

    /// Returned when the feature matrix and label vector disagree in length.
    #[error("feature matrix has {n_rows} rows but label vector has {n_labels} entries")]
    LabelCountMismatch {
        /// Number of feature rows provided.
        n_rows: usize,
        /// Number of labels provided.
        n_labels: usize,
    },

    /// Returned when a sample has a different number of features than expected.
    #[error("sample {sample_index} has {got} features, expected {expected}")]
    FeatureCountMismatch {
        /// The expected number of features.
        expected: usize,
        /// The actual number of features in the sample.
        got: usize,
        /// The zero-based index of the offending sample.
        sample_index: usize,
    },

    /// Returned when a feature value is NaN or infinite.
    #[error("non-finite value at sample {sample_index}, feature {feature_index}")]
    NonFiniteValue {
        /// The zero-based index of the offending sample.
        sample_index: usize,
        /// The zero-based index of the offending feature column.
        feature_index: usize,
    },

    /// Returned when a label is not binary-coded (0 or 1).
    #[error("label at sample {sample_index} is {label}, expected 0 or 1")]
    NonBinaryLabel {
        /// The zero-based index of the offending sample.
        sample_index: usize,
        /// The offending label value.
        label: usize,
    },

    /// Returned when the holdout fraction is outside (0.0, 1.0).
    #[error("holdout fraction must be in (0.0, 1.0), got {fraction}")]
    InvalidHoldoutFraction {
        /// The invalid fraction provided.
        fraction: f64,
    },

    /// Returned when a neighbour count of zero is configured.
    #[error("neighbour count must be at least 1")]
    InvalidNeighborCount,

    /// Returned when a class has too few members for the neighbour-based
    /// resampling steps.
    #[error("class {class} has only {count} samples, need at least {needed} for neighbour-based resampling")]
    DataInsufficient {
        /// The class label with insufficient samples.
        class: usize,
        /// The number of samples belonging to that class.
        count: usize,
        /// The minimum number of samples required.
        needed: usize,
    },
}
