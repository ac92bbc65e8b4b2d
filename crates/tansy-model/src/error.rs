/// Errors from model construction, fitting, and prediction.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Returned when a hyperparameter key is not recognised by the family.
    #[error("model family '{family}' does not accept hyperparameter '{key}'")]
    UnknownHyperparameter {
        /// The model family the key was passed to.
        family: &'static str,
        /// The unrecognised hyperparameter key.
        key: String,
    },

    /// Returned when a hyperparameter value is outside its valid range.
    #[error("hyperparameter '{key}' = {value} violates constraint: {constraint}")]
    InvalidHyperparameter {
        /// The offending hyperparameter key.
        key: &'static str,
        /// The offending value.
        value: f64,
        /// The constraint the value must satisfy.
        constraint: &'static str,
    },

    /// Returned when the training dataset has zero samples.
    #[error("training dataset has zero samples")]
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

    /// Returned when a training value is NaN or infinite.
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

    /// Returned when prediction input width differs from the training width.
    #[error("prediction input has {got} features, expected {expected}")]
    PredictionFeatureMismatch {
        /// The expected number of features.
        expected: usize,
        /// The actual number of features in the prediction input.
        got: usize,
    },

    /// Returned when `predict` is called before `fit`.
    #[error("model has not been fitted")]
    NotFitted,

    /// Returned when the training set is smaller than the model requires.
    #[error("training set has {got} samples, need at least {needed}")]
    TooFewSamples {
        /// The minimum number of samples required.
        needed: usize,
        /// The actual number of samples provided.
        got: usize,
    },
}
