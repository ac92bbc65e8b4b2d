use std::path::PathBuf;

use tansy_model::ModelError;
use tansy_sample::SampleError;

/// Errors from evaluation and experiment runs.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// Returned when n_folds is less than 2.
    #[error("n_folds must be at least 2, got {n_folds}")]
    InvalidFoldCount {
        /// The invalid n_folds value provided.
        n_folds: usize,
    },

    /// Returned when the training partition has zero samples.
    #[error("training partition has zero samples")]
    EmptyDataset,

    /// Returned when a class has fewer samples than the number of folds.
    #[error("class {class} has only {count} samples, need at least {n_folds} for stratified CV")]
    TooFewSamplesForFolds {
        /// The class label with insufficient samples.
        class: usize,
        /// The number of samples belonging to that class.
        count: usize,
        /// The requested number of folds.
        n_folds: usize,
    },

    /// Returned when the scorer fails on both rounded and raw predictions.
    #[error("metric failed on rounded predictions ({rounded}) and on raw predictions ({raw})")]
    MetricComputation {
        /// The failure on rounded predictions.
        rounded: ScoreError,
        /// The failure on the raw-prediction retry.
        raw: ScoreError,
    },

    /// A trial's rebalancing step failed.
    #[error("rebalancing failed")]
    Sample(#[from] SampleError),

    /// A trial's model construction, fit, or predict failed.
    #[error("model operation failed")]
    Model(#[from] ModelError),

    /// Scoring the final refit failed.
    #[error("scoring failed")]
    Score(#[from] ScoreError),

    /// Returned when the chart output directory cannot be created.
    #[error("failed to create chart directory {path}")]
    ChartDir {
        /// Path to the directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a chart cannot be rendered or written.
    #[error("failed to render chart {path}: {message}")]
    Render {
        /// Path to the chart file.
        path: PathBuf,
        /// Human-readable description of the backend failure.
        message: String,
    },
}

/// Errors from scoring functions.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// Returned when there is nothing to score.
    #[error("cannot score an empty prediction set")]
    EmptyInput,

    /// Returned when truth and prediction lengths disagree.
    #[error("truth has {truth} entries but predictions have {predicted}")]
    LengthMismatch {
        /// Number of ground-truth labels.
        truth: usize,
        /// Number of predictions.
        predicted: usize,
    },

    /// Returned when a prediction is NaN or infinite.
    #[error("prediction at index {index} is not finite")]
    NonFinitePrediction {
        /// The zero-based index of the offending prediction.
        index: usize,
    },

    /// Returned when the metric is undefined for the given inputs.
    #[error("metric undefined: {reason}")]
    Undefined {
        /// Why the metric could not be computed.
        reason: String,
    },
}
