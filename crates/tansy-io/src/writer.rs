//! JSON experiment artifact writer and reader.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use tansy_eval::ScoreSummary;

use crate::IoError;
use crate::domain::ExperimentName;

/// A persisted experiment run: configuration echo, per-seed scores, and
/// summary statistics.
///
/// Written as `{experiment}_experiments.json` and reloadable with
/// [`read_experiments`] for re-reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentArtifact {
    /// The experiment name.
    pub experiment: String,
    /// The model family that was evaluated.
    pub model: String,
    /// The scoring function used.
    pub metric: String,
    /// Number of cross-validation folds per trial.
    pub n_folds: usize,
    /// Fraction of each class reserved for the holdout.
    pub holdout_fraction: f64,
    /// The trial seeds, in run order.
    pub seeds: Vec<u64>,
    /// One score per seed, matching `seeds` by position.
    pub scores: Vec<f64>,
    /// Summary statistics; absent when no trials ran.
    pub summary: Option<ScoreSummary>,
}

/// Writes experiment results to JSON files.
///
/// Creates the output directory on construction if it does not exist.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Write an experiment artifact to `{experiment}_experiments.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_experiments(&self, artifact: &ExperimentArtifact) -> Result<PathBuf, IoError> {
        let path = self
            .output_dir
            .join(format!("{}_experiments.json", self.experiment.as_str()));

        let json = serde_json::to_string_pretty(artifact).expect("serialization cannot fail");
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "experiment results written");
        Ok(path)
    }
}

/// Load a previously written experiment artifact.
///
/// # Errors
///
/// Returns [`IoError::ReadFile`] if the file cannot be read, or
/// [`IoError::ParseArtifact`] if it does not match the artifact schema.
pub fn read_experiments(path: &Path) -> Result<ExperimentArtifact, IoError> {
    let json = fs::read_to_string(path).map_err(|e| IoError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&json).map_err(|e| IoError::ParseArtifact {
        path: path.to_path_buf(),
        source: e,
    })
}
