//! Dataset input and experiment artifacts for tansy.
//!
//! Reads labeled account snapshots from CSV with full input validation,
//! and persists experiment results as JSON artifacts that can be reloaded
//! for re-reporting.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::{AccountDataset, AccountId, ExperimentName};
pub use error::IoError;
pub use reader::DatasetReader;
pub use writer::{ExperimentArtifact, ResultWriter, read_experiments};
