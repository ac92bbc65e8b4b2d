use std::path::PathBuf;

/// Errors from dataset reading and artifact writing.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file cannot be opened.
    #[error("cannot open {path}")]
    FileNotFound {
        /// Path to the file that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a CSV record is malformed.
    #[error("malformed CSV in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the offending file.
        path: PathBuf,
        /// Byte offset of the malformed record.
        offset: u64,
        /// The underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the file has no data rows after the header.
    #[error("{path} contains no data rows")]
    EmptyDataset {
        /// Path to the offending file.
        path: PathBuf,
    },

    /// Returned when the header has fewer than three columns.
    #[error("{path} has {got} columns, need account_id, at least one feature, and a label")]
    TooFewColumns {
        /// Path to the offending file.
        path: PathBuf,
        /// The number of header columns found.
        got: usize,
    },

    /// Returned when a row's column count differs from the header.
    #[error("row {row_index} ({account_id}) in {path} has {got} columns, expected {expected}")]
    InconsistentRowLength {
        /// Path to the offending file.
        path: PathBuf,
        /// The zero-based data row index.
        row_index: usize,
        /// The account ID of the offending row.
        account_id: String,
        /// The expected column count.
        expected: usize,
        /// The actual column count.
        got: usize,
    },

    /// Returned when a feature cell is NaN, infinite, or unparseable.
    #[error("non-finite value '{raw}' at row {row_index}, column {col_index} in {path}")]
    NonFiniteValue {
        /// Path to the offending file.
        path: PathBuf,
        /// The zero-based data row index.
        row_index: usize,
        /// The zero-based feature column index.
        col_index: usize,
        /// The raw cell contents.
        raw: String,
    },

    /// Returned when a label cell is not 0 or 1.
    #[error("label '{raw}' at row {row_index} in {path} is not binary")]
    InvalidLabel {
        /// Path to the offending file.
        path: PathBuf,
        /// The zero-based data row index.
        row_index: usize,
        /// The raw cell contents.
        raw: String,
    },

    /// Returned when the same account ID appears twice.
    #[error("duplicate account ID '{account_id}' in {path} (rows {first_row} and {second_row})")]
    DuplicateAccountId {
        /// Path to the offending file.
        path: PathBuf,
        /// The duplicated account ID.
        account_id: String,
        /// The zero-based row of the first occurrence.
        first_row: usize,
        /// The zero-based row of the second occurrence.
        second_row: usize,
    },

    /// Returned when an experiment name is empty or contains invalid characters.
    #[error("invalid experiment name '{name}': must match [a-zA-Z0-9_-]+")]
    InvalidExperimentName {
        /// The rejected name.
        name: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path to the directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when writing an artifact file fails.
    #[error("cannot write {path}")]
    WriteFile {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when reading an artifact file fails.
    #[error("cannot read {path}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when an artifact file is not valid JSON for this schema.
    #[error("cannot parse experiment artifact {path}")]
    ParseArtifact {
        /// Path to the offending file.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
