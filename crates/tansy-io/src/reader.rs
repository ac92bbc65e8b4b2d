//! CSV dataset reader with full input validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::{AccountDataset, AccountId};

/// Reads labeled account snapshots from a CSV file.
///
/// Expected CSV format:
/// - Header row required: `account_id,<feature columns...>,churned`
/// - One row per account, all rows with the same number of columns
/// - The final column is the binary churn label (0 or 1)
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::TooFewColumns`] | Fewer than three header columns |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::NonFiniteValue`] | Feature cell is NaN, Inf, or unparseable |
/// | [`IoError::InvalidLabel`] | Label cell is not 0 or 1 |
/// | [`IoError::DuplicateAccountId`] | Same account_id appears twice |
pub struct DatasetReader {
    path: PathBuf,
}

impl DatasetReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning an [`AccountDataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<AccountDataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) allows rows with varying column counts so that our
        // own InconsistentRowLength check fires instead of a low-level
        // CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        })?;
        let expected_cols = header.len();
        if expected_cols < 3 {
            return Err(IoError::TooFewColumns {
                path: self.path.clone(),
                got: expected_cols,
            });
        }
        let feature_names: Vec<String> = header
            .iter()
            .skip(1)
            .take(expected_cols - 2)
            .map(str::to_string)
            .collect();
        debug!(expected_cols, "read CSV header");

        let mut account_ids = Vec::new();
        let mut features = Vec::new();
        let mut labels = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            if record.len() != expected_cols {
                let account_id = record.get(0).unwrap_or("").to_string();
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    account_id,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            let account_id_str = record.get(0).unwrap_or("").to_string();
            if let Some(&first_row) = seen.get(&account_id_str) {
                return Err(IoError::DuplicateAccountId {
                    path: self.path.clone(),
                    account_id: account_id_str,
                    first_row,
                    second_row: row_index,
                });
            }
            seen.insert(account_id_str.clone(), row_index);

            // Feature cells: columns 1..expected_cols-1.
            let mut row = Vec::with_capacity(expected_cols - 2);
            for col_index in 1..expected_cols - 1 {
                let raw = record.get(col_index).unwrap_or("");
                let value: f64 = raw.parse().map_err(|_| IoError::NonFiniteValue {
                    path: self.path.clone(),
                    row_index,
                    col_index: col_index - 1,
                    raw: raw.to_string(),
                })?;
                if !value.is_finite() {
                    return Err(IoError::NonFiniteValue {
                        path: self.path.clone(),
                        row_index,
                        col_index: col_index - 1,
                        raw: raw.to_string(),
                    });
                }
                row.push(value);
            }

            // Label cell: last column, must be exactly 0 or 1.
            let raw_label = record.get(expected_cols - 1).unwrap_or("");
            let label = match raw_label.trim() {
                "0" => 0,
                "1" => 1,
                _ => {
                    return Err(IoError::InvalidLabel {
                        path: self.path.clone(),
                        row_index,
                        raw: raw_label.to_string(),
                    });
                }
            };

            account_ids.push(AccountId::new(account_id_str));
            features.push(row);
            labels.push(label);
        }

        if account_ids.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        let dataset = AccountDataset::new(account_ids, feature_names, features, labels);
        info!(
            n_accounts = dataset.n_samples(),
            n_features = dataset.n_features(),
            churn_rate = dataset.churn_rate(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}
