//! Domain types for tansy-io.

use crate::IoError;

/// A sales account identifier.
///
/// Wraps a non-empty string parsed from the first column of the input CSV.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    /// Create a new account ID from a non-empty string.
    pub(crate) fn new(id: String) -> Self {
        debug_assert!(!id.is_empty(), "account ID must not be empty");
        Self(id)
    }

    /// Return the account ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A labeled dataset of account feature snapshots.
///
/// Produced by [`DatasetReader`](crate::DatasetReader). Account IDs,
/// feature rows, and labels are stored in parallel vectors —
/// `account_ids[i]` corresponds to `features[i]` and `labels[i]`.
#[derive(Debug)]
pub struct AccountDataset {
    /// Account identifiers in insertion order.
    account_ids: Vec<AccountId>,
    /// Feature column names from the CSV header.
    feature_names: Vec<String>,
    /// Feature values: `features[sample_index][feature_index]`.
    features: Vec<Vec<f64>>,
    /// Binary churn labels, parallel to `features`.
    labels: Vec<usize>,
}

impl AccountDataset {
    /// Create a new account dataset.
    pub(crate) fn new(
        account_ids: Vec<AccountId>,
        feature_names: Vec<String>,
        features: Vec<Vec<f64>>,
        labels: Vec<usize>,
    ) -> Self {
        Self {
            account_ids,
            feature_names,
            features,
            labels,
        }
    }

    /// Return the account IDs.
    #[must_use]
    pub fn account_ids(&self) -> &[AccountId] {
        &self.account_ids
    }

    /// Return the feature column names.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Return the feature matrix (row-major).
    #[must_use]
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Return the binary churn labels.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Return the number of samples (accounts).
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.account_ids.len()
    }

    /// Return the number of feature columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Fraction of accounts labeled as churned.
    #[must_use]
    pub fn churn_rate(&self) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        let churned = self.labels.iter().filter(|&&l| l == 1).count();
        churned as f64 / self.labels.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_as_str_returns_inner() {
        let id = AccountId::new("ACCT-00417".to_string());
        assert_eq!(id.as_str(), "ACCT-00417");
    }

    #[test]
    fn experiment_name_valid() {
        let name = ExperimentName::new("churn-baseline_01".to_string());
        assert!(name.is_ok());
        assert_eq!(name.unwrap().as_str(), "churn-baseline_01");
    }

    #[test]
    fn experiment_name_rejects_empty() {
        let name = ExperimentName::new(String::new());
        assert!(matches!(name, Err(IoError::InvalidExperimentName { .. })));
    }

    #[test]
    fn experiment_name_rejects_special_chars() {
        let name = ExperimentName::new("churn baseline!".to_string());
        assert!(matches!(name, Err(IoError::InvalidExperimentName { .. })));
    }

    #[test]
    fn churn_rate_counts_positives() {
        let dataset = AccountDataset::new(
            vec![AccountId::new("a".into()), AccountId::new("b".into())],
            vec!["f0".into()],
            vec![vec![0.0], vec![1.0]],
            vec![0, 1],
        );
        assert_eq!(dataset.churn_rate(), 0.5);
    }
}
