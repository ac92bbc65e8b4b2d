//! Integration tests for tansy-io: CSV reading and artifact round-trips.

use std::io::Write;

use tansy_eval::ScoreDistribution;
use tansy_io::{
    DatasetReader, ExperimentArtifact, ExperimentName, IoError, ResultWriter, read_experiments,
};

fn write_csv(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn reads_a_valid_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "accounts.csv",
        "account_id,arr,seats,churned\n\
         ACCT-001,120.5,14,0\n\
         ACCT-002,38.0,3,1\n\
         ACCT-003,77.25,9,0\n",
    );

    let dataset = DatasetReader::new(&path).read().unwrap();
    assert_eq!(dataset.n_samples(), 3);
    assert_eq!(dataset.n_features(), 2);
    assert_eq!(dataset.feature_names(), &["arr".to_string(), "seats".to_string()]);
    assert_eq!(dataset.features()[1], vec![38.0, 3.0]);
    assert_eq!(dataset.labels(), &[0, 1, 0]);
    assert_eq!(dataset.account_ids()[0].as_str(), "ACCT-001");
    assert!((dataset.churn_rate() - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn rejects_non_binary_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "bad_label.csv",
        "account_id,arr,churned\nACCT-001,1.0,2\n",
    );
    let err = DatasetReader::new(&path).read().unwrap_err();
    assert!(matches!(err, IoError::InvalidLabel { row_index: 0, .. }));
}

#[test]
fn rejects_inconsistent_row_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "ragged.csv",
        "account_id,arr,seats,churned\nACCT-001,1.0,2.0,0\nACCT-002,1.0,0\n",
    );
    let err = DatasetReader::new(&path).read().unwrap_err();
    assert!(matches!(
        err,
        IoError::InconsistentRowLength { row_index: 1, expected: 4, got: 3, .. }
    ));
}

#[test]
fn rejects_duplicate_account_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "dupes.csv",
        "account_id,arr,churned\nACCT-001,1.0,0\nACCT-001,2.0,1\n",
    );
    let err = DatasetReader::new(&path).read().unwrap_err();
    assert!(matches!(
        err,
        IoError::DuplicateAccountId { first_row: 0, second_row: 1, .. }
    ));
}

#[test]
fn rejects_unparseable_feature() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "nan.csv",
        "account_id,arr,churned\nACCT-001,oops,0\n",
    );
    let err = DatasetReader::new(&path).read().unwrap_err();
    assert!(matches!(
        err,
        IoError::NonFiniteValue { row_index: 0, col_index: 0, .. }
    ));
}

#[test]
fn rejects_header_only_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "empty.csv", "account_id,arr,churned\n");
    let err = DatasetReader::new(&path).read().unwrap_err();
    assert!(matches!(err, IoError::EmptyDataset { .. }));
}

#[test]
fn rejects_missing_feature_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "thin.csv", "account_id,churned\nACCT-001,0\n");
    let err = DatasetReader::new(&path).read().unwrap_err();
    assert!(matches!(err, IoError::TooFewColumns { got: 2, .. }));
}

#[test]
fn artifact_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let experiment = ExperimentName::new("roundtrip".to_string()).unwrap();
    let writer = ResultWriter::new(dir.path(), experiment).unwrap();

    let dist = ScoreDistribution::new(vec![0.61, 0.58, 0.64]);
    let artifact = ExperimentArtifact {
        experiment: "roundtrip".to_string(),
        model: "knn".to_string(),
        metric: "accuracy".to_string(),
        n_folds: 5,
        holdout_fraction: 0.1,
        seeds: vec![0, 1, 2],
        scores: dist.scores().to_vec(),
        summary: dist.summary(),
    };

    let path = writer.write_experiments(&artifact).unwrap();
    assert_eq!(path, dir.path().join("roundtrip_experiments.json"));

    let loaded = read_experiments(&path).unwrap();
    assert_eq!(loaded.seeds, artifact.seeds);
    assert_eq!(loaded.scores, artifact.scores);
    assert_eq!(loaded.summary, artifact.summary);
    assert_eq!(loaded.model, "knn");
}

#[test]
fn reading_a_missing_artifact_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_experiments(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, IoError::ReadFile { .. }));
}
