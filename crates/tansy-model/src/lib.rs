//! Binary classification models behind a uniform capability contract.
//!
//! A model family is anything that can `fit` on a labeled training set and
//! `predict` continuous class scores in `[0, 1]`. Instances are built from
//! a [`ModelSpec`] — a family identifier plus a named hyperparameter map —
//! so that experiment code never depends on a concrete model type.

mod error;
mod knn;
mod logistic;
mod majority;
mod model;
mod spec;

pub use error::ModelError;
pub use knn::KnnClassifier;
pub use logistic::LogisticRegression;
pub use majority::MajorityClass;
pub use model::Model;
pub use spec::{ModelFamily, ModelSpec};
