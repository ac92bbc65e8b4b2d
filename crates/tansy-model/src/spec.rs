//! Model family identifiers and the instance factory.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ModelError;
use crate::knn::KnnClassifier;
use crate::logistic::LogisticRegression;
use crate::majority::MajorityClass;
use crate::model::Model;

/// The model families the factory can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Always predicts the most frequent training class.
    Majority,
    /// Logistic regression trained by full-batch gradient descent.
    Logistic,
    /// k-nearest-neighbour vote over the training rows.
    Knn,
}

impl ModelFamily {
    /// Short family name, as used in logs and artifacts.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Majority => "majority",
            Self::Logistic => "logistic",
            Self::Knn => "knn",
        }
    }

    /// Hyperparameter keys this family accepts.
    fn accepted_keys(self) -> &'static [&'static str] {
        match self {
            Self::Majority => &[],
            Self::Logistic => &["learning_rate", "epochs", "l2"],
            Self::Knn => &["k"],
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A model family plus a named hyperparameter map.
///
/// [`ModelSpec::build`] produces a fresh, untrained instance; building the
/// same spec twice yields independent instances with identical behaviour.
/// The map may be empty, in which case family defaults apply.
///
/// # Defaults
///
/// | Family     | Key             | Default |
/// |------------|-----------------|---------|
/// | `logistic` | `learning_rate` | 0.1     |
/// | `logistic` | `epochs`        | 200     |
/// | `logistic` | `l2`            | 0.0     |
/// | `knn`      | `k`             | 5       |
#[derive(Debug, Clone)]
pub struct ModelSpec {
    family: ModelFamily,
    args: BTreeMap<String, f64>,
}

impl ModelSpec {
    /// Create a spec with an empty hyperparameter map.
    #[must_use]
    pub fn new(family: ModelFamily) -> Self {
        Self {
            family,
            args: BTreeMap::new(),
        }
    }

    /// Set one named hyperparameter.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: f64) -> Self {
        self.args.insert(key.into(), value);
        self
    }

    /// Return the model family.
    #[must_use]
    pub fn family(&self) -> ModelFamily {
        self.family
    }

    /// Return the hyperparameter map.
    #[must_use]
    pub fn args(&self) -> &BTreeMap<String, f64> {
        &self.args
    }

    /// Check the hyperparameter map without building an instance.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ModelSpec::build`].
    pub fn validate(&self) -> Result<(), ModelError> {
        self.build().map(|_| ())
    }

    /// Build a fresh, untrained model instance.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ModelError::UnknownHyperparameter`] | A key the family does not accept |
    /// | [`ModelError::InvalidHyperparameter`] | A value outside its valid range |
    pub fn build(&self) -> Result<Box<dyn Model>, ModelError> {
        let accepted = self.family.accepted_keys();
        for key in self.args.keys() {
            if !accepted.contains(&key.as_str()) {
                return Err(ModelError::UnknownHyperparameter {
                    family: self.family.name(),
                    key: key.clone(),
                });
            }
        }

        match self.family {
            ModelFamily::Majority => Ok(Box::new(MajorityClass::new())),
            ModelFamily::Logistic => {
                let learning_rate = self.float_arg("learning_rate", 0.1);
                let epochs = self.int_arg("epochs", 200)?;
                let l2 = self.float_arg("l2", 0.0);
                Ok(Box::new(LogisticRegression::new(learning_rate, epochs, l2)?))
            }
            ModelFamily::Knn => {
                let k = self.int_arg("k", 5)?;
                Ok(Box::new(KnnClassifier::new(k)?))
            }
        }
    }

    fn float_arg(&self, key: &str, default: f64) -> f64 {
        self.args.get(key).copied().unwrap_or(default)
    }

    fn int_arg(&self, key: &'static str, default: usize) -> Result<usize, ModelError> {
        match self.args.get(key) {
            None => Ok(default),
            Some(&value) => {
                if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
                    return Err(ModelError::InvalidHyperparameter {
                        key,
                        value,
                        constraint: "must be a non-negative integer",
                    });
                }
                Ok(value as usize)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_is_rejected() {
        let spec = ModelSpec::new(ModelFamily::Knn).with_arg("kk", 3.0);
        let err = spec.build().unwrap_err();
        assert!(matches!(
            err,
            ModelError::UnknownHyperparameter { family: "knn", ref key } if key == "kk"
        ));
    }

    #[test]
    fn majority_accepts_no_keys() {
        let spec = ModelSpec::new(ModelFamily::Majority).with_arg("anything", 1.0);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn fractional_integer_arg_is_rejected() {
        let spec = ModelSpec::new(ModelFamily::Knn).with_arg("k", 2.5);
        let err = spec.build().unwrap_err();
        assert!(matches!(err, ModelError::InvalidHyperparameter { key: "k", .. }));
    }

    #[test]
    fn empty_args_use_defaults() {
        assert!(ModelSpec::new(ModelFamily::Logistic).validate().is_ok());
        assert!(ModelSpec::new(ModelFamily::Knn).validate().is_ok());
        assert!(ModelSpec::new(ModelFamily::Majority).validate().is_ok());
    }
}
