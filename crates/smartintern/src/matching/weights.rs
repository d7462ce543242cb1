use std::collections::BTreeMap;

use serde::Serialize;

use super::criteria::CriterionName;

/// Fatal problems with a weight configuration or ranking options.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("weight for '{criterion}' must be non-negative (got {weight})")]
    NegativeWeight {
        criterion: CriterionName,
        weight: f64,
    },
    #[error("weight for '{criterion}' must be a finite number")]
    NonFiniteWeight { criterion: CriterionName },
    #[error("unrecognized criterion '{name}' carries a nonzero weight")]
    UnknownCriterion { name: String },
    #[error("at least one criterion weight must be positive")]
    NoPositiveWeight,
    #[error("criterion weights must sum to a finite number")]
    NonFiniteTotal,
    #[error("no evaluator is registered for weighted criterion '{criterion}'")]
    MissingEvaluator { criterion: CriterionName },
    #[error("minimum score must be a finite number (got {value})")]
    InvalidMinScore { value: f64 },
}

impl ConfigurationError {
    /// Criterion the error concerns, when it names one.
    pub fn criterion(&self) -> Option<String> {
        match self {
            ConfigurationError::NegativeWeight { criterion, .. }
            | ConfigurationError::NonFiniteWeight { criterion }
            | ConfigurationError::MissingEvaluator { criterion } => {
                Some(criterion.label().to_string())
            }
            ConfigurationError::UnknownCriterion { name } => Some(name.clone()),
            ConfigurationError::NoPositiveWeight
            | ConfigurationError::NonFiniteTotal
            | ConfigurationError::InvalidMinScore { .. } => None,
        }
    }

    /// Short machine-readable name of the violated constraint.
    pub const fn constraint(&self) -> &'static str {
        match self {
            ConfigurationError::NegativeWeight { .. } => "non_negative",
            ConfigurationError::NonFiniteWeight { .. } => "finite",
            ConfigurationError::UnknownCriterion { .. } => "recognized_criterion",
            ConfigurationError::NoPositiveWeight => "positive_total",
            ConfigurationError::NonFiniteTotal => "finite_total",
            ConfigurationError::MissingEvaluator { .. } => "registered_evaluator",
            ConfigurationError::InvalidMinScore { .. } => "finite_min_score",
        }
    }
}

/// Validated per-criterion weights.
///
/// Every weight is finite and non-negative, at least one is positive, and the total
/// is finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightConfig {
    weights: BTreeMap<CriterionName, f64>,
}

impl WeightConfig {
    /// Weight 1.0 for each built-in criterion.
    pub fn equal() -> Self {
        Self {
            weights: CriterionName::ALL.into_iter().map(|name| (name, 1.0)).collect(),
        }
    }

    pub fn new(weights: BTreeMap<CriterionName, f64>) -> Result<Self, ConfigurationError> {
        let config = Self { weights };
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from untyped names, e.g. a request body.
    ///
    /// Unrecognized names are dropped when their weight is zero and rejected otherwise.
    pub fn from_raw<I, S>(raw: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut weights = BTreeMap::new();
        for (name, weight) in raw {
            match CriterionName::parse(name.as_ref()) {
                Some(criterion) => {
                    weights.insert(criterion, weight);
                }
                None if weight == 0.0 => {}
                None => {
                    return Err(ConfigurationError::UnknownCriterion {
                        name: name.as_ref().trim().to_string(),
                    })
                }
            }
        }
        Self::new(weights)
    }

    /// Returns a copy with one weight replaced.
    pub fn with_weight(
        &self,
        criterion: CriterionName,
        weight: f64,
    ) -> Result<Self, ConfigurationError> {
        let mut weights = self.weights.clone();
        weights.insert(criterion, weight);
        Self::new(weights)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (&criterion, &weight) in &self.weights {
            if !weight.is_finite() {
                return Err(ConfigurationError::NonFiniteWeight { criterion });
            }
            if weight < 0.0 {
                return Err(ConfigurationError::NegativeWeight { criterion, weight });
            }
        }

        let total = self.total();
        if !total.is_finite() {
            return Err(ConfigurationError::NonFiniteTotal);
        }
        if total > 0.0 {
            Ok(())
        } else {
            Err(ConfigurationError::NoPositiveWeight)
        }
    }

    /// Configured weight, 0 for criteria not listed.
    pub fn weight(&self, criterion: CriterionName) -> f64 {
        self.weights.get(&criterion).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CriterionName, f64)> + '_ {
        self.weights.iter().map(|(&name, &weight)| (name, weight))
    }

    pub fn as_map(&self) -> &BTreeMap<CriterionName, f64> {
        &self.weights
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self::equal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_weights_cover_builtins() {
        let weights = WeightConfig::equal();
        assert_eq!(weights.total(), 4.0);
        for name in CriterionName::ALL {
            assert_eq!(weights.weight(name), 1.0);
        }
    }

    #[test]
    fn all_zero_weights_are_rejected() {
        let err = WeightConfig::from_raw([
            ("skills", 0.0),
            ("location", 0.0),
            ("academic", 0.0),
            ("department", 0.0),
        ])
        .expect_err("zero total must fail");
        assert_eq!(err, ConfigurationError::NoPositiveWeight);
        assert_eq!(err.constraint(), "positive_total");
        assert!(err.criterion().is_none());
    }

    #[test]
    fn negative_weight_names_the_criterion() {
        let err = WeightConfig::from_raw([("skills", 2.0), ("location", -1.0)])
            .expect_err("negative weight must fail");
        assert_eq!(err.criterion().as_deref(), Some("location"));
        assert_eq!(err.constraint(), "non_negative");
        assert!(err.to_string().contains("location"));
    }

    #[test]
    fn unknown_criterion_only_fails_when_weighted() {
        let weights = WeightConfig::from_raw([("skills", 1.0), ("stipend", 0.0)])
            .expect("zero-weighted unknown name is ignored");
        assert_eq!(weights.iter().count(), 1);

        let err = WeightConfig::from_raw([("skills", 1.0), ("stipend", 0.5)])
            .expect_err("weighted unknown name fails");
        assert_eq!(
            err,
            ConfigurationError::UnknownCriterion {
                name: "stipend".to_string()
            }
        );
    }

    #[test]
    fn non_finite_weights_are_rejected() {
        let err = WeightConfig::equal()
            .with_weight(CriterionName::Academic, f64::INFINITY)
            .expect_err("infinite weight fails");
        assert_eq!(
            err,
            ConfigurationError::NonFiniteWeight {
                criterion: CriterionName::Academic
            }
        );
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let err = WeightConfig::from_raw([("skills", 1e308), ("location", 1e308)])
            .expect_err("total overflows to infinity");
        assert_eq!(err, ConfigurationError::NonFiniteTotal);
        assert_eq!(err.constraint(), "finite_total");
        assert!(err.criterion().is_none());

        let weights = WeightConfig::from_raw([("skills", 1e307), ("location", 1e307)])
            .expect("large but finite total is accepted");
        assert!(weights.total().is_finite());
    }

    #[test]
    fn serializes_as_name_keyed_map() {
        let weights = WeightConfig::from_raw([("Skills", 2.0), ("department", 0.5)])
            .expect("valid weights");
        let value = serde_json::to_value(&weights).expect("serializes");
        assert_eq!(value, serde_json::json!({ "skills": 2.0, "department": 0.5 }));
    }
}
