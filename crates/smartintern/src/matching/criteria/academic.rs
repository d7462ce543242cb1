use super::{Criterion, CriterionName, CriterionResult, Evidence, GapSide, ThresholdSource};
use crate::matching::domain::{Posting, Profile};

/// Academic standing against the posting minimum (or the configured default).
///
/// Meeting the threshold scores 100; falling short scales linearly with
/// `standing / threshold`. A threshold of zero or below always passes.
#[derive(Debug, Clone, Copy)]
pub struct AcademicCriterion {
    default_threshold: f64,
}

impl AcademicCriterion {
    pub fn new(default_threshold: f64) -> Self {
        let default_threshold = if default_threshold.is_finite() {
            default_threshold.max(0.0)
        } else {
            0.0
        };
        Self { default_threshold }
    }

    pub fn default_threshold(&self) -> f64 {
        self.default_threshold
    }
}

impl Default for AcademicCriterion {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Criterion for AcademicCriterion {
    fn name(&self) -> CriterionName {
        CriterionName::Academic
    }

    fn evaluate(&self, profile: &Profile, posting: &Posting) -> CriterionResult {
        let Some(standing) = profile.standing.filter(|value| value.is_finite()) else {
            return CriterionResult::gap(
                CriterionName::Academic,
                &posting.id,
                GapSide::Profile,
                "standing",
            );
        };

        let (threshold, threshold_source) = match posting.min_standing {
            Some(value) if value.is_finite() => (value, ThresholdSource::Posting),
            _ => (self.default_threshold, ThresholdSource::Default),
        };

        let passed = threshold <= 0.0 || standing >= threshold;
        let sub_score = if passed {
            100.0
        } else {
            100.0 * (standing / threshold).min(1.0)
        };

        CriterionResult::new(
            CriterionName::Academic,
            sub_score,
            Evidence::Academic {
                standing,
                threshold,
                threshold_source,
                passed,
            },
        )
    }
}
