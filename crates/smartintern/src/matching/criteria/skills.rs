use super::{Criterion, CriterionName, CriterionResult, Evidence};
use crate::matching::domain::{Posting, Profile};

/// Share of the posting's required skills present in the profile.
///
/// A posting without skill requirements is a full match on this axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillsCriterion;

impl Criterion for SkillsCriterion {
    fn name(&self) -> CriterionName {
        CriterionName::Skills
    }

    fn evaluate(&self, profile: &Profile, posting: &Posting) -> CriterionResult {
        let required = &posting.required_skills;
        let (matched, missing): (Vec<&str>, Vec<&str>) = required
            .iter()
            .partition(|skill| profile.skills.contains(skill));

        let sub_score = if required.is_empty() {
            100.0
        } else {
            100.0 * matched.len() as f64 / required.len() as f64
        };

        CriterionResult::new(
            CriterionName::Skills,
            sub_score,
            Evidence::Skills {
                matched: matched.into_iter().map(str::to_string).collect(),
                missing: missing.into_iter().map(str::to_string).collect(),
                required: required.len(),
                no_requirements: required.is_empty(),
            },
        )
    }
}
