use super::{compare_labels, Criterion, CriterionName, CriterionResult};
use crate::matching::domain::{Posting, Profile};

/// Exact match between the profile's home location and the posting location.
// TODO: distance-based partial credit once postings carry coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationCriterion;

impl Criterion for LocationCriterion {
    fn name(&self) -> CriterionName {
        CriterionName::Location
    }

    fn evaluate(&self, profile: &Profile, posting: &Posting) -> CriterionResult {
        compare_labels(
            CriterionName::Location,
            profile.location.as_deref(),
            posting.location.as_deref(),
            &posting.id,
        )
    }
}
