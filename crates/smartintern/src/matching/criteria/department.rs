use super::{compare_labels, Criterion, CriterionName, CriterionResult};
use crate::matching::domain::{Posting, Profile};

#[derive(Debug, Clone, Copy, Default)]
pub struct DepartmentCriterion;

impl Criterion for DepartmentCriterion {
    fn name(&self) -> CriterionName {
        CriterionName::Department
    }

    fn evaluate(&self, profile: &Profile, posting: &Posting) -> CriterionResult {
        compare_labels(
            CriterionName::Department,
            profile.department.as_deref(),
            posting.department.as_deref(),
            &posting.id,
        )
    }
}
