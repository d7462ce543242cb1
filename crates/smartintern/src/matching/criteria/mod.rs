mod academic;
mod department;
mod location;
mod skills;

pub use academic::AcademicCriterion;
pub use department::DepartmentCriterion;
pub use location::LocationCriterion;
pub use skills::SkillsCriterion;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{normalize_label, Posting, PostingId, Profile};

/// Recognized criterion names accepted by the weight configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionName {
    Skills,
    Location,
    Academic,
    Department,
}

impl CriterionName {
    pub const ALL: [CriterionName; 4] = [
        CriterionName::Skills,
        CriterionName::Location,
        CriterionName::Academic,
        CriterionName::Department,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CriterionName::Skills => "skills",
            CriterionName::Location => "location",
            CriterionName::Academic => "academic",
            CriterionName::Department => "department",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|name| name.label().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for CriterionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which input lacked the field a criterion needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapSide {
    Profile,
    Posting,
}

/// Where the academic threshold came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdSource {
    Posting,
    Default,
}

/// Criterion-specific detail supporting a sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    #[serde(rename_all = "camelCase")]
    Skills {
        matched: Vec<String>,
        missing: Vec<String>,
        required: usize,
        no_requirements: bool,
    },
    #[serde(rename_all = "camelCase")]
    Label {
        profile_value: String,
        posting_value: String,
        matched: bool,
    },
    #[serde(rename_all = "camelCase")]
    Academic {
        standing: f64,
        threshold: f64,
        threshold_source: ThresholdSource,
        passed: bool,
    },
    /// Required input was absent; the sub-score is 0.
    #[serde(rename_all = "camelCase")]
    Gap {
        side: GapSide,
        field: String,
        note: String,
    },
}

/// Bounded sub-score for one criterion plus the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub name: CriterionName,
    pub sub_score: f64,
    pub evidence: Evidence,
}

impl CriterionResult {
    /// Builds a result, clamping the score into `[0, 100]` (non-finite becomes 0).
    pub fn new(name: CriterionName, sub_score: f64, evidence: Evidence) -> Self {
        Self {
            name,
            sub_score: bounded_score(sub_score),
            evidence,
        }
    }

    /// Zero score for a criterion whose input field is missing.
    pub fn gap(name: CriterionName, posting: &PostingId, side: GapSide, field: &str) -> Self {
        let side_label = match side {
            GapSide::Profile => "profile",
            GapSide::Posting => "posting",
        };
        warn!(
            criterion = name.label(),
            posting_id = %posting,
            side = side_label,
            field,
            "criterion degraded to zero for missing field"
        );

        Self {
            name,
            sub_score: 0.0,
            evidence: Evidence::Gap {
                side,
                field: field.to_string(),
                note: format!("{side_label} has no {field}; {name} scored 0"),
            },
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self.evidence, Evidence::Gap { .. })
    }
}

pub(crate) fn bounded_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// One independent axis of comparison between a profile and a posting.
///
/// Implementations must be total and side-effect free.
pub trait Criterion: Send + Sync {
    fn name(&self) -> CriterionName;

    fn evaluate(&self, profile: &Profile, posting: &Posting) -> CriterionResult;
}

/// Exact case-insensitive label comparison shared by location and department.
pub(crate) fn compare_labels(
    name: CriterionName,
    profile_value: Option<&str>,
    posting_value: Option<&str>,
    posting: &PostingId,
) -> CriterionResult {
    let profile_value = profile_value.filter(|value| !value.trim().is_empty());
    let posting_value = posting_value.filter(|value| !value.trim().is_empty());

    let (profile_value, posting_value) = match (profile_value, posting_value) {
        (Some(profile_value), Some(posting_value)) => (profile_value, posting_value),
        (None, _) => return CriterionResult::gap(name, posting, GapSide::Profile, name.label()),
        (_, None) => return CriterionResult::gap(name, posting, GapSide::Posting, name.label()),
    };

    let matched = normalize_label(profile_value) == normalize_label(posting_value);
    CriterionResult::new(
        name,
        if matched { 100.0 } else { 0.0 },
        Evidence::Label {
            profile_value: profile_value.trim().to_string(),
            posting_value: posting_value.trim().to_string(),
            matched,
        },
    )
}

/// Evaluators available to the aggregator, keyed by criterion name.
pub struct CriterionRegistry {
    evaluators: BTreeMap<CriterionName, Box<dyn Criterion>>,
}

impl CriterionRegistry {
    pub fn empty() -> Self {
        Self {
            evaluators: BTreeMap::new(),
        }
    }

    /// The four built-in criteria with the given fallback academic threshold.
    pub fn builtin(default_min_standing: f64) -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(SkillsCriterion));
        registry.register(Box::new(LocationCriterion));
        registry.register(Box::new(AcademicCriterion::new(default_min_standing)));
        registry.register(Box::new(DepartmentCriterion));
        registry
    }

    /// Registers an evaluator, replacing any previous one with the same name.
    pub fn register(&mut self, criterion: Box<dyn Criterion>) {
        self.evaluators.insert(criterion.name(), criterion);
    }

    pub fn get(&self, name: CriterionName) -> Option<&dyn Criterion> {
        self.evaluators.get(&name).map(|criterion| criterion.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = CriterionName> + '_ {
        self.evaluators.keys().copied()
    }
}

impl Default for CriterionRegistry {
    fn default() -> Self {
        Self::builtin(0.0)
    }
}

impl fmt::Debug for CriterionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
