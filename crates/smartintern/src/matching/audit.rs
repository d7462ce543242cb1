use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use super::criteria::{CriterionName, CriterionResult, Evidence, GapSide};
use super::domain::PostingId;

/// Rounds a full-precision score for display (half away from zero).
pub fn display_score(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

/// Reproducible explanation of one posting's overall score.
///
/// The unrounded overall score is kept for ordering; only the serialized view rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    posting_id: PostingId,
    title: String,
    overall: f64,
    criteria: Vec<CriterionResult>,
    weights_used: BTreeMap<CriterionName, f64>,
}

impl AuditRecord {
    pub(crate) fn new(
        posting_id: PostingId,
        title: String,
        overall: f64,
        criteria: Vec<CriterionResult>,
        weights_used: BTreeMap<CriterionName, f64>,
    ) -> Self {
        Self {
            posting_id,
            title,
            overall,
            criteria,
            weights_used,
        }
    }

    pub fn posting_id(&self) -> &PostingId {
        &self.posting_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Full-precision overall score in `[0, 100]`.
    pub fn overall(&self) -> f64 {
        self.overall
    }

    /// Overall score rounded for display.
    pub fn overall_score(&self) -> u8 {
        display_score(self.overall)
    }

    pub fn criteria(&self) -> &[CriterionResult] {
        &self.criteria
    }

    pub fn criterion(&self, name: CriterionName) -> Option<&CriterionResult> {
        self.criteria.iter().find(|result| result.name == name)
    }

    /// Weight snapshot in effect when the record was produced.
    pub fn weights_used(&self) -> &BTreeMap<CriterionName, f64> {
        &self.weights_used
    }

    pub fn has_evidence_gaps(&self) -> bool {
        self.criteria.iter().any(CriterionResult::is_gap)
    }

    /// Recomputes the weighted mean from the recorded sub-scores and weights.
    pub fn recompute_overall(&self) -> Option<f64> {
        let weight_of = |result: &CriterionResult| {
            self.weights_used.get(&result.name).copied().unwrap_or(0.0)
        };
        let total: f64 = self.criteria.iter().map(weight_of).sum();
        if !(total.is_finite() && total > 0.0) {
            return None;
        }
        Some(
            self.criteria
                .iter()
                .map(|result| (weight_of(result) / total) * result.sub_score)
                .sum(),
        )
    }

    /// One-line human explanation derived only from the audit contents.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = self.criteria.iter().map(describe).collect();
        if parts.is_empty() {
            format!("{}% match", self.overall_score())
        } else {
            format!("{}% match: {}", self.overall_score(), parts.join("; "))
        }
    }

    pub fn view(&self) -> AuditView {
        AuditView {
            posting_id: self.posting_id.0.clone(),
            title: self.title.clone(),
            overall_score: self.overall_score(),
            criteria: self
                .criteria
                .iter()
                .map(|result| CriterionView {
                    name: result.name.label().to_string(),
                    sub_score: display_score(result.sub_score),
                    evidence: result.evidence.clone(),
                })
                .collect(),
            weights_used: self
                .weights_used
                .iter()
                .map(|(name, weight)| (name.label().to_string(), *weight))
                .collect(),
            summary: self.summary(),
        }
    }
}

impl Serialize for AuditRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view().serialize(serializer)
    }
}

fn describe(result: &CriterionResult) -> String {
    let name = result.name;
    match &result.evidence {
        Evidence::Skills {
            no_requirements: true,
            ..
        } => "no skill requirements".to_string(),
        Evidence::Skills {
            matched,
            missing,
            required,
            ..
        } => {
            if missing.is_empty() {
                format!("all {required} skills matched")
            } else {
                format!(
                    "{}/{} skills matched (missing {})",
                    matched.len(),
                    required,
                    missing.join(", ")
                )
            }
        }
        Evidence::Label { matched: true, .. } => format!("{name} matches"),
        Evidence::Label { posting_value, .. } => format!("{name} differs ({posting_value})"),
        Evidence::Academic { passed: true, .. } => "academic threshold met".to_string(),
        Evidence::Academic {
            standing,
            threshold,
            ..
        } => format!("standing {standing:.2} below threshold {threshold:.2}"),
        Evidence::Gap { side, field, .. } => {
            let side = match side {
                GapSide::Profile => "profile",
                GapSide::Posting => "posting",
            };
            format!("{name} not evaluated (missing {side} {field})")
        }
    }
}

/// Wire shape rendered by the scoring breakdown view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditView {
    pub posting_id: String,
    pub title: String,
    pub overall_score: u8,
    pub criteria: Vec<CriterionView>,
    pub weights_used: BTreeMap<String, f64>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionView {
    pub name: String,
    pub sub_score: u8,
    pub evidence: Evidence,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(skills_score: f64, missing: Vec<&str>) -> AuditRecord {
        let criteria = vec![
            CriterionResult::new(
                CriterionName::Skills,
                skills_score,
                Evidence::Skills {
                    matched: vec!["React".to_string(), "JavaScript".to_string()],
                    missing: missing.into_iter().map(str::to_string).collect(),
                    required: 3,
                    no_requirements: false,
                },
            ),
            CriterionResult::new(
                CriterionName::Location,
                100.0,
                Evidence::Label {
                    profile_value: "Mumbai, Maharashtra".to_string(),
                    posting_value: "Mumbai, Maharashtra".to_string(),
                    matched: true,
                },
            ),
        ];
        let weights = BTreeMap::from([
            (CriterionName::Skills, 1.0),
            (CriterionName::Location, 1.0),
        ]);
        let overall = (skills_score + 100.0) / 2.0;
        AuditRecord::new(
            PostingId::from("p1"),
            "Full Stack Intern".to_string(),
            overall,
            criteria,
            weights,
        )
    }

    #[test]
    fn display_score_rounds_half_away_from_zero() {
        assert_eq!(display_score(91.666), 92);
        assert_eq!(display_score(66.5), 67);
        assert_eq!(display_score(0.4), 0);
        assert_eq!(display_score(f64::NAN), 0);
    }

    #[test]
    fn view_uses_camel_case_contract() {
        let value = serde_json::to_value(record(100.0 * 2.0 / 3.0, vec!["MongoDB"]))
            .expect("serializes");

        assert_eq!(value["postingId"], "p1");
        assert_eq!(value["overallScore"], 83);
        assert_eq!(value["criteria"][0]["name"], "skills");
        assert_eq!(value["criteria"][0]["subScore"], 67);
        assert_eq!(value["criteria"][0]["evidence"]["missing"][0], "MongoDB");
        assert_eq!(value["weightsUsed"]["location"], 1.0);
    }

    #[test]
    fn recompute_reproduces_overall() {
        let record = record(50.0, vec!["Node.js"]);
        let recomputed = record.recompute_overall().expect("weights present");
        assert!((recomputed - record.overall()).abs() < 1e-12);
    }

    #[test]
    fn summary_lists_missing_skills() {
        let summary = record(100.0 * 2.0 / 3.0, vec!["MongoDB"]).summary();
        assert_eq!(
            summary,
            "83% match: 2/3 skills matched (missing MongoDB); location matches"
        );
    }
}
