use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::aggregate;
use super::audit::AuditRecord;
use super::criteria::CriterionRegistry;
use super::domain::{Posting, Profile};
use super::weights::{ConfigurationError, WeightConfig};

/// Optional post-sort filters applied to a ranking call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankingOptions {
    /// Records with an unrounded overall score below this are dropped.
    pub min_score: Option<f64>,
    pub limit: Option<usize>,
    pub include_zero_weighted: bool,
}

impl RankingOptions {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self.min_score {
            Some(value) if !value.is_finite() => {
                Err(ConfigurationError::InvalidMinScore { value })
            }
            _ => Ok(()),
        }
    }

    /// Fills unset fields from `defaults`.
    pub fn or(self, defaults: RankingOptions) -> Self {
        Self {
            min_score: self.min_score.or(defaults.min_score),
            limit: self.limit.or(defaults.limit),
            include_zero_weighted: self.include_zero_weighted || defaults.include_zero_weighted,
        }
    }
}

/// Ranked records plus the bookkeeping of what was left out.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingReport {
    pub records: Vec<AuditRecord>,
    pub excluded_inactive: usize,
    pub below_min_score: usize,
    pub truncated: usize,
}

/// Descending overall score, then ascending posting id.
pub fn compare_records(a: &AuditRecord, b: &AuditRecord) -> Ordering {
    b.overall()
        .total_cmp(&a.overall())
        .then_with(|| a.posting_id().cmp(b.posting_id()))
}

pub fn rank(
    registry: &CriterionRegistry,
    profile: &Profile,
    postings: &[Posting],
    weights: &WeightConfig,
    options: &RankingOptions,
) -> Result<Vec<AuditRecord>, ConfigurationError> {
    rank_with_report(registry, profile, postings, weights, options).map(|report| report.records)
}

/// Scores every active posting and orders the audits.
///
/// Postings are evaluated in parallel and collected in input order; sorting and the
/// `min_score`/`limit` filters run only once every record is available.
pub fn rank_with_report(
    registry: &CriterionRegistry,
    profile: &Profile,
    postings: &[Posting],
    weights: &WeightConfig,
    options: &RankingOptions,
) -> Result<RankingReport, ConfigurationError> {
    weights.validate()?;
    options.validate()?;

    let active: Vec<&Posting> = postings
        .iter()
        .filter(|posting| posting.status.is_active())
        .collect();
    let excluded_inactive = postings.len() - active.len();

    let mut records = active
        .par_iter()
        .map(|posting| {
            aggregate(
                registry,
                profile,
                posting,
                weights,
                options.include_zero_weighted,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    records.sort_by(compare_records);

    let scored = records.len();
    if let Some(min_score) = options.min_score {
        records.retain(|record| record.overall() >= min_score);
    }
    let below_min_score = scored - records.len();

    let kept = records.len();
    if let Some(limit) = options.limit {
        records.truncate(limit);
    }
    let truncated = kept - records.len();

    debug!(
        catalog = postings.len(),
        excluded_inactive,
        below_min_score,
        truncated,
        returned = records.len(),
        "ranked postings"
    );

    Ok(RankingReport {
        records,
        excluded_inactive,
        below_min_score,
        truncated,
    })
}
