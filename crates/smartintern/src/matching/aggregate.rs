use super::audit::AuditRecord;
use super::criteria::{bounded_score, CriterionRegistry};
use super::domain::{Posting, Profile};
use super::weights::{ConfigurationError, WeightConfig};

/// Weighted mean of the configured criteria for one (profile, posting) pair.
///
/// Zero-weighted criteria are skipped unless `include_zero_weighted` is set, in which
/// case their evidence is reported without affecting the overall score.
pub fn aggregate(
    registry: &CriterionRegistry,
    profile: &Profile,
    posting: &Posting,
    weights: &WeightConfig,
    include_zero_weighted: bool,
) -> Result<AuditRecord, ConfigurationError> {
    let mut evaluated = Vec::new();
    let mut total_weight = 0.0;

    for (name, weight) in weights.iter() {
        if weight == 0.0 && !include_zero_weighted {
            continue;
        }

        let evaluator = registry
            .get(name)
            .ok_or(ConfigurationError::MissingEvaluator { criterion: name })?;
        evaluated.push((weight, evaluator.evaluate(profile, posting)));
        total_weight += weight;
    }

    if !total_weight.is_finite() {
        return Err(ConfigurationError::NonFiniteTotal);
    }
    if total_weight <= 0.0 {
        return Err(ConfigurationError::NoPositiveWeight);
    }

    // Normalize before multiplying: w * s overflows for weights near f64::MAX.
    let overall = evaluated
        .iter()
        .map(|(weight, result)| (weight / total_weight) * result.sub_score)
        .sum::<f64>();
    let criteria = evaluated.into_iter().map(|(_, result)| result).collect();

    Ok(AuditRecord::new(
        posting.id.clone(),
        posting.title.clone(),
        bounded_score(overall),
        criteria,
        weights.as_map().clone(),
    ))
}
