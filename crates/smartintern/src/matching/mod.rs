//! Explainable scoring and ranking of internship postings for a student profile.
//!
//! Every operation is a pure function of the profile, the postings, and the weight
//! configuration; the engine holds no mutable state and performs no I/O.

pub mod aggregate;
pub mod audit;
pub mod criteria;
pub mod domain;
pub mod rank;
pub mod repository;
pub mod router;
pub mod service;
pub mod weights;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use audit::{display_score, AuditRecord, AuditView, CriterionView};
pub use criteria::{
    Criterion, CriterionName, CriterionRegistry, CriterionResult, Evidence, GapSide,
    ThresholdSource,
};
pub use domain::{Posting, PostingId, PostingStatus, Profile, SkillSet};
pub use rank::{RankingOptions, RankingReport};
pub use repository::{PostingRepository, RepositoryError};
pub use router::recommendation_router;
pub use service::{
    RecommendationError, RecommendationRequest, RecommendationResponse, RecommendationService,
};
pub use weights::{ConfigurationError, WeightConfig};

/// Stateless engine binding a validated weight configuration to a set of evaluators.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    weights: WeightConfig,
    registry: Arc<CriterionRegistry>,
}

impl MatchingEngine {
    pub fn new(weights: WeightConfig) -> Self {
        Self::with_registry(weights, CriterionRegistry::default())
    }

    pub fn with_registry(weights: WeightConfig, registry: CriterionRegistry) -> Self {
        Self {
            weights,
            registry: Arc::new(registry),
        }
    }

    /// Same evaluators under a different weight configuration.
    pub fn with_weights(&self, weights: WeightConfig) -> Self {
        Self {
            weights,
            registry: Arc::clone(&self.registry),
        }
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    pub fn registry(&self) -> &CriterionRegistry {
        &self.registry
    }

    pub fn score(
        &self,
        profile: &Profile,
        posting: &Posting,
        include_zero_weighted: bool,
    ) -> Result<AuditRecord, ConfigurationError> {
        aggregate::aggregate(
            &self.registry,
            profile,
            posting,
            &self.weights,
            include_zero_weighted,
        )
    }

    pub fn rank(
        &self,
        profile: &Profile,
        postings: &[Posting],
        options: &RankingOptions,
    ) -> Result<Vec<AuditRecord>, ConfigurationError> {
        rank::rank(&self.registry, profile, postings, &self.weights, options)
    }

    pub fn rank_with_report(
        &self,
        profile: &Profile,
        postings: &[Posting],
        options: &RankingOptions,
    ) -> Result<RankingReport, ConfigurationError> {
        rank::rank_with_report(&self.registry, profile, postings, &self.weights, options)
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(WeightConfig::equal())
    }
}
