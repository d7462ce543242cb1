use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::audit::AuditRecord;
use super::domain::{Posting, PostingStatus, Profile};
use super::rank::RankingOptions;
use super::repository::{PostingRepository, RepositoryError};
use super::weights::{ConfigurationError, WeightConfig};
use super::MatchingEngine;

/// Recommendation call as received from the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub profile: Profile,
    /// Postings to rank; the configured catalog is used when absent.
    #[serde(default)]
    pub postings: Option<Vec<Posting>>,
    /// Per-request weight override keyed by criterion name.
    #[serde(default)]
    pub weights: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub options: RankingOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendations: Vec<AuditRecord>,
    pub excluded_inactive: usize,
}

/// Catalog listing with the counts shown on the company dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingListing {
    pub postings: Vec<Posting>,
    pub active: usize,
    pub closed: usize,
}

/// Service composing the posting repository with the matching engine.
pub struct RecommendationService<R> {
    repository: Arc<R>,
    engine: MatchingEngine,
    defaults: RankingOptions,
}

impl<R> RecommendationService<R>
where
    R: PostingRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: MatchingEngine, defaults: RankingOptions) -> Self {
        Self {
            repository,
            engine,
            defaults,
        }
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// Ranks the request's postings, or the repository catalog, for the given profile.
    pub fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationResponse, RecommendationError> {
        let RecommendationRequest {
            profile,
            postings,
            weights,
            options,
        } = request;

        let engine = match weights {
            Some(raw) => self.engine.with_weights(WeightConfig::from_raw(raw)?),
            None => self.engine.clone(),
        };

        let postings = match postings {
            Some(postings) => postings,
            None => self.repository.list()?,
        };

        let report = engine.rank_with_report(&profile, &postings, &options.or(self.defaults))?;

        Ok(RecommendationResponse {
            recommendations: report.records,
            excluded_inactive: report.excluded_inactive,
        })
    }

    pub fn listing(&self) -> Result<PostingListing, RecommendationError> {
        let postings = self.repository.list()?;
        let active = postings
            .iter()
            .filter(|posting| posting.status == PostingStatus::Active)
            .count();
        let closed = postings.len() - active;

        Ok(PostingListing {
            postings,
            active,
            closed,
        })
    }
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
