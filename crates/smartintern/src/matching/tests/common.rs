use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::matching::domain::{Posting, PostingStatus, Profile};
use crate::matching::repository::{PostingRepository, RepositoryError};
use crate::matching::{MatchingEngine, RankingOptions, RecommendationService, WeightConfig};

pub(super) fn student_profile() -> Profile {
    Profile {
        standing: Some(9.0),
        location: Some("Mumbai, Maharashtra".to_string()),
        department: Some("Engineering".to_string()),
        skills: ["React", "JavaScript", "CSS"].into_iter().collect(),
    }
}

pub(super) fn posting(id: &str, skills: &[&str]) -> Posting {
    let mut posting = Posting::new(id, format!("Internship {id}"));
    posting.company = Some("TechCorp Solutions".to_string());
    posting.location = Some("Mumbai, Maharashtra".to_string());
    posting.department = Some("Engineering".to_string());
    posting.required_skills = skills.iter().collect();
    posting.min_standing = Some(7.0);
    posting
}

pub(super) fn closed_posting(id: &str) -> Posting {
    let mut posting = posting(id, &["React"]);
    posting.status = PostingStatus::Closed;
    posting
}

/// Ten postings whose skills-only scores are 90, 80, ..., 0.
pub(super) fn graded_catalog() -> (Profile, Vec<Posting>) {
    let all: Vec<String> = (0..10).map(|index| format!("skill-{index}")).collect();
    let profile = Profile {
        skills: all.iter().collect(),
        ..student_profile()
    };

    let postings = (0..10)
        .map(|step| {
            let held = 9 - step;
            let mut required: Vec<String> = all[..held].to_vec();
            required.extend((held..10).map(|index| format!("other-{index}")));
            let mut posting = Posting::new(format!("g{step:02}"), format!("Graded {step}"));
            posting.required_skills = required.iter().collect();
            posting
        })
        .collect();

    (profile, postings)
}

pub(super) fn skills_only_weights() -> WeightConfig {
    WeightConfig::from_raw([("skills", 1.0)]).expect("valid weights")
}

#[derive(Default)]
pub(super) struct MemoryCatalog {
    pub(super) postings: Vec<Posting>,
}

impl PostingRepository for MemoryCatalog {
    fn list(&self) -> Result<Vec<Posting>, RepositoryError> {
        Ok(self.postings.clone())
    }
}

pub(super) struct OfflineCatalog;

impl PostingRepository for OfflineCatalog {
    fn list(&self) -> Result<Vec<Posting>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog store offline".to_string()))
    }
}

pub(super) fn service_with(postings: Vec<Posting>) -> Arc<RecommendationService<MemoryCatalog>> {
    Arc::new(RecommendationService::new(
        Arc::new(MemoryCatalog { postings }),
        MatchingEngine::default(),
        RankingOptions::default(),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}
