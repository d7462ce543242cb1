use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use smartintern::catalog::{CatalogError, PostingCatalog};
use smartintern::config::MatchingConfig;
use smartintern::matching::{CriterionRegistry, MatchingEngine, Posting, PostingStatus, Profile};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn matching_engine(config: &MatchingConfig) -> MatchingEngine {
    MatchingEngine::with_registry(
        config.weights.clone(),
        CriterionRegistry::builtin(config.default_min_standing),
    )
}

/// Catalog from `MATCH_CATALOG_CSV` when configured, otherwise the sample postings.
pub(crate) fn load_catalog(config: &MatchingConfig) -> Result<PostingCatalog, CatalogError> {
    match &config.catalog_csv {
        Some(path) => PostingCatalog::from_path(path),
        None => sample_catalog(),
    }
}

fn sample_posting(
    id: &str,
    title: &str,
    company: &str,
    description: &str,
    location: &str,
    department: &str,
    skills: &[&str],
    posted_on: (i32, u32, u32),
) -> Posting {
    let mut posting = Posting::new(id, title);
    posting.company = Some(company.to_string());
    posting.description = description.to_string();
    posting.location = Some(location.to_string());
    posting.department = Some(department.to_string());
    posting.required_skills = skills.iter().collect();
    posting.posted_on = NaiveDate::from_ymd_opt(posted_on.0, posted_on.1, posted_on.2);
    posting
}

pub(crate) fn sample_catalog() -> Result<PostingCatalog, CatalogError> {
    let mut frontend = sample_posting(
        "int-001",
        "Frontend Developer Intern",
        "TechCorp Solutions",
        "Work on React-based web applications with our development team.",
        "Mumbai, Maharashtra",
        "Engineering",
        &["React", "JavaScript", "CSS", "HTML"],
        (2024, 1, 15),
    );
    frontend.min_standing = Some(7.0);
    frontend.applicants = Some(12);

    let mut data_science = sample_posting(
        "int-002",
        "Data Science Intern",
        "DataFlow Analytics",
        "Analyze large datasets and build machine learning models.",
        "Bangalore, Karnataka",
        "Data Science",
        &["Python", "Machine Learning", "SQL", "Pandas"],
        (2024, 1, 10),
    );
    data_science.min_standing = Some(8.0);
    data_science.applicants = Some(8);

    let mut marketing = sample_posting(
        "int-003",
        "Marketing Intern",
        "BrandBoost Media",
        "Support digital marketing campaigns and content creation.",
        "Delhi, NCR",
        "Marketing",
        &["Digital Marketing", "Content Writing", "Social Media"],
        (2024, 1, 5),
    );
    marketing.status = PostingStatus::Closed;
    marketing.applicants = Some(15);

    let mut mobile = sample_posting(
        "int-004",
        "Mobile App Developer",
        "AppVenture Labs",
        "Build cross-platform mobile apps for early-stage products.",
        "Pune, Maharashtra",
        "Mobile Development",
        &["React Native", "JavaScript", "Firebase"],
        (2024, 1, 12),
    );
    mobile.applicants = Some(0);

    PostingCatalog::new(vec![frontend, data_science, marketing, mobile])
}

pub(crate) fn sample_profile() -> Profile {
    Profile {
        standing: Some(8.5),
        location: Some("Mumbai, Maharashtra".to_string()),
        department: Some("Engineering".to_string()),
        skills: ["React", "JavaScript", "CSS", "Python"]
            .into_iter()
            .collect(),
    }
}

/// Parses `name=weight` pairs given on the command line.
pub(crate) fn parse_weight(raw: &str) -> Result<(String, f64), String> {
    let (name, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=WEIGHT, got '{raw}'"))?;
    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("weight for '{}' is not a number ({err})", name.trim()))?;
    Ok((name.trim().to_string(), weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartintern::matching::RankingOptions;

    #[test]
    fn sample_catalog_has_one_closed_posting() {
        let catalog = sample_catalog().expect("sample ids are unique");
        let summary = catalog.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.closed, 1);
        assert_eq!(summary.total_applicants, 35);
        assert_eq!(summary.average_applicants, Some(8.75));
    }

    #[test]
    fn sample_student_prefers_frontend_role() {
        let catalog = sample_catalog().expect("sample ids are unique");
        let records = MatchingEngine::default()
            .rank(&sample_profile(), catalog.postings(), &RankingOptions::default())
            .expect("ranks");
        assert_eq!(records[0].posting_id().as_str(), "int-001");
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn parse_weight_accepts_name_value_pairs() {
        assert_eq!(parse_weight("skills=2.5"), Ok(("skills".to_string(), 2.5)));
        assert!(parse_weight("skills").is_err());
        assert!(parse_weight("skills=high").is_err());
    }
}
