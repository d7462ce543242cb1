use smartintern::catalog::PostingCatalog;
use smartintern::matching::{
    CriterionName, Evidence, MatchingEngine, PostingRepository, Profile, RankingOptions,
    RecommendationRequest, RecommendationService, WeightConfig,
};
use std::sync::Arc;

const CATALOG: &str = "id,title,company,description,location,department,required_skills,min_standing,status,posted_on\n\
1,Frontend Developer Intern,TechCorp Solutions,Work on React-based web applications,\"Mumbai, Maharashtra\",Engineering,React;JavaScript;CSS;HTML,7.0,Active,2024-01-15\n\
2,Data Science Intern,DataFlow Analytics,Analyze large datasets,\"Bangalore, Karnataka\",Data Science,Python;Machine Learning;SQL;Pandas,8.0,Active,2024-01-10\n\
3,Marketing Intern,BrandBoost,Support digital marketing campaigns,\"Delhi, NCR\",Marketing,Digital Marketing;Content Writing;Social Media,,Closed,2024-01-05\n\
4,Mobile App Developer,AppVenture Labs,Build cross-platform apps,\"Pune, Maharashtra\",Engineering,React Native;JavaScript;Firebase,,Active,2024-01-12\n";

fn student() -> Profile {
    Profile {
        standing: Some(8.5),
        location: Some("Mumbai, Maharashtra".to_string()),
        department: Some("Engineering".to_string()),
        skills: ["React", "JavaScript", "CSS", "Python"].into_iter().collect(),
    }
}

#[test]
fn csv_catalog_ranks_active_postings_with_audits() {
    let catalog = PostingCatalog::from_reader(CATALOG.as_bytes()).expect("catalog imports");
    assert_eq!(catalog.summary().closed, 1);

    let engine = MatchingEngine::default();
    let report = engine
        .rank_with_report(&student(), catalog.postings(), &RankingOptions::default())
        .expect("ranking succeeds");

    assert_eq!(report.excluded_inactive, 1);
    let order: Vec<&str> = report
        .records
        .iter()
        .map(|record| record.posting_id().as_str())
        .collect();
    assert_eq!(order, vec!["1", "4", "2"]);

    let frontend = &report.records[0];
    // skills 3/4, location, academic, department all full
    assert!((frontend.overall() - (75.0 + 300.0) / 4.0).abs() < 1e-9);
    assert_eq!(frontend.overall_score(), 94);
    match &frontend
        .criterion(CriterionName::Skills)
        .expect("skills evaluated")
        .evidence
    {
        Evidence::Skills { missing, .. } => assert_eq!(missing, &vec!["HTML".to_string()]),
        other => panic!("expected skills evidence, got {other:?}"),
    }

    for record in &report.records {
        let recomputed = record.recompute_overall().expect("weights present");
        assert!((recomputed - record.overall()).abs() < 1e-12);
    }
}

#[test]
fn serialized_audit_matches_breakdown_contract() {
    let catalog = PostingCatalog::from_reader(CATALOG.as_bytes()).expect("catalog imports");
    let service = RecommendationService::new(
        Arc::new(catalog),
        MatchingEngine::default(),
        RankingOptions {
            limit: Some(1),
            ..RankingOptions::default()
        },
    );

    let response = service
        .recommend(RecommendationRequest {
            profile: student(),
            postings: None,
            weights: None,
            options: RankingOptions::default(),
        })
        .expect("recommendation succeeds");

    let value = serde_json::to_value(&response).expect("serializes");
    let audit = &value["recommendations"][0];
    assert_eq!(audit["postingId"], "1");
    assert_eq!(audit["overallScore"], 94);
    let criteria = audit["criteria"].as_array().expect("criteria array");
    assert_eq!(criteria.len(), 4);
    for criterion in criteria {
        assert!(criterion["name"].is_string());
        let sub_score = criterion["subScore"].as_u64().expect("integer sub-score");
        assert!(sub_score <= 100);
        assert!(criterion["evidence"].is_object());
    }
    assert_eq!(
        audit["weightsUsed"],
        serde_json::json!({ "skills": 1.0, "location": 1.0, "academic": 1.0, "department": 1.0 })
    );
    assert_eq!(value["recommendations"].as_array().map(Vec::len), Some(1));
}

#[test]
fn audits_keep_their_weight_snapshot() {
    let catalog = PostingCatalog::from_reader(CATALOG.as_bytes()).expect("catalog imports");
    let postings = catalog.list().expect("in-memory catalog");

    let skills_heavy = WeightConfig::from_raw([("skills", 3.0), ("location", 1.0)])
        .expect("valid weights");
    let before = MatchingEngine::new(skills_heavy)
        .rank(&student(), &postings, &RankingOptions::default())
        .expect("ranks");

    let after = MatchingEngine::default()
        .rank(&student(), &postings, &RankingOptions::default())
        .expect("ranks");

    assert_eq!(before[0].weights_used().get(&CriterionName::Skills), Some(&3.0));
    assert_eq!(after[0].weights_used().get(&CriterionName::Skills), Some(&1.0));
    assert_ne!(before[0].overall(), after[0].overall());
}
