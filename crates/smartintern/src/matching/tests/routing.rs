use std::sync::Arc;

use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::matching::{recommendation_router, MatchingEngine, RankingOptions, RecommendationService};

fn post_json(uri: &str, body: serde_json::Value) -> Request<axum::body::Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serializable"),
        ))
        .expect("valid request")
}

#[tokio::test]
async fn recommendations_use_configured_catalog() {
    let router = recommendation_router(service_with(vec![
        posting("p2", &["React", "JavaScript", "MongoDB"]),
        posting("p1", &["React", "JavaScript"]),
        closed_posting("p3"),
    ]));

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations",
            json!({ "profile": serde_json::to_value(student_profile()).expect("profile") }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["excludedInactive"], 1);
    assert_eq!(payload["recommendations"][0]["postingId"], "p1");
    assert_eq!(payload["recommendations"][0]["overallScore"], 100);
    assert_eq!(payload["recommendations"][1]["overallScore"], 92);
    assert_eq!(
        payload["recommendations"][1]["criteria"][0]["evidence"]["missing"],
        json!(["MongoDB"])
    );
}

#[tokio::test]
async fn inline_postings_and_options_override_defaults() {
    let router = recommendation_router(service_with(Vec::new()));

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations",
            json!({
                "profile": { "cgpa": 8.0, "skills": ["Python"] },
                "postings": [
                    { "id": "ds-1", "title": "Data Science Intern", "requiredSkills": ["Python", "SQL"] },
                    { "id": "ds-2", "title": "ML Intern", "requiredSkills": ["Python"] }
                ],
                "weights": { "skills": 1.0 },
                "options": { "limit": 1 }
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let recommendations = payload["recommendations"].as_array().expect("array");
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["postingId"], "ds-2");
    assert_eq!(recommendations[0]["weightsUsed"], json!({ "skills": 1.0 }));
}

#[tokio::test]
async fn invalid_weights_return_unprocessable_entity() {
    let router = recommendation_router(service_with(vec![posting("p1", &["React"])]));

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations",
            json!({
                "profile": {},
                "weights": { "skills": 0.0, "location": 0.0, "academic": 0.0, "department": 0.0 }
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["constraint"], "positive_total");
    assert!(payload.get("recommendations").is_none());
}

#[tokio::test]
async fn unavailable_catalog_maps_to_service_unavailable() {
    let service = Arc::new(RecommendationService::new(
        Arc::new(OfflineCatalog),
        MatchingEngine::default(),
        RankingOptions::default(),
    ));

    let response = recommendation_router(service)
        .oneshot(
            Request::get("/api/v1/postings")
                .body(axum::body::Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn postings_listing_reports_status_counts() {
    let router = recommendation_router(service_with(vec![
        posting("p1", &["React"]),
        closed_posting("p2"),
    ]));

    let response = router
        .oneshot(
            Request::get("/api/v1/postings")
                .body(axum::body::Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["active"], 1);
    assert_eq!(payload["closed"], 1);
    assert_eq!(payload["postings"][1]["status"], "closed");
}
