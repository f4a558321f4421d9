use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::slides::router::slides_router;

fn json_request(method: &str, uri: &str, body: &impl serde::Serialize) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("request builds")
}

#[tokio::test]
async fn match_endpoint_returns_the_selection() {
    let service = service_with_templates(vec![
        annotated_template("grid-3", 3, Some("case_analysis"), Some("basic_matrix"), None),
        template("loose-5", 5),
    ]);
    let router = slides_router(Arc::new(service));
    let content = annotated_content(3, "case_analysis", Some("basic_matrix"));

    let response = router
        .oneshot(json_request("POST", "/api/v1/slides/match", &content))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["templateId"], "grid-3");
    assert_eq!(body["strategy"], "rich");
    assert!(body["result"]["totalScore"].is_number());
    assert!(body.get("evaluatedAt").is_some());
}

#[tokio::test]
async fn match_endpoint_rejects_an_empty_pool() {
    let service = service_with_templates(Vec::new());
    let router = slides_router(Arc::new(service));

    let response = router
        .oneshot(json_request("POST", "/api/v1/slides/match", &content(2)))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn template_registration_round_trips() {
    let service = service_with_templates(Vec::new());
    let router = slides_router(Arc::new(service));

    let created = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/templates", &template("grid-3", 3)))
        .await
        .expect("router responds");
    assert_eq!(created.status(), StatusCode::CREATED);

    let fetched = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/templates/grid-3")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(fetched.status(), StatusCode::OK);
    let body = read_json_body(fetched).await;
    assert_eq!(body["template"]["id"], "grid-3");

    let duplicate = router
        .oneshot(json_request("POST", "/api/v1/templates", &template("grid-3", 3)))
        .await
        .expect("router responds");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_template_is_not_found() {
    let service = service_with_templates(Vec::new());
    let router = slides_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/templates/missing")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
