use std::sync::Arc;

use axum::http::StatusCode;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::committee::committee_router;

fn router() -> axum::Router {
    let (service, _, _) = build_service();
    committee_router(Arc::new(service))
}

#[tokio::test]
async fn assemble_route_creates_a_committee() {
    let app = router();

    let response = app
        .oneshot(
            axum::http::Request::post("/api/v1/committee/harvest-robotics/assemble?as_of=2026-08-01")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["selection"]["total"].as_u64(),
        Some(12),
        "payload: {payload}"
    );
    assert_eq!(payload["validation"]["is_valid"].as_bool(), Some(true));
}

#[tokio::test]
async fn status_route_returns_the_persisted_view() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    service
        .assemble(&org_id(), today(), Default::default())
        .expect("assembly succeeds");
    let app = committee_router(service);

    let response = app
        .oneshot(
            axum::http::Request::get("/api/v1/committee/harvest-robotics")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["organization"].as_str(),
        Some("harvest-robotics")
    );
    assert_eq!(payload["total_members"].as_u64(), Some(12));
    assert_eq!(payload["is_valid"].as_bool(), Some(true));
}

#[tokio::test]
async fn status_route_404s_for_unknown_committees() {
    let app = router();

    let response = app
        .oneshot(
            axum::http::Request::get("/api/v1/committee/ghost-org")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn assemble_route_404s_for_unknown_organizations() {
    let app = router();

    let response = app
        .oneshot(
            axum::http::Request::post("/api/v1/committee/ghost-org/assemble")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn score_route_returns_the_account_report() {
    let app = router();

    let response = app
        .oneshot(
            axum::http::Request::post(
                "/api/v1/accounts/harvest-robotics/score?as_of=2026-08-01",
            )
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(
                serde_json::to_vec(&product()).unwrap(),
            ))
            .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["tier"].as_str(), Some("mid_market"));
    assert_eq!(payload["composite"]["classification"].as_str(), Some("Act Now"));
}
