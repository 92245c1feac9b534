use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::domain::{OrgId, ProductContext};
use super::service::{AssembleOptions, CommitteeService, CommitteeServiceError};
use super::sources::{CandidateDirectory, CommitteeStore, DirectoryError, StoreError};

/// Router builder exposing HTTP endpoints for assembly, lookup, and account
/// scoring.
pub fn committee_router<D, S>(service: Arc<CommitteeService<D, S>>) -> Router
where
    D: CandidateDirectory + 'static,
    S: CommitteeStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/committee/:org/assemble",
            post(assemble_handler::<D, S>),
        )
        .route("/api/v1/committee/:org", get(status_handler::<D, S>))
        .route(
            "/api/v1/accounts/:org/score",
            post(score_handler::<D, S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AsOfQuery {
    /// Reference date for tier bucketing and staleness; defaults to today.
    as_of: Option<NaiveDate>,
}

pub(crate) async fn assemble_handler<D, S>(
    State(service): State<Arc<CommitteeService<D, S>>>,
    Path(org): Path<String>,
    Query(query): Query<AsOfQuery>,
    body: Option<axum::Json<AssembleOptions>>,
) -> Response
where
    D: CandidateDirectory + 'static,
    S: CommitteeStore + 'static,
{
    let org = OrgId(org);
    let today = query
        .as_of
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let options = body.map(|axum::Json(options)| options).unwrap_or_default();

    match service.assemble(&org, today, options) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<D, S>(
    State(service): State<Arc<CommitteeService<D, S>>>,
    Path(org): Path<String>,
) -> Response
where
    D: CandidateDirectory + 'static,
    S: CommitteeStore + 'static,
{
    let org = OrgId(org);
    match service.get(&org) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<D, S>(
    State(service): State<Arc<CommitteeService<D, S>>>,
    Path(org): Path<String>,
    Query(query): Query<AsOfQuery>,
    axum::Json(product): axum::Json<ProductContext>,
) -> Response
where
    D: CandidateDirectory + 'static,
    S: CommitteeStore + 'static,
{
    let org = OrgId(org);
    let today = query
        .as_of
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    match service.score_account(&org, &product, today) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CommitteeServiceError) -> Response {
    let status = match &error {
        CommitteeServiceError::Directory(DirectoryError::OrgNotFound)
        | CommitteeServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        CommitteeServiceError::ScoringConfig(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
