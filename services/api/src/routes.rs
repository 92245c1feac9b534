use crate::infra::{
    build_committee_service, deserialize_optional_date, AppState, ImportedDirectory,
    InMemoryCommitteeStore,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use committee_ai::error::AppError;
use committee_ai::workflows::apollo::ApolloCommitteeImporter;
use committee_ai::workflows::committee::{
    committee_router, AccountScoreReport, AssembleOptions, CandidateDirectory, CommitteeRecord,
    CommitteeService, CommitteeStore, DirectoryError, ProductContext,
};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

/// Request for the CSV-driven one-shot report: paste an Apollo export, get
/// the assembled committee (and optionally the account-fit report) back.
#[derive(Debug, Deserialize)]
pub(crate) struct CommitteeReportRequest {
    pub(crate) apollo_csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) product: Option<ProductContext>,
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct CommitteeReportResponse {
    pub(crate) committee: CommitteeRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) account: Option<AccountScoreReport>,
}

pub(crate) fn with_committee_routes<D, S>(service: Arc<CommitteeService<D, S>>) -> axum::Router
where
    D: CandidateDirectory + 'static,
    S: CommitteeStore + 'static,
{
    committee_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/committee/report",
            axum::routing::post(committee_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn committee_report_endpoint(
    Json(payload): Json<CommitteeReportRequest>,
) -> Result<Json<CommitteeReportResponse>, AppError> {
    let CommitteeReportRequest {
        apollo_csv,
        today,
        product,
    } = payload;

    let import = ApolloCommitteeImporter::from_reader(Cursor::new(apollo_csv.into_bytes()))?;
    let directory = Arc::new(ImportedDirectory::from_import(import));
    let org = directory
        .org_id()
        .ok_or(DirectoryError::OrgNotFound)
        .map_err(committee_ai::workflows::committee::CommitteeServiceError::from)?;

    let store = Arc::new(InMemoryCommitteeStore::default());
    let service = build_committee_service(directory, store, 180);

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let committee = service.assemble(
        &org,
        today,
        AssembleOptions {
            product: product.clone(),
            outcome: None,
        },
    )?;

    let account = match product {
        Some(product) => Some(service.score_account(&org, &product, today)?),
        None => None,
    };

    Ok(Json(CommitteeReportResponse { committee, account }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;

    const EXPORT: &str = "\
First Name,Last Name,Title,Seniority,Departments,Email,Email Status,Work Direct Phone,Mobile Phone,Person Linkedin Url,Months In Current Role,Company,# Employees,Employee Growth %,Industry,Technologies,Last Raised At,Last Updated
Maya,Okafor,Chief Executive Officer,C Suite,C Suite,maya.okafor@harvestrobotics.com,Verified,+1 415 555 0101,,https://linkedin.com/in/mayaokafor,48,Harvest Robotics,340,32%,Agricultural Technology,Salesforce; Snowflake,2026-02-10,2026-07-15
Liam,Reyes,Director of Revenue Operations,Director,Master Sales,liam.reyes@harvestrobotics.com,Unverified,,+1 415 555 0102,,18,Harvest Robotics,340,32%,Agricultural Technology,Salesforce; Snowflake,2026-02-10,2026-07-12
Avery,Chen,General Counsel,Director,Master Legal,avery.chen@harvestrobotics.com,Verified,,,,30,Harvest Robotics,340,32%,Agricultural Technology,Salesforce; Snowflake,2026-02-10,2026-07-10
";

    #[tokio::test]
    async fn committee_report_endpoint_assembles_from_csv() {
        let request = CommitteeReportRequest {
            apollo_csv: EXPORT.to_string(),
            today: Some(NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date")),
            product: None,
        };

        let Json(body) = committee_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.committee.organization.0, "harvest-robotics");
        assert_eq!(body.committee.selection.total, 3);
        assert!(body.account.is_none());
    }

    #[tokio::test]
    async fn committee_report_endpoint_scores_account_with_product() {
        let request = CommitteeReportRequest {
            apollo_csv: EXPORT.to_string(),
            today: Some(NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date")),
            product: Some(ProductContext {
                target_departments: vec!["Sales".to_string()],
                target_industries: vec!["technology".to_string()],
                complementary_technologies: vec!["salesforce".to_string()],
                keywords: vec!["revenue".to_string()],
            }),
        };

        let Json(body) = committee_report_endpoint(Json(request))
            .await
            .expect("report builds");

        let account = body.account.expect("account report present");
        assert_eq!(account.composite.classification, "Act Now");
    }

    #[tokio::test]
    async fn committee_report_endpoint_rejects_empty_exports() {
        let request = CommitteeReportRequest {
            apollo_csv: "First Name,Last Name\n".to_string(),
            today: None,
            product: None,
        };

        let error = committee_report_endpoint(Json(request))
            .await
            .expect_err("empty export rejected");
        assert!(error.to_string().contains("no contact rows"));
    }
}
