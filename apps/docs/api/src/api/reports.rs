//! Reports API (v2)

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use axum_helpers::{AppError, ErrorResponse, errors::responses::NotFoundResponse};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

/// OpenAPI documentation for Reports API
#[derive(OpenApi)]
#[openapi(
    paths(list_reports, get_report),
    components(
        schemas(ReportSchema, ErrorResponse),
        responses(NotFoundResponse)
    ),
    tags(
        (name = "Reports", description = "Read-only reports")
    )
)]
pub struct ApiDoc;

/// A published report
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportSchema {
    pub id: u32,
    pub title: String,
}

pub fn router(reports: Arc<Vec<ReportSchema>>) -> Router {
    Router::new()
        .route("/", get(list_reports))
        .route("/{id}", get(get_report))
        .with_state(reports)
}

/// Reports shipped with the demo
pub fn sample_reports() -> Vec<ReportSchema> {
    vec![
        ReportSchema {
            id: 1,
            title: "Contacts by month".to_string(),
        },
        ReportSchema {
            id: 2,
            title: "Inactive contacts".to_string(),
        },
    ]
}

/// List published reports
#[utoipa::path(
    get,
    path = "",
    tag = "Reports",
    responses(
        (status = 200, description = "List of reports", body = Vec<ReportSchema>)
    )
)]
async fn list_reports(State(reports): State<Arc<Vec<ReportSchema>>>) -> Json<Vec<ReportSchema>> {
    Json(reports.as_ref().clone())
}

/// Get a report by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Reports",
    params(
        ("id" = u32, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ReportSchema),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_report(
    State(reports): State<Arc<Vec<ReportSchema>>>,
    Path(id): Path<u32>,
) -> Result<Json<ReportSchema>, AppError> {
    reports
        .iter()
        .find(|report| report.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
}
