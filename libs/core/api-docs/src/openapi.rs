//! OpenApi view - serves the assembled spec for one API version

use crate::error::Result;
use crate::resolver::SchemaDescriptor;
use crate::spec::ApiSpec;
use crate::view::{ApiView, AppContext, BaseView, DEFAULT_API_VERSION};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use axum_helpers::errors::responses::{InternalServerErrorResponse, NotFoundResponse};
use axum_helpers::{AppError, ErrorResponse};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::openapi::content::ContentBuilder;
use utoipa::openapi::path::{HttpMethod, OperationBuilder, PathItem};
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::{ObjectBuilder, Schema};
use utoipa::{PartialSchema, ToResponse};

/// Path of the spec document, relative to the `/api/{version}` server.
pub const OPENAPI_PATH: &str = "/_openapi";

/// URI of the spec document for `version`.
pub fn openapi_uri(version: &str) -> String {
    format!("/api/{}{}", version, OPENAPI_PATH)
}

/// Assembles the spec for `version` from every matching API view.
///
/// Returns `None` when no registered API view serves that version.
pub fn build_spec(ctx: &AppContext, version: &str) -> Result<Option<ApiSpec>> {
    let mut spec = ApiSpec::new(ctx.app_name(), version);
    let mut matched = 0usize;

    for view in ctx.api_views_for(version) {
        debug!(view = view.name(), version, "Adding view to spec");
        view.add_api_spec(&mut spec)?;
        matched += 1;
    }

    if matched == 0 {
        return Ok(None);
    }

    info!(version, views = matched, "Built OpenAPI spec");
    Ok(Some(spec))
}

/// API view exposing `GET /api/{version}/_openapi`.
#[derive(Debug, Clone, Default)]
pub struct OpenApiView;

impl OpenApiView {
    pub const NAME: &'static str = "OpenApi";
}

impl BaseView for OpenApiView {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn route_base(&self) -> String {
        "/api".to_string()
    }

    fn endpoints(&self) -> Vec<String> {
        vec![format!("GET {}", openapi_uri("{version}"))]
    }

    fn router(&self, ctx: &Arc<AppContext>) -> Router {
        Router::new()
            .route(&openapi_uri("{version}"), get(get_openapi))
            .with_state(ctx.clone())
    }

    fn as_api(&self) -> Option<&dyn ApiView> {
        Some(self)
    }
}

impl ApiView for OpenApiView {
    fn version(&self) -> &str {
        DEFAULT_API_VERSION
    }

    fn add_api_spec(&self, spec: &mut ApiSpec) -> Result<()> {
        spec.register_schema(
            &SchemaDescriptor::of::<ErrorResponse>(),
            ErrorResponse::schema(),
        )?;

        let document = ResponseBuilder::new()
            .description("OpenAPI document")
            .content(
                "application/json",
                ContentBuilder::new()
                    .schema(Some(Schema::Object(ObjectBuilder::new().build())))
                    .build(),
            )
            .build();

        let operation = OperationBuilder::new()
            .tags(Some(vec![Self::NAME.to_string()]))
            .operation_id(Some("get_openapi"))
            .summary(Some("OpenAPI document for this API version"))
            .response("200", document)
            .response("404", NotFoundResponse::response().1)
            .response("500", InternalServerErrorResponse::response().1)
            .build();

        spec.add_path(OPENAPI_PATH, PathItem::new(HttpMethod::Get, operation))
    }
}

async fn get_openapi(
    State(ctx): State<Arc<AppContext>>,
    Path(version): Path<String>,
) -> std::result::Result<Json<Value>, AppError> {
    let spec = build_spec(&ctx, &version)?.ok_or_else(|| {
        AppError::NotFound(format!("No API views registered for version '{}'", version))
    })?;

    Ok(Json(spec.to_json()?))
}
