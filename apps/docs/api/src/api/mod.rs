//! API routes module
//!
//! Registers the resource views and the documentation views on one registry.

pub mod contacts;
pub mod reports;

use api_docs::{DocsConfig, DocumentedApi, OpenApiManager, ViewManager, ViewRegistry};
use axum::Router;
use std::sync::Arc;
use utoipa::openapi::Ref;
use utoipa::openapi::schema::{Array, Schema};

/// Registers every resource view.
pub fn register(registry: &mut ViewRegistry) {
    let contact_list = Schema::Array(Array::new(Ref::from_schema_name("Contact")));

    registry
        .add_api(
            DocumentedApi::<contacts::ApiDoc>::new(
                "contact",
                contacts::router(Arc::new(contacts::ContactStore::default())),
            )
            .with_generated_schema("ContactApi.get_list", "Contact", contact_list),
        )
        .add_api(
            DocumentedApi::<reports::ApiDoc>::new(
                "report",
                reports::router(Arc::new(reports::sample_reports())),
            )
            .with_version("v2"),
        );
}

/// Builds the application router: resources first, then documentation views.
pub fn routes(docs: DocsConfig) -> api_docs::Result<Router> {
    let mut registry = ViewRegistry::new(docs);
    register(&mut registry);
    OpenApiManager.register_views(&mut registry)?;

    for route in registry.route_table() {
        tracing::debug!(%route, "Route registered");
    }

    Ok(registry.into_router())
}
