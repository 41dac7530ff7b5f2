//! View traits and the generic documented API view.

use crate::error::Result;
use crate::resolver::SchemaDescriptor;
use crate::spec::{ApiSpec, join_path};
use axum::Router;
use core_config::docs::DocsConfig;
use std::marker::PhantomData;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa::openapi::{RefOr, Schema};

/// Version assigned to API views that don't pick one.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Frozen registry contents, shared with every view router.
pub struct AppContext {
    config: DocsConfig,
    views: Vec<Arc<dyn BaseView>>,
}

impl AppContext {
    pub(crate) fn new(config: DocsConfig, views: Vec<Arc<dyn BaseView>>) -> Self {
        Self { config, views }
    }

    pub fn app_name(&self) -> &str {
        &self.config.app_name
    }

    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    pub fn views(&self) -> &[Arc<dyn BaseView>] {
        &self.views
    }

    /// Registered API views, in registration order.
    pub fn api_views(&self) -> impl Iterator<Item = &dyn ApiView> {
        self.views.iter().filter_map(|view| view.as_api())
    }

    /// Registered API views serving `version`.
    pub fn api_views_for<'a>(&'a self, version: &'a str) -> impl Iterator<Item = &'a dyn ApiView> {
        self.api_views().filter(move |view| view.version() == version)
    }
}

/// Anything the registry can mount: a set of routes under a base path.
pub trait BaseView: Send + Sync + 'static {
    /// Unique view name; registering a second view with the same name is a no-op.
    fn name(&self) -> &str;

    fn route_base(&self) -> String;

    /// Route patterns served by this view, e.g. `GET /swagger/{version}`.
    fn endpoints(&self) -> Vec<String>;

    /// Builds the view's routes with their state applied.
    fn router(&self, ctx: &Arc<AppContext>) -> Router;

    /// Returns the view as an API view when it contributes to the spec.
    fn as_api(&self) -> Option<&dyn ApiView> {
        None
    }
}

/// A versioned view that documents itself in the OpenAPI spec.
pub trait ApiView: BaseView {
    fn version(&self) -> &str;

    /// Adds this view's paths and schemas to `spec`.
    fn add_api_spec(&self, spec: &mut ApiSpec) -> Result<()>;
}

/// API view for a resource router documented with `#[derive(OpenApi)]`.
///
/// Routes are served under `/api/{version}/{resource}`. In the spec, whose
/// server is `/api/{version}`, paths appear under `/{resource}`.
pub struct DocumentedApi<D> {
    resource_name: String,
    version: String,
    router: Router,
    generated_schemas: Vec<(SchemaDescriptor, RefOr<Schema>)>,
    _doc: PhantomData<fn() -> D>,
}

impl<D: OpenApi + 'static> DocumentedApi<D> {
    pub fn new(resource_name: impl Into<String>, router: Router) -> Self {
        Self {
            resource_name: resource_name.into(),
            version: DEFAULT_API_VERSION.to_string(),
            router,
            generated_schemas: Vec::new(),
            _doc: PhantomData,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Publishes a generated wrapper schema alongside the derived document.
    pub fn with_generated_schema(
        mut self,
        parent_schema_name: impl Into<String>,
        model: impl Into<String>,
        schema: impl Into<RefOr<Schema>>,
    ) -> Self {
        self.generated_schemas.push((
            SchemaDescriptor::generated(parent_schema_name, model),
            schema.into(),
        ));
        self
    }

    fn spec_prefix(&self) -> String {
        format!("/{}", self.resource_name)
    }
}

impl<D: OpenApi + 'static> BaseView for DocumentedApi<D> {
    fn name(&self) -> &str {
        &self.resource_name
    }

    fn route_base(&self) -> String {
        format!("/api/{}/{}", self.version, self.resource_name)
    }

    fn endpoints(&self) -> Vec<String> {
        let route_base = self.route_base();
        let document = D::openapi();

        document
            .paths
            .paths
            .iter()
            .flat_map(|(path, item)| {
                let full_path = join_path(&route_base, path);
                operation_methods(item)
                    .into_iter()
                    .map(move |method| format!("{} {}", method, full_path))
            })
            .collect()
    }

    fn router(&self, _ctx: &Arc<AppContext>) -> Router {
        Router::new().nest(&self.route_base(), self.router.clone())
    }

    fn as_api(&self) -> Option<&dyn ApiView> {
        Some(self)
    }
}

impl<D: OpenApi + 'static> ApiView for DocumentedApi<D> {
    fn version(&self) -> &str {
        &self.version
    }

    fn add_api_spec(&self, spec: &mut ApiSpec) -> Result<()> {
        spec.merge_document(&self.spec_prefix(), D::openapi())?;
        for (descriptor, schema) in &self.generated_schemas {
            spec.register_schema(descriptor, schema.clone())?;
        }
        Ok(())
    }
}

fn operation_methods(item: &utoipa::openapi::PathItem) -> Vec<&'static str> {
    [
        ("GET", item.get.is_some()),
        ("PUT", item.put.is_some()),
        ("POST", item.post.is_some()),
        ("DELETE", item.delete.is_some()),
        ("OPTIONS", item.options.is_some()),
        ("HEAD", item.head.is_some()),
        ("PATCH", item.patch.is_some()),
        ("TRACE", item.trace.is_some()),
    ]
    .into_iter()
    .filter_map(|(method, present)| present.then_some(method))
    .collect()
}
