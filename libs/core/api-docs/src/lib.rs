//! API Docs - OpenAPI documentation for registered API views
//!
//! This library provides:
//! - A registry of views (API views contribute to the spec, page views don't)
//! - `GET /api/{version}/_openapi`: the assembled spec for one API version
//! - `GET /swagger/{version}`: a Swagger UI page pointing at that spec
//! - A manager that registers both endpoints according to [`DocsConfig`]
//! - The schema name resolver used for component references
//!
//! ## Example
//!
//! ```ignore
//! use api_docs::{DocumentedApi, OpenApiManager, ViewManager, ViewRegistry};
//! use core_config::docs::DocsConfig;
//!
//! let mut registry = ViewRegistry::new(DocsConfig::new("Contacts").with_swagger_ui(true));
//! registry.add_api(DocumentedApi::<contacts::ApiDoc>::new("contact", contacts::router()));
//! OpenApiManager.register_views(&mut registry)?;
//!
//! let app = registry.into_router();
//! ```

pub mod error;
pub mod manager;
pub mod openapi;
pub mod registry;
pub mod resolver;
pub mod spec;
pub mod swagger;
pub mod view;

pub use core_config::docs::DocsConfig;
pub use error::{ApiDocsError, Result};
pub use manager::{OpenApiManager, ViewManager};
pub use openapi::{OpenApiView, build_spec, openapi_uri};
pub use registry::ViewRegistry;
pub use resolver::{SchemaDescriptor, SchemaMeta, resolve_schema_name};
pub use spec::ApiSpec;
pub use swagger::SwaggerView;
pub use view::{ApiView, AppContext, BaseView, DocumentedApi};
