//! Startup registration of the documentation views.

use crate::error::Result;
use crate::openapi::OpenApiView;
use crate::registry::ViewRegistry;
use crate::swagger::SwaggerView;
use tracing::info;

/// Registers a group of views on the registry at startup.
pub trait ViewManager {
    fn register_views(&self, registry: &mut ViewRegistry) -> Result<()>;
}

/// Registers the OpenApi view and the Swagger UI page.
///
/// Both are registered together, and only when `add_openapi_views` and
/// `swagger_ui` are both set.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiManager;

impl ViewManager for OpenApiManager {
    fn register_views(&self, registry: &mut ViewRegistry) -> Result<()> {
        let config = registry.config().clone();

        if !config.add_openapi_views || !config.swagger_ui {
            info!(
                add_openapi_views = config.add_openapi_views,
                swagger_ui = config.swagger_ui,
                "OpenAPI views disabled"
            );
            return Ok(());
        }

        let swagger = SwaggerView::from_config(&config)?;
        registry.add_api(OpenApiView);
        registry.add_view_no_menu(swagger);

        Ok(())
    }
}
