//! Swagger view - Swagger UI page for one API version
//!
//! The page is a handlebars template rendered with `app_name` and
//! `openapi_uri`. An embedded page is used unless `DOCS_SWAGGER_TEMPLATE`
//! points at a replacement.

use crate::error::{ApiDocsError, Result};
use crate::openapi::openapi_uri;
use crate::view::{AppContext, BaseView};
use axum::{
    Router,
    extract::{Path, State},
    response::Html,
    routing::get,
};
use axum_helpers::AppError;
use core_config::docs::DocsConfig;
use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

const TEMPLATE_NAME: &str = "swagger";

/// Page served when no template override is configured.
pub const DEFAULT_SWAGGER_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{{app_name}}</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = function () {
      window.ui = SwaggerUIBundle({
        url: "{{openapi_uri}}",
        dom_id: "#swagger-ui",
        deepLinking: true,
        presets: [SwaggerUIBundle.presets.apis],
      });
    };
  </script>
</body>
</html>
"##;

#[derive(Serialize)]
struct SwaggerPage<'a> {
    app_name: &'a str,
    openapi_uri: String,
}

/// Page view exposing `GET /swagger/{version}`.
#[derive(Clone)]
pub struct SwaggerView {
    templates: Arc<Handlebars<'static>>,
}

impl SwaggerView {
    pub const NAME: &'static str = "SwaggerView";

    /// Swagger view rendering the embedded page.
    pub fn new() -> Result<Self> {
        Self::from_template_str(DEFAULT_SWAGGER_TEMPLATE)
    }

    /// Swagger view rendering the configured template, or the embedded page.
    pub fn from_config(config: &DocsConfig) -> Result<Self> {
        let Some(path) = &config.swagger_template else {
            return Self::new();
        };

        info!(template = %path.display(), "Loading Swagger UI template");
        let source = std::fs::read_to_string(path).map_err(|source| ApiDocsError::TemplateIo {
            path: path.clone(),
            source,
        })?;

        Self::from_template_str(&source)
    }

    pub fn from_template_str(source: &str) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string(TEMPLATE_NAME, source)?;

        Ok(Self {
            templates: Arc::new(handlebars),
        })
    }

    /// Renders the page for `version`.
    pub fn render(&self, app_name: &str, version: &str) -> Result<String> {
        let page = SwaggerPage {
            app_name,
            openapi_uri: openapi_uri(version),
        };

        Ok(self.templates.render(TEMPLATE_NAME, &page)?)
    }
}

#[derive(Clone)]
struct SwaggerState {
    view: SwaggerView,
    ctx: Arc<AppContext>,
}

impl BaseView for SwaggerView {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn route_base(&self) -> String {
        "/swagger".to_string()
    }

    fn endpoints(&self) -> Vec<String> {
        vec!["GET /swagger/{version}".to_string()]
    }

    fn router(&self, ctx: &Arc<AppContext>) -> Router {
        let state = SwaggerState {
            view: self.clone(),
            ctx: ctx.clone(),
        };

        Router::new()
            .route("/swagger/{version}", get(show))
            .with_state(state)
    }
}

async fn show(
    State(state): State<SwaggerState>,
    Path(version): Path<String>,
) -> std::result::Result<Html<String>, AppError> {
    debug!(version = %version, "Rendering Swagger UI");
    let page = state.view.render(state.ctx.app_name(), &version)?;
    Ok(Html(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_page_points_at_versioned_spec() {
        let view = SwaggerView::new().unwrap();
        let page = view.render("Contacts", "v2").unwrap();

        assert!(page.contains(r#"url: "/api/v2/_openapi""#));
        assert!(page.contains("<title>Contacts</title>"));
    }

    #[test]
    fn test_default_page_mounts_swagger_ui() {
        let page = SwaggerView::new().unwrap().render("Contacts", "v1").unwrap();

        assert!(page.contains(r#"<div id="swagger-ui"></div>"#));
        assert!(page.contains(r##"dom_id: "#swagger-ui""##));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_app_name_is_escaped() {
        let view = SwaggerView::new().unwrap();
        let page = view.render("<Contacts>", "v1").unwrap();

        assert!(page.contains("&lt;Contacts&gt;"));
        assert!(!page.contains("<Contacts>"));
    }

    #[test]
    fn test_custom_template() {
        let view = SwaggerView::from_template_str("{{app_name}} @ {{openapi_uri}}").unwrap();
        assert_eq!(view.render("Docs", "v3").unwrap(), "Docs @ /api/v3/_openapi");
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let err = SwaggerView::from_template_str("{{#if}}").err().unwrap();
        assert!(matches!(err, ApiDocsError::Template(_)));
    }

    #[test]
    fn test_template_loaded_from_config() {
        let path = std::env::temp_dir().join(format!("swagger-{}.hbs", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "<h1>{{{{app_name}}}}</h1>{{{{openapi_uri}}}}").unwrap();

        let config = DocsConfig::new("Docs").with_swagger_template(&path);
        let page = SwaggerView::from_config(&config)
            .unwrap()
            .render("Docs", "v1")
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(page, "<h1>Docs</h1>/api/v1/_openapi");
    }

    #[test]
    fn test_missing_template_file() {
        let config = DocsConfig::new("Docs").with_swagger_template("/definitely/not/here.hbs");
        let err = SwaggerView::from_config(&config).err().unwrap();
        assert!(matches!(err, ApiDocsError::TemplateIo { .. }));
    }

    #[test]
    fn test_not_an_api_view() {
        let view = SwaggerView::new().unwrap();
        assert!(view.as_api().is_none());
        assert_eq!(view.endpoints(), ["GET /swagger/{version}"]);
    }
}
