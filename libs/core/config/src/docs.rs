//! Documentation view settings.
//!
//! These flags decide which documentation endpoints get registered when the
//! application starts.

use crate::{env_bool, env_or_default, ConfigError, FromEnv};
use std::env;
use std::path::PathBuf;

/// Settings for the OpenAPI and Swagger UI views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocsConfig {
    /// Application name, used as the spec title and description.
    pub app_name: String,
    /// Register documentation views at all (`DOCS_ADD_OPENAPI_VIEWS`, default true).
    pub add_openapi_views: bool,
    /// Expose the Swagger UI page (`DOCS_SWAGGER_UI`, default false).
    pub swagger_ui: bool,
    /// Handlebars file overriding the embedded Swagger page (`DOCS_SWAGGER_TEMPLATE`).
    pub swagger_template: Option<PathBuf>,
}

impl DocsConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Self::default()
        }
    }

    pub fn with_openapi_views(mut self, enabled: bool) -> Self {
        self.add_openapi_views = enabled;
        self
    }

    pub fn with_swagger_ui(mut self, enabled: bool) -> Self {
        self.swagger_ui = enabled;
        self
    }

    pub fn with_swagger_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.swagger_template = Some(path.into());
        self
    }
}

impl FromEnv for DocsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let swagger_template = env::var("DOCS_SWAGGER_TEMPLATE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            app_name: env_or_default("APP_NAME", "API"),
            add_openapi_views: env_bool("DOCS_ADD_OPENAPI_VIEWS", true)?,
            swagger_ui: env_bool("DOCS_SWAGGER_UI", false)?,
            swagger_template,
        })
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            app_name: "API".to_string(),
            add_openapi_views: true,
            swagger_ui: false,
            swagger_template: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 4] = [
        "APP_NAME",
        "DOCS_ADD_OPENAPI_VIEWS",
        "DOCS_SWAGGER_UI",
        "DOCS_SWAGGER_TEMPLATE",
    ];

    #[test]
    fn test_docs_config_defaults() {
        temp_env::with_vars(VARS.map(|key| (key, None::<&str>)), || {
            let config = DocsConfig::from_env().unwrap();
            assert_eq!(config, DocsConfig::default());
            assert!(config.add_openapi_views);
            assert!(!config.swagger_ui);
            assert!(config.swagger_template.is_none());
        });
    }

    #[test]
    fn test_docs_config_from_env_overrides() {
        temp_env::with_vars(
            [
                ("APP_NAME", Some("Contacts")),
                ("DOCS_ADD_OPENAPI_VIEWS", Some("false")),
                ("DOCS_SWAGGER_UI", Some("1")),
                ("DOCS_SWAGGER_TEMPLATE", Some("/etc/docs/swagger.hbs")),
            ],
            || {
                let config = DocsConfig::from_env().unwrap();
                assert_eq!(config.app_name, "Contacts");
                assert!(!config.add_openapi_views);
                assert!(config.swagger_ui);
                assert_eq!(
                    config.swagger_template,
                    Some(PathBuf::from("/etc/docs/swagger.hbs"))
                );
            },
        );
    }

    #[test]
    fn test_docs_config_blank_template_is_ignored() {
        temp_env::with_var("DOCS_SWAGGER_TEMPLATE", Some("  "), || {
            let config = DocsConfig::from_env().unwrap();
            assert!(config.swagger_template.is_none());
        });
    }

    #[test]
    fn test_docs_config_invalid_flag() {
        temp_env::with_var("DOCS_SWAGGER_UI", Some("sometimes"), || {
            let err = DocsConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("DOCS_SWAGGER_UI"));
        });
    }

    #[test]
    fn test_docs_config_builders() {
        let config = DocsConfig::new("Inventory")
            .with_openapi_views(true)
            .with_swagger_ui(true)
            .with_swagger_template("templates/swagger.hbs");

        assert_eq!(config.app_name, "Inventory");
        assert!(config.swagger_ui);
        assert_eq!(
            config.swagger_template.as_deref(),
            Some(std::path::Path::new("templates/swagger.hbs"))
        );
    }
}
