//! Error types for API Docs

use axum_helpers::AppError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for API Docs operations
pub type Result<T> = std::result::Result<T, ApiDocsError>;

/// Errors that can occur while assembling or rendering documentation
#[derive(Debug, Error)]
pub enum ApiDocsError {
    /// Spec could not be converted to or from JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A view contributed a document that is not an OpenAPI object
    #[error("Invalid OpenAPI document from view '{view}': {reason}")]
    InvalidDocument { view: String, reason: String },

    /// Template override could not be read
    #[error("Failed to read template {}: {source}", path.display())]
    TemplateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template source failed to compile
    #[error("Invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// Template failed to render
    #[error("Failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl From<ApiDocsError> for AppError {
    fn from(err: ApiDocsError) -> Self {
        match err {
            ApiDocsError::Serialization(e) => AppError::SerdeJson(e),
            ApiDocsError::TemplateIo { source, .. } => AppError::Io(source),
            ApiDocsError::Template(e) => AppError::Template(e.to_string()),
            ApiDocsError::Render(e) => AppError::Template(e.to_string()),
            other @ ApiDocsError::InvalidDocument { .. } => {
                AppError::InternalServerError(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_document_message() {
        let err = ApiDocsError::InvalidDocument {
            view: "contact".to_string(),
            reason: "paths is not an object".to_string(),
        };
        assert!(err.to_string().contains("contact"));
        assert!(err.to_string().contains("paths is not an object"));
    }

    #[test]
    fn test_conversion_to_app_error() {
        let err: ApiDocsError = serde_json::from_str::<String>("{").unwrap_err().into();
        assert!(matches!(AppError::from(err), AppError::SerdeJson(_)));

        let err = ApiDocsError::TemplateIo {
            path: PathBuf::from("/missing/swagger.hbs"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/missing/swagger.hbs"));
        assert!(matches!(AppError::from(err), AppError::Io(_)));
    }
}
