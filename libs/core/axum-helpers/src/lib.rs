//! # Axum Helpers
//!
//! Shared pieces for the documentation server built on Axum.
//!
//! ## Modules
//!
//! - **[`server`]**: Server startup, request tracing, health check, graceful shutdown
//! - **[`errors`]**: Structured error responses with error codes
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = create_router(Router::new());
//!     create_app(router, &ServerConfig::default()).await
//! }
//! ```

pub mod errors;
pub mod server;

// Re-export server types
pub use server::{HealthResponse, create_app, create_router, health_router, shutdown_signal};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};
