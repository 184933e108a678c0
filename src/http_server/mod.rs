//! # HTTP Server Module
//!
//! Axum server for the model platform API.
//!
//! # Endpoints
//!
//! - `/` - Liveness marker
//! - `/test` - Store diagnostics
//! - `/schema` - Record kind names
//! - `/api/generate`, `/api/models` - Model generation and listing
//! - `/api/deploy`, `/api/deployments` - Deployment creation and listing
//! - `/serve/:model_id` - Mock inference

pub mod config;
pub mod errors;
pub mod meta_routes;
pub mod middleware;
pub mod platform_routes;
pub mod serve_routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use state::AppState;
