//! Service HTTP Routes
//!
//! Liveness (`/`), store diagnostics (`/test`) and the record kind
//! listing (`/schema`).

use std::env;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::schema::RecordKind;
use crate::store::{DATABASE_NAME_ENV, DATABASE_URL_ENV};

use super::state::AppState;

/// Diagnostics report collections cap
const MAX_REPORTED_COLLECTIONS: usize = 10;

/// Diagnostics report error text cap, in characters
const MAX_ERROR_CHARS: usize = 50;

/// Liveness response
#[derive(Debug, Serialize)]
pub struct LiveResponse {
    pub message: String,
}

/// Store diagnostics response. Always 200; problems show up in the fields.
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Record kinds response
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub models: Vec<&'static str>,
}

/// Create service routes
pub fn meta_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(live_handler))
        .route("/test", get(diagnostics_handler))
        .route("/schema", get(schema_handler))
        .with_state(state)
}

async fn live_handler() -> impl IntoResponse {
    let response = LiveResponse {
        message: "AI Platform backend is live".to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn diagnostics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut response = DiagnosticsResponse {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: "❌ Not Set".to_string(),
        database_name: "❌ Not Set".to_string(),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if state.store.is_configured() {
        response.database = "✅ Available".to_string();

        let listed = match state.store.ping().await {
            Ok(()) => {
                response.connection_status = "Connected".to_string();
                state.store.collection_names().await
            }
            Err(e) => Err(e),
        };

        match listed {
            Ok(names) => {
                response.collections = names.into_iter().take(MAX_REPORTED_COLLECTIONS).collect();
                response.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                response.database = format!(
                    "⚠️  Connected but Error: {}",
                    truncate_chars(&e.to_string(), MAX_ERROR_CHARS)
                );
            }
        }
    }

    // Reported from the live environment, not from startup configuration
    response.database_url = env_marker(DATABASE_URL_ENV);
    response.database_name = env_marker(DATABASE_NAME_ENV);

    (StatusCode::OK, Json(response))
}

async fn schema_handler() -> impl IntoResponse {
    let response = SchemaResponse {
        models: RecordKind::collection_names(),
    };

    (StatusCode::OK, Json(response))
}

fn env_marker(var: &str) -> String {
    match env::var(var) {
        Ok(value) if !value.is_empty() => "✅ Set".to_string(),
        _ => "❌ Not Set".to_string(),
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
