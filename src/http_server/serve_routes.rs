//! Serving HTTP Routes
//!
//! `GET /serve/:model_id?q=` answers with a mock inference string.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::schema::RecordKind;

use super::errors::{ApiError, ApiResult};
use super::state::AppState;

const FALLBACK_MODEL_NAME: &str = "Model";
const DEFAULT_QUERY: &str = "ping";

#[derive(Debug, Deserialize)]
pub struct ServeQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServeResponse {
    pub model_id: String,
    pub status: String,
    pub output: String,
}

/// Create serving routes
pub fn serve_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/serve/:model_id", get(serve_handler))
        .with_state(state)
}

async fn serve_handler(
    State(state): State<Arc<AppState>>,
    Path(model_id): Path<String>,
    Query(query): Query<ServeQuery>,
) -> ApiResult<Json<ServeResponse>> {
    let model = state
        .store
        .find_document(RecordKind::ModelSpec, &model_id)
        .await?
        .ok_or(ApiError::NotFound("Model"))?;

    let name = model
        .get_str("name")
        .ok()
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_MODEL_NAME);

    Ok(Json(ServeResponse {
        output: mock_output(name, query.q.as_deref()),
        model_id,
        status: "ok".to_string(),
    }))
}

/// `Model '<name>' responded to: <q>`; an empty or missing query reads as "ping"
pub fn mock_output(name: &str, q: Option<&str>) -> String {
    let q = q.filter(|q| !q.is_empty()).unwrap_or(DEFAULT_QUERY);
    format!("Model '{}' responded to: {}", name, q)
}
