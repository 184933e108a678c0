//! Platform HTTP Routes
//!
//! Model generation, listing and deployment under `/api`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bson::doc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{Deployment, GenerationJob, ModelSpec, RecordKind};
use crate::store::{to_public, StoreAdapter, StoreError};

use super::errors::{ApiError, ApiResult};
use super::state::AppState;

/// Default page size for list endpoints
pub const DEFAULT_LIST_LIMIT: i64 = 50;

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub job_id: String,
    pub model_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DeployRequest {
    pub model_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeployResponse {
    pub deployment_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

// ==================
// Routes
// ==================

/// Create platform routes
pub fn platform_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate", post(generate_handler))
        .route("/models", get(list_models_handler))
        .route("/deploy", post(deploy_handler))
        .route("/deployments", get(list_deployments_handler))
        .with_state(state)
}

/// Record a job, fabricate its model, then complete the job.
///
/// Not atomic: a crash between the steps can leave a running job behind.
async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PromptRequest>,
) -> ApiResult<(StatusCode, Json<GenerateResponse>)> {
    let store = &state.store;

    let mut job = GenerationJob::running(&request.prompt);
    let job_id = store.create_document(&job).await?;

    let model = ModelSpec::generated(&request.prompt, request.parameters);
    let model_id = match store.create_document(&model).await {
        Ok(id) => id,
        Err(e) => {
            mark_job_failed(store, &mut job, &job_id, &e).await;
            return Err(e.into());
        }
    };

    job.complete(&model_id)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let matched = store
        .update_document(
            RecordKind::GenerationJob,
            &job_id,
            doc! { "status": job.status.as_str(), "model_id": model_id.as_str() },
        )
        .await?;

    if !matched {
        let reason = format!("generation job {} disappeared before completion", job_id);
        log_event_with_fields(
            Event::JobFailed,
            &[
                ("error", reason.as_str()),
                ("job_id", job_id.as_str()),
                ("model_id", model_id.as_str()),
            ],
        );
        return Err(ApiError::Internal(reason));
    }

    log_event_with_fields(
        Event::JobCompleted,
        &[("job_id", job_id.as_str()), ("model_id", model_id.as_str())],
    );

    Ok((StatusCode::CREATED, Json(GenerateResponse { job_id, model_id })))
}

/// Best effort; the caller still gets the insert error.
async fn mark_job_failed(
    store: &StoreAdapter,
    job: &mut GenerationJob,
    job_id: &str,
    cause: &StoreError,
) {
    let cause = cause.to_string();

    let update_error = match job.fail() {
        Ok(()) => store
            .update_document(
                RecordKind::GenerationJob,
                job_id,
                doc! { "status": job.status.as_str() },
            )
            .await
            .err()
            .map(|e| e.to_string()),
        Err(e) => Some(e.to_string()),
    };

    let mut fields = vec![("job_id", job_id), ("error", cause.as_str())];
    if let Some(update_error) = update_error.as_deref() {
        fields.push(("update_error", update_error));
    }
    log_event_with_fields(Event::JobFailed, &fields);
}

async fn list_models_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    list_public(&state.store, RecordKind::ModelSpec, query.limit).await
}

async fn list_deployments_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    list_public(&state.store, RecordKind::Deployment, query.limit).await
}

async fn list_public(
    store: &StoreAdapter,
    kind: RecordKind,
    limit: i64,
) -> ApiResult<Json<Vec<Value>>> {
    let documents = store.get_documents(kind, limit).await?;
    Ok(Json(documents.into_iter().map(to_public).collect()))
}

async fn deploy_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeployRequest>,
) -> ApiResult<(StatusCode, Json<DeployResponse>)> {
    let store = &state.store;

    if store
        .find_document(RecordKind::ModelSpec, &request.model_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Model"));
    }

    let deployment = Deployment::for_model(&request.model_id, request.name, &state.public_base_url);
    let deployment_id = store.create_document(&deployment).await?;

    let url = deployment.url.as_deref().unwrap_or_default();
    log_event_with_fields(
        Event::ModelDeployed,
        &[
            ("deployment_id", deployment_id.as_str()),
            ("model_id", request.model_id.as_str()),
            ("url", url),
        ],
    );

    Ok((StatusCode::CREATED, Json(DeployResponse { deployment_id })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_server::ServerConfig;
    use crate::store::{DocumentStore, MemoryStore, StoreResult};
    use async_trait::async_trait;
    use bson::Document;

    #[test]
    fn test_list_query_default_limit() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 50);
    }

    #[test]
    fn test_prompt_request_parameters_optional() {
        let request: PromptRequest = serde_json::from_str(r#"{"prompt": "hi"}"#).unwrap();
        assert_eq!(request.prompt, "hi");
        assert!(request.parameters.is_none());
    }

    #[test]
    fn test_deploy_request_name_optional() {
        let request: DeployRequest = serde_json::from_str(r#"{"model_id": "abc"}"#).unwrap();
        assert_eq!(request.model_id, "abc");
        assert!(request.name.is_none());
    }

    /// In-memory store whose updates never match a record
    struct LostUpdateStore(MemoryStore);

    #[async_trait]
    impl DocumentStore for LostUpdateStore {
        fn database_name(&self) -> &str {
            self.0.database_name()
        }

        async fn ping(&self) -> StoreResult<()> {
            self.0.ping().await
        }

        async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<String> {
            self.0.insert_one(collection, document).await
        }

        async fn find_many(&self, collection: &str, limit: i64) -> StoreResult<Vec<Document>> {
            self.0.find_many(collection, limit).await
        }

        async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
            self.0.find_by_id(collection, id).await
        }

        async fn update_by_id(&self, _: &str, _: &str, _: Document) -> StoreResult<bool> {
            Ok(false)
        }

        async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
            self.0.list_collection_names().await
        }
    }

    #[tokio::test]
    async fn test_generate_unmatched_job_update_is_internal_error() {
        let adapter = StoreAdapter::new(Arc::new(LostUpdateStore(MemoryStore::new())));
        let state = Arc::new(AppState::new(adapter, &ServerConfig::default()));
        let request = PromptRequest {
            prompt: "p".to_string(),
            parameters: None,
        };

        let result = generate_handler(State(state), Json(request)).await;
        match result {
            Err(err @ ApiError::Internal(_)) => {
                assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            }
            Err(other) => panic!("unexpected error: {:?}", other),
            Ok(_) => panic!("generation reported success without completing its job"),
        }
    }

    #[tokio::test]
    async fn test_mark_job_failed_updates_status() {
        let adapter = StoreAdapter::new(Arc::new(MemoryStore::new()));
        let mut job = GenerationJob::running("p");
        let job_id = adapter.create_document(&job).await.unwrap();

        mark_job_failed(&adapter, &mut job, &job_id, &StoreError::Execution("x".into())).await;

        let stored = adapter
            .find_document(RecordKind::GenerationJob, &job_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.get_str("status").unwrap(), "failed");
    }
}
