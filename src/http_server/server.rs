//! # HTTP Server
//!
//! Combines the service, platform and serving routers behind CORS and
//! request logging.

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{log_event_with_fields, Event};
use crate::store::StoreAdapter;

use super::config::ServerConfig;
use super::meta_routes::meta_routes;
use super::middleware::log_requests;
use super::platform_routes::platform_routes;
use super::serve_routes::serve_routes;
use super::state::AppState;

/// HTTP server for the model platform
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `store`; an unconfigured store serves degraded
    pub fn new(config: ServerConfig, store: StoreAdapter) -> Self {
        let state = Arc::new(AppState::new(store, &config));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    fn build_router(config: &ServerConfig, state: Arc<AppState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            // Liveness, diagnostics and kinds at root level
            .merge(meta_routes(state.clone()))
            // Serving endpoint at root level
            .merge(serve_routes(state.clone()))
            // Generation and deployment under /api
            .nest("/api", platform_routes(state))
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(log_requests))
                    .layer(cors),
            )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured address; host names are resolved
    pub async fn bind(&self) -> Result<TcpListener, std::io::Error> {
        TcpListener::bind(self.config.socket_addr()).await
    }

    /// Bind and serve until ctrl-c
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = self.bind().await?;
        let local_addr = listener.local_addr()?.to_string();
        log_event_with_fields(Event::Serving, &[("addr", local_addr.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    // An error here means no signal handler; serve until killed instead
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn memory_server() -> HttpServer {
        let store = StoreAdapter::new(Arc::new(MemoryStore::new()));
        HttpServer::new(ServerConfig::default(), store)
    }

    #[test]
    fn test_server_creation() {
        assert_eq!(memory_server().socket_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::new(ServerConfig::with_port(8080), StoreAdapter::unconfigured());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_request_id_header() {
        let response = memory_server()
            .router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let id = response.headers().get("x-request-id").unwrap();
        assert_eq!(id.to_str().unwrap().len(), 36);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let response = memory_server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("origin", "https://ui.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_bind_resolves_host_name() {
        let mut config = ServerConfig::with_port(0);
        config.host = "localhost".to_string();
        let server = HttpServer::new(config, StoreAdapter::unconfigured());

        let listener = server.bind().await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_cors_origin_list() {
        let config =
            ServerConfig::default().cors_origins(vec!["https://ui.example.com".to_string()]);
        let router = HttpServer::new(config, StoreAdapter::unconfigured()).router();

        let allowed = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("origin", "https://ui.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers().get("access-control-allow-origin").unwrap(),
            "https://ui.example.com"
        );

        let other = router
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("origin", "https://evil.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(other.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = memory_server()
            .router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
