//! Malta Auctions API Layer
//!
//! This crate provides the REST API for the seized-asset catalog using Axum.
//! It includes request handlers, middleware, error handling, and response types.
//!
//! # Architecture
//!
//! The API layer is organized into:
//!
//! - **Handlers**: Request handlers for catalog, eligibility and ingestion
//! - **Routes**: Route definitions and router configuration
//! - **Middleware**: Tower middleware for logging, CORS, compression, etc.
//! - **Error Handling**: Conversion of service errors to HTTP responses
//! - **Responses**: Standard response wrappers and types
//!
//! # Example
//!
//! ```rust,no_run
//! use malta_auctions_api::build_api_server;
//! use malta_auctions_service::ServiceRegistry;
//!
//! # async fn example(services: ServiceRegistry) -> std::io::Result<()> {
//! let app = build_api_server(services);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod routes;

// Re-export main types for convenience
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use handlers::{AppState, ComplianceQuery, VersionInfo};
pub use middleware::{CorsConfig, MiddlewareConfig, UuidRequestIdGenerator};
pub use responses::{
    created, listed, ok, ApiResponse, ComponentHealth, HealthResponse, HealthStatus,
    ResponseMeta,
};
pub use routes::{build_router, build_router_with_config, RouteConfig};

use axum::Router;
use malta_auctions_service::ServiceRegistry;

/// Build a complete API server with middleware
///
/// This is a convenience function that builds a router with all middleware
/// configured using default settings.
pub fn build_api_server(services: ServiceRegistry) -> Router {
    build_api_server_with_config(services, RouteConfig::default(), MiddlewareConfig::default())
}

/// Build API server with custom route and middleware configuration
///
/// # Example
///
/// ```rust,no_run
/// use malta_auctions_api::{build_api_server_with_config, MiddlewareConfig, RouteConfig};
/// use malta_auctions_service::ServiceRegistry;
///
/// # fn example(services: ServiceRegistry) {
/// let routes = RouteConfig::new().with_static_dir("public");
/// let middleware = MiddlewareConfig::new().with_timeout(60);
///
/// let app = build_api_server_with_config(services, routes, middleware);
/// # }
/// ```
pub fn build_api_server_with_config(
    services: ServiceRegistry,
    route_config: RouteConfig,
    middleware_config: MiddlewareConfig,
) -> Router {
    let state = AppState::new(services);
    let router = build_router_with_config(state, &route_config);

    middleware_config.apply(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use malta_auctions_core::ComplianceEngine;
    use malta_auctions_db::InMemoryAssetRepository;
    use malta_auctions_service::TransportMaltaConfig;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let repository = Arc::new(InMemoryAssetRepository::new());
        let engine = Arc::new(ComplianceEngine::with_defaults().unwrap());
        let services =
            ServiceRegistry::new(repository, engine, TransportMaltaConfig::default()).unwrap();
        build_api_server(services)
    }

    async fn status_of(method: &str, uri: &str, body: &str) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_health_is_ok_with_memory_repository() {
        assert_eq!(status_of("GET", "/health", "").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_type_is_bad_request() {
        assert_eq!(
            status_of("GET", "/api/assets/type/spaceship", "").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_malformed_asset_is_bad_request() {
        assert_eq!(
            status_of("POST", "/api/assets", "{not json").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_unknown_route_without_static_dir() {
        assert_eq!(
            status_of("GET", "/nowhere", "").await,
            StatusCode::NOT_FOUND
        );
    }
}
