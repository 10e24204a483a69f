//! API route definitions
//!
//! This module defines all API routes and builds the router.

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use tower_http::services::ServeDir;

use crate::handlers::{
    check_eligibility, create_asset, get_asset, health_check, ingest_customs,
    ingest_transport_malta, list_assets, list_assets_by_compliance, list_assets_by_type,
    refresh_transport_malta, version_info, AppState,
};

/// Build the API router with all routes
pub fn build_router(state: AppState) -> Router {
    build_router_with_config(state, &RouteConfig::default())
}

/// Build the API router under a configured base path, optionally serving a
/// static front end for every unmatched route
pub fn build_router_with_config(state: AppState, config: &RouteConfig) -> Router {
    let router = Router::new()
        // Health and info endpoints
        .route("/health", get(health_check))
        .route("/version", get(version_info))
        .nest(&config.base_path, build_api_routes())
        .with_state(state);

    match &config.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Build catalog and ingestion routes
fn build_api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/assets", get(list_assets).post(create_asset))
        .route("/assets/type/:asset_type", get(list_assets_by_type))
        .route("/assets/sanctions", get(list_assets_by_compliance))
        .route("/assets/:id", get(get_asset))
        .route("/assets/:id/eligibility", post(check_eligibility))
        // Ingestion
        .route("/ingest/customs", post(ingest_customs))
        .route("/ingest/transport-malta", post(ingest_transport_malta))
        .route(
            "/ingest/transport-malta/refresh",
            post(refresh_transport_malta),
        )
}

/// Route configuration
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// API base path
    pub base_path: String,

    /// Directory served for unmatched routes
    pub static_dir: Option<PathBuf>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            base_path: "/api".to_string(),
            static_dir: None,
        }
    }
}

impl RouteConfig {
    /// Create a new route config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base path
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Serve a static front end from `dir`
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_config_default() {
        let config = RouteConfig::default();
        assert_eq!(config.base_path, "/api");
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_route_config_builder() {
        let config = RouteConfig::new()
            .with_base_path("/catalog")
            .with_static_dir("public");

        assert_eq!(config.base_path, "/catalog");
        assert_eq!(config.static_dir, Some(PathBuf::from("public")));
    }
}
