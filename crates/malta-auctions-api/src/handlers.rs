//! API request handlers
//!
//! This module implements HTTP request handlers for all API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use malta_auctions_core::{AssetId, AssetType, AuctionAsset, BidderInfo};
use malta_auctions_service::{
    CreateAssetResponse, EligibilityResponse, IngestionReport, ServiceRegistry,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    responses::{created, listed, ok, ApiResponse, ComponentHealth, HealthResponse},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Service registry
    pub services: Arc<ServiceRegistry>,
}

impl AppState {
    /// Create new application state
    pub fn new(services: ServiceRegistry) -> Self {
        Self {
            services: Arc::new(services),
        }
    }
}

fn parse_asset_id(id: &str) -> ApiResult<AssetId> {
    id.parse::<AssetId>()
        .map_err(|e| ApiError::bad_request(format!("Invalid asset ID: {}", e)))
}

// ============================================================================
// Catalog Handlers
// ============================================================================

/// List all assets
#[instrument(skip(state))]
pub async fn list_assets(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<AuctionAsset>>>> {
    let assets = state.services.catalog().list_assets().await?;
    debug!(count = assets.len(), "Listed assets");

    Ok(Json(listed(assets)))
}

/// List assets of one type
#[instrument(skip(state))]
pub async fn list_assets_by_type(
    State(state): State<AppState>,
    Path(asset_type): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<AuctionAsset>>>> {
    let asset_type = asset_type
        .parse::<AssetType>()
        .map_err(|_| ApiError::bad_request("Invalid asset type"))?;

    let assets = state
        .services
        .catalog()
        .list_assets_by_type(asset_type)
        .await?;

    Ok(Json(listed(assets)))
}

/// Query parameters for the sanctions listing
#[derive(Debug, Default, Deserialize)]
pub struct ComplianceQuery {
    pub compliant: Option<String>,
}

impl ComplianceQuery {
    /// Only the literal `true` selects compliant assets
    pub fn is_compliant(&self) -> bool {
        self.compliant.as_deref() == Some("true")
    }
}

/// List assets by UN sanctions compliance
#[instrument(skip(state))]
pub async fn list_assets_by_compliance(
    State(state): State<AppState>,
    Query(query): Query<ComplianceQuery>,
) -> ApiResult<Json<ApiResponse<Vec<AuctionAsset>>>> {
    let assets = state
        .services
        .catalog()
        .list_assets_by_compliance(query.is_compliant())
        .await?;

    Ok(Json(listed(assets)))
}

/// Get asset by ID
#[instrument(skip(state))]
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<AuctionAsset>>> {
    let asset_id = parse_asset_id(&id)?;
    let asset = state.services.catalog().get_asset(&asset_id).await?;

    Ok(Json(ok(asset)))
}

/// Add a new asset to the catalog
#[instrument(skip(state, payload))]
pub async fn create_asset(
    State(state): State<AppState>,
    payload: Result<Json<AuctionAsset>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CreateAssetResponse>>)> {
    let Json(asset) = payload?;
    info!(asset_type = %asset.asset_type, source = %asset.source, "Creating asset");

    let response = state.services.catalog().create_asset(asset).await?;

    Ok(created(response))
}

/// Check whether a bidder may bid on an asset
#[instrument(skip(state, payload))]
pub async fn check_eligibility(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BidderInfo>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<EligibilityResponse>>> {
    let asset_id = parse_asset_id(&id)?;
    let Json(bidder) = payload
        .map_err(|e| ApiError::bad_request(format!("Invalid bidder data: {}", e.body_text())))?;

    let response = state
        .services
        .catalog()
        .check_eligibility(&asset_id, &bidder)
        .await?;

    Ok(Json(ok(response)))
}

// ============================================================================
// Ingestion Handlers
// ============================================================================

/// Ingest a Customs Department CSV report
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn ingest_customs(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<Json<ApiResponse<IngestionReport>>> {
    let report = state
        .services
        .ingestion()
        .ingest_customs_report(&body)
        .await?;

    Ok(Json(ok(report)))
}

/// Ingest a Transport Malta warrant notices page posted by the caller
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn ingest_transport_malta(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<Json<ApiResponse<IngestionReport>>> {
    let report = state
        .services
        .ingestion()
        .ingest_warrant_notices(&body)
        .await?;

    Ok(Json(ok(report)))
}

/// Fetch and ingest the configured Transport Malta notices page
#[instrument(skip(state))]
pub async fn refresh_transport_malta(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<IngestionReport>>> {
    let report = state
        .services
        .ingestion()
        .refresh_warrant_notices()
        .await?;

    Ok(Json(ok(report)))
}

// ============================================================================
// Health & Version Handlers
// ============================================================================

/// Health check endpoint
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> HealthResponse {
    debug!("Health check requested");

    let catalog = state.services.catalog();
    let repository = match catalog.health_check().await {
        Ok(()) => match catalog.count_assets().await {
            Ok(count) => ComponentHealth::healthy().with_metric("assets", count.into()),
            Err(e) => {
                warn!(error = %e, "Repository reachable but asset count failed");
                ComponentHealth::degraded(format!("Asset count unavailable: {}", e))
            }
        },
        Err(e) => {
            warn!(error = %e, "Repository health check failed");
            ComponentHealth::unhealthy(format!("Repository error: {}", e))
        }
    };

    HealthResponse::healthy()
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_check("repository", repository)
        .with_check("compliance", ComponentHealth::healthy())
        .compute_status()
}

/// Get API version information
#[instrument]
pub async fn version_info() -> Json<ApiResponse<VersionInfo>> {
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_version: "v1".to_string(),
        build_timestamp: option_env!("BUILD_TIMESTAMP")
            .unwrap_or("unknown")
            .to_string(),
    };

    Json(ok(info))
}

/// Version information
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Semantic version
    pub version: String,

    /// API version
    pub api_version: String,

    /// Build timestamp
    pub build_timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::HealthStatus;
    use async_trait::async_trait;
    use malta_auctions_core::ComplianceEngine;
    use malta_auctions_db::{AssetRepository, DbError, DbResult};
    use malta_auctions_service::TransportMaltaConfig;

    /// Backend that answers pings but whose pool is exhausted for reads
    struct ExhaustedRepository;

    #[async_trait]
    impl AssetRepository for ExhaustedRepository {
        async fn create(&self, _asset: AuctionAsset) -> DbResult<AssetId> {
            Err(DbError::Pool("Connection pool timeout".to_string()))
        }

        async fn find_by_id(&self, _id: &AssetId) -> DbResult<Option<AuctionAsset>> {
            Err(DbError::Pool("Connection pool timeout".to_string()))
        }

        async fn list_all(&self) -> DbResult<Vec<AuctionAsset>> {
            Err(DbError::Pool("Connection pool timeout".to_string()))
        }

        async fn list_by_type(&self, _asset_type: AssetType) -> DbResult<Vec<AuctionAsset>> {
            Err(DbError::Pool("Connection pool timeout".to_string()))
        }

        async fn list_by_compliance(&self, _compliant: bool) -> DbResult<Vec<AuctionAsset>> {
            Err(DbError::Pool("Connection pool timeout".to_string()))
        }

        async fn count(&self) -> DbResult<i64> {
            Err(DbError::Query("relation \"auction_assets\" does not exist".to_string()))
        }

        async fn health_check(&self) -> DbResult<()> {
            Ok(())
        }
    }

    fn exhausted_state() -> AppState {
        let engine = Arc::new(ComplianceEngine::with_defaults().unwrap());
        let services = ServiceRegistry::new(
            Arc::new(ExhaustedRepository),
            engine,
            TransportMaltaConfig::default(),
        )
        .unwrap();
        AppState::new(services)
    }

    #[tokio::test]
    async fn test_health_degraded_when_count_fails() {
        let health = health_check(State(exhausted_state())).await;
        assert_eq!(health.status, HealthStatus::Degraded);

        let checks = health.checks.as_ref().unwrap();
        assert_eq!(checks["repository"].status, HealthStatus::Degraded);
        assert_eq!(checks["compliance"].status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn test_exhausted_pool_is_service_unavailable() {
        let err = match list_assets(State(exhausted_state())).await {
            Ok(_) => panic!("listing must fail while the pool is exhausted"),
            Err(err) => err,
        };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.message().starts_with("Service unavailable"));
    }

    #[test]
    fn test_compliance_query_only_true_is_compliant() {
        let query = |v: Option<&str>| ComplianceQuery {
            compliant: v.map(str::to_string),
        };

        assert!(query(Some("true")).is_compliant());
        assert!(!query(Some("TRUE")).is_compliant());
        assert!(!query(Some("1")).is_compliant());
        assert!(!query(Some("false")).is_compliant());
        assert!(!query(None).is_compliant());
    }

    #[test]
    fn test_parse_asset_id() {
        assert!(parse_asset_id("01ARZ3NDEKTSV4RRFFQ69G5FAV").is_ok());

        let err = parse_asset_id("not-an-id").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.message().starts_with("Invalid asset ID"));
    }
}
