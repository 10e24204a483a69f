//! PostgreSQL implementation of AssetRepository
//!
//! Assets live in `auction_assets`; currency serial numbers live in
//! `asset_serials`, keyed by asset id and position.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use malta_auctions_core::{
    AssetId, AssetType, AuctionAsset, ContrabandType, LegalStatus, SeizureReason,
};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::error::{DbError, DbResult};
use crate::repository::{normalize_for_storage, AssetRepository};

const SELECT_ASSETS: &str = r#"
    SELECT
        id, asset_type, seizure_reason,
        un_sanctions_compliance, local_court_order,
        contraband_type, imo_number, arrest_warrant_id,
        description, debt_amount, value, origin, source, date_added
    FROM auction_assets
"#;

const ORDER_NEWEST_FIRST: &str = "ORDER BY date_added DESC, id DESC";

/// PostgreSQL implementation of AssetRepository
#[derive(Debug, Clone)]
pub struct PostgresAssetRepository {
    pool: PgPool,
}

impl PostgresAssetRepository {
    /// Create a new PostgreSQL asset repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Map rows to assets and attach their serial numbers in one query
    async fn hydrate(&self, rows: Vec<PgRow>) -> DbResult<Vec<AuctionAsset>> {
        let mut assets = rows
            .into_iter()
            .map(row_to_asset)
            .collect::<DbResult<Vec<_>>>()?;

        let ids: Vec<String> = assets
            .iter()
            .filter(|a| a.asset_type == AssetType::Currency)
            .filter_map(|a| a.id.map(|id| id.to_string()))
            .collect();

        if ids.is_empty() {
            return Ok(assets);
        }

        let serial_rows = sqlx::query(
            r#"
            SELECT asset_id, serial_number
            FROM asset_serials
            WHERE asset_id = ANY($1)
            ORDER BY asset_id, position
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await?;

        let mut serials: HashMap<String, Vec<String>> = HashMap::new();
        for row in serial_rows {
            let asset_id: String = row.try_get("asset_id")?;
            let serial: String = row.try_get("serial_number")?;
            serials.entry(asset_id).or_default().push(serial);
        }

        for asset in &mut assets {
            if let Some(id) = asset.id {
                asset.serial_numbers = serials.remove(&id.to_string());
            }
        }

        Ok(assets)
    }
}

#[async_trait]
impl AssetRepository for PostgresAssetRepository {
    #[instrument(skip(self, asset), fields(asset_type = %asset.asset_type))]
    async fn create(&self, asset: AuctionAsset) -> DbResult<AssetId> {
        let id = AssetId::new();
        let asset = normalize_for_storage(asset, id);
        let id_str = id.to_string();

        debug!(asset_id = %id, "Creating asset in database");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO auction_assets (
                id, asset_type, seizure_reason,
                un_sanctions_compliance, local_court_order,
                contraband_type, imo_number, arrest_warrant_id,
                description, debt_amount, value, origin, source, date_added
            ) VALUES (
                $1, $2, $3,
                $4, $5,
                $6, $7, $8,
                $9, $10, $11, $12, $13, $14
            )
            "#,
        )
        .bind(&id_str)
        .bind(asset.asset_type.as_str())
        .bind(asset.seizure_reason.as_str())
        .bind(asset.legal_status.un_sanctions_compliance)
        .bind(&asset.legal_status.local_court_order)
        .bind(asset.contraband_type.map(|c| c.as_str()))
        .bind(&asset.imo_number)
        .bind(&asset.arrest_warrant_id)
        .bind(&asset.description)
        .bind(&asset.debt_amount)
        .bind(&asset.value)
        .bind(&asset.origin)
        .bind(&asset.source)
        .bind(asset.date_added)
        .execute(&mut *tx)
        .await?;

        if let Some(ref serials) = asset.serial_numbers {
            for (position, serial) in serials.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO asset_serials (asset_id, position, serial_number)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(&id_str)
                .bind(position as i32)
                .bind(serial)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        debug!("Asset created successfully");
        Ok(id)
    }

    #[instrument(skip(self), fields(asset_id = %id))]
    async fn find_by_id(&self, id: &AssetId) -> DbResult<Option<AuctionAsset>> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_ASSETS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> DbResult<Vec<AuctionAsset>> {
        let rows = sqlx::query(&format!("{} {}", SELECT_ASSETS, ORDER_NEWEST_FIRST))
            .fetch_all(&self.pool)
            .await?;

        self.hydrate(rows).await
    }

    #[instrument(skip(self), fields(asset_type = %asset_type))]
    async fn list_by_type(&self, asset_type: AssetType) -> DbResult<Vec<AuctionAsset>> {
        let rows = sqlx::query(&format!(
            "{} WHERE asset_type = $1 {}",
            SELECT_ASSETS, ORDER_NEWEST_FIRST
        ))
        .bind(asset_type.as_str())
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    #[instrument(skip(self))]
    async fn list_by_compliance(&self, compliant: bool) -> DbResult<Vec<AuctionAsset>> {
        let rows = sqlx::query(&format!(
            "{} WHERE un_sanctions_compliance = $1 {}",
            SELECT_ASSETS, ORDER_NEWEST_FIRST
        ))
        .bind(compliant)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn count(&self) -> DbResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM auction_assets")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("count")?)
    }

    async fn health_check(&self) -> DbResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}

fn row_to_asset(row: PgRow) -> DbResult<AuctionAsset> {
    let id_str: String = row.try_get("id")?;
    let id = AssetId::from_str(&id_str)
        .map_err(|e| DbError::InvalidData(format!("Invalid asset ID: {}", e)))?;

    let asset_type: AssetType = parse_column(&row, "asset_type")?;
    let seizure_reason: SeizureReason = parse_column(&row, "seizure_reason")?;

    let contraband_type = row
        .try_get::<Option<String>, _>("contraband_type")?
        .map(|s| ContrabandType::from_str(&s))
        .transpose()?;

    let date_added: DateTime<Utc> = row.try_get("date_added")?;

    Ok(AuctionAsset {
        id: Some(id),
        asset_type,
        seizure_reason,
        legal_status: LegalStatus::new(
            row.try_get("un_sanctions_compliance")?,
            row.try_get("local_court_order")?,
        ),
        contraband_type,
        imo_number: row.try_get("imo_number")?,
        arrest_warrant_id: row.try_get("arrest_warrant_id")?,
        description: row.try_get("description")?,
        debt_amount: row.try_get("debt_amount")?,
        value: row.try_get("value")?,
        origin: row.try_get("origin")?,
        source: row.try_get("source")?,
        date_added,
        serial_numbers: None,
        sanction_status: None,
        compliance_disclaimer: None,
    })
}

fn parse_column<T>(row: &PgRow, column: &str) -> DbResult<T>
where
    T: FromStr<Err = malta_auctions_core::RegistryError>,
{
    let raw: String = row.try_get(column)?;
    Ok(T::from_str(&raw)?)
}
