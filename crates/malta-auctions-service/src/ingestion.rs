//! Ingestion service
//!
//! Runs upstream documents through a connector, then stores every mapped
//! asset via the storage pipeline. Records that fail to map or validate are
//! listed in the report rather than aborting the run.

use async_trait::async_trait;
use malta_auctions_core::ComplianceEngine;
use malta_auctions_db::AssetRepository;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::connectors::customs::CUSTOMS_SOURCE;
use crate::connectors::transport_malta::TRANSPORT_MALTA_SOURCE;
use crate::connectors::{
    ConnectorOutput, CustomsConnector, TransportMaltaConfig, TransportMaltaConnector,
};
use crate::dto::{IngestionReport, SkippedRecord};
use crate::error::ServiceResult;

/// Trait for ingestion operations
#[async_trait]
pub trait IngestionService: Send + Sync {
    /// Ingest a Customs Department CSV seizure report
    async fn ingest_customs_report(&self, csv_data: &str) -> ServiceResult<IngestionReport>;

    /// Ingest a Transport Malta warrant notices page
    async fn ingest_warrant_notices(&self, html: &str) -> ServiceResult<IngestionReport>;

    /// Fetch the configured notices page and ingest it
    async fn refresh_warrant_notices(&self) -> ServiceResult<IngestionReport>;
}

/// Default implementation of IngestionService
pub struct DefaultIngestionService {
    repository: Arc<dyn AssetRepository>,
    engine: Arc<ComplianceEngine>,
    customs: CustomsConnector,
    transport_malta: TransportMaltaConnector,
}

impl DefaultIngestionService {
    /// Create a new ingestion service
    pub fn new(
        repository: Arc<dyn AssetRepository>,
        engine: Arc<ComplianceEngine>,
        transport_malta: TransportMaltaConfig,
    ) -> ServiceResult<Self> {
        Ok(Self {
            repository,
            customs: CustomsConnector::new(engine.clone()),
            engine,
            transport_malta: TransportMaltaConnector::new(transport_malta)?,
        })
    }

    /// Store the mapped assets of one connector run
    async fn store(&self, source: &str, output: ConnectorOutput) -> ServiceResult<IngestionReport> {
        let mut report = IngestionReport::new(source);
        report.skipped = output.skipped;

        for (record, asset) in output.assets {
            if let Err(e) = asset.validate() {
                warn!(record, error = %e, "Rejected ingested asset");
                report.skipped.push(SkippedRecord::new(record, e.to_string()));
                continue;
            }

            let stored = self.engine.prepare_for_storage(&asset);
            let id = self.repository.create(stored).await?;
            report.ingested.push(id);
        }

        report.skipped.sort_by_key(|s| s.record);

        info!(
            source,
            ingested = report.ingested_count(),
            skipped = report.skipped.len(),
            "Ingestion run finished"
        );
        Ok(report)
    }
}

#[async_trait]
impl IngestionService for DefaultIngestionService {
    #[instrument(skip(self, csv_data), fields(bytes = csv_data.len()))]
    async fn ingest_customs_report(&self, csv_data: &str) -> ServiceResult<IngestionReport> {
        let output = self.customs.parse(csv_data)?;
        self.store(CUSTOMS_SOURCE, output).await
    }

    #[instrument(skip(self, html), fields(bytes = html.len()))]
    async fn ingest_warrant_notices(&self, html: &str) -> ServiceResult<IngestionReport> {
        let output = self.transport_malta.parse(html)?;
        self.store(TRANSPORT_MALTA_SOURCE, output).await
    }

    #[instrument(skip(self), fields(url = %self.transport_malta.notices_url()))]
    async fn refresh_warrant_notices(&self) -> ServiceResult<IngestionReport> {
        let html = self.transport_malta.fetch().await?;
        self.ingest_warrant_notices(&html).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use malta_auctions_core::{AssetType, Disposition};
    use malta_auctions_db::InMemoryAssetRepository;

    fn service() -> (DefaultIngestionService, Arc<InMemoryAssetRepository>) {
        let repository = Arc::new(InMemoryAssetRepository::new());
        let engine = Arc::new(ComplianceEngine::with_defaults().unwrap());
        let service = DefaultIngestionService::new(
            repository.clone(),
            engine,
            TransportMaltaConfig::default(),
        )
        .unwrap();
        (service, repository)
    }

    #[tokio::test]
    async fn test_customs_report_is_stored() {
        let (service, repository) = service();
        let csv = "type,origin,value,serials\n\
                   Cash,Russia,120000,RUB5000AA112233;RUB5000AA445566\n\
                   Car,Malta,18000,\n";

        let report = service.ingest_customs_report(csv).await.unwrap();
        assert_eq!(report.source, "Customs Department");
        assert_eq!(report.ingested_count(), 2);
        assert!(report.skipped.is_empty());

        let cash = repository
            .list_by_type(AssetType::Currency)
            .await
            .unwrap()
            .pop()
            .unwrap();
        assert!(!cash.legal_status.un_sanctions_compliance);
        assert_eq!(cash.serial_numbers.as_ref().map(Vec::len), Some(2));
        assert_eq!(repository.list_by_compliance(true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_skipped_records_are_reported() {
        let (service, repository) = service();
        let csv = "type,origin,date\nCar,Malta,31/12/2024\nBoat,Malta,2024-05-01\n";

        let report = service.ingest_customs_report(csv).await.unwrap();
        assert_eq!(report.ingested_count(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].record, 1);
        assert_eq!(repository.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_warrant_notices_are_stored() {
        let (service, repository) = service();
        let html = r#"<p>Warrant of Arrest MT/ARR/2024-031 against the vessel "Ocean Pearl" (IMO 9556677), claim &euro;85,000.</p>"#;

        let report = service.ingest_warrant_notices(html).await.unwrap();
        assert_eq!(report.source, "Transport Malta");
        assert_eq!(report.ingested.len(), 1);

        let vessel = repository
            .find_by_id(&report.ingested[0])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(vessel.arrest_warrant_id.as_deref(), Some("MT/ARR/2024-031"));
        assert!(vessel.legal_status.un_sanctions_compliance);
        assert_eq!(vessel.sanction_status, None::<Disposition>);
    }

    #[tokio::test]
    async fn test_refresh_reports_unreachable_source() {
        let repository = Arc::new(InMemoryAssetRepository::new());
        let engine = Arc::new(ComplianceEngine::with_defaults().unwrap());
        let service = DefaultIngestionService::new(
            repository,
            engine,
            TransportMaltaConfig {
                notices_url: "http://127.0.0.1:9/notices".to_string(),
                timeout: std::time::Duration::from_secs(2),
            },
        )
        .unwrap();

        let err = service.refresh_warrant_notices().await.unwrap_err();
        assert!(matches!(err, crate::ServiceError::Upstream(_)));
    }
}
