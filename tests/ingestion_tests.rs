//! Ingestion Integration Tests
//!
//! Customs CSV reports and Transport Malta warrant notices posted to the API
//! or fetched from a stand-in notices page.

mod common;

use common::{assert_status, assert_success, fixtures, parse_json, spawn_notices_page, TestApp};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_customs_report_ingestion() {
    let app = TestApp::new().await;

    let response = app
        .post_text("/api/ingest/customs", "text/csv", fixtures::CUSTOMS_REPORT)
        .await;
    assert_success(&response);

    let body: Value = parse_json(response).await;
    assert_eq!(body["data"]["source"], "Customs Department");
    assert_eq!(body["data"]["ingested"].as_array().unwrap().len(), 2);
    assert!(body["data"].get("skipped").is_none());

    let currency: Value = parse_json(app.get("/api/assets/type/currency").await).await;
    let cash = &currency["data"][0];
    assert_eq!(cash["seizureReason"], "sanctions");
    assert_eq!(cash["origin"], "Russia");
    assert_eq!(cash["value"], "€120000");
    assert_eq!(cash["contrabandType"], "currency");
    assert_eq!(cash["legalStatus"]["unSanctionsCompliance"], false);
    assert_eq!(
        cash["serialNumbers"],
        json!(["RUB5XXXX2233", "RUB5XXXX5566"])
    );

    let vehicles: Value = parse_json(app.get("/api/assets/type/vehicle").await).await;
    let vehicle = &vehicles["data"][0];
    assert_eq!(vehicle["seizureReason"], "contraband");
    assert_eq!(vehicle["source"], "Customs Department");
    assert_eq!(vehicle["sanctionStatus"], "CLEAR");
    assert!(vehicle["description"].as_str().unwrap().contains("Toyota Hilux 2019"));
}

#[tokio::test]
async fn test_customs_report_with_bad_rows() {
    let app = TestApp::new().await;
    let csv = "type,origin,date\nCar,Malta,not-a-date\nBoat,Malta,2024-05-01\n";

    let response = app.post_text("/api/ingest/customs", "text/csv", csv).await;
    assert_success(&response);

    let body: Value = parse_json(response).await;
    assert_eq!(body["data"]["ingested"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["skipped"][0]["record"], 1);

    let health: Value = parse_json(app.get("/health").await).await;
    assert_eq!(health["checks"]["repository"]["metrics"]["assets"], 1);
}

#[tokio::test]
async fn test_empty_customs_report_is_rejected() {
    let app = TestApp::new().await;

    let response = app.post_text("/api/ingest/customs", "text/csv", "  \n").await;
    assert_status(&response, StatusCode::BAD_REQUEST);

    let body: Value = parse_json(response).await;
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_posted_warrant_notices() {
    let app = TestApp::new().await;

    let response = app
        .post_text(
            "/api/ingest/transport-malta",
            "text/html",
            fixtures::WARRANT_NOTICES,
        )
        .await;
    assert_success(&response);

    let body: Value = parse_json(response).await;
    assert_eq!(body["data"]["source"], "Transport Malta");
    assert_eq!(body["data"]["ingested"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["skipped"].as_array().unwrap().len(), 1);

    let id = body["data"]["ingested"][0].as_str().unwrap();
    let asset: Value = parse_json(app.get(&format!("/api/assets/{}", id)).await).await;
    let vessel = &asset["data"];
    assert_eq!(vessel["type"], "vessel");
    assert_eq!(vessel["seizureReason"], "debt");
    assert_eq!(vessel["arrestWarrantId"], "MT/ARR/2025-087");
    assert_eq!(vessel["legalStatus"]["localCourtOrder"], "MT/ARR/2025-087");
    assert_eq!(vessel["imoNumber"], "9556677");
    assert_eq!(vessel["debtAmount"], "€214,500");
    assert_eq!(vessel["description"], "Ocean Pearl (IMO: 9556677)");
    assert!(vessel["complianceDisclaimer"]
        .as_str()
        .unwrap()
        .starts_with("MARITIME NOTICE:"));
}

#[tokio::test]
async fn test_refresh_from_notices_page() {
    let notices_url = spawn_notices_page(fixtures::WARRANT_NOTICES).await;
    let app = TestApp::with_notices_url(notices_url).await;

    let response = app
        .post_text("/api/ingest/transport-malta/refresh", "text/plain", "")
        .await;
    assert_success(&response);

    let body: Value = parse_json(response).await;
    assert_eq!(body["data"]["ingested"].as_array().unwrap().len(), 1);

    let vessels: Value = parse_json(app.get("/api/assets/type/vessel").await).await;
    assert_eq!(vessels["data"][0]["arrestWarrantId"], "MT/ARR/2025-087");
}

#[tokio::test]
async fn test_refresh_with_unreachable_source() {
    let app = TestApp::with_notices_url("http://127.0.0.1:9/notices").await;

    let response = app
        .post_text("/api/ingest/transport-malta/refresh", "text/plain", "")
        .await;
    assert_status(&response, StatusCode::BAD_GATEWAY);

    let body: Value = parse_json(response).await;
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_refresh_with_missing_page() {
    let notices_url = spawn_notices_page(fixtures::WARRANT_NOTICES).await;
    let app = TestApp::with_notices_url(notices_url.replace("/notices", "/missing")).await;

    let response = app
        .post_text("/api/ingest/transport-malta/refresh", "text/plain", "")
        .await;
    assert_status(&response, StatusCode::BAD_GATEWAY);
}
