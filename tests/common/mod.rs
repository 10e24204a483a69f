//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests including
//! test setup, fixtures, and helper functions.

#![allow(dead_code)]

use axum::{routing::get, Router};
use malta_auctions_api::{build_api_server_with_config, MiddlewareConfig, RouteConfig};
use malta_auctions_core::ComplianceEngine;
use malta_auctions_db::InMemoryAssetRepository;
use malta_auctions_service::{ServiceRegistry, TransportMaltaConfig};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub mod fixtures;

/// Test application backed by the in-memory repository
pub struct TestApp {
    pub address: String,
    pub services: ServiceRegistry,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        Self::with_config(TransportMaltaConfig::default(), RouteConfig::default()).await
    }

    /// Create a test application that fetches warrant notices from `notices_url`
    pub async fn with_notices_url(notices_url: impl Into<String>) -> Self {
        let transport_malta = TransportMaltaConfig {
            notices_url: notices_url.into(),
            timeout: Duration::from_secs(2),
        };
        Self::with_config(transport_malta, RouteConfig::default()).await
    }

    /// Create a test application with custom settings
    pub async fn with_config(transport_malta: TransportMaltaConfig, routes: RouteConfig) -> Self {
        let repository = Arc::new(InMemoryAssetRepository::new());
        let engine = Arc::new(ComplianceEngine::with_defaults().expect("Default rules"));
        let services = ServiceRegistry::new(repository, engine, transport_malta)
            .expect("Failed to create services");

        let app = build_api_server_with_config(services.clone(), routes, MiddlewareConfig::default());
        let address = spawn(app).await;

        Self { address, services }
    }

    /// Get base URL
    pub fn url(&self) -> &str {
        &self.address
    }

    /// Create HTTP client
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build client")
    }

    /// GET a path relative to the base URL
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client()
            .get(format!("{}{}", self.url(), path))
            .send()
            .await
            .expect("Failed to send request")
    }

    /// POST a JSON body to a path relative to the base URL
    pub async fn post_json<T: serde::Serialize>(&self, path: &str, body: &T) -> reqwest::Response {
        self.client()
            .post(format!("{}{}", self.url(), path))
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }

    /// POST a raw text body to a path relative to the base URL
    pub async fn post_text(&self, path: &str, content_type: &str, body: &str) -> reqwest::Response {
        self.client()
            .post(format!("{}{}", self.url(), path))
            .header("Content-Type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send request")
    }

    /// Create an asset and return its id
    pub async fn create_asset(&self, asset: &serde_json::Value) -> String {
        let response = self.post_json("/api/assets", asset).await;
        assert_status(&response, reqwest::StatusCode::CREATED);

        let body: serde_json::Value = parse_json(response).await;
        body["data"]["id"]
            .as_str()
            .expect("Created asset has an id")
            .to_string()
    }
}

/// Serve `app` on a random local port and return its base URL
async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = listener.local_addr().expect("Failed to get local address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Failed to start test server");
    });

    format!("http://{}", address)
}

/// Stand-in for the Transport Malta notices page; returns its URL
pub async fn spawn_notices_page(html: &'static str) -> String {
    let app = Router::new().route("/notices", get(move || async move { axum::response::Html(html) }));
    format!("{}/notices", spawn(app).await)
}

/// Parse JSON response
pub async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> T {
    response
        .json::<T>()
        .await
        .expect("Failed to parse JSON response")
}

/// Assert response status
pub fn assert_status(response: &reqwest::Response, expected: reqwest::StatusCode) {
    assert_eq!(
        response.status(),
        expected,
        "Expected status {}, got {}",
        expected,
        response.status()
    );
}

/// Assert response is successful (2xx)
pub fn assert_success(response: &reqwest::Response) {
    assert!(
        response.status().is_success(),
        "Expected success status, got {}",
        response.status()
    );
}
