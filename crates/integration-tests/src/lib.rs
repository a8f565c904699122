//! Integration tests for Pehenava.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pehenava-integration-tests
//! ```
//!
//! Tests drive the full storefront router in-process with
//! `tower::ServiceExt::oneshot`. Outbound mail goes to a [`RecordingRelay`]
//! unless a test points the real `SendGrid` client at a local stub.
//!
//! # Test Categories
//!
//! - `storefront_api` - JSON API and SPA fallback
//! - `sendgrid_relay` - `SendGrid` client against a stub server

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pehenava_core::Email;
use pehenava_storefront::config::{MailConfig, StorefrontConfig};
use pehenava_storefront::data::StoreData;
use pehenava_storefront::services::{MailRelay, OutboundEmail, RelayError};
use pehenava_storefront::state::AppState;
use secrecy::SecretString;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Shell served for client-side routes.
pub const INDEX_HTML: &str = "<!doctype html><div id=\"root\"></div>";

/// The storefront's bundled data directory.
#[must_use]
pub fn bundled_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/data")
}

/// Mail settings pointing at `api_base`.
#[must_use]
pub fn mail_config(api_base: &str) -> MailConfig {
    MailConfig {
        api_key: SecretString::from("SG.integration-test-key".to_string()),
        api_base: api_base.to_string(),
        from: Email::parse("noreply@pehenava.in").unwrap(),
        notify_to: Email::parse("sellers@pehenava.in").unwrap(),
        timeout: Duration::from_secs(5),
    }
}

/// Relay that records every message and can be told to fail.
#[derive(Default)]
pub struct RecordingRelay {
    sent: Mutex<Vec<OutboundEmail>>,
    fail_on: Option<usize>,
}

impl RecordingRelay {
    /// A relay that rejects the `n`th message (0-based).
    #[must_use]
    pub fn failing_on(n: usize) -> Self {
        Self {
            fail_on: Some(n),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailRelay for RecordingRelay {
    async fn send(&self, email: &OutboundEmail) -> Result<(), RelayError> {
        let mut sent = self.sent.lock().unwrap();
        if self.fail_on == Some(sent.len()) {
            return Err(RelayError::Rejected {
                status: 401,
                detail: r#"{"errors":[{"message":"The provided authorization grant is invalid"}]}"#
                    .to_string(),
            });
        }
        sent.push(email.clone());
        Ok(())
    }
}

/// A storefront router with its SPA directory and relay.
pub struct TestApp {
    pub router: Router,
    pub relay: Arc<RecordingRelay>,
    _static_dir: TempDir,
}

impl TestApp {
    #[must_use]
    pub fn new() -> Self {
        Self::with_relay(RecordingRelay::default())
    }

    #[must_use]
    pub fn with_relay(relay: RecordingRelay) -> Self {
        let relay = Arc::new(relay);
        let (router, static_dir) = router_with(relay.clone(), &mail_config("http://127.0.0.1:9"));
        Self {
            router,
            relay,
            _static_dir: static_dir,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Send a POST request with a JSON body.
    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.request(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        TestResponse::read(self.router.clone().oneshot(request).await.unwrap()).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a router over the bundled data and a temporary SPA directory.
pub fn router_with(relay: Arc<dyn MailRelay>, mail: &MailConfig) -> (Router, TempDir) {
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::create_dir(static_dir.path().join("assets")).unwrap();
    std::fs::write(static_dir.path().join("assets/app.js"), "console.log('pehenava');").unwrap();

    let config = StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        static_dir: static_dir.path().to_path_buf(),
        data_dir: bundled_data_dir(),
        mail: mail.clone(),
        sentry_dsn: None,
        sentry_environment: None,
    };
    let data = StoreData::load(&config.data_dir).unwrap();
    let router = pehenava_storefront::app(AppState::new(config, data, relay));
    (router, static_dir)
}

/// Status and body of a response.
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    async fn read(response: axum::response::Response) -> Self {
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        Self {
            status,
            content_type,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}
