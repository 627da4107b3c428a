//! Common test utilities for in-process HTTP testing.
//!
//! This module provides a test fixture that builds the router with a mock
//! converter and temp-dir storage, so the API can be exercised without
//! ffmpeg or a listening socket.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use mediaforge_core::{testing::MockConverter, BatchConverter, Config, StorageLayout};
use mediaforge_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use mediaforge_core::testing::fixtures;

const BOUNDARY: &str = "mediaforge-test-boundary";

/// Test fixture for in-process API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_upload() {
///     let fixture = TestFixture::new().await;
///
///     let form = MultipartForm::new()
///         .file("files", "photo.png", b"png")
///         .text("format", "jpg");
///     let response = fixture.upload(form).await;
///
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock converter - inspect jobs and inject failures
    pub converter: MockConverter,
    /// Configuration the router was built with
    pub config: Config,
    /// Temporary directory holding upload and converted dirs
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default limits.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test fixture after adjusting the default configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = fixtures::config_in(temp_dir.path());
        adjust(&mut config);

        StorageLayout::new(&config.storage)
            .ensure_dirs()
            .await
            .expect("Failed to create storage dirs");

        let converter = MockConverter::new();
        let batch = BatchConverter::from_config(Arc::new(converter.clone()), &config);
        let state = Arc::new(AppState::new(config.clone(), batch));
        let router = create_router(state);

        Self {
            router,
            converter,
            config,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// POST a multipart form to /upload.
    pub async fn upload(&self, form: MultipartForm) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(form.finish()))
            .unwrap();
        self.send(request).await
    }

    /// POST a raw body with the given content type.
    pub async fn post_raw(&self, path: &str, content_type: &str, body: &[u8]) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body.to_vec()))
            .unwrap();
        self.send(request).await
    }

    /// Writes a file straight into the converted directory.
    pub fn put_converted(&self, name: &str, content: &[u8]) {
        std::fs::write(self.config.storage.converted_dir.join(name), content)
            .expect("Failed to write converted file");
    }

    /// Number of entries left under the upload directory.
    pub fn upload_dir_entries(&self) -> usize {
        std::fs::read_dir(&self.config.storage.upload_dir)
            .expect("upload dir exists")
            .count()
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Minimal multipart/form-data body builder.
#[derive(Debug, Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file part.
    pub fn file(mut self, field: &str, filename: &str, content: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, field, filename
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(content);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Adds a plain text part.
    pub fn text(mut self, field: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, field, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.body
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
