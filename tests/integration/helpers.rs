//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use droplink_api::state::AppState;
use droplink_core::config::AppConfig;
use droplink_repository::RepositoryManager;

/// Multipart boundary used by the request builders.
const BOUNDARY: &str = "droplink-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Repository handle for direct record manipulation
    pub repository: Arc<RepositoryManager>,
}

impl TestApp {
    /// Create a new test application with in-memory backends
    pub async fn new() -> Self {
        let config = Arc::new(AppConfig::default());

        let state = AppState::from_config(config)
            .await
            .expect("Failed to build test app state");

        let repository = Arc::clone(&state.repository);
        let router = droplink_api::router::build_router(state);

        Self { router, repository }
    }

    /// Make a plain HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(req).await
    }

    /// POST a multipart form to the given path
    pub async fn post_multipart(&self, path: &str, parts: &[MultipartPart<'_>]) -> TestResponse {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                MultipartPart::Text { name, value } => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                MultipartPart::File {
                    name,
                    file_name,
                    content_type,
                    data,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(
                        format!("Content-Type: {content_type}\r\n\r\n").as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Create a text share and return its code
    pub async fn create_text_share(&self, text: &str) -> String {
        let response = self
            .post_multipart(
                "/api/shares",
                &[MultipartPart::Text {
                    name: "text",
                    value: text,
                }],
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Share creation failed: {:?}",
            response.body
        );

        response.body["data"]["code"]
            .as_str()
            .expect("No code in create response")
            .to_string()
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            bytes: bytes.to_vec(),
        }
    }
}

/// A part of a multipart request body
pub enum MultipartPart<'a> {
    /// Plain text field
    Text { name: &'a str, value: &'a str },
    /// File field
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Parsed JSON body (Null when not JSON)
    pub body: Value,
    /// Raw response bytes
    pub bytes: Vec<u8>,
}
