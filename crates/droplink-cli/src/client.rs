//! HTTP client for the DropLink server API.

use serde::Deserialize;
use serde_json::Value;

use droplink_core::error::{AppError, ErrorKind};

/// Wire format of server error responses.
#[derive(Debug, Deserialize)]
struct WireError {
    error: String,
    message: String,
}

/// Envelope around successful responses.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    success: bool,
    data: T,
}

/// Thin client over the server's REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given server base URL.
    pub fn new(server: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: server.trim_end_matches('/').to_string(),
        }
    }

    /// POST /api/shares with a multipart form.
    pub async fn create_share(&self, form: reqwest::multipart::Form) -> Result<Value, AppError> {
        let response = self
            .http
            .post(format!("{}/api/shares", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;
        Self::unwrap_envelope(response).await
    }

    /// GET /api/shares/{code} — redeems a code.
    pub async fn redeem_share(&self, code: &str) -> Result<Value, AppError> {
        let response = self
            .http
            .get(format!("{}/api/shares/{}", self.base_url, code))
            .send()
            .await
            .map_err(network_error)?;
        Self::unwrap_envelope(response).await
    }

    /// GET an absolute or server-relative URL, returning the raw bytes.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, AppError> {
        let url = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}{}", self.base_url, url)
        };

        let response = self.http.get(url).send().await.map_err(network_error)?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let bytes = response.bytes().await.map_err(network_error)?;
        Ok(bytes.to_vec())
    }

    /// GET /api/health/detailed.
    pub async fn health_detailed(&self) -> Result<Value, AppError> {
        let response = self
            .http
            .get(format!("{}/api/health/detailed", self.base_url))
            .send()
            .await
            .map_err(network_error)?;
        Self::unwrap_envelope(response).await
    }

    async fn unwrap_envelope(response: reqwest::Response) -> Result<Value, AppError> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let envelope: Envelope<Value> = response.json().await.map_err(network_error)?;
        Ok(envelope.data)
    }

    async fn error_from_response(response: reqwest::Response) -> AppError {
        let status = response.status();
        match response.json::<WireError>().await {
            Ok(wire) => AppError::new(kind_from_code(&wire.error), wire.message),
            Err(_) => AppError::internal(format!("Server returned {status}")),
        }
    }
}

fn network_error(err: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ServiceUnavailable,
        "Could not reach the server",
        err,
    )
}

fn kind_from_code(code: &str) -> ErrorKind {
    match code {
        "NOT_FOUND" => ErrorKind::NotFound,
        "EXPIRED" => ErrorKind::Gone,
        "VALIDATION" => ErrorKind::Validation,
        "CONFLICT" => ErrorKind::Conflict,
        "CONFIGURATION" => ErrorKind::Configuration,
        "SERVICE_UNAVAILABLE" => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::Internal,
    }
}
