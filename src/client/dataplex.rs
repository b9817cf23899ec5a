//! Dataplex REST client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;

use super::auth::AccessToken;
use super::{DataScan, DataScanApi, DataScanView, ScanName};
use crate::error::{ApiError, Result};

/// Dataplex API root
pub const DEFAULT_API_ENDPOINT: &str = "https://dataplex.googleapis.com";

/// REST API version prefix
const API_VERSION: &str = "v1";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Dataplex API client
pub struct DataplexClient {
    http: HttpClient,
    endpoint: String,
    token: AccessToken,
}

/// Google API error envelope: `{"error": {"code": 404, "message": "...", "status": "NOT_FOUND"}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl DataplexClient {
    /// Create a new client against `endpoint` using a resolved access token
    pub fn new(endpoint: &str, token: AccessToken) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("dq-extract/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn resource_url(&self, name: &ScanName) -> String {
        format!("{}/{}/{}", self.endpoint, API_VERSION, name)
    }
}

/// Pull a readable message out of an error response body
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if !envelope.error.message.is_empty() {
            return envelope.error.message;
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}

/// Map a non-success HTTP status to an API error
fn status_error(status: StatusCode, message: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthenticated(message),
        StatusCode::FORBIDDEN => ApiError::PermissionDenied(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::BAD_REQUEST => ApiError::BadRequest(message),
        StatusCode::TOO_MANY_REQUESTS => ApiError::ResourceExhausted(message),
        status if status.is_server_error() => ApiError::ServerError(message),
        status => {
            ApiError::InvalidResponse(format!("Unexpected status code {}: {}", status, message))
        }
    }
}

#[async_trait]
impl DataScanApi for DataplexClient {
    async fn get_data_scan(&self, name: &ScanName, view: DataScanView) -> Result<DataScan> {
        let url = self.resource_url(name);
        debug!("GET {} (view={})", url, view.as_str());

        let response = self
            .http
            .get(&url)
            .query(&[("view", view.as_str())])
            .bearer_auth(self.token.secret())
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        debug!("Dataplex responded with {}", status);

        if status.is_success() {
            let scan = response.json::<DataScan>().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
            })?;
            return Ok(scan);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, error_message(status, &body)).into())
    }
}
