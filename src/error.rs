//! Error types for dq-extract

use thiserror::Error;

/// Result type alias for dq-extract operations
pub type Result<T> = std::result::Result<T, Error>;

/// Guidance printed after credential failures
const REAUTH_TIP: &str = "Tip: Run 'gcloud auth application-default login'";

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to initialize Dataplex Client: {0}")]
    Credentials(#[from] CredentialError),

    #[error("Scan not found: {scan_id} in {region}")]
    ScanNotFound { scan_id: String, region: String },

    #[error("Permission denied for project: {project_id}")]
    PermissionDenied { project_id: String },

    #[error("No 'dataQualitySpec' found. This might not be a Data Quality scan.")]
    NotDataQualityScan,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unexpected error: {0}")]
    Api(#[from] ApiError),

    #[error("Unexpected error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected error: YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Follow-up guidance for the user, if this kind of failure has any.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Error::Credentials(_) => Some(REAUTH_TIP),
            Error::ScanNotFound { .. } => Some("Check your Scan ID and Region."),
            Error::PermissionDenied { .. } => {
                Some("Check your IAM roles (Dataplex Viewer or DataScan Viewer required).")
            }
            _ => None,
        }
    }
}

/// Dataplex API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request was not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Quota exhausted: {0}")]
    ResourceExhausted(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to Dataplex API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Credential resolution errors
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("could not find default credentials")]
    NotFound,

    #[error("failed to read credentials file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("failed to parse credentials file {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("credentials were rejected by the service: {0}")]
    Rejected(String),

    #[error("gcloud could not provide an access token: {0}")]
    Gcloud(String),

    #[error("failed to build HTTP client: {0}")]
    Http(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_error_message() {
        let err: Error = CredentialError::NotFound.into();
        assert_eq!(
            err.to_string(),
            "Failed to initialize Dataplex Client: could not find default credentials"
        );
        assert_eq!(err.remediation(), Some(REAUTH_TIP));
    }

    #[test]
    fn test_scan_not_found_message() {
        let err = Error::ScanNotFound {
            scan_id: "sales-dq".to_string(),
            region: "us-central1".to_string(),
        };
        assert_eq!(err.to_string(), "Scan not found: sales-dq in us-central1");
        assert_eq!(err.remediation(), Some("Check your Scan ID and Region."));
    }

    #[test]
    fn test_permission_denied_message() {
        let err = Error::PermissionDenied {
            project_id: "acme".to_string(),
        };
        assert_eq!(err.to_string(), "Permission denied for project: acme");
        assert!(err.remediation().unwrap().contains("IAM roles"));
    }

    #[test]
    fn test_not_data_quality_scan_has_no_remediation() {
        let err = Error::NotDataQualityScan;
        assert!(err.to_string().contains("dataQualitySpec"));
        assert!(err.remediation().is_none());
    }

    #[test]
    fn test_rejected_credentials_suggest_reauth() {
        let err: Error = CredentialError::Rejected("token expired".to_string()).into();
        assert!(err.to_string().contains("token expired"));
        assert_eq!(err.remediation(), Some(REAUTH_TIP));
    }

    #[test]
    fn test_generic_api_error_is_unexpected() {
        let err: Error = ApiError::ServerError("backend unavailable".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Unexpected error: Server error: backend unavailable"
        );
        assert!(err.remediation().is_none());
    }

    #[test]
    fn test_io_error_is_unexpected() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: Error = io.into();
        assert!(err.to_string().starts_with("Unexpected error:"));
        assert!(err.to_string().contains("read-only"));
    }
}
