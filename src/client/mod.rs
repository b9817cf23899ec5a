//! Dataplex API client

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

pub mod auth;
pub mod dataplex;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use auth::CredentialResolver;
pub use dataplex::{DEFAULT_API_ENDPOINT, DataplexClient};
#[cfg(test)]
pub use mock::MockDataScanClient;
pub use models::{DataScan, Rule};

/// Data scan read operations
#[async_trait]
pub trait DataScanApi: Send + Sync {
    /// Fetch a single data scan by its fully-qualified name
    async fn get_data_scan(&self, name: &ScanName, view: DataScanView) -> Result<DataScan>;
}

/// How much of a data scan the service should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataScanView {
    /// Summary fields only; specs are omitted
    #[allow(dead_code)]
    Basic,
    /// Complete resource, including the data quality rules
    Full,
}

impl DataScanView {
    /// Value of the `view` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            DataScanView::Basic => "BASIC",
            DataScanView::Full => "FULL",
        }
    }
}

/// Fully-qualified data scan resource name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanName {
    pub project: String,
    pub location: String,
    pub scan: String,
}

impl ScanName {
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        scan: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            scan: scan.into(),
        }
    }
}

impl fmt::Display for ScanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/dataScans/{}",
            self.project, self.location, self.scan
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_name_format() {
        let name = ScanName::new("acme", "us-central1", "sales-dq");
        assert_eq!(
            name.to_string(),
            "projects/acme/locations/us-central1/dataScans/sales-dq"
        );
    }

    #[test]
    fn test_view_query_values() {
        assert_eq!(DataScanView::Full.as_str(), "FULL");
        assert_eq!(DataScanView::Basic.as_str(), "BASIC");
    }
}
