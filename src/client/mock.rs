//! Mock Dataplex client for testing
//!
//! Provides a mock implementation of [`DataScanApi`] so the extractor can be
//! exercised without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{DataScan, DataScanApi, DataScanView, ScanName};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockDataScanClient::new().with_scan_json(json!({ "dataQualitySpec": {} }));
/// let scan = mock.get_data_scan(&name, DataScanView::Full).await?;
/// ```
#[derive(Default)]
pub struct MockDataScanClient {
    /// Scan returned by get_data_scan
    scan: Arc<Mutex<Option<DataScan>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Captured requests for test assertions
    requests: Arc<Mutex<Vec<(String, DataScanView)>>>,
}

impl MockDataScanClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return this scan, given as raw service JSON
    pub fn with_scan_json(self, value: serde_json::Value) -> Self {
        let scan: DataScan = serde_json::from_value(value).expect("valid DataScan JSON");
        self.scan
            .try_lock()
            .expect("mock not shared yet")
            .replace(scan);
        self
    }

    /// Fail the next call with this error
    pub fn with_error(self, error: ApiError) -> Self {
        self.error
            .try_lock()
            .expect("mock not shared yet")
            .replace(error);
        self
    }

    /// Requests seen so far, as (resource name, view)
    pub async fn requests(&self) -> Vec<(String, DataScanView)> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl DataScanApi for MockDataScanClient {
    async fn get_data_scan(&self, name: &ScanName, view: DataScanView) -> Result<DataScan> {
        self.requests.lock().await.push((name.to_string(), view));

        if let Some(err) = self.error.lock().await.take() {
            return Err(err.into());
        }

        self.scan
            .lock()
            .await
            .clone()
            .ok_or_else(|| ApiError::NotFound(name.to_string()).into())
    }
}
