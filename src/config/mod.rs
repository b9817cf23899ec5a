//! Runtime configuration for an extraction
//!
//! Values come from CLI flags, falling back to environment variables and then
//! defaults (clap resolves that precedence). This module only validates and
//! carries the result.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::client::ScanName;
use crate::error::{Error, Result};

/// Everything one extraction needs
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Google Cloud project containing the scan
    pub project_id: String,

    /// Region (Dataplex location) of the scan
    pub region: String,

    /// Data scan identifier
    pub scan_id: String,

    /// Destination file for the rules document
    pub output_path: PathBuf,

    /// Dataplex API root
    pub api_endpoint: String,

    /// Explicit bearer token; bypasses Application Default Credentials
    pub access_token: Option<String>,
}

impl ExtractConfig {
    /// Build the configuration from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            project_id: cli.project_id.trim().to_string(),
            region: cli.region.trim().to_string(),
            scan_id: cli.scan_id.trim().to_string(),
            output_path: cli.outputfile.clone(),
            api_endpoint: cli.api_endpoint.trim().to_string(),
            access_token: cli.access_token.clone(),
        }
    }

    /// Reject empty identifiers before any network activity
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("--project_id", self.project_id.as_str()),
            ("--scan_id", self.scan_id.as_str()),
            ("--region", self.region.as_str()),
            ("--api-endpoint", self.api_endpoint.as_str()),
        ];

        for (flag, value) in required {
            if value.is_empty() {
                return Err(Error::InvalidConfig(format!("{} must not be empty", flag)));
            }
            if value.contains('/') && flag != "--api-endpoint" {
                return Err(Error::InvalidConfig(format!(
                    "{} must not contain '/': {}",
                    flag, value
                )));
            }
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "--outputfile must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Fully-qualified name of the scan to read
    pub fn scan_name(&self) -> ScanName {
        ScanName::new(&self.project_id, &self.region, &self.scan_id)
    }
}
