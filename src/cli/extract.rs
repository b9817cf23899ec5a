//! Extract command: fetch a scan, project its rules, write them out

use std::path::PathBuf;

use log::debug;

use crate::client::{CredentialResolver, DataScanApi, DataScanView, DataplexClient};
use crate::config::ExtractConfig;
use crate::error::{ApiError, CredentialError, Error, Result};
use crate::output::{console, yaml};

/// Result of a completed extraction
#[derive(Debug, PartialEq, Eq)]
pub enum Extraction {
    /// Rules were written to `path`
    Written { count: usize, path: PathBuf },
    /// The spec exists but carries no inline rules; nothing was written
    NoRules,
}

/// Run the extraction end to end: credentials, fetch, write, report
pub async fn run(config: &ExtractConfig) -> Result<()> {
    let token = CredentialResolver::from_environment(config.access_token.clone())?
        .resolve()
        .await?;
    let client = DataplexClient::new(&config.api_endpoint, token)?;

    println!("Reading configuration from: {}...", config.scan_name());

    match extract_rules(&client, config).await? {
        Extraction::Written { count, path } => {
            console::success(&format!("Extracted {} rules.", count));
            println!("Configuration saved to: {}", path.display());
        }
        Extraction::NoRules => {
            console::warning("The 'dataQualitySpec' exists but contains no rules.");
            println!("If your rules are in a GCS file, this list will be empty.");
        }
    }

    Ok(())
}

/// Fetch the scan and write its data quality rules to the configured path
pub async fn extract_rules<A>(api: &A, config: &ExtractConfig) -> Result<Extraction>
where
    A: DataScanApi + ?Sized,
{
    let name = config.scan_name();
    let scan = api
        .get_data_scan(&name, DataScanView::Full)
        .await
        .map_err(|err| classify(err, config))?;

    let rules = scan
        .into_quality_spec()
        .ok_or(Error::NotDataQualityScan)?
        .into_rules();
    debug!("Scan {} carries {} rules", name, rules.len());

    if rules.is_empty() {
        return Ok(Extraction::NoRules);
    }

    yaml::write_rules(&config.output_path, &rules)?;

    Ok(Extraction::Written {
        count: rules.len(),
        path: config.output_path.clone(),
    })
}

/// Attach the scan coordinates to the failures users can act on
fn classify(err: Error, config: &ExtractConfig) -> Error {
    match err {
        Error::Api(ApiError::NotFound(msg)) => {
            debug!("Not found: {}", msg);
            Error::ScanNotFound {
                scan_id: config.scan_id.clone(),
                region: config.region.clone(),
            }
        }
        Error::Api(ApiError::PermissionDenied(msg)) => {
            debug!("Permission denied: {}", msg);
            Error::PermissionDenied {
                project_id: config.project_id.clone(),
            }
        }
        Error::Api(ApiError::Unauthenticated(msg)) => CredentialError::Rejected(msg).into(),
        other => other,
    }
}
