//! CLI definition and handlers

use std::path::PathBuf;

use clap::Parser;

use crate::client::DEFAULT_API_ENDPOINT;

pub mod extract;

/// Extract the active Data Quality rules configuration from a Dataplex Scan.
#[derive(Parser, Debug)]
#[command(name = "dq-extract")]
#[command(version, about, long_about = None)]
#[command(after_help = "\
Example:
  dq-extract --project_id my-proj --scan_id my-scan --region us-central1")]
pub struct Cli {
    /// The Google Cloud Project ID
    #[arg(
        long = "project_id",
        visible_alias = "project-id",
        env = "GOOGLE_CLOUD_PROJECT",
        hide_env = true
    )]
    pub project_id: String,

    /// The ID of the Dataplex Data Quality Scan
    #[arg(long = "scan_id", visible_alias = "scan-id")]
    pub scan_id: String,

    /// The GCP region
    #[arg(long, default_value = "us-central1")]
    pub region: String,

    /// The filename for the generated YAML output
    #[arg(
        long = "outputfile",
        visible_alias = "output-file",
        default_value = "rules.yaml"
    )]
    pub outputfile: PathBuf,

    /// OAuth access token to use instead of Application Default Credentials
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Dataplex API endpoint
    #[arg(
        long,
        env = "DQ_EXTRACT_API_ENDPOINT",
        default_value = DEFAULT_API_ENDPOINT,
        hide = true
    )]
    pub api_endpoint: String,

    /// Enable debug logging
    #[arg(long, env = "DQ_EXTRACT_DEBUG", hide_env = true)]
    pub debug: bool,
}
