//! Ambient Google Cloud credential resolution
//!
//! Resolution order:
//! 1. An access token passed explicitly (flag or `GOOGLE_OAUTH_ACCESS_TOKEN`)
//! 2. The Application Default Credentials file, when it holds `authorized_user`
//!    credentials (the kind `gcloud auth application-default login` writes)
//! 3. `gcloud auth application-default print-access-token`, which also covers
//!    service account and workload identity credentials

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::error::CredentialError;

/// Environment variable naming an explicit credentials file
const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// OAuth token endpoint used when the credentials file does not name one
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const AUTHORIZED_USER: &str = "authorized_user";

type AuthResult<T> = std::result::Result<T, CredentialError>;

/// OAuth bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value for the Authorization header
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Contents of an Application Default Credentials file
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    #[serde(rename = "type")]
    kind: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    refresh_token: Option<String>,
    token_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Location of the ADC file and whether the user pointed at it explicitly
#[derive(Debug, Clone)]
struct CredentialsLocation {
    path: PathBuf,
    explicit: bool,
}

/// Resolves an access token from the ambient environment
pub struct CredentialResolver {
    explicit_token: Option<String>,
    credentials: Option<CredentialsLocation>,
    gcloud_fallback: bool,
    http: HttpClient,
}

impl CredentialResolver {
    /// Build a resolver from the process environment
    pub fn from_environment(explicit_token: Option<String>) -> AuthResult<Self> {
        let credentials = match std::env::var_os(CREDENTIALS_ENV) {
            Some(path) if !path.is_empty() => Some(CredentialsLocation {
                path: PathBuf::from(path),
                explicit: true,
            }),
            _ => default_credentials_path().map(|path| CredentialsLocation {
                path,
                explicit: false,
            }),
        };

        Ok(Self {
            explicit_token,
            credentials,
            gcloud_fallback: true,
            http: build_http()?,
        })
    }

    /// Build a resolver that reads a specific credentials file
    #[cfg(test)]
    pub fn with_credentials_file(path: impl Into<PathBuf>) -> AuthResult<Self> {
        Ok(Self {
            explicit_token: None,
            credentials: Some(CredentialsLocation {
                path: path.into(),
                explicit: true,
            }),
            gcloud_fallback: true,
            http: build_http()?,
        })
    }

    /// Never shell out to gcloud
    #[cfg(test)]
    pub fn without_gcloud(mut self) -> Self {
        self.gcloud_fallback = false;
        self
    }

    /// Resolve an access token, trying each source in order
    pub async fn resolve(&self) -> AuthResult<AccessToken> {
        if let Some(token) = self.explicit_token.as_deref().map(str::trim) {
            if !token.is_empty() {
                debug!("Using explicitly provided access token");
                return Ok(AccessToken::new(token));
            }
        }

        if let Some(location) = &self.credentials {
            match read_credentials(&location.path)? {
                Some(file) if file.kind == AUTHORIZED_USER => {
                    debug!(
                        "Exchanging refresh token from {}",
                        location.path.display()
                    );
                    return self.exchange_refresh_token(&location.path, file).await;
                }
                Some(file) => {
                    debug!(
                        "Credentials of type '{}' in {} are delegated to gcloud",
                        file.kind,
                        location.path.display()
                    );
                }
                None if location.explicit => {
                    return Err(CredentialError::Unreadable {
                        path: location.path.display().to_string(),
                        reason: "file does not exist".to_string(),
                    });
                }
                None => debug!("No credentials file at {}", location.path.display()),
            }
        }

        if self.gcloud_fallback {
            return gcloud_access_token().await;
        }

        Err(CredentialError::NotFound)
    }

    async fn exchange_refresh_token(
        &self,
        path: &Path,
        file: CredentialsFile,
    ) -> AuthResult<AccessToken> {
        let missing = |field: &str| CredentialError::Malformed {
            path: path.display().to_string(),
            reason: format!("missing field `{}`", field),
        };
        let client_id = file.client_id.ok_or_else(|| missing("client_id"))?;
        let client_secret = file.client_secret.ok_or_else(|| missing("client_secret"))?;
        let refresh_token = file.refresh_token.ok_or_else(|| missing("refresh_token"))?;
        let token_uri = file
            .token_uri
            .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string());

        let response = self
            .http
            .post(&token_uri)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CredentialError::TokenExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialError::TokenExchange(format!(
                "{}: {}",
                status,
                body.trim()
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            CredentialError::TokenExchange(format!("Failed to parse token response: {}", e))
        })?;

        Ok(AccessToken::new(token.access_token))
    }
}

fn build_http() -> AuthResult<HttpClient> {
    HttpClient::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| CredentialError::Http(e.to_string()))
}

/// Well-known ADC location written by `gcloud auth application-default login`
fn default_credentials_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join("gcloud")
            .join("application_default_credentials.json")
    })
}

/// Read and parse a credentials file; `Ok(None)` when it does not exist
fn read_credentials(path: &Path) -> AuthResult<Option<CredentialsFile>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(CredentialError::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| CredentialError::Malformed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

async fn gcloud_access_token() -> AuthResult<AccessToken> {
    let program = if cfg!(windows) { "gcloud.cmd" } else { "gcloud" };
    debug!("Requesting access token from {}", program);

    let output = tokio::process::Command::new(program)
        .args(["auth", "application-default", "print-access-token"])
        .output()
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CredentialError::NotFound,
            _ => CredentialError::Gcloud(e.to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CredentialError::Gcloud(stderr.trim().to_string()));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(CredentialError::Gcloud("empty access token".to_string()));
    }

    Ok(AccessToken::new(token))
}
