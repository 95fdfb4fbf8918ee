//! Engine configuration and field list loading
//!
//! `EngineConfig::default()` reads the environment:
//!
//! - `FORM_API_BASE_URL`: base that relative option `apiUrl`s are joined to
//! - `FORM_HTTP_TIMEOUT_SECS`: request timeout for option loading (unset = none)
//! - `FORM_DEFAULT_PHONE_COUNTRY`: default `IN`
//! - `FORM_DEFAULT_DATE_FORMAT`: default `yyyy-MM-dd`
//! - `FORM_USER_AGENT`: default `form-engine/<version>`

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tracing::warn;
use url::Url;

use crate::error::ConfigError;
use crate::model::FieldDescriptor;

pub const DEFAULT_PHONE_COUNTRY: &str = "IN";
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd";

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub api_base_url: Option<Url>,
    pub http_timeout: Option<Duration>,
    pub default_phone_country: String,
    pub default_date_format: String,
    pub user_agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_base_url: std::env::var("FORM_API_BASE_URL")
                .ok()
                .and_then(|raw| match Url::parse(&raw) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        warn!(value = %raw, error = %e, "ignoring invalid FORM_API_BASE_URL");
                        None
                    }
                }),
            http_timeout: std::env::var("FORM_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| match raw.trim().parse() {
                    Ok(secs) => Some(Duration::from_secs(secs)),
                    Err(e) => {
                        warn!(value = %raw, error = %e, "ignoring invalid FORM_HTTP_TIMEOUT_SECS");
                        None
                    }
                }),
            default_phone_country: std::env::var("FORM_DEFAULT_PHONE_COUNTRY")
                .unwrap_or_else(|_| DEFAULT_PHONE_COUNTRY.to_string()),
            default_date_format: std::env::var("FORM_DEFAULT_DATE_FORMAT")
                .unwrap_or_else(|_| DEFAULT_DATE_FORMAT.to_string()),
            user_agent: std::env::var("FORM_USER_AGENT")
                .unwrap_or_else(|_| format!("form-engine/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl EngineConfig {
    /// HTTP client for remote option lists
    pub fn http_client(&self) -> reqwest::Result<Client> {
        let mut builder = Client::builder().user_agent(self.user_agent.clone());
        if let Some(timeout) = self.http_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

/// Load a field list from a `.json`, `.yaml` or `.yml` file
pub fn load_fields(path: &Path) -> Result<Vec<FieldDescriptor>, ConfigError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match extension.as_str() {
        "json" | "yaml" | "yml" => {}
        _ => return Err(ConfigError::UnsupportedFormat { extension }),
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if extension == "json" {
        serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))
    } else {
        serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))
    }
}
