//! Service configuration parsed from environment variables.
//!
//! `main` loads `.env` through `dotenvy` before calling [`AppConfig::from_env`].
//! Parsing goes through a lookup closure so tests never touch the process
//! environment.

use crate::error::ErrorCode;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CMS_DATASET: &str = "production";
pub const DEFAULT_CMS_API_VERSION: &str = "2021-10-21";
pub const DEFAULT_DROP_CHAIN: &str = "goerli";
pub const DEFAULT_HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "E_CONFIG_MISSING",
            Self::Invalid { .. } => "E_CONFIG_INVALID",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_HTTP_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_HTTP_CONNECT_TIMEOUT_SECS }
    }
}

/// Content store (CMS) connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    pub token: Option<String>,
}

/// Drop contract gateway settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub chain: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub cms: CmsConfig,
    pub gateway: GatewayConfig,
    /// Backend wallet used for sign-in. `None` disables minting.
    pub wallet_address: Option<String>,
    pub timeouts: HttpTimeouts,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `CMS_PROJECT_ID`
    /// - `DROP_GATEWAY_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `CMS_DATASET`: default `production`
    /// - `CMS_API_VERSION`: default `2021-10-21`
    /// - `CMS_USE_CDN`: default true
    /// - `CMS_TOKEN`, `DROP_GATEWAY_TOKEN`, `WALLET_ADDRESS`
    /// - `DROP_CHAIN`: default `goerli`
    /// - `HTTP_REQUEST_TIMEOUT_SECS`: default 30
    /// - `HTTP_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let use_cdn = match get("CMS_USE_CDN") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "CMS_USE_CDN", value: raw })?,
            None => true,
        };

        let cms = CmsConfig {
            project_id: get("CMS_PROJECT_ID").ok_or(ConfigError::Missing { var: "CMS_PROJECT_ID" })?,
            dataset: get("CMS_DATASET").unwrap_or_else(|| DEFAULT_CMS_DATASET.to_owned()),
            api_version: get("CMS_API_VERSION").unwrap_or_else(|| DEFAULT_CMS_API_VERSION.to_owned()),
            use_cdn,
            token: get("CMS_TOKEN"),
        };

        let gateway = GatewayConfig {
            base_url: get("DROP_GATEWAY_URL")
                .ok_or(ConfigError::Missing { var: "DROP_GATEWAY_URL" })?
                .trim_end_matches('/')
                .to_owned(),
            chain: get("DROP_CHAIN").unwrap_or_else(|| DEFAULT_DROP_CHAIN.to_owned()),
            token: get("DROP_GATEWAY_TOKEN"),
        };

        let timeout = |var: &'static str, default: u64| match get(var) {
            Some(value) => value.parse::<u64>().map_err(|_| ConfigError::Invalid { var, value }),
            None => Ok(default),
        };
        let timeouts = HttpTimeouts {
            request_secs: timeout("HTTP_REQUEST_TIMEOUT_SECS", DEFAULT_HTTP_REQUEST_TIMEOUT_SECS)?,
            connect_secs: timeout("HTTP_CONNECT_TIMEOUT_SECS", DEFAULT_HTTP_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { port, cms, gateway, wallet_address: get("WALLET_ADDRESS"), timeouts })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
