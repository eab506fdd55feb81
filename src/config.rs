//! read pipeline configuration from a file or the environment

use crate::errors::Error;

pub enum ConfigLocation {
    File(String),
    Env,
}

/// Connection settings for the gateway-bound request pipeline.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    /// Base URL of the API gateway, e.g. "https://gateway.example.com".
    pub gateway_url: String,
    /// Path of the token refresh endpoint, relative to `gateway_url`.
    pub refresh_path: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub refresh_timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
}

pub const DEFAULT_REFRESH_PATH: &str = "/api/auth/refresh";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_REFRESH_TIMEOUT_MS: u64 = 10_000;

impl Config {
    pub fn read(loc: ConfigLocation) -> Result<Config, Error> {
        match loc {
            ConfigLocation::File(path) => Self::from_file(&path),
            ConfigLocation::Env => Self::from_env(),
        }
    }

    pub fn from_file(path: &str) -> Result<Config, Error> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn from_env() -> Result<Config, Error> {
        Ok(Config {
            gateway_url: std::env::var("GATEWAY_URL")
                .map_err(|_| Error::Config("Missing GATEWAY_URL env var".to_string()))?,
            refresh_path: std::env::var("GATEWAY_REFRESH_PATH").ok(),
            request_timeout_ms: read_ms_var("GATEWAY_REQUEST_TIMEOUT_MS")?,
            refresh_timeout_ms: read_ms_var("GATEWAY_REFRESH_TIMEOUT_MS")?,
            user_agent: None,
        })
    }

    pub fn from_values(
        gateway_url: &str,
        refresh_path: Option<String>,
        request_timeout_ms: Option<u64>,
        refresh_timeout_ms: Option<u64>,
    ) -> Config {
        Config {
            gateway_url: gateway_url.to_string(),
            refresh_path,
            request_timeout_ms,
            refresh_timeout_ms,
            user_agent: None,
        }
    }

    pub fn refresh_path(&self) -> &str {
        self.refresh_path.as_deref().unwrap_or(DEFAULT_REFRESH_PATH)
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(
            self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }

    pub fn refresh_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(
            self.refresh_timeout_ms.unwrap_or(DEFAULT_REFRESH_TIMEOUT_MS),
        )
    }
}

fn read_ms_var(name: &str) -> Result<Option<u64>, Error> {
    match std::env::var(name) {
        Err(_) => Ok(None),
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{name} must be an integer, got '{raw}'"))),
    }
}
