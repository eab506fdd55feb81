use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::errors::Error;
use crate::pipeline::RequestDescriptor;
use crate::token::AccessToken;

const USER_AGENT: &str = "gateway-client-rust/0.1.0";

/// A fully-received HTTP exchange: status, headers, and the raw body text.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Performs single HTTP exchanges against the gateway.
///
/// The underlying client keeps a cookie store so the refresh credential
/// (an HTTP-only cookie set by the gateway at login) rides along with the
/// refresh call without this crate ever reading it.
#[derive(Debug)]
pub struct Transport {
    http: Client,
    gateway_url: String,
    refresh_path: String,
    request_timeout: Duration,
    refresh_timeout: Duration,
    user_agent: String,
}

impl Transport {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let gateway_url = if config.gateway_url.starts_with("http") {
            config.gateway_url.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", config.gateway_url.trim_end_matches('/'))
        };
        let _ = reqwest::Url::parse(&gateway_url).map_err(|e| {
            Error::Config(format!("Invalid gateway URL '{gateway_url}': {e}"))
        })?;
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build http client: {e}")))?;
        Ok(Self {
            http,
            gateway_url,
            refresh_path: config.refresh_path().to_string(),
            request_timeout: config.request_timeout(),
            refresh_timeout: config.refresh_timeout(),
            user_agent: config
                .user_agent
                .clone()
                .unwrap_or_else(|| USER_AGENT.to_string()),
        })
    }

    /// Send one business request, attaching the bearer token when present.
    pub async fn send(
        &self,
        request: &RequestDescriptor,
        bearer: Option<&AccessToken>,
    ) -> Result<ApiResponse, Error> {
        let url = format!("{}{}", self.gateway_url, request.path());
        let mut builder = self
            .http
            .request(request.method().clone(), &url)
            .timeout(self.request_timeout)
            .header("Accept", "application/json")
            .header("User-Agent", self.user_agent.as_str());
        if let Some(token) = bearer {
            builder = builder.header("Authorization", format!("Bearer {}", token.as_str()));
        }
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }
        self.complete(builder, self.request_timeout).await
    }

    /// Call the refresh endpoint. No bearer header and no body; the refresh
    /// credential travels via the cookie store.
    pub async fn post_refresh(&self) -> Result<ApiResponse, Error> {
        let url = format!("{}{}", self.gateway_url, self.refresh_path);
        let builder = self
            .http
            .post(&url)
            .timeout(self.refresh_timeout)
            .header("Accept", "application/json")
            .header("User-Agent", self.user_agent.as_str());
        self.complete(builder, self.refresh_timeout).await
    }

    async fn complete(
        &self,
        builder: reqwest::RequestBuilder,
        timeout: Duration,
    ) -> Result<ApiResponse, Error> {
        let resp = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                Error::Timeout(timeout)
            } else {
                Error::Network(err)
            }
        })?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), bytes = body.len(), "exchange complete");
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }
}
