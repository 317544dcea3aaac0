//! Gateway configuration loaded via OrthoConfig.
//!
//! Every key can be set with a `GATEWAY_`-prefixed environment variable or
//! the matching command-line flag. Absent keys fall back to the defaults
//! below.

use std::net::SocketAddr;
use std::time::Duration;

use gateway::domain::RetryPolicy;
use gateway::domain::resiliency::{DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_RETRIES};
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPSTREAM_BASE_URL: &str = "https://www.gov.uk";
const DEFAULT_PUBLIC_BASE_URL: &str = "https://www.gov.uk";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },
    /// A URL setting does not parse.
    #[error("invalid {key} {value:?}: {source}")]
    Url {
        /// Setting that failed to parse.
        key: &'static str,
        /// Configured value.
        value: String,
        /// Parse failure.
        source: url::ParseError,
    },
}

/// Runtime settings for the gateway binary.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATEWAY")]
pub struct GatewaySettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Base URL of the upstream search and content APIs.
    pub upstream_base_url: Option<String>,
    /// Public site root used to resolve relative links.
    pub public_base_url: Option<String>,
    /// Upstream request timeout in milliseconds.
    pub upstream_timeout_ms: Option<u64>,
    /// Retries after the first upstream attempt.
    pub retry_max_retries: Option<u32>,
    /// Delay before the first retry in milliseconds; doubles per retry.
    pub retry_initial_backoff_ms: Option<u64>,
}

impl GatewaySettings {
    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Parsed upstream base URL.
    pub fn upstream_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "upstream_base_url",
            self.upstream_base_url
                .as_deref()
                .unwrap_or(DEFAULT_UPSTREAM_BASE_URL),
        )
    }

    /// Parsed public site root.
    pub fn public_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "public_base_url",
            self.public_base_url
                .as_deref()
                .unwrap_or(DEFAULT_PUBLIC_BASE_URL),
        )
    }

    /// Upstream request timeout.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(
            self.upstream_timeout_ms
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_MS),
        )
    }

    /// Retry policy for upstream calls.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retry_max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            initial_backoff: self
                .retry_initial_backoff_ms
                .map_or(DEFAULT_INITIAL_BACKOFF, Duration::from_millis),
        }
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        key,
        value: value.to_owned(),
        source,
    })
}
