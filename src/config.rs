// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! typed configuration loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH0_DOMAIN` | Identity provider domain (issuer is `https://<domain>/`) | Required |
//! | `API_AUDIENCE` | Expected JWT audience claim | Required |
//! | `JWT_ALGORITHMS` | Comma-separated allowed signing algorithms | `RS256` |
//! | `JWKS_URL` | Override of `https://<domain>/.well-known/jwks.json` | Derived |
//! | `JWKS_TIMEOUT_SECS` | Timeout for fetching the JWKS | `10` |
//! | `JWT_LEEWAY_SECS` | Clock skew tolerance for `exp` | `0` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use url::Url;

pub const AUTH0_DOMAIN_ENV: &str = "AUTH0_DOMAIN";
pub const API_AUDIENCE_ENV: &str = "API_AUDIENCE";
pub const JWT_ALGORITHMS_ENV: &str = "JWT_ALGORITHMS";
pub const JWKS_URL_ENV: &str = "JWKS_URL";
pub const JWKS_TIMEOUT_ENV: &str = "JWKS_TIMEOUT_SECS";
pub const JWT_LEEWAY_ENV: &str = "JWT_LEEWAY_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JWKS_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            name,
            reason: reason.to_string(),
        }
    }
}

/// Token verification settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Identity provider domain, without scheme
    pub domain: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Allowed signing algorithms (RSA family only)
    pub algorithms: Vec<Algorithm>,
    /// Where the provider publishes its signing keys
    pub jwks_url: Url,
    /// Upper bound on a single JWKS fetch
    pub jwks_timeout: Duration,
    /// Clock skew tolerance in seconds
    pub leeway: u64,
}

impl AuthConfig {
    /// Create a configuration for `domain` with RS256 and the derived JWKS URL.
    pub fn new(domain: impl Into<String>, audience: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into().trim().trim_end_matches('/').to_string();
        if domain.is_empty() || domain.contains("://") {
            return Err(ConfigError::invalid(
                AUTH0_DOMAIN_ENV,
                "expected a bare domain such as tenant.eu.auth0.com",
            ));
        }

        let audience = audience.into();
        if audience.is_empty() {
            return Err(ConfigError::invalid(API_AUDIENCE_ENV, "must not be empty"));
        }

        let jwks_url = Url::parse(&format!("https://{domain}/.well-known/jwks.json"))
            .map_err(|e| ConfigError::invalid(AUTH0_DOMAIN_ENV, e))?;

        Ok(Self {
            domain,
            audience,
            algorithms: vec![Algorithm::RS256],
            jwks_url,
            jwks_timeout: DEFAULT_JWKS_TIMEOUT,
            leeway: 0,
        })
    }

    /// Point the key resolver at a different JWKS endpoint.
    pub fn with_jwks_url(mut self, url: Url) -> Self {
        self.jwks_url = url;
        self
    }

    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    pub fn with_jwks_timeout(mut self, timeout: Duration) -> Self {
        self.jwks_timeout = timeout;
        self
    }

    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    /// Expected `iss` claim.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let domain = lookup(AUTH0_DOMAIN_ENV).ok_or(ConfigError::Missing(AUTH0_DOMAIN_ENV))?;
        let audience = lookup(API_AUDIENCE_ENV).ok_or(ConfigError::Missing(API_AUDIENCE_ENV))?;
        let mut config = Self::new(domain, audience)?;

        if let Some(raw) = lookup(JWT_ALGORITHMS_ENV) {
            config.algorithms = parse_algorithms(&raw)?;
        }
        if let Some(raw) = lookup(JWKS_URL_ENV) {
            config.jwks_url =
                Url::parse(&raw).map_err(|e| ConfigError::invalid(JWKS_URL_ENV, e))?;
        }
        if let Some(raw) = lookup(JWKS_TIMEOUT_ENV) {
            let secs: u64 = raw
                .parse()
                .map_err(|e| ConfigError::invalid(JWKS_TIMEOUT_ENV, e))?;
            config.jwks_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(JWT_LEEWAY_ENV) {
            config.leeway = raw
                .parse()
                .map_err(|e| ConfigError::invalid(JWT_LEEWAY_ENV, e))?;
        }

        Ok(config)
    }
}

/// Parse a comma-separated algorithm list, accepting only RSA signatures.
///
/// The key resolver only understands RSA keys (`n`/`e`), so symmetric and
/// elliptic-curve algorithms are rejected here rather than at request time.
pub fn parse_algorithms(raw: &str) -> Result<Vec<Algorithm>, ConfigError> {
    let algorithms = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            let algorithm = Algorithm::from_str(name)
                .map_err(|_| ConfigError::invalid(JWT_ALGORITHMS_ENV, format!("unknown algorithm {name}")))?;
            match algorithm {
                Algorithm::RS256
                | Algorithm::RS384
                | Algorithm::RS512
                | Algorithm::PS256
                | Algorithm::PS384
                | Algorithm::PS512 => Ok(algorithm),
                _ => Err(ConfigError::invalid(
                    JWT_ALGORITHMS_ENV,
                    format!("{name} is not an RSA signature algorithm"),
                )),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if algorithms.is_empty() {
        return Err(ConfigError::invalid(JWT_ALGORITHMS_ENV, "no algorithms given"));
    }
    Ok(algorithms)
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// HTTP listener and logging settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host: IpAddr = lookup(HOST_ENV)
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .parse()
            .map_err(|e| ConfigError::invalid(HOST_ENV, e))?;
        let port: u16 = match lookup(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|e| ConfigError::invalid(PORT_ENV, e))?,
            None => DEFAULT_PORT,
        };
        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | None => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::invalid(
                    LOG_FORMAT_ENV,
                    format!("expected json or pretty, got {other}"),
                ))
            }
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            log_format,
        })
    }
}
