use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::planning::service::{DEFAULT_MAX_PAGE_LIMIT, DEFAULT_PAGE_LIMIT};
use crate::planning::PageLimits;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub planning: PlanningConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let page_limit_default = read_limit("APP_PAGE_LIMIT_DEFAULT", DEFAULT_PAGE_LIMIT)?;
        let page_limit_max = read_limit("APP_PAGE_LIMIT_MAX", DEFAULT_MAX_PAGE_LIMIT)?;
        if page_limit_default > page_limit_max {
            return Err(ConfigError::PageLimitAboveMax {
                default: page_limit_default,
                max: page_limit_max,
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            planning: PlanningConfig {
                page_limit_default,
                page_limit_max,
            },
        })
    }
}

fn read_limit(key: &'static str, fallback: usize) -> Result<usize, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidPageLimit { key }),
        Err(_) => Ok(fallback),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Colored output, only wanted on developer terminals.
    pub ansi: bool,
}

/// Worker listing pagination bounds.
#[derive(Debug, Clone, Copy)]
pub struct PlanningConfig {
    pub page_limit_default: usize,
    pub page_limit_max: usize,
}

impl PlanningConfig {
    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_limit: self.page_limit_default,
            max_limit: self.page_limit_max,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPageLimit { key: &'static str },
    PageLimitAboveMax { default: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPageLimit { key } => {
                write!(f, "{key} must be a non-negative integer")
            }
            ConfigError::PageLimitAboveMax { default, max } => write!(
                f,
                "APP_PAGE_LIMIT_DEFAULT ({default}) must not exceed APP_PAGE_LIMIT_MAX ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPageLimit { .. }
            | ConfigError::PageLimitAboveMax { .. } => None,
        }
    }
}
