use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::assessment::{DEFAULT_ALPHA, DEFAULT_RELEVANCE_THRESHOLD, DEFAULT_TOP_K};

/// Largest per-article action budget accepted from configuration or requests.
pub const MAX_TOP_K: usize = 10;

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
    pub assessment: AssessmentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            assessment: AssessmentConfig::from_env()?,
        })
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
}

/// Tuning for the fusion and remediation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentConfig {
    /// Catalog file; the embedded catalog is used when unset.
    pub templates_path: Option<PathBuf>,
    pub fusion_alpha: f64,
    pub top_k: usize,
    pub relevance_threshold: f64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            templates_path: None,
            fusion_alpha: DEFAULT_ALPHA,
            top_k: DEFAULT_TOP_K,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
        }
    }
}

impl AssessmentConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let templates_path = env::var("AIAUDIT_TEMPLATES_PATH")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        let fusion_alpha = match env::var("AIAUDIT_FUSION_ALPHA") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidAlpha)?,
            Err(_) => defaults.fusion_alpha,
        };

        let top_k = match env::var("AIAUDIT_TOP_K") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidTopK)?,
            Err(_) => defaults.top_k,
        };

        let relevance_threshold = match env::var("AIAUDIT_RELEVANCE_THRESHOLD") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidThreshold)?,
            Err(_) => defaults.relevance_threshold,
        };

        let config = Self {
            templates_path,
            fusion_alpha,
            top_k,
            relevance_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.fusion_alpha) {
            return Err(ConfigError::InvalidAlpha);
        }
        if !(1..=MAX_TOP_K).contains(&self.top_k) {
            return Err(ConfigError::InvalidTopK);
        }
        if !(0.0..=1.0).contains(&self.relevance_threshold) {
            return Err(ConfigError::InvalidThreshold);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAlpha,
    InvalidTopK,
    InvalidThreshold,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAlpha => {
                write!(f, "AIAUDIT_FUSION_ALPHA must be a number between 0 and 1")
            }
            ConfigError::InvalidTopK => {
                write!(f, "AIAUDIT_TOP_K must be an integer between 1 and {MAX_TOP_K}")
            }
            ConfigError::InvalidThreshold => write!(
                f,
                "AIAUDIT_RELEVANCE_THRESHOLD must be a number between 0 and 1"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidAlpha
            | ConfigError::InvalidTopK
            | ConfigError::InvalidThreshold => None,
        }
    }
}
