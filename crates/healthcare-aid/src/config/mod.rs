use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

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
    pub prediction: PredictionConfig,
    pub reference: ReferenceConfig,
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

        let backend = PredictionBackend::from_env(
            env::var("APP_PREDICTOR").ok().as_deref(),
            env::var("APP_PREDICTOR_COMMAND").ok().as_deref(),
            env::var("APP_PREDICTOR_TIMEOUT_SECS").ok().as_deref(),
        )?;

        let data_path = env::var("APP_REFERENCE_DATA")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            prediction: PredictionConfig { backend },
            reference: ReferenceConfig { data_path },
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which disease predictor answers `/api/v1/diseases/predict`.
#[derive(Debug, Clone)]
pub struct PredictionConfig {
    pub backend: PredictionBackend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionBackend {
    SymptomMatch,
    /// Program plus leading arguments; symptoms, age and gender are appended.
    /// The process is killed once `timeout` elapses.
    External {
        program: String,
        args: Vec<String>,
        timeout: Duration,
    },
}

impl PredictionBackend {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    fn from_env(
        kind: Option<&str>,
        command: Option<&str>,
        timeout_secs: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let kind = kind.map(|value| value.trim().to_ascii_lowercase());
        match kind.as_deref() {
            None | Some("") | Some("symptom-match") | Some("symptom_match") => {
                Ok(Self::SymptomMatch)
            }
            Some("external") | Some("ml") => {
                let mut parts = command.unwrap_or_default().split_whitespace();
                let program = parts
                    .next()
                    .ok_or(ConfigError::MissingPredictorCommand)?
                    .to_string();
                let args = parts.map(str::to_string).collect();
                let timeout = match timeout_secs.map(str::trim).filter(|v| !v.is_empty()) {
                    None => Self::DEFAULT_TIMEOUT,
                    Some(value) => value
                        .parse::<u64>()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .map(Duration::from_secs)
                        .ok_or(ConfigError::InvalidPredictorTimeout)?,
                };
                Ok(Self::External {
                    program,
                    args,
                    timeout,
                })
            }
            Some(other) => Err(ConfigError::UnknownPredictor(other.to_string())),
        }
    }
}

/// Where reference diseases and plans come from.
#[derive(Debug, Clone, Default)]
pub struct ReferenceConfig {
    /// JSON catalog on disk; the built-in standard catalog is used when absent.
    pub data_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UnknownPredictor(String),
    MissingPredictorCommand,
    InvalidPredictorTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnknownPredictor(value) => write!(
                f,
                "APP_PREDICTOR '{value}' is not one of 'symptom-match' or 'external'"
            ),
            ConfigError::MissingPredictorCommand => write!(
                f,
                "APP_PREDICTOR_COMMAND is required when APP_PREDICTOR=external"
            ),
            ConfigError::InvalidPredictorTimeout => write!(
                f,
                "APP_PREDICTOR_TIMEOUT_SECS must be a positive number of seconds"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::UnknownPredictor(_)
            | ConfigError::MissingPredictorCommand
            | ConfigError::InvalidPredictorTimeout => None,
        }
    }
}
