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
    pub scoring: ScoringConfig,
    pub places: PlacesConfig,
    pub routing: RoutingConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig::from_env()?,
            places: PlacesConfig::from_env(),
            routing: RoutingConfig::from_env()?,
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

/// Which scoring backend answers `/route/score` and `/route/options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringBackendKind {
    Local,
    Remote { url: String, api_key: Option<String> },
}

/// Scoring backend selection plus the knobs shared by both variants.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub backend: ScoringBackendKind,
    pub timeout: Duration,
    /// Fixed PRNG seed; `None` draws fresh entropy for every call.
    pub seed: Option<u64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            backend: ScoringBackendKind::Local,
            timeout: Duration::from_millis(3000),
            seed: None,
        }
    }
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_ms = env::var("SCORING_TIMEOUT_MS")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let seed = match env::var("SCORING_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed)?,
            ),
            _ => None,
        };

        let backend = match env::var("SCORING_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "remote" => {
                let url = env::var("SCORING_REMOTE_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(ConfigError::MissingRemoteUrl)?;
                let api_key = env::var("SCORING_REMOTE_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty());
                ScoringBackendKind::Remote { url, api_key }
            }
            "local" => ScoringBackendKind::Local,
            other => return Err(ConfigError::UnknownScoringBackend(other.to_string())),
        };

        Ok(Self {
            backend,
            timeout: Duration::from_millis(timeout_ms),
            seed,
        })
    }
}

/// Places store seeding and label settings.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub seed_path: Option<PathBuf>,
    pub country: String,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            country: "Nigeria".to_string(),
        }
    }
}

impl PlacesConfig {
    fn from_env() -> Self {
        let seed_path = env::var("PLACES_SEED_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let country = env::var("PLACES_COUNTRY").unwrap_or_else(|_| "Nigeria".to_string());
        Self { seed_path, country }
    }
}

/// Route option planning defaults.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// `[lng, lat]` used when a client omits the start point.
    pub default_origin: [f64; 2],
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_origin: [3.3792, 6.5244],
        }
    }
}

impl RoutingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        match env::var("ROUTE_DEFAULT_ORIGIN") {
            Ok(raw) => Ok(Self {
                default_origin: parse_origin(&raw)?,
            }),
            Err(_) => Ok(Self::default()),
        }
    }
}

fn parse_origin(raw: &str) -> Result<[f64; 2], ConfigError> {
    let mut parts = raw.split(',').map(|part| part.trim().parse::<f64>());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(lng)), Some(Ok(lat)), None)
            if (-180.0..=180.0).contains(&lng) && (-90.0..=90.0).contains(&lat) =>
        {
            Ok([lng, lat])
        }
        _ => Err(ConfigError::InvalidOrigin),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
    InvalidSeed,
    InvalidOrigin,
    MissingRemoteUrl,
    UnknownScoringBackend(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "SCORING_TIMEOUT_MS must be a positive integer")
            }
            ConfigError::InvalidSeed => write!(f, "SCORING_SEED must be a valid u64"),
            ConfigError::InvalidOrigin => {
                write!(f, "ROUTE_DEFAULT_ORIGIN must be 'lng,lat' within valid ranges")
            }
            ConfigError::MissingRemoteUrl => write!(
                f,
                "SCORING_REMOTE_URL is required when SCORING_BACKEND=remote"
            ),
            ConfigError::UnknownScoringBackend(value) => write!(
                f,
                "SCORING_BACKEND must be 'local' or 'remote', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

/// Serializes tests that read or write process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
}
