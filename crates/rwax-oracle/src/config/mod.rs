use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

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

/// Top-level configuration for the oracle binaries.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub oracle: OracleConfig,
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
        let ansi = parse_var("APP_LOG_ANSI", false)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, ansi },
            oracle: OracleConfig::from_env()?,
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
    pub ansi: bool,
}

pub const DEFAULT_MINIMUM_LEASE_AGE: i32 = 10;
pub const DEFAULT_MRT_WEIGHT: f64 = 0.6;
pub const DEFAULT_CBD_WEIGHT: f64 = 0.4;
pub const DEFAULT_MIN_LINE_LENGTH: usize = 10;
pub const DEFAULT_SOURCE_TAG: &str = "URA_API_2026";
pub const DEFAULT_YT_MATURITY: &str = "28";

/// Knobs for parsing, scoring and the compliance gate.
///
/// Every value can be overridden through `ORACLE_*` environment variables, so
/// rule changes (a new assessment year, a different lease-age floor) never
/// require a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Year used to age leasehold commencement dates.
    pub current_year: i32,
    /// Leases at least this old (inclusive) pass the compliance gate.
    pub minimum_lease_age: i32,
    pub mrt_weight: f64,
    pub cbd_weight: f64,
    /// Lines shorter than this many characters are treated as noise.
    pub min_line_length: usize,
    pub source_tag: String,
    /// Suffix appended to yield-token tickers, e.g. `YT-MAR-28`.
    pub yt_maturity: String,
}

impl OracleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            current_year: parse_var("ORACLE_CURRENT_YEAR", defaults.current_year)?,
            minimum_lease_age: parse_var("ORACLE_MIN_LEASE_AGE", defaults.minimum_lease_age)?,
            mrt_weight: parse_var("ORACLE_WEIGHT_MRT", defaults.mrt_weight)?,
            cbd_weight: parse_var("ORACLE_WEIGHT_CBD", defaults.cbd_weight)?,
            min_line_length: parse_var("ORACLE_MIN_LINE_LENGTH", defaults.min_line_length)?,
            source_tag: env::var("ORACLE_SOURCE_TAG").unwrap_or(defaults.source_tag),
            yt_maturity: env::var("ORACLE_YT_MATURITY").unwrap_or(defaults.yt_maturity),
        })
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            current_year: chrono::Local::now().year(),
            minimum_lease_age: DEFAULT_MINIMUM_LEASE_AGE,
            mrt_weight: DEFAULT_MRT_WEIGHT,
            cbd_weight: DEFAULT_CBD_WEIGHT,
            min_line_length: DEFAULT_MIN_LINE_LENGTH,
            source_tag: DEFAULT_SOURCE_TAG.to_string(),
            yt_maturity: DEFAULT_YT_MATURITY.to_string(),
        }
    }
}

fn parse_var<T: FromStr>(variable: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { variable, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { variable: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16 port number"),
            ConfigError::InvalidHost { source } => {
                write!(f, "APP_HOST must be a valid IP address or 'localhost': {source}")
            }
            ConfigError::InvalidValue { variable, value } => {
                write!(f, "{variable} has an unparseable value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for variable in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_ANSI",
            "ORACLE_CURRENT_YEAR",
            "ORACLE_MIN_LEASE_AGE",
            "ORACLE_WEIGHT_MRT",
            "ORACLE_WEIGHT_CBD",
            "ORACLE_MIN_LINE_LENGTH",
            "ORACLE_SOURCE_TAG",
            "ORACLE_YT_MATURITY",
        ] {
            env::remove_var(variable);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.ansi);
        assert_eq!(config.oracle.minimum_lease_age, 10);
        assert_eq!(config.oracle.mrt_weight, 0.6);
        assert_eq!(config.oracle.cbd_weight, 0.4);
        assert_eq!(config.oracle.min_line_length, 10);
        assert_eq!(config.oracle.source_tag, "URA_API_2026");
        assert_eq!(config.oracle.current_year, chrono::Local::now().year());
    }

    #[test]
    fn oracle_rules_are_overridable_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ORACLE_CURRENT_YEAR", "2030");
        env::set_var("ORACLE_MIN_LEASE_AGE", "5");
        env::set_var("ORACLE_WEIGHT_MRT", "0.5");
        env::set_var("ORACLE_SOURCE_TAG", "URA_API_2030");
        let config = OracleConfig::from_env().expect("overrides parse");
        reset_env();

        assert_eq!(config.current_year, 2030);
        assert_eq!(config.minimum_lease_age, 5);
        assert_eq!(config.mrt_weight, 0.5);
        assert_eq!(config.cbd_weight, DEFAULT_CBD_WEIGHT);
        assert_eq!(config.source_tag, "URA_API_2030");
    }

    #[test]
    fn rejects_unparseable_oracle_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ORACLE_MIN_LEASE_AGE", "ten");
        let error = OracleConfig::from_env().expect_err("invalid lease age");
        reset_env();

        match error {
            ConfigError::InvalidValue { variable, value } => {
                assert_eq!(variable, "ORACLE_MIN_LEASE_AGE");
                assert_eq!(value, "ten");
            }
            other => panic!("expected invalid value error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }
}
