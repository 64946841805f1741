use crate::workflows::dashboard::RiskPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_REFRESH_SECS: u64 = 300;

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
    pub dashboard: DashboardConfig,
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

        let refresh_secs = match env::var("APP_DASHBOARD_REFRESH_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidRefreshInterval)?,
            Err(_) => DEFAULT_REFRESH_SECS,
        };

        let defaults = RiskPolicy::default();
        let max_temperature_violations = match env::var("APP_RISK_MAX_TEMPERATURE_VIOLATIONS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidRiskThreshold {
                    name: "APP_RISK_MAX_TEMPERATURE_VIOLATIONS",
                })?,
            Err(_) => defaults.max_temperature_violations,
        };
        let minimum_compliance_percent = match env::var("APP_RISK_MIN_COMPLIANCE_PERCENT") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|pct| (0.0..=100.0).contains(pct))
                .ok_or(ConfigError::InvalidRiskThreshold {
                    name: "APP_RISK_MIN_COMPLIANCE_PERCENT",
                })?,
            Err(_) => defaults.minimum_compliance_percent,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dashboard: DashboardConfig {
                refresh_interval: Duration::from_secs(refresh_secs),
                risk_policy: RiskPolicy {
                    max_temperature_violations,
                    minimum_compliance_percent,
                },
            },
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

/// Dashboard refresh cadence and the risk thresholds applied to each snapshot.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub refresh_interval: Duration,
    pub risk_policy: RiskPolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRefreshInterval,
    InvalidRiskThreshold { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRefreshInterval => write!(
                f,
                "APP_DASHBOARD_REFRESH_SECS must be a positive number of seconds"
            ),
            ConfigError::InvalidRiskThreshold { name } => {
                write!(f, "{name} is not a valid risk threshold")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidRefreshInterval
            | ConfigError::InvalidRiskThreshold { .. } => None,
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
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_DASHBOARD_REFRESH_SECS");
        env::remove_var("APP_RISK_MAX_TEMPERATURE_VIOLATIONS");
        env::remove_var("APP_RISK_MIN_COMPLIANCE_PERCENT");
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
        assert_eq!(config.dashboard.refresh_interval, Duration::from_secs(300));
        assert_eq!(config.dashboard.risk_policy, RiskPolicy::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_zero_refresh_interval() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DASHBOARD_REFRESH_SECS", "0");
        let err = AppConfig::load().expect_err("zero interval rejected");
        assert!(matches!(err, ConfigError::InvalidRefreshInterval));
        reset_env();
    }

    #[test]
    fn risk_thresholds_can_be_overridden() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_RISK_MAX_TEMPERATURE_VIOLATIONS", "3");
        env::set_var("APP_RISK_MIN_COMPLIANCE_PERCENT", "90");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.dashboard.risk_policy.max_temperature_violations, 3);
        assert_eq!(config.dashboard.risk_policy.minimum_compliance_percent, 90.0);

        env::set_var("APP_RISK_MIN_COMPLIANCE_PERCENT", "140");
        match AppConfig::load() {
            Err(ConfigError::InvalidRiskThreshold { name }) => {
                assert_eq!(name, "APP_RISK_MIN_COMPLIANCE_PERCENT")
            }
            other => panic!("expected invalid threshold, got {other:?}"),
        }
        reset_env();
    }
}
