use crate::error::Result;
use crate::models::filter::DEFAULT_TOP_N;
use config::{Config, Environment};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_URL: &str = "https://ahcamachod.github.io/productos";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the sales dataset comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub url: String,
    /// Local copy of the dataset document; takes precedence over `url`
    #[serde(default)]
    pub path: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Prepended to formatted revenue figures
    pub currency_prefix: String,
    pub default_top_n: usize,
    pub cache_views: bool,
    pub cache_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            source: SourceConfig {
                url: DEFAULT_SOURCE_URL.to_string(),
                path: None,
                timeout_secs: 30,
            },
            dashboard: DashboardSettings::default(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            currency_prefix: "COP".to_string(),
            default_top_n: DEFAULT_TOP_N,
            cache_views: true,
            cache_capacity: 256,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `DASHBOARD_*` environment variables,
    /// e.g. `DASHBOARD_SERVER__PORT=9000` or `DASHBOARD_SOURCE__PATH=./productos.html`
    pub fn from_env() -> Result<Self> {
        let defaults = AppConfig::default();
        let config = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port as i64)?
            .set_default("source.url", defaults.source.url)?
            .set_default("source.timeout_secs", defaults.source.timeout_secs as i64)?
            .set_default("dashboard.currency_prefix", defaults.dashboard.currency_prefix)?
            .set_default("dashboard.default_top_n", defaults.dashboard.default_top_n as i64)?
            .set_default("dashboard.cache_views", defaults.dashboard.cache_views)?
            .set_default("dashboard.cache_capacity", defaults.dashboard.cache_capacity as i64)?
            .add_source(
                Environment::with_prefix("DASHBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
        assert!(config.source.path.is_none());
        assert_eq!(config.dashboard.default_top_n, 5);
        assert_eq!(config.dashboard.currency_prefix, "COP");
    }

    #[test]
    fn test_from_env_without_overrides_matches_defaults() {
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.dashboard.cache_capacity, 256);
        assert_eq!(config.source.timeout_secs, 30);
    }
}
