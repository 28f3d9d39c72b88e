// ============================================================
// APPLICATION CONFIG
// ============================================================
// stockpulse.toml, overridden by STOCKPULSE_* environment variables

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "stockpulse.toml";
pub const ENV_PREFIX: &str = "STOCKPULSE_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// Largest accepted upload body, in bytes
    #[validate(range(min = 1024))]
    pub max_upload_bytes: usize,
    /// `["*"]` allows any origin
    #[validate(length(min = 1))]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_upload_bytes: 16 * 1024 * 1024,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `stockpulse_lib=debug`
    #[validate(length(min = 1))]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Output sizes in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartConfig {
    #[validate(range(min = 200, max = 8000))]
    pub bar_width: u32,
    #[validate(range(min = 150, max = 8000))]
    pub bar_height: u32,
    #[validate(range(min = 150, max = 8000))]
    pub pie_size: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bar_width: 1200,
            bar_height: 600,
            pie_size: 800,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub log: LogConfig,
    #[validate(nested)]
    pub charts: ChartConfig,
}

impl AppConfig {
    /// Load `.env`, then `stockpulse.toml` from the working directory, then the
    /// environment
    pub fn load() -> Result<Self> {
        // A missing .env is fine
        let _ = dotenvy::dotenv();
        Self::from_figment(Self::figment(CONFIG_FILE))
    }

    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment.extract()?;
        config
            .validate()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
