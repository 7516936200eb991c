use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub support: SupportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub unix_socket: Option<PathBuf>,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Linear,
    Model,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_strategy")]
    pub strategy: StrategyKind,
    #[serde(default = "default_fallback_to_linear")]
    pub fallback_to_linear: bool,
    /// Directory holding model.json, scaler.json and features.json
    pub model_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Seconds without a request before a session is dropped
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: i64,
    /// Seconds between idle session sweeps
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupportConfig {
    #[serde(default = "default_support_contact")]
    pub contact_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

// Default value functions
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("user_data.json")
}

fn default_strategy() -> StrategyKind {
    StrategyKind::Linear
}

fn default_fallback_to_linear() -> bool {
    true
}

fn default_history_capacity() -> usize {
    1000
}

fn default_idle_timeout() -> i64 {
    1800
}

fn default_cleanup_interval() -> u64 {
    60
}

fn default_support_contact() -> String {
    "SafeClaim Support".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            fallback_to_linear: default_fallback_to_linear(),
            model_dir: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            idle_timeout: default_idle_timeout(),
            cleanup_interval: default_cleanup_interval(),
        }
    }
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            contact_name: default_support_contact(),
            phone: String::new(),
            email: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate server config
        if self.server.port.is_none() && self.server.unix_socket.is_none() {
            bail!("Either port or unix_socket must be specified in server config");
        }

        if let Some(port) = self.server.port {
            if port == 0 {
                bail!("Server port must be greater than 0");
            }
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        // Validate storage config
        if self.storage.credentials_path.as_os_str().is_empty() {
            bail!("credentials_path must not be empty");
        }

        // Validate prediction config
        if self.prediction.strategy == StrategyKind::Model
            && self.prediction.model_dir.is_none()
            && !self.prediction.fallback_to_linear
        {
            bail!("strategy 'model' without model_dir requires fallback_to_linear = true");
        }

        // Validate session config
        if self.session.history_capacity == 0 {
            bail!("history_capacity must be greater than 0");
        }

        if self.session.idle_timeout <= 0 {
            bail!("idle_timeout must be greater than 0");
        }

        if self.session.cleanup_interval == 0 {
            bail!("cleanup_interval must be greater than 0");
        }

        // Validate admin config
        if self.admin.api_key.is_empty() {
            bail!("api_key must not be empty");
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
