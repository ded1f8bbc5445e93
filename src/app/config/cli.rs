use super::env_helpers::{
    load_env_flag, load_env_path, load_env_path_opt, load_env_string, load_env_var,
    load_env_var_opt,
};
use super::{ConfigError, LogFormat, LogLevel};
use crate::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_UPLOAD_MB};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the classification service
    #[arg(long, env = "COTTONAID_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Prefer the structured JSON API, falling back to the legacy page
    #[arg(long, env = "USE_JSON_API", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub use_json_api: bool,

    /// Maximum accepted upload size in MB
    #[arg(long, env = "MAX_FILE_SIZE_MB", default_value_t = DEFAULT_MAX_UPLOAD_MB)]
    pub max_file_size_mb: u64,

    /// Connection timeout in seconds
    #[arg(long, env = "CONNECT_TIMEOUT_SECS", default_value = "10")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds (unbounded when unset)
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Directory holding the persisted prediction history
    #[arg(long, env = "HISTORY_DIR", default_value = ".cottonaid")]
    pub history_dir: PathBuf,

    /// Keep history in memory only
    #[arg(long, env = "EPHEMERAL_HISTORY", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub ephemeral: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Configuration file path (optional)
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Derived fields (not CLI arguments)
    #[serde(skip)]
    #[arg(skip)]
    pub connect_timeout: Duration,

    #[serde(skip)]
    #[arg(skip)]
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            use_json_api: false,
            max_file_size_mb: DEFAULT_MAX_UPLOAD_MB,
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            history_dir: PathBuf::from(".cottonaid"),
            ephemeral: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Pretty,
            config_file: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

impl Config {
    /// Reads every setting from the environment, starting from defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        load_env_string("COTTONAID_API_URL", &mut config.api_url);
        load_env_flag("USE_JSON_API", &mut config.use_json_api)?;
        load_env_var("MAX_FILE_SIZE_MB", &mut config.max_file_size_mb)?;
        load_env_var("CONNECT_TIMEOUT_SECS", &mut config.connect_timeout_secs)?;
        load_env_var_opt("REQUEST_TIMEOUT_SECS", &mut config.request_timeout_secs)?;
        load_env_path("HISTORY_DIR", &mut config.history_dir);
        load_env_flag("EPHEMERAL_HISTORY", &mut config.ephemeral)?;
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level.parse()?;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.log_format = format.parse()?;
        }
        load_env_path_opt("CONFIG_FILE", &mut config.config_file);

        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    pub fn post_process(&mut self) -> Result<(), ConfigError> {
        self.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        self.request_timeout = self.request_timeout_secs.map(Duration::from_secs);
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            prefer_json: self.use_json_api,
            max_upload_mb: self.max_file_size_mb,
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            ..ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_file_may_be_partial() {
        let config = Config::from_toml(
            r#"
            api_url = "http://localhost:5000"
            use_json_api = true
            request_timeout_secs = 30
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:5000");
        assert!(config.use_json_api);
        assert_eq!(config.max_file_size_mb, 16);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn client_config_carries_settings() {
        let mut config = Config {
            api_url: "http://localhost:5000".to_string(),
            use_json_api: true,
            max_file_size_mb: 4,
            ..Config::default()
        };
        config.post_process().unwrap();

        let client = config.client_config();
        assert_eq!(client.base_url, "http://localhost:5000");
        assert!(client.prefer_json);
        assert_eq!(client.max_upload_bytes(), 4 * 1024 * 1024);
        assert_eq!(client.request_timeout, None);
    }

    #[test]
    fn malformed_toml_is_reported() {
        assert!(matches!(
            Config::from_toml("api_url = "),
            Err(ConfigError::ParseError(_))
        ));
    }
}
