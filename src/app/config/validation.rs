use super::{Config, ConfigError};
use url::Url;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate service URL
        let url = Url::parse(&self.api_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid API URL '{}': {}", self.api_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL '{}' must use http or https",
                self.api_url
            )));
        }

        if self.max_file_size_mb == 0 {
            return Err(ConfigError::InvalidConfig(
                "Maximum file size must be greater than 0".to_string(),
            ));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "Connection timeout must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "Request timeout must be greater than 0 when set".to_string(),
            ));
        }

        if !self.ephemeral && self.history_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "History directory must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
