use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://cottonaid.onrender.com";
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 16;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the classification service; endpoint paths are joined onto it.
    pub base_url: String,
    /// Try `/api/predict` first and fall back to `/predict`.
    pub prefer_json: bool,
    pub max_upload_mb: u64,
    pub connect_timeout: Duration,
    /// Whole-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            prefer_json: false,
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            user_agent: format!("cottonaid-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
