pub mod config;
pub mod prediction;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_UPLOAD_MB};
pub use prediction::{ClientError, PredictionClient};
