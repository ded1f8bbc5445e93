//! Pure mapping from the two backend response shapes onto `PredictionResult`.

pub mod html;
pub mod json;

pub use html::from_html;
pub use json::{error_message, from_json};

use crate::domain::{PredictionError, PredictionResult, normalize_confidence};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use url::Url;

/// Response contract of a prediction endpoint.
///
/// Each variant names its endpoint and its parser; the client walks
/// [`ResponseFormat::Json`] then [`ResponseFormat::Html`] without the caller knowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// `POST /api/predict`, machine readable body.
    Json,
    /// `POST /predict`, server-rendered result page.
    Html,
}

impl ResponseFormat {
    pub fn endpoint_path(self) -> &'static str {
        match self {
            ResponseFormat::Json => "api/predict",
            ResponseFormat::Html => "predict",
        }
    }

    /// Normalizes the body of a successful (2xx) response.
    pub fn parse_success(
        self,
        body: &str,
        base_url: &Url,
        received_at: DateTime<Utc>,
    ) -> Result<PredictionResult, PredictionError> {
        match self {
            ResponseFormat::Json => from_json(body, received_at),
            ResponseFormat::Html => Ok(from_html(body, base_url, received_at)),
        }
    }

    /// Error for a non-OK response with the given body.
    pub fn parse_failure(self, status: u16, body: &str) -> PredictionError {
        let message = match self {
            ResponseFormat::Json => error_message(body),
            ResponseFormat::Html => "Prediction failed".to_string(),
        };
        tracing::debug!(format = %self, status, %message, "prediction endpoint rejected request");
        PredictionError::PredictionFailed(message)
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseFormat::Json => f.write_str("json"),
            ResponseFormat::Html => f.write_str("html"),
        }
    }
}

static LEADING_NUMBER: OnceLock<Option<Regex>> = OnceLock::new();

/// Parses text such as `"96.5%"` into a confidence.
///
/// Percent signs are dropped and the leading decimal number is read; text
/// without one, or a value outside `[0, 100]`, yields `0`.
pub fn parse_percentage(text: &str) -> f64 {
    let cleaned = text.replace('%', "");
    let cleaned = cleaned.trim();

    let pattern = LEADING_NUMBER.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").ok()
    });

    pattern
        .as_ref()
        .and_then(|re| re.find(cleaned))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(normalize_confidence)
        .unwrap_or(0.0)
}
