use thiserror::Error;

/// Failure taxonomy surfaced by `PredictionClient::predict`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// Missing, oversize or wrongly typed upload. Raised before any network activity.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport failure with no response received.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The server answered but signalled failure, or the body could not be parsed.
    #[error("{0}")]
    PredictionFailed(String),
}

impl PredictionError {
    /// Whether the JSON path may hand this failure over to the HTML path.
    ///
    /// Re-sending an invalid upload over the other transport would not change the outcome.
    pub fn is_fallback_eligible(&self) -> bool {
        !matches!(self, PredictionError::InvalidInput(_))
    }
}

impl From<reqwest::Error> for PredictionError {
    fn from(err: reqwest::Error) -> Self {
        PredictionError::NetworkError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_never_falls_back() {
        assert!(!PredictionError::InvalidInput("too big".into()).is_fallback_eligible());
        assert!(PredictionError::NetworkError("refused".into()).is_fallback_eligible());
        assert!(PredictionError::PredictionFailed("boom".into()).is_fallback_eligible());
    }

    #[test]
    fn prediction_failed_displays_bare_message() {
        let err = PredictionError::PredictionFailed("Prediction failed".into());
        assert_eq!(err.to_string(), "Prediction failed");
    }
}
