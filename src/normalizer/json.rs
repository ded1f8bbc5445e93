use super::parse_percentage;
use crate::domain::{
    ClassProbability, PredictionError, PredictionResult, UNKNOWN_LABEL, normalize_confidence,
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

const DEFAULT_FAILURE_MESSAGE: &str = "Prediction failed";

/// Maps a structured prediction body onto the canonical record.
///
/// Every field has a default; only a body that is not a JSON object fails.
pub fn from_json(body: &str, received_at: DateTime<Utc>) -> Result<PredictionResult, PredictionError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        PredictionError::PredictionFailed(format!("Malformed prediction response: {e}"))
    })?;

    let Value::Object(fields) = value else {
        return Err(PredictionError::PredictionFailed(
            "Malformed prediction response: expected a JSON object".to_string(),
        ));
    };

    Ok(from_fields(&fields, received_at))
}

fn from_fields(fields: &Map<String, Value>, received_at: DateTime<Utc>) -> PredictionResult {
    PredictionResult {
        label: label(fields.get("label")),
        confidence: confidence(fields.get("confidence")),
        probabilities: probabilities(fields.get("probabilities")),
        image_url: fields
            .get("image_url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        preventive_measures: string_list(fields.get("preventive_measures")),
        causing_agents: string_list(fields.get("causing_agents")),
        timestamp: received_at,
    }
}

/// Message carried by a non-OK structured response, `Prediction failed` when absent.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())
}

fn label(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .unwrap_or(UNKNOWN_LABEL)
        .to_string()
}

fn confidence(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => normalize_confidence(number.as_f64().unwrap_or(0.0)),
        Some(Value::String(text)) => parse_percentage(text),
        _ => 0.0,
    }
}

fn probabilities(value: Option<&Value>) -> Vec<ClassProbability> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .collect()
}
