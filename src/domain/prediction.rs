use super::disease_class::DiseaseClass;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label used whenever a classification cannot be extracted.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Upper bound of the percentage scale used for `confidence`.
pub const MAX_CONFIDENCE: f64 = 100.0;

/// One entry of the per-class probability vector.
///
/// The structured endpoint reports `{class, probability}` pairs; older
/// deployments send bare numbers in class order. Both are kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassProbability {
    Labeled { class: String, probability: f64 },
    Value(f64),
}

impl ClassProbability {
    pub fn value(&self) -> f64 {
        match self {
            ClassProbability::Labeled { probability, .. } => *probability,
            ClassProbability::Value(value) => *value,
        }
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            ClassProbability::Labeled { class, .. } => Some(class),
            ClassProbability::Value(_) => None,
        }
    }
}

/// Canonical output of a classification request, whichever endpoint produced it.
///
/// Serialized with camelCase keys; the snake_case keys written by the legacy
/// browser store are accepted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    #[serde(default = "unknown_label")]
    pub label: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub probabilities: Vec<ClassProbability>,
    #[serde(default, alias = "image_url")]
    pub image_url: String,
    #[serde(default, alias = "preventive_measures")]
    pub preventive_measures: Vec<String>,
    #[serde(default, alias = "causing_agents")]
    pub causing_agents: Vec<String>,
    #[serde(default)]
    pub timestamp: DateTime<Utc>,
}

fn unknown_label() -> String {
    UNKNOWN_LABEL.to_string()
}

impl PredictionResult {
    /// Result with every optional detail empty and the label set to `Unknown`.
    pub fn unknown(timestamp: DateTime<Utc>) -> Self {
        Self {
            label: unknown_label(),
            confidence: 0.0,
            probabilities: Vec::new(),
            image_url: String::new(),
            preventive_measures: Vec::new(),
            causing_agents: Vec::new(),
            timestamp,
        }
    }

    pub fn disease_class(&self) -> Option<DiseaseClass> {
        DiseaseClass::from_label(&self.label)
    }

    pub fn is_unknown(&self) -> bool {
        self.label == UNKNOWN_LABEL
    }

    /// Brings a result back inside the record's invariants: confidence in
    /// `[0, 100]`, a non-blank label, and only finite probabilities.
    pub fn sanitized(mut self) -> Self {
        self.confidence = normalize_confidence(self.confidence);

        let label = self.label.trim();
        self.label = if label.is_empty() {
            unknown_label()
        } else {
            label.to_string()
        };

        self.probabilities
            .retain(|probability| probability.value().is_finite());
        self
    }
}

/// Keeps a confidence inside `[0, 100]`; anything else becomes `0`.
pub fn normalize_confidence(value: f64) -> f64 {
    if value.is_finite() && (0.0..=MAX_CONFIDENCE).contains(&value) {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn confidence_outside_range_is_zeroed() {
        assert_eq!(normalize_confidence(96.5), 96.5);
        assert_eq!(normalize_confidence(0.0), 0.0);
        assert_eq!(normalize_confidence(100.0), 100.0);
        assert_eq!(normalize_confidence(100.01), 0.0);
        assert_eq!(normalize_confidence(-3.0), 0.0);
        assert_eq!(normalize_confidence(f64::NAN), 0.0);
        assert_eq!(normalize_confidence(f64::INFINITY), 0.0);
    }

    #[test]
    fn sanitized_restores_invariants() {
        let result = PredictionResult {
            label: "   ".to_string(),
            confidence: f64::NAN,
            probabilities: vec![
                ClassProbability::Value(f64::INFINITY),
                ClassProbability::Labeled {
                    class: "Healthy".to_string(),
                    probability: 92.0,
                },
            ],
            ..PredictionResult::unknown(Utc::now())
        }
        .sanitized();

        assert_eq!(result.label, UNKNOWN_LABEL);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.probabilities.len(), 1);
        assert_eq!(result.probabilities[0].class(), Some("Healthy"));

        let over = PredictionResult {
            label: " Aphids ".to_string(),
            confidence: 250.0,
            ..PredictionResult::unknown(Utc::now())
        }
        .sanitized();
        assert_eq!(over.label, "Aphids");
        assert_eq!(over.confidence, 0.0);
    }

    #[test]
    fn missing_timestamp_reads_as_epoch() {
        let parsed: PredictionResult =
            serde_json::from_value(json!({"label": "Healthy", "confidence": 90.0})).unwrap();
        assert_eq!(parsed.timestamp, DateTime::<Utc>::default());
    }

    #[test]
    fn probabilities_accept_both_shapes() {
        let parsed: Vec<ClassProbability> =
            serde_json::from_value(json!([{"class": "Healthy", "probability": 96.5}, 1.25]))
                .unwrap();

        assert_eq!(parsed[0].class(), Some("Healthy"));
        assert_eq!(parsed[0].value(), 96.5);
        assert_eq!(parsed[1].class(), None);
        assert_eq!(parsed[1].value(), 1.25);
    }

    #[test]
    fn legacy_snake_case_keys_are_read() {
        let parsed: PredictionResult = serde_json::from_value(json!({
            "label": "Aphids",
            "confidence": 81.0,
            "image_url": "https://example.test/uploads/leaf.jpg",
            "preventive_measures": ["Remove infested leaves"],
            "timestamp": "2025-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(parsed.image_url, "https://example.test/uploads/leaf.jpg");
        assert_eq!(parsed.preventive_measures, vec!["Remove infested leaves"]);
        assert!(parsed.causing_agents.is_empty());
        assert_eq!(parsed.disease_class(), Some(DiseaseClass::Aphids));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let result = PredictionResult::unknown(Utc::now());
        let value = serde_json::to_value(&result).unwrap();

        assert!(value.get("imageUrl").is_some());
        assert!(value.get("preventiveMeasures").is_some());
        assert!(value.get("causingAgents").is_some());
        assert_eq!(value["label"], "Unknown");
    }
}
