use super::disease_class::DiseaseClass;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Description of the model behind the prediction endpoint.
///
/// Fields missing from a server response are filled from [`ModelMetadata::default`];
/// see [`ModelMetadata::from_response`] for shape mismatches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelMetadata {
    pub model_name: String,
    pub model_path: String,
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_classes: Option<usize>,
    pub image_size: Vec<u32>,
    pub last_trained: String,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            model_name: "DenseNet121".to_string(),
            model_path: "model/enhanced_model.h5".to_string(),
            classes: DiseaseClass::ALL
                .iter()
                .map(|class| class.model_name().to_string())
                .collect(),
            num_classes: None,
            image_size: vec![224, 224],
            last_trained: "Unknown".to_string(),
        }
    }
}

impl ModelMetadata {
    /// Reads each field on its own, so one mistyped field keeps its default
    /// without discarding the rest of the response.
    pub fn from_response(value: &Value) -> Self {
        let defaults = Self::default();

        Self {
            model_name: field(value, "model_name").unwrap_or(defaults.model_name),
            model_path: field(value, "model_path").unwrap_or(defaults.model_path),
            classes: field(value, "classes").unwrap_or(defaults.classes),
            num_classes: field(value, "num_classes").or(defaults.num_classes),
            image_size: field(value, "image_size").unwrap_or(defaults.image_size),
            last_trained: field(value, "last_trained").unwrap_or(defaults.last_trained),
        }
    }
}

fn field<T: DeserializeOwned>(value: &Value, name: &str) -> Option<T> {
    let raw = value.get(name)?;
    serde_json::from_value(raw.clone())
        .inspect_err(|e| {
            warn!(field = name, error = %e, "Model metadata field malformed, using default");
        })
        .ok()
}
