//! Domain layer for the CottonAid client.
//!
//! Contains the canonical types shared across all modules:
//! - `PredictionResult`: normalized output of either prediction endpoint
//! - `HistoryEntry`: a persisted `PredictionResult` with its removal id
//! - `UploadCandidate`: the image being submitted
//! - `PredictionError`: failure taxonomy of the prediction pipeline

pub mod disease_class;
pub mod error;
pub mod history_entry;
pub mod metadata;
pub mod prediction;
pub mod upload;

pub use disease_class::DiseaseClass;
pub use error::PredictionError;
pub use history_entry::HistoryEntry;
pub use metadata::ModelMetadata;
pub use prediction::{
    ClassProbability, MAX_CONFIDENCE, PredictionResult, UNKNOWN_LABEL, normalize_confidence,
};
pub use upload::{ALLOWED_CONTENT_TYPES, UploadCandidate};
