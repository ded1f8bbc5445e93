use super::prediction::PredictionResult;
use serde::{Deserialize, Serialize};

/// A persisted prediction. `id` is the removal key and grows with each append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(flatten)]
    pub result: PredictionResult,
}

impl HistoryEntry {
    pub fn new(id: i64, result: PredictionResult) -> Self {
        Self { id, result }
    }
}
