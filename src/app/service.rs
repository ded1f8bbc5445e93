use crate::client::PredictionClient;
use crate::domain::{HistoryEntry, ModelMetadata, PredictionError, PredictionResult, UploadCandidate};
use crate::history::{HistoryStore, KeyValueStore};
use serde_json::Value;
use tracing::info;

/// Operations the presentation layer drives: classification plus history.
pub struct PredictionService<S> {
    client: PredictionClient,
    history: HistoryStore<S>,
}

impl<S: KeyValueStore> PredictionService<S> {
    pub fn new(client: PredictionClient, history: HistoryStore<S>) -> Self {
        Self { client, history }
    }

    pub fn client(&self) -> &PredictionClient {
        &self.client
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub async fn check_availability(&self) -> bool {
        self.client.check_availability().await
    }

    /// Classifies `file` and records the result.
    ///
    /// A failure to record never fails the prediction itself.
    pub async fn analyze(&self, file: &UploadCandidate) -> Result<PredictionResult, PredictionError> {
        let result = self.client.predict(file).await?;
        let log = self.history.append(result.clone());

        info!(
            label = %result.label,
            confidence = result.confidence,
            history_len = log.len(),
            "Prediction complete"
        );
        Ok(result)
    }

    pub async fn model_metadata(&self) -> ModelMetadata {
        self.client.model_metadata().await
    }

    pub async fn training_metrics(&self) -> Option<Value> {
        self.client.training_metrics().await
    }

    pub fn list_history(&self) -> Vec<HistoryEntry> {
        self.history.list()
    }

    pub fn append_history(&self, result: PredictionResult) -> Vec<HistoryEntry> {
        self.history.append(result)
    }

    pub fn remove_history(&self, id: i64) -> Vec<HistoryEntry> {
        self.history.remove(id)
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }
}
