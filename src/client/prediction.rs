use super::config::ClientConfig;
use crate::domain::{ModelMetadata, PredictionError, PredictionResult, UploadCandidate};
use crate::normalizer::ResponseFormat;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

const HEALTH_PATH: &str = "api/health";
const METADATA_PATH: &str = "api/model/metadata";
const METRICS_PATH: &str = "api/model/metrics";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// HTTP client for the classification service.
///
/// Hides whether the backend speaks the structured JSON API or only renders
/// the legacy result page.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    config: ClientConfig,
    base_url: Url,
}

impl PredictionClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut base_url: Url = config.base_url.parse().map_err(|e| {
            ClientError::InvalidConfiguration(format!("Invalid base URL '{}': {e}", config.base_url))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidConfiguration(format!(
                "Base URL '{}' cannot carry endpoint paths",
                config.base_url
            )));
        }

        // Endpoint paths are joined relative to the base, so it must end in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = ClientBuilder::new()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            ClientError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Probes `GET /api/health`; any 2xx means available.
    pub async fn check_availability(&self) -> bool {
        let Ok(url) = self.base_url.join(HEALTH_PATH) else {
            return false;
        };

        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(status = %response.status(), "JSON API not available, will use fallback");
                false
            }
            Err(e) => {
                warn!(error = %e, "JSON API not available, will use fallback");
                false
            }
        }
    }

    /// Checks an upload before anything is sent: presence, size, then type.
    pub fn validate(&self, file: &UploadCandidate) -> Result<(), PredictionError> {
        if file.is_empty() {
            return Err(PredictionError::InvalidInput("No file provided".to_string()));
        }

        if file.size() > self.config.max_upload_bytes() {
            return Err(PredictionError::InvalidInput(format!(
                "File size exceeds {}MB limit",
                self.config.max_upload_mb
            )));
        }

        if !file.has_allowed_type() {
            return Err(PredictionError::InvalidInput(
                "Please upload a JPG, JPEG, or PNG image".to_string(),
            ));
        }

        Ok(())
    }

    /// Classifies an upload.
    ///
    /// In JSON-preferred mode any failure of the structured call is logged
    /// and the legacy page is tried; only the final outcome is returned.
    pub async fn predict(&self, file: &UploadCandidate) -> Result<PredictionResult, PredictionError> {
        self.validate(file)?;

        info!(
            file_name = file.file_name(),
            size = file.size(),
            prefer_json = self.config.prefer_json,
            "Submitting image for prediction"
        );

        if self.config.prefer_json {
            match self.predict_json(file).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_fallback_eligible() => {
                    warn!(error = %e, "JSON API failed, falling back to HTML endpoint");
                }
                Err(e) => return Err(e),
            }
        }

        self.predict_html(file).await.inspect_err(|e| {
            error!(error = %e, "HTML fallback prediction failed");
        })
    }

    /// Structured path only: `POST /api/predict`.
    pub async fn predict_json(&self, file: &UploadCandidate) -> Result<PredictionResult, PredictionError> {
        self.submit(ResponseFormat::Json, file).await
    }

    /// Legacy path only: `POST /predict`, scraping the returned page.
    pub async fn predict_html(&self, file: &UploadCandidate) -> Result<PredictionResult, PredictionError> {
        self.submit(ResponseFormat::Html, file).await
    }

    async fn submit(
        &self,
        format: ResponseFormat,
        file: &UploadCandidate,
    ) -> Result<PredictionResult, PredictionError> {
        let url = self.base_url.join(format.endpoint_path()).map_err(|e| {
            PredictionError::PredictionFailed(format!("Invalid prediction URL: {e}"))
        })?;

        let start = Instant::now();
        let response = self
            .client
            .post(url)
            .multipart(upload_form(file)?)
            .send()
            .await?;

        let status = response.status();
        let received_at = Utc::now();
        let body = response.text().await.map_err(|e| {
            PredictionError::PredictionFailed(format!("Failed to read {format} response: {e}"))
        })?;

        debug!(
            %format,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "prediction response received"
        );

        if !status.is_success() {
            return Err(format.parse_failure(status.as_u16(), &body));
        }

        format.parse_success(&body, &self.base_url, received_at)
    }

    /// `GET /api/model/metadata`. Fields that are missing or malformed take
    /// their built-in defaults; a failed request yields the defaults outright.
    pub async fn model_metadata(&self) -> ModelMetadata {
        match self.get_json(METADATA_PATH).await {
            Some(value) => ModelMetadata::from_response(&value),
            None => {
                warn!("Model metadata not available");
                ModelMetadata::default()
            }
        }
    }

    /// `GET /api/model/metrics`; `None` on any failure.
    pub async fn training_metrics(&self) -> Option<Value> {
        let metrics = self.get_json(METRICS_PATH).await;
        if metrics.is_none() {
            warn!("Training metrics not available");
        }
        metrics
    }

    async fn get_json(&self, path: &str) -> Option<Value> {
        let url = self.base_url.join(path).ok()?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| debug!(path, error = %e, "request failed"))
            .ok()?;

        if !response.status().is_success() {
            debug!(path, status = %response.status(), "non-success response");
            return None;
        }

        response
            .json::<Value>()
            .await
            .inspect_err(|e| debug!(path, error = %e, "response is not JSON"))
            .ok()
    }
}

fn upload_form(file: &UploadCandidate) -> Result<Form, PredictionError> {
    let part = Part::stream_with_length(file.data().clone(), file.size())
        .file_name(file.file_name().to_string())
        .mime_str(file.content_type())
        .map_err(|e| PredictionError::InvalidInput(format!("Invalid content type: {e}")))?;

    Ok(Form::new().part("file", part))
}
