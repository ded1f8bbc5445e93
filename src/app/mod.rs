pub mod config;
pub mod logging;
pub mod service;

pub use config::{Config, ConfigError, LogFormat, LogLevel};
pub use logging::{LoggingError, init_tracing};
pub use service::PredictionService;

use crate::client::PredictionClient;
use crate::domain::{PredictionError, UploadCandidate};
use crate::history::{FileStore, HistoryStore, KeyValueStore, MemoryStore};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Probe the structured API health endpoint
    Health,
    /// Classify a leaf image and record the result in history
    Predict {
        /// JPG or PNG image to classify
        path: PathBuf,
    },
    /// Show the model description
    Metadata,
    /// Show training metrics, or null when the service has none
    Metrics,
    /// Inspect or edit the prediction history
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum HistoryCommand {
    /// List entries, newest first
    List,
    /// Remove one entry by id
    Remove { id: i64 },
    /// Delete the whole history
    Clear,
}

pub struct App {
    service: PredictionService<Arc<dyn KeyValueStore>>,
}

impl App {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = PredictionClient::new(config.client_config())
            .context("Failed to create prediction client")?;

        let storage: Arc<dyn KeyValueStore> = if config.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(FileStore::new(&config.history_dir).with_context(|| {
                format!("Failed to open history at {}", config.history_dir.display())
            })?)
        };

        Ok(Self {
            service: PredictionService::new(client, HistoryStore::new(storage)),
        })
    }

    pub fn service(&self) -> &PredictionService<Arc<dyn KeyValueStore>> {
        &self.service
    }

    /// Runs one command and returns the JSON document it produces.
    pub async fn execute(&self, command: &Command) -> anyhow::Result<Value> {
        let output = match command {
            Command::Health => json!({ "available": self.service.check_availability().await }),
            Command::Predict { path } => {
                let upload = UploadCandidate::from_path(path).await.map_err(|e| {
                    PredictionError::InvalidInput(format!("Cannot read {}: {e}", path.display()))
                })?;
                serde_json::to_value(self.service.analyze(&upload).await?)?
            }
            Command::Metadata => serde_json::to_value(self.service.model_metadata().await)?,
            Command::Metrics => self.service.training_metrics().await.unwrap_or(Value::Null),
            Command::History(HistoryCommand::List) => {
                serde_json::to_value(self.service.list_history())?
            }
            Command::History(HistoryCommand::Remove { id }) => {
                serde_json::to_value(self.service.remove_history(*id))?
            }
            Command::History(HistoryCommand::Clear) => {
                self.service.clear_history();
                json!([])
            }
        };
        Ok(output)
    }
}

/// Resolves the effective configuration: a config file, when named, replaces flags and env.
pub fn resolve_config(cli_config: Config) -> Result<Config, ConfigError> {
    if let Some(path) = &cli_config.config_file {
        return Config::from_file(path);
    }

    let mut config = cli_config;
    config.post_process()?;
    config.validate()?;
    Ok(config)
}

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Main entry point for the application
pub async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(config.log_level, config.log_format) {
        eprintln!("Warning: {e}, continuing without structured logging");
    }

    info!(
        version = %get_version(),
        api_url = %config.api_url,
        use_json_api = config.use_json_api,
        "Starting cottonaid client"
    );

    let app = match App::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Initialization error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match app.execute(&cli.command).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to render output: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            if let Some(prediction_error) = e.downcast_ref::<PredictionError>() {
                println!("{}", json!({ "error": prediction_error.to_string() }));
            }
            error!("Command failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
