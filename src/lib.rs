#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_possible_truncation, // Elapsed milliseconds and byte counts stay far below u64::MAX
    clippy::cast_precision_loss,      // Acceptable for confidence display
    clippy::missing_errors_doc,       // Internal API
    clippy::module_name_repetitions,  // e.g. ClientError in client module
    clippy::must_use_candidate,       // Annotated selectively on critical APIs
    clippy::doc_markdown              // Internal API
)]

pub mod app;
pub mod client;
pub mod domain;
pub mod history;
pub mod normalizer;

// Re-export main types for easy access
pub use app::{App, Config, PredictionService};
pub use client::{ClientConfig, PredictionClient};
pub use domain::{HistoryEntry, PredictionError, PredictionResult, UploadCandidate};
pub use history::{HistoryStore, MAX_HISTORY_ITEMS};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
