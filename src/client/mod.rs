//! Stage service clients.
//!
//! This module provides:
//! * [`StageClient`] — async trait for one request/response exchange.
//! * [`HttpStageClient`] — the reqwest-backed production client.
//! * [`Stage`] / [`StagePayload`] — which service to call and with what.
//! * [`StageError`] — error variants for a failed call.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use market_analyst::client::{HttpStageClient, Stage, StageClient, StagePayload};
//! use market_analyst::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let client = HttpStageClient::from_config(&config.service);
//!
//!     let wav = std::fs::read("question.wav").unwrap();
//!     let body = client
//!         .call(Stage::Transcribe, StagePayload::Audio(wav))
//!         .await
//!         .unwrap();
//!     println!("{}", body["transcript"]);
//! }
//! ```

pub mod http;
pub mod stage;

#[cfg(test)]
pub mod mock;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use http::HttpStageClient;
pub use stage::{Stage, StageClient, StageError, StagePayload};
