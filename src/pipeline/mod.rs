//! Request-pipeline orchestrator.
//!
//! This module chains the three dependent stage calls and keeps the user
//! busy with rotating headlines while the slow answer call runs.
//!
//! # Architecture
//!
//! ```text
//! audio bytes
//!        │
//!        ▼
//! PipelineOrchestrator::process()  ← async, one query
//!        │
//!        ├─ StageClient(transcribe) ─ fail-fast
//!        ├─ StageClient(mcp)        ─ fail-fast
//!        │
//!        ├─ AnswerTask::spawn ─────────────┐  tokio task, fail-soft
//!        │                                 │
//!        ├─ loop select {                  │
//!        │     answer settled ◀────────────┘  oneshot
//!        │     interval tick → QueryState::tick → Headline
//!        │  }
//!        └─ FinalAnswer
//!
//! PipelineEvent (mpsc) ───▶ presentation layer
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use market_analyst::client::HttpStageClient;
//! use market_analyst::config::AppConfig;
//! use market_analyst::pipeline::{PipelineEvent, PipelineOrchestrator, PipelineSettings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let client = Arc::new(HttpStageClient::from_config(&config.service));
//!     let orchestrator =
//!         PipelineOrchestrator::new(client, PipelineSettings::from_config(&config));
//!
//!     let (events_tx, mut events_rx) = mpsc::channel::<PipelineEvent>(32);
//!     tokio::spawn(async move {
//!         while let Some(event) = events_rx.recv().await {
//!             println!("{event:?}");
//!         }
//!     });
//!
//!     let wav = std::fs::read("question.wav").unwrap();
//!     match orchestrator.process(wav, &events_tx).await {
//!         Ok(answer) => println!("{}", answer.text),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

pub mod answer;
pub mod events;
pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use answer::{AnswerOutcome, AnswerRequest, AnswerTask, SoftFailure};
pub use events::{FinalAnswer, PipelineEvent};
pub use runner::{PipelineError, PipelineOrchestrator, PipelineSettings};
pub use state::{PipelineState, QueryState};
