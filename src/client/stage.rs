//! Core `StageClient` trait, stage identifiers and `StageError`.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// The three dependent service calls, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Speech transcription + intent detection.
    Transcribe,
    /// Structured market-data retrieval (MCP agent).
    MarketData,
    /// Final answer synthesis.
    Answer,
}

impl Stage {
    /// Short name used in logs and failure reports.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Transcribe => "transcribe",
            Stage::MarketData => "mcp",
            Stage::Answer => "answer",
        }
    }

    /// Fixed endpoint path, appended to the configured base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Stage::Transcribe => "/transcribe/",
            Stage::MarketData => "/mcp/",
            Stage::Answer => "/answer/",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// StageError
// ---------------------------------------------------------------------------

/// Errors that can occur during a single stage call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StageError {
    /// Connection or transport failure before a status was received.
    #[error("{stage} request failed: {message}")]
    Transport { stage: Stage, message: String },

    /// The transport-level timeout elapsed.
    #[error("{stage} request timed out")]
    Timeout { stage: Stage },

    /// The service answered with a non-success status.
    #[error("{stage} service returned HTTP {status}")]
    Status { stage: Stage, status: u16 },

    /// The body of a successful response was not JSON.
    #[error("failed to parse {stage} response: {message}")]
    Decode { stage: Stage, message: String },
}

impl StageError {
    /// Classify a `reqwest` error raised while talking to `stage`.
    pub fn from_reqwest(stage: Stage, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            StageError::Timeout { stage }
        } else if e.is_decode() {
            StageError::Decode {
                stage,
                message: e.to_string(),
            }
        } else {
            StageError::Transport {
                stage,
                message: e.to_string(),
            }
        }
    }

    /// Which stage failed.
    pub fn stage(&self) -> Stage {
        match self {
            StageError::Transport { stage, .. }
            | StageError::Timeout { stage }
            | StageError::Status { stage, .. }
            | StageError::Decode { stage, .. } => *stage,
        }
    }

    /// HTTP status, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            StageError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// StagePayload
// ---------------------------------------------------------------------------

/// Request body for one stage call.
#[derive(Debug, Clone, PartialEq)]
pub enum StagePayload {
    /// Raw recording, uploaded as `audio/wav`.
    Audio(Vec<u8>),
    /// Structured JSON body.
    Json(Value),
}

// ---------------------------------------------------------------------------
// StageClient trait
// ---------------------------------------------------------------------------

/// One request/response exchange with a stage service.
///
/// Implementors must be `Send + Sync` so they can be shared with the
/// background answer task (e.g. wrapped in `Arc<dyn StageClient>`).
///
/// # Contract
///
/// - Exactly one request per call; no implicit retry.
/// - A non-success status or a transport failure is a [`StageError`].
/// - A success body is returned as parsed JSON without schema validation.
/// - Calls for [`Stage::Answer`] carry no response deadline.
#[async_trait]
pub trait StageClient: Send + Sync {
    async fn call(&self, stage: Stage, payload: StagePayload) -> Result<Value, StageError>;
}

// Compile-time assertion: Box<dyn StageClient> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn StageClient>) {}
};
