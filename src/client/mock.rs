//! Scripted [`StageClient`] test double.
//!
//! Each stage gets a pre-configured reply; every call is recorded so tests
//! can assert which stages ran and with what payload.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::stage::{Stage, StageClient, StageError, StagePayload};

/// How a scripted stage responds.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond immediately.
    Now(Result<Value, StageError>),
    /// Respond after sleeping for the given duration.
    After(Duration, Result<Value, StageError>),
    /// Never respond.
    Never,
    /// Panic inside the call.
    Panic,
}

pub struct MockStageClient {
    transcribe: Reply,
    market_data: Reply,
    answer: Reply,
    calls: Mutex<Vec<(Stage, StagePayload)>>,
}

impl MockStageClient {
    pub fn new(transcribe: Reply, market_data: Reply, answer: Reply) -> Self {
        Self {
            transcribe,
            market_data,
            answer,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Stages invoked so far, in call order.
    pub fn stages(&self) -> Vec<Stage> {
        self.calls.lock().unwrap().iter().map(|(s, _)| *s).collect()
    }

    /// Payload sent to `stage` on its first call.
    pub fn payload(&self, stage: Stage) -> Option<StagePayload> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, p)| p.clone())
    }
}

#[async_trait]
impl StageClient for MockStageClient {
    async fn call(&self, stage: Stage, payload: StagePayload) -> Result<Value, StageError> {
        self.calls.lock().unwrap().push((stage, payload));
        let reply = match stage {
            Stage::Transcribe => self.transcribe.clone(),
            Stage::MarketData => self.market_data.clone(),
            Stage::Answer => self.answer.clone(),
        };
        match reply {
            Reply::Now(result) => result,
            Reply::After(delay, result) => {
                tokio::time::sleep(delay).await;
                result
            }
            Reply::Never => std::future::pending().await,
            Reply::Panic => panic!("scripted {stage} panic"),
        }
    }
}
