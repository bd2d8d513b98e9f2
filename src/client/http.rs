//! `HttpStageClient` — the production [`StageClient`] over HTTP.
//!
//! All three stages are `POST`s against a single base address taken from
//! [`ServiceConfig`]; the endpoint paths are fixed per [`Stage`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;

use crate::client::stage::{Stage, StageClient, StageError, StagePayload};
use crate::config::ServiceConfig;

/// Multipart field name, filename and content type of the recording upload.
const AUDIO_FIELD: &str = "file";
const AUDIO_FILE_NAME: &str = "audio.wav";
const AUDIO_MIME: &str = "audio/wav";

/// Calls the stage services over HTTP.
///
/// Two underlying clients are kept: one bounded by
/// `ServiceConfig::stage_timeout_secs` for the transcribe and market-data
/// stages, and one with no timeout at all for the answer stage, whose latency
/// is masked by the headline rotation instead.
pub struct HttpStageClient {
    client: reqwest::Client,
    answer_client: reqwest::Client,
    base_url: String,
}

impl HttpStageClient {
    /// Build an `HttpStageClient` from application config.
    ///
    /// A default client is used as a last-resort fallback if the builder
    /// fails.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            client: build_client(config.stage_timeout()),
            answer_client: build_client(None),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL of `stage`'s endpoint.
    pub fn endpoint(&self, stage: Stage) -> String {
        format!("{}{}", self.base_url, stage.path())
    }

    fn client_for(&self, stage: Stage) -> &reqwest::Client {
        match stage {
            Stage::Answer => &self.answer_client,
            Stage::Transcribe | Stage::MarketData => &self.client,
        }
    }
}

fn build_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[async_trait]
impl StageClient for HttpStageClient {
    async fn call(&self, stage: Stage, payload: StagePayload) -> Result<Value, StageError> {
        let url = self.endpoint(stage);
        let request = self.client_for(stage).post(&url);

        let request = match payload {
            StagePayload::Audio(bytes) => {
                log::debug!("client: {stage} upload of {} bytes to {url}", bytes.len());
                let part = Part::bytes(bytes)
                    .file_name(AUDIO_FILE_NAME)
                    .mime_str(AUDIO_MIME)
                    .map_err(|e| StageError::from_reqwest(stage, e))?;
                request.multipart(Form::new().part(AUDIO_FIELD, part))
            }
            StagePayload::Json(body) => {
                log::debug!("client: {stage} request to {url}");
                request.json(&body)
            }
        };

        let response = request
            .send()
            .await
            .map_err(|e| StageError::from_reqwest(stage, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(StageError::Status {
                stage,
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| StageError::Decode {
                stage,
                message: e.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
