//! Background answer task.
//!
//! [`AnswerTask::spawn`] starts the answer-stage call on the tokio runtime and
//! hands back a future that resolves exactly once with an [`AnswerOutcome`].
//! The one-shot channel behind that future is the only thing the rotation
//! loop waits on; it never inspects the answer to decide when to stop.
//!
//! The answer stage is fail-soft: transport errors, bad statuses, a passed
//! deadline, an empty payload or even a panicking client all resolve to an
//! empty [`AnswerResult`] tagged with a [`SoftFailure`], never to an error.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::client::{Stage, StageClient, StageError, StagePayload};
use crate::market::{AnswerResult, Intent, MarketData};

// ---------------------------------------------------------------------------
// AnswerRequest
// ---------------------------------------------------------------------------

/// Body of the answer-stage call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerRequest {
    pub transcript: String,
    pub intent: Intent,
    pub mcp_data: MarketData,
}

// ---------------------------------------------------------------------------
// SoftFailure
// ---------------------------------------------------------------------------

/// Why the answer stage produced nothing usable.
///
/// All variants are rendered the same way ("no answer / no audio"); they are
/// kept apart for logging only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SoftFailure {
    /// The call itself failed (transport, status or undecodable body).
    #[error(transparent)]
    Stage(#[from] StageError),

    /// The configured answer deadline elapsed first.
    #[error("answer deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// The service answered successfully but with neither text nor audio.
    #[error("answer service returned an empty answer")]
    EmptyAnswer,

    /// The task ended without reporting (it panicked).
    #[error("answer task ended without a result")]
    Aborted,
}

// ---------------------------------------------------------------------------
// AnswerOutcome
// ---------------------------------------------------------------------------

/// What the background task reports when it settles.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    /// Empty on soft failure.
    pub result: AnswerResult,
    pub failure: Option<SoftFailure>,
}

impl AnswerOutcome {
    fn answered(result: AnswerResult) -> Self {
        Self {
            result,
            failure: None,
        }
    }

    fn failed(failure: SoftFailure) -> Self {
        Self {
            result: AnswerResult::default(),
            failure: Some(failure),
        }
    }

    pub fn is_soft_failure(&self) -> bool {
        self.failure.is_some()
    }
}

// ---------------------------------------------------------------------------
// AnswerTask
// ---------------------------------------------------------------------------

/// Handle to an in-flight answer call.
///
/// Awaiting it yields the outcome.  Dropping it does not cancel the call:
/// the spawned task always runs to completion.
#[derive(Debug)]
pub struct AnswerTask {
    done: oneshot::Receiver<AnswerOutcome>,
}

impl AnswerTask {
    /// Start the answer call in the background.
    ///
    /// `deadline` of `None` waits indefinitely.
    pub fn spawn(
        client: Arc<dyn StageClient>,
        request: AnswerRequest,
        deadline: Option<Duration>,
    ) -> Self {
        let (tx, done) = oneshot::channel();

        tokio::spawn(async move {
            let outcome = fetch_answer(client.as_ref(), request, deadline).await;
            match &outcome.failure {
                None => log::debug!("pipeline: answer received"),
                Some(failure) => log::warn!("pipeline: answer unavailable ({failure})"),
            }
            // The receiver may already be gone; nothing else to do then.
            let _ = tx.send(outcome);
        });

        Self { done }
    }
}

impl Future for AnswerTask {
    type Output = AnswerOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.done).poll(cx).map(|received| {
            received.unwrap_or_else(|_| AnswerOutcome::failed(SoftFailure::Aborted))
        })
    }
}

async fn fetch_answer(
    client: &dyn StageClient,
    request: AnswerRequest,
    deadline: Option<Duration>,
) -> AnswerOutcome {
    let body = match serde_json::to_value(&request) {
        Ok(body) => body,
        Err(e) => {
            return AnswerOutcome::failed(SoftFailure::Stage(StageError::Transport {
                stage: Stage::Answer,
                message: e.to_string(),
            }))
        }
    };

    let call = client.call(Stage::Answer, StagePayload::Json(body));
    let response = match deadline {
        None => call.await,
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(response) => response,
            Err(_) => return AnswerOutcome::failed(SoftFailure::DeadlineExceeded(limit)),
        },
    };

    match response {
        Ok(body) => {
            let result = AnswerResult::from_response(&body);
            if result.is_empty() {
                AnswerOutcome::failed(SoftFailure::EmptyAnswer)
            } else {
                AnswerOutcome::answered(result)
            }
        }
        Err(e) => AnswerOutcome::failed(SoftFailure::Stage(e)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockStageClient, Reply};
    use serde_json::json;

    fn request() -> AnswerRequest {
        AnswerRequest {
            transcript: "Should I buy Nike?".into(),
            intent: Intent::from_value(json!({ "tickers": ["NKE"] })),
            mcp_data: MarketData::new(json!({ "data": { "news_summary": [] } })),
        }
    }

    fn client(answer: Reply) -> Arc<MockStageClient> {
        Arc::new(MockStageClient::new(Reply::Never, Reply::Never, answer))
    }

    #[tokio::test]
    async fn success_carries_answer() {
        let mock = client(Reply::Now(Ok(json!({ "answer": "Buy NKE", "audio": "" }))));
        let outcome = AnswerTask::spawn(mock.clone(), request(), None).await;

        assert_eq!(outcome.result.answer, "Buy NKE");
        assert!(outcome.failure.is_none());
        assert_eq!(mock.stages(), [Stage::Answer]);
    }

    #[tokio::test]
    async fn request_body_has_all_three_fields() {
        let mock = client(Reply::Now(Ok(json!({ "answer": "ok" }))));
        AnswerTask::spawn(mock.clone(), request(), None).await;

        let Some(StagePayload::Json(body)) = mock.payload(Stage::Answer) else {
            panic!("answer payload missing");
        };
        assert_eq!(
            body,
            json!({
                "transcript": "Should I buy Nike?",
                "intent": { "tickers": ["NKE"] },
                "mcp_data": { "data": { "news_summary": [] } }
            })
        );
    }

    #[tokio::test]
    async fn status_error_is_soft() {
        let err = StageError::Status {
            stage: Stage::Answer,
            status: 503,
        };
        let outcome = AnswerTask::spawn(client(Reply::Now(Err(err.clone()))), request(), None).await;

        assert!(outcome.result.is_empty());
        assert_eq!(outcome.failure, Some(SoftFailure::Stage(err)));
    }

    #[tokio::test]
    async fn empty_payload_is_soft() {
        let outcome =
            AnswerTask::spawn(client(Reply::Now(Ok(json!({})))), request(), None).await;
        assert_eq!(outcome.failure, Some(SoftFailure::EmptyAnswer));
    }

    #[tokio::test]
    async fn panicking_client_resolves_as_aborted() {
        let outcome = AnswerTask::spawn(client(Reply::Panic), request(), None).await;
        assert_eq!(outcome.failure, Some(SoftFailure::Aborted));
        assert!(outcome.result.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_bounds_the_wait() {
        let limit = Duration::from_secs(30);
        let outcome = AnswerTask::spawn(client(Reply::Never), request(), Some(limit)).await;
        assert_eq!(outcome.failure, Some(SoftFailure::DeadlineExceeded(limit)));
    }

    #[tokio::test(start_paused = true)]
    async fn no_deadline_waits_for_slow_answer() {
        let slow = Reply::After(
            Duration::from_secs(600),
            Ok(json!({ "answer": "eventually", "audio": "" })),
        );
        let outcome = AnswerTask::spawn(client(slow), request(), None).await;
        assert_eq!(outcome.result.answer, "eventually");
    }

    #[tokio::test]
    async fn dropping_the_handle_does_not_cancel_the_call() {
        let mock = client(Reply::After(
            Duration::from_millis(20),
            Ok(json!({ "answer": "x" })),
        ));
        drop(AnswerTask::spawn(mock.clone(), request(), None));

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(mock.stages(), [Stage::Answer]);
    }
}
