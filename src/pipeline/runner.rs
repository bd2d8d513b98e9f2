//! Pipeline orchestrator — drives transcribe → market data → answer.
//!
//! [`PipelineOrchestrator`] sequences the three dependent stage calls for one
//! recording and reports progress as [`PipelineEvent`]s over a
//! `tokio::sync::mpsc` channel.
//!
//! # Pipeline flow
//!
//! ```text
//! audio bytes
//!   └─▶ StageClient(transcribe)                 [Transcribing]
//!         ├─ Err → Failed(transcribe), stop
//!         └─ Ok  → resolve ticker               [Understood]
//!               └─▶ StageClient(mcp)            [FetchingMarketData]
//!                     ├─ Err → Failed(mcp), stop
//!                     └─ Ok                     [DataReady]
//!                           └─▶ AnswerTask::spawn        [AwaitingAnswer]
//!                                 loop select {
//!                                   answer settled → break
//!                                   interval tick  → Headline
//!                                 }
//!                           └─▶ HeadlinesCleared, Answer [Complete]
//! ```
//!
//! The first two stages are fail-fast; the answer stage is fail-soft and
//! always reaches `Complete`.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::client::{Stage, StageClient, StageError, StagePayload};
use crate::config::AppConfig;
use crate::market::{resolve_ticker, MarketData, Understanding};

use super::answer::{AnswerRequest, AnswerTask};
use super::events::{FinalAnswer, PipelineEvent};
use super::state::{PipelineState, QueryState};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Fatal pipeline failures.
///
/// Answer-stage problems never show up here; they degrade the
/// [`FinalAnswer`] instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The trigger supplied no audio at all.
    #[error("no audio captured")]
    EmptyAudio,

    /// The transcribe or market-data stage failed.
    #[error(transparent)]
    Stage(#[from] StageError),
}

impl PipelineError {
    /// The failed stage, if a stage failed.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::EmptyAudio => None,
            PipelineError::Stage(e) => Some(e.stage()),
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineSettings
// ---------------------------------------------------------------------------

/// Timing knobs for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    /// Time between headline frames.
    pub rotation_interval: Duration,
    /// Upper bound on the answer call; `None` waits indefinitely.
    pub answer_deadline: Option<Duration>,
}

impl PipelineSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            rotation_interval: config.rotation.interval(),
            answer_deadline: config.service.answer_timeout(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Drives one market-research query at a time.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use market_analyst::client::HttpStageClient;
/// use market_analyst::config::AppConfig;
/// use market_analyst::pipeline::{PipelineOrchestrator, PipelineSettings};
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let client = Arc::new(HttpStageClient::from_config(&config.service));
/// let orchestrator = PipelineOrchestrator::new(client, PipelineSettings::from_config(&config));
///
/// let (events_tx, mut events_rx) = tokio::sync::mpsc::channel(32);
/// tokio::spawn(async move {
///     while let Some(event) = events_rx.recv().await {
///         println!("{event:?}");
///     }
/// });
///
/// let wav = std::fs::read("question.wav").unwrap();
/// let answer = orchestrator.process(wav, &events_tx).await;
/// # }
/// ```
pub struct PipelineOrchestrator {
    client: Arc<dyn StageClient>,
    settings: PipelineSettings,
}

impl PipelineOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `client`   — stage client shared with the background answer task.
    /// * `settings` — rotation interval and answer deadline.
    pub fn new(client: Arc<dyn StageClient>, settings: PipelineSettings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    // -----------------------------------------------------------------------
    // Query
    // -----------------------------------------------------------------------

    /// Run the full pipeline for one recording.
    ///
    /// Progress goes to `events`; a closed receiver does not stop the
    /// pipeline.  Returns the final answer, or the fatal failure that halted
    /// the query.
    pub async fn process(
        &self,
        audio: Vec<u8>,
        events: &mpsc::Sender<PipelineEvent>,
    ) -> Result<FinalAnswer, PipelineError> {
        if audio.is_empty() {
            log::warn!("pipeline: empty recording rejected");
            let err = PipelineError::EmptyAudio;
            emit(events, PipelineEvent::Rejected { message: err.to_string() }).await;
            return Err(err);
        }

        // ── 1. Transcribe + classify ─────────────────────────────────────
        self.advance(events, PipelineState::Transcribing).await;
        let body = match self
            .client
            .call(Stage::Transcribe, StagePayload::Audio(audio))
            .await
        {
            Ok(body) => body,
            Err(e) => return Err(self.fail(events, e).await),
        };

        let Understanding { transcript, intent } = Understanding::from_response(body);
        let ticker = resolve_ticker(&intent);
        log::debug!("pipeline: transcript = {transcript:?}, ticker = {ticker}");

        self.advance(events, PipelineState::Understood).await;
        emit(
            events,
            PipelineEvent::Understood {
                transcript: transcript.clone(),
                intent: intent.clone(),
                ticker: ticker.clone(),
            },
        )
        .await;

        // ── 2. Market data ───────────────────────────────────────────────
        self.advance(events, PipelineState::FetchingMarketData).await;
        let request = serde_json::json!({ "transcript": &transcript, "intent": &intent });
        let market_data = match self
            .client
            .call(Stage::MarketData, StagePayload::Json(request))
            .await
        {
            Ok(body) => MarketData::new(body),
            Err(e) => return Err(self.fail(events, e).await),
        };

        let articles = market_data.news_summary();
        log::debug!("pipeline: market data ready, {} articles", articles.len());

        self.advance(events, PipelineState::DataReady).await;
        emit(events, PipelineEvent::MarketData(market_data.clone())).await;

        // ── 3. Answer in the background, headlines in the foreground ─────
        let mut query = QueryState::new(ticker, articles);
        let mut task = AnswerTask::spawn(
            Arc::clone(&self.client),
            AnswerRequest {
                transcript,
                intent,
                mcp_data: market_data,
            },
            self.settings.answer_deadline,
        );
        self.advance(events, PipelineState::AwaitingAnswer).await;

        let mut interval = tokio::time::interval(self.settings.rotation_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let outcome = loop {
            tokio::select! {
                biased;

                outcome = &mut task => break outcome,

                _ = interval.tick() => {
                    if let Some(headline) = query.tick() {
                        emit(events, PipelineEvent::Headline(headline)).await;
                    }
                }
            }
        };

        log::debug!(
            "pipeline: answer settled after {} headline ticks",
            query.rotation_index()
        );
        if query.has_headlines() {
            emit(events, PipelineEvent::HeadlinesCleared).await;
        }

        // ── 4. Finalise ──────────────────────────────────────────────────
        let answer = FinalAnswer::from(outcome);
        self.advance(events, PipelineState::Complete).await;
        emit(events, PipelineEvent::Answer(answer.clone())).await;

        Ok(answer)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn advance(&self, events: &mpsc::Sender<PipelineEvent>, state: PipelineState) {
        log::debug!("pipeline: → {}", state.label());
        emit(events, PipelineEvent::State(state)).await;
    }

    async fn fail(&self, events: &mpsc::Sender<PipelineEvent>, error: StageError) -> PipelineError {
        let stage = error.stage();
        log::error!("pipeline error: {error}");
        self.advance(events, PipelineState::Failed(stage)).await;
        emit(
            events,
            PipelineEvent::Failed {
                stage,
                message: error.to_string(),
            },
        )
        .await;
        PipelineError::Stage(error)
    }
}

async fn emit(events: &mpsc::Sender<PipelineEvent>, event: PipelineEvent) {
    // A presentation layer that went away must not abort the query.
    let _ = events.send(event).await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
