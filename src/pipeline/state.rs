//! Pipeline state machine and per-query rotation state.
//!
//! [`PipelineState`] drives the orchestrator's state machine; every
//! transition is reported to the presentation layer as a
//! [`PipelineEvent::State`](super::PipelineEvent::State).
//!
//! [`QueryState`] is the orchestrator-owned half of the per-query
//! coordination record: the ticker, the article list and the rotation index.
//! The other half (the answer and its completion signal) travels through the
//! one-shot channel owned by [`AnswerTask`](super::AnswerTask).

use crate::client::Stage;
use crate::market::{next_headline, Article, Headline};

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// States of the request pipeline.
///
/// ```text
/// AwaitingAudio ──audio──▶ Transcribing ──ok──▶ Understood
///   ──▶ FetchingMarketData ──ok──▶ DataReady ──spawn answer──▶ AwaitingAnswer
///   ──answer settled──▶ Complete
///
/// Transcribing       ──error──▶ Failed(transcribe)
/// FetchingMarketData ──error──▶ Failed(mcp)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Waiting for the presentation layer to supply a recording.
    AwaitingAudio,

    /// The recording is being transcribed and classified.
    Transcribing,

    /// Transcript, intent and ticker are known.
    Understood,

    /// The market-data service is being queried.
    FetchingMarketData,

    /// Market data is in hand; the answer call is about to start.
    DataReady,

    /// The answer call is in flight; headlines rotate meanwhile.
    AwaitingAnswer,

    /// The answer (or the no-answer fallback) has been emitted.
    Complete,

    /// A fail-fast stage failed.  Terminal.
    Failed(Stage),
}

impl PipelineState {
    /// Returns `true` while a query is in flight.
    ///
    /// ```
    /// use market_analyst::pipeline::PipelineState;
    ///
    /// assert!(!PipelineState::AwaitingAudio.is_busy());
    /// assert!(PipelineState::Transcribing.is_busy());
    /// assert!(PipelineState::AwaitingAnswer.is_busy());
    /// assert!(!PipelineState::Complete.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        !matches!(
            self,
            PipelineState::AwaitingAudio | PipelineState::Complete | PipelineState::Failed(_)
        )
    }

    /// `Complete` and `Failed` end a query.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Complete | PipelineState::Failed(_))
    }

    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_advance_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (*self, next),
            (AwaitingAudio, Transcribing)
                | (Transcribing, Understood)
                | (Transcribing, Failed(Stage::Transcribe))
                | (Understood, FetchingMarketData)
                | (FetchingMarketData, DataReady)
                | (FetchingMarketData, Failed(Stage::MarketData))
                | (DataReady, AwaitingAnswer)
                | (AwaitingAnswer, Complete)
        )
    }

    /// A short human-readable label suitable for a status line.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::AwaitingAudio => "Awaiting audio",
            PipelineState::Transcribing => "Transcribing and classifying intent",
            PipelineState::Understood => "Query understood",
            PipelineState::FetchingMarketData => "Fetching structured market data",
            PipelineState::DataReady => "Market data retrieved",
            PipelineState::AwaitingAnswer => "Generating final answer",
            PipelineState::Complete => "Done",
            PipelineState::Failed(_) => "Failed",
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        PipelineState::AwaitingAudio
    }
}

// ---------------------------------------------------------------------------
// QueryState
// ---------------------------------------------------------------------------

/// Rotation state for one query.
///
/// Created when market data arrives, dropped when the orchestrator returns.
/// Only the orchestrator touches it.
#[derive(Debug, Clone)]
pub struct QueryState {
    ticker: String,
    articles: Vec<Article>,
    rotation_index: usize,
}

impl QueryState {
    pub fn new(ticker: String, articles: Vec<Article>) -> Self {
        Self {
            ticker,
            articles,
            rotation_index: 0,
        }
    }

    /// Advance the carousel by one step.
    ///
    /// Returns `None`, without touching the index, when there are no
    /// articles.
    pub fn tick(&mut self) -> Option<Headline> {
        let (article, next) = next_headline(&self.articles, self.rotation_index)?;
        let headline = Headline {
            ticker: self.ticker.clone(),
            article: article.clone(),
            position: self.rotation_index % self.articles.len(),
            total: self.articles.len(),
        };
        self.rotation_index = next;
        Some(headline)
    }

    pub fn rotation_index(&self) -> usize {
        self.rotation_index
    }

    pub fn has_headlines(&self) -> bool {
        !self.articles.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
