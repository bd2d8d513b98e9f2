//! Messages delivered from the orchestrator to the presentation layer.

use crate::client::Stage;
use crate::market::{AnswerResult, Headline, Intent, MarketData};

use super::answer::{AnswerOutcome, SoftFailure};
use super::state::PipelineState;

/// Progress events emitted while a query runs, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// The state machine moved to a new state.
    State(PipelineState),
    /// Stage 1 finished: what the user asked and which ticker to show.
    Understood {
        transcript: String,
        intent: Intent,
        ticker: String,
    },
    /// Stage 2 finished; the raw payload is passed along for display.
    MarketData(MarketData),
    /// One carousel frame.  Only emitted while the answer is pending.
    Headline(Headline),
    /// The carousel has stopped; any headline on screen should go.
    HeadlinesCleared,
    /// The final output (possibly the no-answer fallback).
    Answer(FinalAnswer),
    /// A fail-fast stage failed; the query is over.
    Failed { stage: Stage, message: String },
    /// The query was refused before any stage ran.
    Rejected { message: String },
}

/// What the user finally gets.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalAnswer {
    /// Empty when the answer stage failed softly.
    pub text: String,
    /// `data:` URL of the spoken answer, if one came back.
    pub audio: Option<String>,
    /// Set when the answer stage degraded to the fallback.
    pub failure: Option<SoftFailure>,
}

impl FinalAnswer {
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

impl From<AnswerOutcome> for FinalAnswer {
    fn from(outcome: AnswerOutcome) -> Self {
        let AnswerOutcome { result, failure } = outcome;
        let audio = result.audio().map(str::to_string);
        let AnswerResult { answer, .. } = result;
        Self {
            text: answer,
            audio,
            failure,
        }
    }
}
