//! Market-research domain model.
//!
//! * [`Understanding`], [`Intent`], [`MarketData`], [`Article`],
//!   [`AnswerResult`] — the payloads of the three stages.
//! * [`resolve_ticker`] — display ticker derived from the intent.
//! * [`next_headline`] / [`Headline`] — the cyclic headline carousel.
//! * [`audio`] — helpers for the spoken answer's data URL.

pub mod audio;
pub mod headlines;
pub mod ticker;
pub mod types;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use headlines::{next_headline, Headline};
pub use ticker::{resolve_ticker, FALLBACK_TICKER};
pub use types::{AnswerResult, Article, Intent, MarketData, Understanding};
