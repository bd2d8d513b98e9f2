//! Voice-driven market research pipeline.
//!
//! A recorded question goes through three dependent stage services
//! (transcription + intent, market data, answer synthesis).  While the slow
//! answer call runs in the background, the latest headlines for the detected
//! ticker rotate on screen.

pub mod cli;
pub mod client;
pub mod config;
pub mod market;
pub mod pipeline;
pub mod present;
pub mod prompts;
