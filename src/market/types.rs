//! Payload types exchanged with the stage services.
//!
//! The services speak loosely-typed JSON.  Nothing here validates a schema:
//! every accessor reads what it can and falls back to a documented default,
//! so a sparse or oddly-shaped response still produces something renderable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NO_TITLE: &str = "No Title";
pub const NO_SUMMARY: &str = "No Summary";
pub const NO_URL: &str = "#";

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// Structured intent detected alongside the transcript.
///
/// Kept as an open JSON object: the pipeline only reads `tickers` / `ticker`
/// and forwards the rest untouched to the later stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Intent(Map<String, Value>);

impl Intent {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build an intent from an arbitrary JSON value; anything that is not an
    /// object becomes an empty intent.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// The `tickers` list, if present and an array.
    pub fn tickers(&self) -> &[Value] {
        self.0
            .get("tickers")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The singular `ticker` field, if present and a string.
    pub fn ticker(&self) -> Option<&str> {
        self.0.get("ticker").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Understanding  (transcribe stage output)
// ---------------------------------------------------------------------------

/// What the transcription stage understood from the recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Understanding {
    pub transcript: String,
    pub intent: Intent,
}

impl Understanding {
    /// Read `transcript` (default `""`) and `intent` (default `{}`) from a
    /// transcription response body.
    pub fn from_response(body: Value) -> Self {
        let Value::Object(mut map) = body else {
            return Self::default();
        };
        let transcript = match map.remove("transcript") {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };
        let intent = map
            .remove("intent")
            .map(Intent::from_value)
            .unwrap_or_default();
        Self { transcript, intent }
    }
}

// ---------------------------------------------------------------------------
// Article
// ---------------------------------------------------------------------------

/// A single news item from the market-data payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "Title", default = "default_title")]
    pub title: String,
    #[serde(rename = "Summary", default = "default_summary")]
    pub summary: String,
    #[serde(rename = "URL", default = "default_url")]
    pub url: String,
}

fn default_title() -> String {
    NO_TITLE.into()
}

fn default_summary() -> String {
    NO_SUMMARY.into()
}

fn default_url() -> String {
    NO_URL.into()
}

impl Default for Article {
    fn default() -> Self {
        Self {
            title: default_title(),
            summary: default_summary(),
            url: default_url(),
        }
    }
}

impl Article {
    /// Field-by-field extraction: a missing or `null` field takes its
    /// placeholder, a non-string scalar is rendered with its JSON text.
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: text_field(value, "Title").unwrap_or_else(default_title),
            summary: text_field(value, "Summary").unwrap_or_else(default_summary),
            url: text_field(value, "URL").unwrap_or_else(default_url),
        }
    }
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// MarketData  (mcp stage output)
// ---------------------------------------------------------------------------

/// Raw market-data payload.
///
/// Held verbatim because the answer stage expects it back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketData(Value);

impl MarketData {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// `data.news_summary`, in service order.  Empty when absent or not a
    /// list.
    pub fn news_summary(&self) -> Vec<Article> {
        self.0
            .get("data")
            .and_then(|data| data.get("news_summary"))
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Article::from_value).collect())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// AnswerResult  (answer stage output)
// ---------------------------------------------------------------------------

/// Final synthesised answer.  `audio` is either empty or a `data:` URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub audio: String,
}

impl AnswerResult {
    pub fn from_response(body: &Value) -> Self {
        let field = |key: &str| {
            body.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            answer: field("answer"),
            audio: field("audio"),
        }
    }

    /// `true` when neither text nor audio came back.
    pub fn is_empty(&self) -> bool {
        self.answer.trim().is_empty() && self.audio.trim().is_empty()
    }

    /// The playable audio payload, if any.
    pub fn audio(&self) -> Option<&str> {
        let audio = self.audio.trim();
        (!audio.is_empty()).then_some(audio)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
