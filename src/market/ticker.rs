//! Display ticker derivation.

use serde_json::Value;

use super::types::Intent;

/// Label used when the intent names no ticker at all.
pub const FALLBACK_TICKER: &str = "This stock";

/// Pick the ticker to show next to the headlines.
///
/// Precedence: first entry of `tickers` (when it is a non-blank string), then
/// the singular `ticker` field (when non-blank), then [`FALLBACK_TICKER`].
/// The result is always upper-cased.
///
/// ```
/// use market_analyst::market::{resolve_ticker, Intent};
///
/// let intent: Intent = serde_json::from_value(serde_json::json!({
///     "tickers": ["tsla", "aapl"],
///     "ticker": "msft"
/// })).unwrap();
/// assert_eq!(resolve_ticker(&intent), "TSLA");
/// ```
pub fn resolve_ticker(intent: &Intent) -> String {
    let from_list = intent
        .tickers()
        .first()
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty());

    let from_field = || intent.ticker().filter(|s| !s.trim().is_empty());

    from_list
        .or_else(from_field)
        .unwrap_or(FALLBACK_TICKER)
        .trim()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn intent(value: Value) -> Intent {
        Intent::from_value(value)
    }

    #[test]
    fn first_of_list_wins_over_singular_field() {
        let i = intent(json!({ "tickers": ["tsla", "aapl"], "ticker": "msft" }));
        assert_eq!(resolve_ticker(&i), "TSLA");
    }

    #[test]
    fn list_entries_are_upper_cased() {
        for t in ["nke", "Nke", "NKE", "brk.b"] {
            let i = intent(json!({ "tickers": [t] }));
            assert_eq!(resolve_ticker(&i), t.to_uppercase());
        }
    }

    #[test]
    fn tsla_aapl_resolves_to_tsla() {
        let i = intent(json!({ "tickers": ["TSLA", "AAPL"] }));
        assert_eq!(resolve_ticker(&i), "TSLA");
    }

    #[test]
    fn singular_field_used_when_list_missing() {
        let i = intent(json!({ "ticker": "aapl" }));
        assert_eq!(resolve_ticker(&i), "AAPL");
    }

    #[test]
    fn singular_field_used_when_list_empty() {
        let i = intent(json!({ "tickers": [], "ticker": "aapl" }));
        assert_eq!(resolve_ticker(&i), "AAPL");
    }

    #[test]
    fn fallback_when_neither_present() {
        let i = intent(json!({ "type": "sentiment" }));
        assert_eq!(resolve_ticker(&i), FALLBACK_TICKER.to_uppercase());
        assert_eq!(resolve_ticker(&Intent::default()), "THIS STOCK");
    }

    #[test]
    fn non_string_list_entry_falls_through() {
        let i = intent(json!({ "tickers": [7], "ticker": "amd" }));
        assert_eq!(resolve_ticker(&i), "AMD");
    }

    #[test]
    fn blank_values_fall_through() {
        let i = intent(json!({ "tickers": [""], "ticker": "  " }));
        assert_eq!(resolve_ticker(&i), "THIS STOCK");
    }
}
