//! Signal Parser
//!
//! Turns free chat text into a [`Signal`]. Two shapes are recognized:
//!
//! - `#<ticker> bullish` opens a long on a single ticker
//! - `short #<a> #<b> ...` opens shorts on every listed ticker, left to right
//!
//! Matching is case-insensitive and unanchored. When a message matches both
//! shapes, the bullish reading wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Direction;
use crate::domain::shared::Ticker;

#[allow(clippy::expect_used)]
static BULLISH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)\s+bullish").expect("static bullish pattern is valid"));

#[allow(clippy::expect_used)]
static SHORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"short\s+((?:#\w+\s+)*#\w+)").expect("static short pattern is valid")
});

#[allow(clippy::expect_used)]
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("static hashtag pattern is valid"));

/// A parsed trading signal. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Direction of every symbol in the signal.
    pub direction: Direction,
    /// Tickers in message order. Duplicates are kept.
    pub symbols: Vec<Ticker>,
}

impl Signal {
    /// Create a signal.
    #[must_use]
    pub const fn new(direction: Direction, symbols: Vec<Ticker>) -> Self {
        Self { direction, symbols }
    }

    /// Comma-separated ticker list for log lines.
    #[must_use]
    pub fn symbol_list(&self) -> String {
        self.symbols
            .iter()
            .map(Ticker::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse chat text into a signal.
///
/// Returns `None` when the text matches neither shape. That is not an error:
/// callers log and skip it.
#[must_use]
pub fn parse_signal(text: &str) -> Option<Signal> {
    let text = text.trim().to_lowercase();

    if let Some(caps) = BULLISH.captures(&text) {
        return Some(Signal::new(Direction::Long, vec![Ticker::new(&caps[1])]));
    }

    let caps = SHORT.captures(&text)?;
    let symbols: Vec<Ticker> = HASHTAG
        .captures_iter(&caps[1])
        .map(|c| Ticker::new(&c[1]))
        .collect();

    if symbols.is_empty() {
        return None;
    }

    Some(Signal::new(Direction::Short, symbols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn tickers(signal: &Signal) -> Vec<&str> {
        signal.symbols.iter().map(Ticker::as_str).collect()
    }

    #[test_case("#ETH bullish", "ETH" ; "canonical")]
    #[test_case("#eth BULLISH", "ETH" ; "mixed case")]
    #[test_case("   #sol    bullish   ", "SOL" ; "padded whitespace")]
    #[test_case("#btc\nbullish", "BTC" ; "newline separator")]
    #[test_case("Looks good: #Doge bullish today", "DOGE" ; "embedded in sentence")]
    #[test_case("#1000pepe bullish", "1000PEPE" ; "numeric prefix")]
    fn bullish_yields_single_long(text: &str, expected: &str) {
        let signal = parse_signal(text).unwrap();
        assert_eq!(signal.direction, Direction::Long);
        assert_eq!(tickers(&signal), vec![expected]);
    }

    #[test_case("Short #BTC #SOL", &["BTC", "SOL"] ; "two tickers")]
    #[test_case("short #btc", &["BTC"] ; "single ticker")]
    #[test_case("SHORT   #a   #b\t#c", &["A", "B", "C"] ; "mixed whitespace")]
    #[test_case("short #btc #btc", &["BTC", "BTC"] ; "duplicates kept")]
    #[test_case("time to short #xrp #ada #dot now", &["XRP", "ADA", "DOT"] ; "embedded")]
    fn short_yields_all_tickers_in_order(text: &str, expected: &[&str]) {
        let signal = parse_signal(text).unwrap();
        assert_eq!(signal.direction, Direction::Short);
        assert_eq!(tickers(&signal), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("hello world" ; "chatter")]
    #[test_case("short btc sol" ; "short without hashtags")]
    #[test_case("#eth is bullish" ; "word between ticker and bullish")]
    #[test_case("bullish #eth" ; "reversed order")]
    #[test_case("#eth long" ; "unsupported keyword")]
    fn unrecognized_text_is_ignored(text: &str) {
        assert!(parse_signal(text).is_none());
    }

    #[test]
    fn bullish_wins_when_both_shapes_match() {
        let signal = parse_signal("short #btc #eth bullish").unwrap();
        assert_eq!(signal.direction, Direction::Long);
        assert_eq!(tickers(&signal), vec!["ETH"]);
    }

    #[test]
    fn symbol_list_joins_in_order() {
        let signal = parse_signal("short #btc #sol").unwrap();
        assert_eq!(signal.symbol_list(), "BTC, SOL");
    }

    proptest! {
        #[test]
        fn bullish_roundtrips_any_ticker(ticker in "[a-z][a-z0-9]{0,9}", pad in "[ \t]{1,4}") {
            let text = format!("#{ticker}{pad}bullish");
            let signal = parse_signal(&text).unwrap();
            prop_assert_eq!(signal.direction, Direction::Long);
            prop_assert_eq!(signal.symbols, vec![Ticker::new(ticker)]);
        }

        #[test]
        fn short_preserves_order_and_count(list in prop::collection::vec("[a-z][a-z0-9]{0,7}", 1..6)) {
            let tags: Vec<String> = list.iter().map(|t| format!("#{t}")).collect();
            let text = format!("short {}", tags.join(" "));
            let signal = parse_signal(&text).unwrap();
            prop_assert_eq!(signal.direction, Direction::Short);
            let expected: Vec<Ticker> = list.into_iter().map(Ticker::new).collect();
            prop_assert_eq!(signal.symbols, expected);
        }

        #[test]
        fn parsing_is_idempotent(text in ".{0,64}") {
            prop_assert_eq!(parse_signal(&text), parse_signal(&text));
        }
    }
}
