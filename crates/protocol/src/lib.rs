//! The JSON line protocol spoken by `sniff --json`: one query per line on
//! stdin, one newline-delimited JSON event per line on stdout.
//!
//! String escaping (`"`, `\`, and control bytes below `0x20`) is exactly
//! what `serde_json` already produces, so the event types below simply ride
//! on `Serialize`/`Deserialize` rather than hand-rolling an encoder.

use serde::{Deserialize, Serialize};

/// One ranked hit inside a `results` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultHit {
    pub path: String,
    pub score: i32,
    pub positions: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Ready {
        files: usize,
        #[serde(rename = "indexTime")]
        index_time_ms: u64,
    },
    Results {
        query: String,
        #[serde(rename = "searchTime")]
        search_time_ms: u64,
        results: Vec<ResultHit>,
    },
    Error {
        message: String,
    },
}

impl Event {
    /// Renders one event as a single line, ready to be written to stdout
    /// followed by a newline.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).expect("Event serialization cannot fail")
    }
}

/// Strips a single trailing `\r` from a line read from stdin, matching the
/// protocol's "trailing `\r` stripped" rule for lines that arrive with
/// CRLF terminators.
pub fn strip_trailing_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
