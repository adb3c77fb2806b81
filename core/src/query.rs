//! Query-string assembly and path-segment percent-encoding.
//!
//! # Design
//! [`QueryString`] collects name/value pairs and renders either an empty
//! string or `?a=b&c=d` — never a bare `?`. Only values the caller actually
//! has reach the builder (`push_opt` skips `None`), and any pushed value is
//! sent verbatim, including `""` and `0`. The `Option` at the call site is
//! what distinguishes "not supplied" from "explicitly zero/empty".

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched by the encoder. Everything else — space, `/`,
/// `?`, `#`, `&`, `=`, `%`, `+` included — is escaped, so encoded values can
/// be spliced into a URL as either a query value or a path segment without
/// re-parsing.
const ESCAPED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a value for use as a single path segment, e.g. a chunk id
/// in `/chunks/{id}`.
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, ESCAPED).to_string()
}

/// Accumulates query parameters and renders the final query component.
#[derive(Debug, Default)]
pub struct QueryString {
    pairs: Vec<String>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one `name=value` pair, percent-encoding the value. Parameter
    /// names here are fixed ASCII identifiers and are not encoded.
    pub fn push(&mut self, name: &str, value: &str) {
        self.pairs.push(format!("{name}={}", encode_segment(value)));
    }

    /// Append the pair only when a value is present.
    pub fn push_opt(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    /// Append a numeric pair when present. `Some(0)` is sent like any other
    /// value.
    pub fn push_opt_num(&mut self, name: &str, value: Option<u32>) {
        if let Some(value) = value {
            self.pairs.push(format!("{name}={value}"));
        }
    }

    /// Render `?a=b&c=d` in push order, or an empty string when nothing was
    /// pushed.
    pub fn finish(self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        format!("?{}", self.pairs.join("&"))
    }
}
