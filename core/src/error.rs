//! Error types for the index service client.
//!
//! # Design
//! Callers see exactly two failure shapes: "the round trip broke"
//! (`Transport`, `Decode`) and "the server said no" (`Status`). A status
//! error carries only the numeric code — the body is never read for error
//! responses, and 4xx is not distinguished from 5xx.

use std::fmt;

/// Errors returned by `IndexClient` operations.
#[derive(Debug)]
pub enum ApiError {
    /// The server answered with a status code of 400 or above.
    Status(u16),

    /// The request could not complete, or the body could not be read as
    /// UTF-8 text.
    Transport(String),

    /// The response body is not valid JSON.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status(code) => write!(f, "request failed: HTTP {code}"),
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Decode(msg) => write!(f, "invalid JSON in response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
