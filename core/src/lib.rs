//! Synchronous client for a remote code-indexing HTTP service.
//!
//! # Overview
//! The service indexes a repository into chunks (functions, blocks) and
//! exposes read-only GET endpoints: file listing, chunk listing, single-file
//! and single-chunk fetch, text search, and symbol search. [`IndexClient`]
//! assembles the URL (path plus percent-encoded query string), performs one
//! blocking GET per call, and hands back the decoded JSON unmodified.
//!
//! # Design
//! - `IndexClient` holds only its construction-time configuration (base URL,
//!   headers); no state is shared between calls.
//! - `None` filter fields are omitted from the query entirely; `Some` values
//!   are sent verbatim, including `Some(0)` and empty strings.
//! - Responses stay untyped (`serde_json::Value`) — the service owns its
//!   schemas, this client does not model them.
//! - Status >= 400 becomes [`ApiError::Status`] with the code only; the body
//!   is not inspected.

pub mod client;
pub mod error;
pub mod query;
pub mod types;

pub use client::IndexClient;
pub use error::ApiError;
pub use types::{ChunkFilter, FileFilter, SearchFilter, SymbolFilter};
