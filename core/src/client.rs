//! Blocking client and per-endpoint URL construction for the index API.
//!
//! # Design
//! `IndexClient` holds only its construction-time configuration and carries
//! no mutable state between calls. Each operation assembles a path + query
//! string and hands it to [`IndexClient::perform`], which does one blocking
//! GET and decodes the body. Path builders are free functions so every URL
//! shape is testable without a client or a network.

use std::fmt;

use serde_json::Value;

use crate::error::ApiError;
use crate::query::{encode_segment, QueryString};
use crate::types::{ChunkFilter, FileFilter, SearchFilter, SymbolFilter};

/// Synchronous client for the code-index HTTP API.
///
/// Cheap to clone; safe to share across threads. The base URL and headers
/// are fixed at construction and never mutated.
#[derive(Clone)]
pub struct IndexClient {
    base_url: String,
    headers: Vec<(String, String)>,
    agent: ureq::Agent,
}

impl IndexClient {
    /// Create a client for `base_url` with no extra headers. A trailing `/`
    /// is stripped so base URL and path always join with exactly one slash.
    pub fn new(base_url: &str) -> Self {
        Self::with_headers(base_url, Vec::new())
    }

    /// Create a client that attaches `headers` verbatim to every request,
    /// e.g. an `authorization` header for services that require one.
    pub fn with_headers(base_url: &str, headers: Vec<(String, String)>) -> Self {
        // Status interpretation belongs to this client, not to ureq.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
            agent,
        }
    }

    /// One blocking GET against `base_url + path`, where `path` already
    /// carries any query component.
    ///
    /// Returns `Ok(None)` for an empty body and `Ok(Some(json))` otherwise.
    /// A status of 400 or above becomes [`ApiError::Status`] without the
    /// body being read; a non-empty body that is not JSON becomes
    /// [`ApiError::Decode`].
    pub fn perform(&self, path: &str) -> Result<Option<Value>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.agent.get(&url);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let mut response = request
            .call()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(ApiError::Status(status));
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if body.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `GET /files` — list indexed file descriptors.
    pub fn list_files(&self, filter: &FileFilter) -> Result<Option<Value>, ApiError> {
        self.perform(&files_path(filter))
    }

    /// `GET /chunks` — list chunk descriptors.
    pub fn list_chunks(&self, filter: &ChunkFilter) -> Result<Option<Value>, ApiError> {
        self.perform(&chunks_path(filter))
    }

    /// `GET /file` — fetch one file's payload.
    pub fn get_file(&self, path: &str, rev: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform(&file_path(path, rev))
    }

    /// `GET /chunks/{id}` — fetch one chunk by id. The id is percent-encoded
    /// into the path segment, so ids containing spaces or slashes are fine.
    pub fn get_chunk(&self, chunk_id: &str, rev: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform(&chunk_path(chunk_id, rev))
    }

    /// `GET /search` — full-text search over indexed chunks.
    pub fn search(&self, query: &str, filter: &SearchFilter) -> Result<Option<Value>, ApiError> {
        self.perform(&search_path(query, filter))
    }

    /// `GET /search/symbols` — symbol search.
    pub fn search_symbols(&self, filter: &SymbolFilter) -> Result<Option<Value>, ApiError> {
        self.perform(&symbols_path(filter))
    }
}

impl fmt::Debug for IndexClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexClient")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

fn files_path(filter: &FileFilter) -> String {
    let mut q = QueryString::new();
    q.push_opt("include", filter.include.as_deref());
    q.push_opt("exclude", filter.exclude.as_deref());
    q.push_opt("ref", filter.rev.as_deref());
    format!("/files{}", q.finish())
}

fn chunks_path(filter: &ChunkFilter) -> String {
    let mut q = QueryString::new();
    q.push_opt("path", filter.path.as_deref());
    q.push_opt("lang", filter.lang.as_deref());
    q.push_opt("ref", filter.rev.as_deref());
    q.push_opt_num("maxTokens", filter.max_tokens);
    format!("/chunks{}", q.finish())
}

fn file_path(path: &str, rev: Option<&str>) -> String {
    let mut q = QueryString::new();
    q.push("path", path);
    q.push_opt("ref", rev);
    format!("/file{}", q.finish())
}

fn chunk_path(chunk_id: &str, rev: Option<&str>) -> String {
    let mut q = QueryString::new();
    q.push_opt("ref", rev);
    format!("/chunks/{}{}", encode_segment(chunk_id), q.finish())
}

fn search_path(query: &str, filter: &SearchFilter) -> String {
    let mut q = QueryString::new();
    q.push("q", query);
    q.push_opt("pathGlob", filter.path_glob.as_deref());
    q.push_opt("ref", filter.rev.as_deref());
    format!("/search{}", q.finish())
}

fn symbols_path(filter: &SymbolFilter) -> String {
    let mut q = QueryString::new();
    q.push_opt("q", filter.query.as_deref());
    q.push_opt("ref", filter.rev.as_deref());
    format!("/search/symbols{}", q.finish())
}
