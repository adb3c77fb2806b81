//! Request filters for the index service endpoints.
//!
//! # Design
//! Every field is optional: `None` leaves the parameter out of the query
//! entirely, while `Some` sends it verbatim — `Some(0)` becomes `maxTokens=0`
//! and `Some("")` an empty-valued parameter. The structs derive `Default` so
//! call sites can name only what they need:
//!
//! ```
//! use chunkdex_core::FileFilter;
//!
//! let filter = FileFilter {
//!     include: Some("src/*.rs".to_string()),
//!     ..Default::default()
//! };
//! # let _ = filter;
//! ```
//!
//! The revision field is named `rev` (`ref` is a Rust keyword) and travels on
//! the wire as `ref`.

/// Filters for [`IndexClient::list_files`](crate::IndexClient::list_files).
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    /// Glob of paths to include, sent as `include`.
    pub include: Option<String>,
    /// Glob of paths to exclude, sent as `exclude`.
    pub exclude: Option<String>,
    /// Revision (branch or commit) scoping the query, sent as `ref`.
    pub rev: Option<String>,
}

/// Filters for [`IndexClient::list_chunks`](crate::IndexClient::list_chunks).
#[derive(Debug, Clone, Default)]
pub struct ChunkFilter {
    /// Restrict to chunks of one file, sent as `path`.
    pub path: Option<String>,
    /// Restrict to one language, sent as `lang`.
    pub lang: Option<String>,
    /// Revision scoping the query, sent as `ref`.
    pub rev: Option<String>,
    /// Upper bound on chunk token count, sent as `maxTokens`.
    pub max_tokens: Option<u32>,
}

/// Filters for [`IndexClient::search`](crate::IndexClient::search).
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Glob restricting which file paths are searched, sent as `pathGlob`.
    pub path_glob: Option<String>,
    /// Revision scoping the query, sent as `ref`.
    pub rev: Option<String>,
}

/// Filters for [`IndexClient::search_symbols`](crate::IndexClient::search_symbols).
#[derive(Debug, Clone, Default)]
pub struct SymbolFilter {
    /// Symbol name query, sent as `q`. When absent the service lists all
    /// symbols.
    pub query: Option<String>,
    /// Revision scoping the query, sent as `ref`.
    pub rev: Option<String>,
}
