//! Mock code-index service for exercising the client over real HTTP.
//!
//! Serves the read-only index API over a fixed in-memory fixture: file
//! listing, chunk listing, single-file and single-chunk fetch, text search,
//! and symbol search. Filtering is deliberately naive (single-`*` globs,
//! substring search) — just enough behavior for tests to observe that query
//! parameters actually arrived.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Descriptor of one indexed file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub lang: String,
    pub size: u64,
}

/// One indexed chunk of source code.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub path: String,
    pub lang: String,
    pub tokens: u32,
    pub content: String,
    pub symbols: Vec<String>,
}

/// The immutable fixture index served by the mock.
pub struct Index {
    pub rev: String,
    pub files: Vec<FileEntry>,
    pub chunks: Vec<Chunk>,
    token: Option<String>,
}

pub type SharedIndex = Arc<Index>;

impl Index {
    /// A small fixed repository: two Rust files and a markdown doc. One
    /// chunk id contains a space so path-segment encoding gets exercised
    /// end to end.
    pub fn fixture() -> Self {
        let files = vec![
            FileEntry {
                path: "src/lib.rs".to_string(),
                lang: "rust".to_string(),
                size: 420,
            },
            FileEntry {
                path: "src/query.rs".to_string(),
                lang: "rust".to_string(),
                size: 187,
            },
            FileEntry {
                path: "docs/intro.md".to_string(),
                lang: "markdown".to_string(),
                size: 96,
            },
        ];
        let chunks = vec![
            Chunk {
                id: "lib.rs:0".to_string(),
                path: "src/lib.rs".to_string(),
                lang: "rust".to_string(),
                tokens: 120,
                content: "pub fn parse(input: &str) -> Ast { todo!() }".to_string(),
                symbols: vec!["parse".to_string(), "Ast".to_string()],
            },
            Chunk {
                id: "lib.rs:1".to_string(),
                path: "src/lib.rs".to_string(),
                lang: "rust".to_string(),
                tokens: 300,
                content: "fn lower(ast: Ast) -> Ir { todo!() }".to_string(),
                symbols: vec!["lower".to_string()],
            },
            Chunk {
                id: "query.rs:0".to_string(),
                path: "src/query.rs".to_string(),
                lang: "rust".to_string(),
                tokens: 80,
                content: "pub fn encode(value: &str) -> String { todo!() }".to_string(),
                symbols: vec!["encode".to_string()],
            },
            Chunk {
                id: "intro section 1".to_string(),
                path: "docs/intro.md".to_string(),
                lang: "markdown".to_string(),
                tokens: 40,
                content: "# Intro\nHow the index is built.".to_string(),
                symbols: Vec::new(),
            },
        ];
        Self {
            rev: "main".to_string(),
            files,
            chunks,
            token: None,
        }
    }

    /// `true` when the requested revision (if any) exists in this index.
    fn has_rev(&self, rev: &Option<String>) -> bool {
        rev.as_deref().map_or(true, |r| r == self.rev)
    }
}

/// Router over the fixture index, no authentication.
pub fn app() -> Router {
    app_with_index(Arc::new(Index::fixture()))
}

/// Router that rejects requests lacking `authorization: Bearer {token}`
/// with 401.
pub fn app_with_token(token: &str) -> Router {
    let mut index = Index::fixture();
    index.token = Some(token.to_string());
    app_with_index(Arc::new(index))
}

fn app_with_index(index: SharedIndex) -> Router {
    Router::new()
        .route("/files", get(list_files))
        .route("/chunks", get(list_chunks))
        .route("/file", get(get_file))
        .route("/chunks/{id}", get(get_chunk))
        .route("/search", get(search))
        .route("/search/symbols", get(search_symbols))
        .layer(middleware::from_fn_with_state(index.clone(), require_token))
        .with_state(index)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_token(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_token(token)).await
}

async fn require_token(
    State(index): State<SharedIndex>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(expected) = &index.token {
        let authorized = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {expected}"))
            .unwrap_or(false);
        if !authorized {
            return Err(StatusCode::UNAUTHORIZED);
        }
    }
    Ok(next.run(request).await)
}

#[derive(Deserialize)]
struct FilesQuery {
    include: Option<String>,
    exclude: Option<String>,
    #[serde(rename = "ref")]
    rev: Option<String>,
}

async fn list_files(
    State(index): State<SharedIndex>,
    Query(q): Query<FilesQuery>,
) -> Json<Vec<FileEntry>> {
    if !index.has_rev(&q.rev) {
        return Json(Vec::new());
    }
    let files = index
        .files
        .iter()
        .filter(|f| q.include.as_deref().map_or(true, |p| glob_match(p, &f.path)))
        .filter(|f| !q.exclude.as_deref().map_or(false, |p| glob_match(p, &f.path)))
        .cloned()
        .collect();
    Json(files)
}

#[derive(Deserialize)]
struct ChunksQuery {
    path: Option<String>,
    lang: Option<String>,
    #[serde(rename = "ref")]
    rev: Option<String>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
}

async fn list_chunks(
    State(index): State<SharedIndex>,
    Query(q): Query<ChunksQuery>,
) -> Json<Vec<Chunk>> {
    if !index.has_rev(&q.rev) {
        return Json(Vec::new());
    }
    let chunks = index
        .chunks
        .iter()
        .filter(|c| q.path.as_deref().map_or(true, |p| p == c.path))
        .filter(|c| q.lang.as_deref().map_or(true, |l| l == c.lang))
        .filter(|c| q.max_tokens.map_or(true, |max| c.tokens <= max))
        .cloned()
        .collect();
    Json(chunks)
}

#[derive(Deserialize)]
struct FileQuery {
    path: Option<String>,
    #[serde(rename = "ref")]
    rev: Option<String>,
}

async fn get_file(
    State(index): State<SharedIndex>,
    Query(q): Query<FileQuery>,
) -> Result<Json<Value>, StatusCode> {
    let path = q.path.ok_or(StatusCode::BAD_REQUEST)?;
    if !index.has_rev(&q.rev) {
        return Err(StatusCode::NOT_FOUND);
    }
    let entry = index
        .files
        .iter()
        .find(|f| f.path == path)
        .ok_or(StatusCode::NOT_FOUND)?;
    let content: Vec<&str> = index
        .chunks
        .iter()
        .filter(|c| c.path == path)
        .map(|c| c.content.as_str())
        .collect();
    Ok(Json(json!({
        "path": entry.path,
        "lang": entry.lang,
        "size": entry.size,
        "content": content.join("\n"),
    })))
}

#[derive(Deserialize)]
struct RevQuery {
    #[serde(rename = "ref")]
    rev: Option<String>,
}

async fn get_chunk(
    State(index): State<SharedIndex>,
    Path(id): Path<String>,
    Query(q): Query<RevQuery>,
) -> Result<Json<Chunk>, StatusCode> {
    if !index.has_rev(&q.rev) {
        return Err(StatusCode::NOT_FOUND);
    }
    index
        .chunks
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
    #[serde(rename = "pathGlob")]
    path_glob: Option<String>,
    #[serde(rename = "ref")]
    rev: Option<String>,
}

async fn search(
    State(index): State<SharedIndex>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    let needle = q.q.ok_or(StatusCode::BAD_REQUEST)?;
    if !index.has_rev(&q.rev) {
        return Ok(Json(Vec::new()));
    }
    let hits = index
        .chunks
        .iter()
        .filter(|c| q.path_glob.as_deref().map_or(true, |p| glob_match(p, &c.path)))
        .filter(|c| c.content.contains(&needle))
        .map(|c| {
            json!({
                "chunk_id": c.id,
                "path": c.path,
                "snippet": c.content,
            })
        })
        .collect();
    Ok(Json(hits))
}

#[derive(Deserialize)]
struct SymbolsQuery {
    q: Option<String>,
    #[serde(rename = "ref")]
    rev: Option<String>,
}

async fn search_symbols(
    State(index): State<SharedIndex>,
    Query(q): Query<SymbolsQuery>,
) -> Json<Vec<Value>> {
    if !index.has_rev(&q.rev) {
        return Json(Vec::new());
    }
    let symbols = index
        .chunks
        .iter()
        .flat_map(|c| c.symbols.iter().map(move |s| (s, c)))
        .filter(|(s, _)| q.q.as_deref().map_or(true, |needle| s.contains(needle)))
        .map(|(s, c)| {
            json!({
                "symbol": s,
                "chunk_id": c.id,
                "path": c.path,
            })
        })
        .collect();
    Json(symbols)
}

/// Match `path` against a pattern with at most one `*` wildcard. Without a
/// `*` the pattern must equal the path exactly.
fn glob_match(pattern: &str, path: &str) -> bool {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            path.len() >= prefix.len() + suffix.len()
                && path.starts_with(prefix)
                && path.ends_with(suffix)
        }
        None => pattern == path,
    }
}
