use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_token, Chunk, FileEntry};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(uri: &str) -> axum::response::Response {
    app()
        .oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap()
}

// --- files ---

#[tokio::test]
async fn files_lists_whole_fixture() {
    let resp = get("/files").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let files: Vec<FileEntry> = body_json(resp).await;
    assert_eq!(files.len(), 3);
}

#[tokio::test]
async fn files_include_glob_filters() {
    let resp = get("/files?include=src/*.rs").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let files: Vec<FileEntry> = body_json(resp).await;
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.path.starts_with("src/")));
}

#[tokio::test]
async fn files_exclude_glob_filters() {
    let resp = get("/files?exclude=*.md").await;
    let files: Vec<FileEntry> = body_json(resp).await;
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| !f.path.ends_with(".md")));
}

#[tokio::test]
async fn files_unknown_rev_is_empty() {
    let resp = get("/files?ref=v2").await;
    let files: Vec<FileEntry> = body_json(resp).await;
    assert!(files.is_empty());
}

// --- chunks ---

#[tokio::test]
async fn chunks_lists_whole_fixture() {
    let resp = get("/chunks").await;
    let chunks: Vec<Chunk> = body_json(resp).await;
    assert_eq!(chunks.len(), 4);
}

#[tokio::test]
async fn chunks_filter_by_path() {
    let resp = get("/chunks?path=src/lib.rs").await;
    let chunks: Vec<Chunk> = body_json(resp).await;
    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| c.path == "src/lib.rs"));
}

#[tokio::test]
async fn chunks_filter_by_lang() {
    let resp = get("/chunks?lang=markdown").await;
    let chunks: Vec<Chunk> = body_json(resp).await;
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].path, "docs/intro.md");
}

#[tokio::test]
async fn chunks_max_tokens_bounds_results() {
    let resp = get("/chunks?maxTokens=100").await;
    let chunks: Vec<Chunk> = body_json(resp).await;
    assert!(chunks.iter().all(|c| c.tokens <= 100));
    assert_eq!(chunks.len(), 2);
}

#[tokio::test]
async fn chunks_max_tokens_zero_matches_nothing() {
    let resp = get("/chunks?maxTokens=0").await;
    let chunks: Vec<Chunk> = body_json(resp).await;
    assert!(chunks.is_empty());
}

// --- file ---

#[tokio::test]
async fn file_returns_content() {
    let resp = get("/file?path=src/lib.rs").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let file: serde_json::Value = body_json(resp).await;
    assert_eq!(file["path"], "src/lib.rs");
    assert_eq!(file["lang"], "rust");
    assert!(file["content"].as_str().unwrap().contains("parse"));
}

#[tokio::test]
async fn file_missing_path_param_is_400() {
    let resp = get("/file").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn file_not_indexed_is_404() {
    let resp = get("/file?path=src/nope.rs").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn file_unknown_rev_is_404() {
    let resp = get("/file?path=src/lib.rs&ref=v2").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- chunk by id ---

#[tokio::test]
async fn chunk_by_id() {
    let resp = get("/chunks/lib.rs%3A0").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let chunk: Chunk = body_json(resp).await;
    assert_eq!(chunk.id, "lib.rs:0");
    assert_eq!(chunk.path, "src/lib.rs");
}

#[tokio::test]
async fn chunk_by_id_with_encoded_space() {
    let resp = get("/chunks/intro%20section%201?ref=main").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let chunk: Chunk = body_json(resp).await;
    assert_eq!(chunk.id, "intro section 1");
}

#[tokio::test]
async fn chunk_unknown_id_is_404() {
    let resp = get("/chunks/nope").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- search ---

#[tokio::test]
async fn search_matches_substring() {
    let resp = get("/search?q=todo!").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let hits: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(hits.len(), 3);
}

#[tokio::test]
async fn search_missing_q_is_400() {
    let resp = get("/search").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_path_glob_narrows_hits() {
    let resp = get("/search?q=todo!&pathGlob=src/lib.rs").await;
    let hits: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h["path"] == "src/lib.rs"));
}

#[tokio::test]
async fn search_no_hits_is_empty_array() {
    let resp = get("/search?q=zebra").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let hits: Vec<serde_json::Value> = body_json(resp).await;
    assert!(hits.is_empty());
}

// --- symbols ---

#[tokio::test]
async fn symbols_lists_all_without_query() {
    let resp = get("/search/symbols").await;
    let symbols: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(symbols.len(), 4);
}

#[tokio::test]
async fn symbols_query_filters_by_substring() {
    let resp = get("/search/symbols?q=pars").await;
    let symbols: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0]["symbol"], "parse");
    assert_eq!(symbols[0]["chunk_id"], "lib.rs:0");
}

// --- token mode ---

#[tokio::test]
async fn token_mode_rejects_missing_header() {
    let resp = app_with_token("sekrit")
        .oneshot(Request::builder().uri("/files").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_mode_rejects_wrong_token() {
    let resp = app_with_token("sekrit")
        .oneshot(
            Request::builder()
                .uri("/files")
                .header(http::header::AUTHORIZATION, "Bearer wrong")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_mode_accepts_matching_token() {
    let resp = app_with_token("sekrit")
        .oneshot(
            Request::builder()
                .uri("/files")
                .header(http::header::AUTHORIZATION, "Bearer sekrit")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let files: Vec<FileEntry> = body_json(resp).await;
    assert_eq!(files.len(), 3);
}
