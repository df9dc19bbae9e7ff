//! JSON API server

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{markdown, Taxonomy, UnifiedPost};
use crate::helpers::{share_links, ShareLinks};
use crate::search::ScoredPost;
use crate::{related, search, Blog};

/// Server state
struct ServerState {
    blog: Blog,
}

/// Errors returned to API clients as `{"error": message}`
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build the API router
fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/search", get(search_posts))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/posts/:slug/related", get(related_posts))
        .route("/api/categories", get(list_categories))
        .route("/api/tags", get(list_tags))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState { blog: blog.clone() });
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    q: Option<String>,
    limit: Option<String>,
}

/// Search result entry
#[derive(Debug, Serialize)]
struct SearchHit {
    slug: String,
    title: String,
    description: String,
    excerpt: String,
    date: String,
    category: String,
    tags: Vec<String>,
    score: u32,
}

impl From<ScoredPost> for SearchHit {
    fn from(hit: ScoredPost) -> Self {
        let post = hit.post;
        Self {
            slug: post.slug,
            title: post.title,
            description: post.description,
            excerpt: post.excerpt,
            date: post.date,
            category: post.category,
            tags: post.tags,
            score: hit.score,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    posts: Vec<SearchHit>,
    total_count: usize,
    search_term: String,
}

/// GET /api/search?q=<term>&limit=<n>
async fn search_posts(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = params
        .q
        .ok_or_else(|| ApiError::BadRequest("Missing search query parameter 'q'".to_string()))?;

    let settings = &state.blog.config.search;
    if term.trim().chars().count() < settings.min_query_length {
        return Ok(Json(SearchResponse {
            posts: Vec::new(),
            total_count: 0,
            search_term: term,
        }));
    }

    let limit = params
        .limit
        .and_then(|l| l.parse::<usize>().ok())
        .filter(|l| *l > 0)
        .unwrap_or(settings.default_limit);

    let index = state.blog.index().await?;
    let posts: Vec<SearchHit> = search::search(&term, index.published(), limit)
        .into_iter()
        .map(SearchHit::from)
        .collect();

    tracing::debug!("Search '{}' matched {} posts", term, posts.len());
    Ok(Json(SearchResponse {
        total_count: posts.len(),
        posts,
        search_term: term,
    }))
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    category: Option<String>,
    tag: Option<String>,
}

/// GET /api/posts?category=&tag=
async fn list_posts(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<UnifiedPost>>, ApiError> {
    let index = state.blog.index().await?;
    let mut posts: Vec<&UnifiedPost> = match &params.category {
        Some(category) => index.by_category(category),
        None => index.published().iter().collect(),
    };
    if let Some(tag) = &params.tag {
        posts.retain(|p| p.has_tag(tag));
    }
    Ok(Json(posts.into_iter().cloned().collect()))
}

/// A single post with the browsing aids a post page needs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostDetail {
    #[serde(flatten)]
    post: UnifiedPost,
    toc: Vec<markdown::TocEntry>,
    share: ShareLinks,
    newer: Option<String>,
    older: Option<String>,
}

/// GET /api/posts/:slug
async fn get_post(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetail>, ApiError> {
    let index = state.blog.index().await?;
    let post = index
        .by_slug(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("Post not found: {}", slug)))?;

    let (newer, older) = index.adjacent(&slug);
    Ok(Json(PostDetail {
        toc: markdown::table_of_contents(&post.content),
        share: share_links(&state.blog.config, post),
        newer: newer.map(|p| p.slug.clone()),
        older: older.map(|p| p.slug.clone()),
        post: post.clone(),
    }))
}

#[derive(Debug, Serialize)]
struct RelatedHit {
    #[serde(flatten)]
    post: UnifiedPost,
    score: f64,
}

/// GET /api/posts/:slug/related
async fn related_posts(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<RelatedHit>>, ApiError> {
    let index = state.blog.index().await?;
    let target = index
        .by_slug(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("Post not found: {}", slug)))?;

    let max = state.blog.config.related.max_results;
    let hits = related::related(target, index.published(), max)
        .into_iter()
        .map(|(post, score)| RelatedHit {
            post: post.clone(),
            score,
        })
        .collect();
    Ok(Json(hits))
}

/// GET /api/categories
async fn list_categories(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Taxonomy>>, ApiError> {
    Ok(Json(state.blog.index().await?.category_counts()))
}

/// GET /api/tags
async fn list_tags(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<Taxonomy>>, ApiError> {
    Ok(Json(state.blog.index().await?.tag_counts()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn state(tmp: &TempDir) -> Arc<ServerState> {
        let posts_dir = tmp.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("async-rust.md"),
            "---\ntitle: Async Rust\ndate: 2024-02-01\ncategory: Backend\ntags: [rust]\n---\n# Intro\n\nFutures.",
        )
        .unwrap();
        fs::write(
            posts_dir.join("tokio.md"),
            "---\ntitle: Tokio notes\ndate: 2024-01-01\ncategory: Backend\ntags: [rust, tokio]\n---\nRuntime.",
        )
        .unwrap();
        fs::write(
            posts_dir.join("draft.md"),
            "---\ntitle: Rust draft\nstatus: draft\n---\nWIP",
        )
        .unwrap();

        let blog = Blog::with_config(tmp.path().to_path_buf(), SiteConfig::default(), None);
        Arc::new(ServerState { blog })
    }

    fn params(q: Option<&str>, limit: Option<&str>) -> Query<SearchParams> {
        Query(SearchParams {
            q: q.map(str::to_string),
            limit: limit.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let tmp = TempDir::new().unwrap();
        let err = search_posts(State(state(&tmp)), params(None, None))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_short_query_is_empty() {
        let tmp = TempDir::new().unwrap();
        let Json(resp) = search_posts(State(state(&tmp)), params(Some(" r "), None))
            .await
            .unwrap();
        assert!(resp.posts.is_empty());
        assert_eq!(resp.total_count, 0);
        assert_eq!(resp.search_term, " r ");
    }

    #[tokio::test]
    async fn test_search_ranks_published_posts() {
        let tmp = TempDir::new().unwrap();
        let Json(resp) = search_posts(State(state(&tmp)), params(Some("rust"), Some("1")))
            .await
            .unwrap();
        assert_eq!(resp.total_count, 1);
        assert_eq!(resp.posts[0].slug, "async-rust");
        assert_eq!(resp.posts[0].score, 14);

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("totalCount").is_some());
        assert!(json.get("searchTerm").is_some());
        assert_eq!(json["posts"][0]["category"], "Backend");
    }

    #[tokio::test]
    async fn test_get_post_and_not_found() {
        let tmp = TempDir::new().unwrap();
        let state = state(&tmp);

        let Json(detail) = get_post(State(state.clone()), Path("async-rust".to_string()))
            .await
            .unwrap();
        assert_eq!(detail.toc[0].anchor, "intro");
        assert_eq!(detail.older.as_deref(), Some("tokio"));
        assert!(detail.newer.is_none());

        // Unlisted posts still resolve by slug
        assert!(get_post(State(state.clone()), Path("draft".to_string())).await.is_ok());

        let err = get_post(State(state), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_related_and_taxonomies() {
        let tmp = TempDir::new().unwrap();
        let state = state(&tmp);

        let Json(hits) = related_posts(State(state.clone()), Path("tokio".to_string()))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].post.slug, "async-rust");
        assert_eq!(hits[0].score, 7.5);

        let Json(tags) = list_tags(State(state.clone())).await.unwrap();
        assert_eq!(tags, vec![Taxonomy::new("rust", 2), Taxonomy::new("tokio", 1)]);

        let Json(posts) = list_posts(
            State(state),
            Query(ListParams {
                category: Some("backend".to_string()),
                tag: Some("TOKIO".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "tokio");
    }

    async fn send(
        state: Arc<ServerState>,
        method: Method,
        uri: &str,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_routed_search() {
        let tmp = TempDir::new().unwrap();
        let state = state(&tmp);

        let (status, body) = send(state.clone(), Method::GET, "/api/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("'q'"));

        let (status, _) = send(state.clone(), Method::POST, "/api/search?q=rust").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let (status, body) = send(state, Method::GET, "/api/search?q=tokio%20notes&limit=x").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["searchTerm"], "tokio notes");
        assert_eq!(body["posts"][0]["slug"], "tokio");
    }

    #[tokio::test]
    async fn test_routed_post_lookup() {
        let tmp = TempDir::new().unwrap();
        let state = state(&tmp);

        let (status, body) = send(state.clone(), Method::GET, "/api/posts/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Post not found: missing");

        let (status, body) = send(state, Method::GET, "/api/posts/tokio").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slug"], "tokio");
        assert_eq!(body["newer"], "async-rust");
    }

    #[test]
    fn test_internal_error_envelope() {
        let response = ApiError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
