//! API-origin reader - posts from the structured-block content store
//!
//! The store is reached through the [`ContentStore`] trait so the reader's
//! mapping logic does not depend on a live network connection. Rows and
//! blocks keep the store's own layout; only this module interprets them.

mod notion;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

pub use notion::NotionStore;

use crate::config::SiteConfig;
use crate::content::{
    blocks::blocks_to_markdown, generate_slug, normalize_date, Block, PostSource, PostStatus,
    UnifiedPost,
};
use crate::error::Result;

/// Pages whose blocks are fetched at the same time
const BLOCK_FETCH_CONCURRENCY: usize = 8;

/// Which rows to request from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchScope {
    /// Only rows whose published flag is set
    Public,
    /// Every row, for administrative views
    All,
}

/// A database row as returned by the store
#[derive(Debug, Clone, Deserialize)]
pub struct PageRow {
    pub id: String,
    pub last_edited_time: DateTime<Utc>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Read access to a structured-block content store
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// List the database rows in `scope`
    async fn query_pages(&self, scope: FetchScope) -> Result<Vec<PageRow>>;

    /// Fetch the body blocks of one page
    async fn fetch_blocks(&self, page_id: &str) -> Result<Vec<Block>>;
}

/// Maps store rows into unified posts
pub struct ApiReader {
    store: Arc<dyn ContentStore>,
    default_category: String,
    excerpt_length: usize,
}

impl ApiReader {
    pub fn new(store: Arc<dyn ContentStore>, config: &SiteConfig) -> Self {
        Self {
            store,
            default_category: config.default_category.clone(),
            excerpt_length: config.excerpt_length,
        }
    }

    /// Fetch all posts in `scope`.
    ///
    /// Any store failure is logged and yields an empty collection.
    pub async fn fetch_posts(&self, scope: FetchScope) -> Vec<UnifiedPost> {
        match self.try_fetch_posts(scope).await {
            Ok(posts) => {
                tracing::debug!("Fetched {} posts from the content store", posts.len());
                posts
            }
            Err(e) => {
                tracing::error!("Failed to fetch posts from the content store: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_fetch_posts(&self, scope: FetchScope) -> Result<Vec<UnifiedPost>> {
        let rows = self.store.query_pages(scope).await?;

        // Row order is kept so the merge stays deterministic
        let posts: Vec<UnifiedPost> = stream::iter(rows)
            .map(|row| async move {
                let content = match self.store.fetch_blocks(&row.id).await {
                    Ok(blocks) => blocks_to_markdown(&blocks),
                    Err(e) => {
                        tracing::warn!("Failed to fetch content of page {}: {}", row.id, e);
                        String::new()
                    }
                };
                self.to_post(&row, content)
            })
            .buffered(BLOCK_FETCH_CONCURRENCY)
            .collect()
            .await;

        Ok(posts)
    }

    fn to_post(&self, row: &PageRow, content: String) -> UnifiedPost {
        let props = Properties(&row.properties);

        let title = props
            .text(&["Title", "Name", "title"])
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "Untitled".to_string());

        let slug = props
            .text(&["Slug"])
            .map(|s| generate_slug(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| generate_slug(&title));
        let slug = if slug.is_empty() { row.id.clone() } else { slug };

        let is_published = props.checkbox("Published");
        let status = match props.select("Status") {
            Some(label) => PostStatus::from_label(&label),
            None if is_published => PostStatus::Published,
            None => PostStatus::Draft,
        };

        let date = props
            .date("Date")
            .as_deref()
            .and_then(normalize_date)
            .unwrap_or_else(|| row.last_edited_time.format("%Y-%m-%d").to_string());

        let mut post = UnifiedPost::new(row.id.clone(), title, PostSource::Api)
            .with_content(content, self.excerpt_length);
        post.slug = slug;
        post.description = props.text(&["Description"]).unwrap_or_default();
        post.date = date;
        post.category = props
            .select("Category")
            .unwrap_or_else(|| self.default_category.clone());
        post.tags = props.multi_select("Tags");
        post.status = status;
        post.is_published = is_published;
        post.last_modified = row.last_edited_time;
        post.author = props.text(&["Author"]).or_else(|| props.people("Author"));
        post
    }
}

/// Typed accessors over a row's property map
struct Properties<'a>(&'a Map<String, Value>);

impl Properties<'_> {
    /// Concatenated plain text of the first present title/rich_text property
    fn text(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| {
            let prop = self.0.get(*name)?;
            let spans = prop
                .get("title")
                .or_else(|| prop.get("rich_text"))?
                .as_array()?;
            let text = rich_text_plain(spans);
            (!text.is_empty()).then_some(text)
        })
    }

    /// Name of a select or status property
    fn select(&self, name: &str) -> Option<String> {
        let prop = self.0.get(name)?;
        prop.get("select")
            .or_else(|| prop.get("status"))
            .and_then(|v| v.get("name"))
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn multi_select(&self, name: &str) -> Vec<String> {
        self.0
            .get(name)
            .and_then(|p| p.get("multi_select"))
            .and_then(Value::as_array)
            .map(|options| {
                options
                    .iter()
                    .filter_map(|o| o.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn checkbox(&self, name: &str) -> bool {
        self.0
            .get(name)
            .and_then(|p| p.get("checkbox"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn date(&self, name: &str) -> Option<String> {
        self.0
            .get(name)?
            .get("date")?
            .get("start")?
            .as_str()
            .map(str::to_string)
    }

    fn people(&self, name: &str) -> Option<String> {
        let names: Vec<&str> = self
            .0
            .get(name)?
            .get("people")?
            .as_array()?
            .iter()
            .filter_map(|p| p.get("name").and_then(Value::as_str))
            .collect();
        (!names.is_empty()).then(|| names.join(", "))
    }
}

/// Plain text of a rich-text span array
pub(crate) fn rich_text_plain(spans: &[Value]) -> String {
    spans
        .iter()
        .filter_map(|span| {
            span.get("plain_text")
                .or_else(|| span.get("text").and_then(|t| t.get("content")))
                .and_then(Value::as_str)
        })
        .collect()
}
