//! HTTP client for a Notion-style database API

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{rich_text_plain, ContentStore, FetchScope, PageRow};
use crate::config::ApiConfig;
use crate::content::Block;
use crate::error::{BlogError, Result};

const PAGE_SIZE: u32 = 100;

/// One page of a paginated list response
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    results: Vec<T>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

/// Content store backed by the remote database API
pub struct NotionStore {
    client: reqwest::Client,
    config: ApiConfig,
}

impl NotionStore {
    /// Create a store with an HTTP client using the configured timeout
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("unified-blog/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let token = self.config.token()?;
        let response = request
            .bearer_auth(token)
            .header("Notion-Version", &self.config.version)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BlogError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ContentStore for NotionStore {
    async fn query_pages(&self, scope: FetchScope) -> Result<Vec<PageRow>> {
        let database_id = self.config.database_id()?;
        let url = self.url(&format!("databases/{}/query", database_id));

        let mut rows = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let body = query_body(scope, cursor.as_deref());
            let value = self.send(self.client.post(&url).json(&body)).await?;
            let page: ListResponse<PageRow> = serde_json::from_value(value)?;
            rows.extend(page.results);

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        tracing::debug!("Queried {} rows from database {}", rows.len(), database_id);
        Ok(rows)
    }

    async fn fetch_blocks(&self, page_id: &str) -> Result<Vec<Block>> {
        let url = self.url(&format!("blocks/{}/children", page_id));

        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&url)
                .query(&[("page_size", PAGE_SIZE.to_string())]);
            if let Some(c) = &cursor {
                request = request.query(&[("start_cursor", c)]);
            }

            let value = self.send(request).await?;
            let page: ListResponse<Value> = serde_json::from_value(value)?;
            blocks.extend(page.results.iter().map(parse_block));

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        Ok(blocks)
    }
}

/// Request body for a database query
fn query_body(scope: FetchScope, cursor: Option<&str>) -> Value {
    let mut body = json!({
        "page_size": PAGE_SIZE,
        "sorts": [{ "property": "Date", "direction": "descending" }],
    });
    if scope == FetchScope::Public {
        body["filter"] = json!({ "property": "Published", "checkbox": { "equals": true } });
    }
    if let Some(cursor) = cursor {
        body["start_cursor"] = json!(cursor);
    }
    body
}

/// Convert one raw block object into a [`Block`]
fn parse_block(value: &Value) -> Block {
    let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
    let payload = value.get(kind);
    let text = || {
        payload
            .and_then(|p| p.get("rich_text"))
            .and_then(Value::as_array)
            .map(|spans| rich_text_plain(spans))
            .unwrap_or_default()
    };

    match kind {
        "heading_1" => Block::Heading1(text()),
        "heading_2" => Block::Heading2(text()),
        "heading_3" => Block::Heading3(text()),
        "paragraph" => Block::Paragraph(text()),
        "bulleted_list_item" => Block::BulletedListItem(text()),
        "numbered_list_item" => Block::NumberedListItem(text()),
        "code" => Block::Code {
            language: payload
                .and_then(|p| p.get("language"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            text: text(),
        },
        "quote" => Block::Quote(text()),
        _ => Block::Unknown,
    }
}
