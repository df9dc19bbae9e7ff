//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{BlogError, Result};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub root: String,

    // Writing
    /// Directory holding the Markdown posts, relative to the site directory
    pub content_dir: String,
    /// Category assigned to posts that do not declare one
    pub default_category: String,
    /// Maximum number of characters in a derived excerpt
    pub excerpt_length: usize,

    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub related: RelatedConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            author: String::new(),
            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "posts".to_string(),
            default_category: "Uncategorized".to_string(),
            excerpt_length: 160,

            api: ApiConfig::default(),
            search: SearchConfig::default(),
            related: RelatedConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Remote content store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Set to false to read only local files
    pub enable: bool,
    pub base_url: String,
    pub database_id: Option<String>,
    /// Name of the environment variable holding the integration token
    pub token_env: String,
    pub version: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable: true,
            base_url: "https://api.notion.com/v1".to_string(),
            database_id: None,
            token_env: "NOTION_TOKEN".to_string(),
            version: "2022-06-28".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Read the token from the configured environment variable
    pub fn token(&self) -> Result<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| BlogError::config(format!("{} is not set", self.token_env)))
    }

    pub fn database_id(&self) -> Result<&str> {
        self.database_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| BlogError::config("api.database_id is not set"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Search endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_limit: usize,
    /// Queries shorter than this (after trimming) return no results over HTTP
    pub min_query_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            min_query_length: 2,
        }
    }
}

/// Related posts configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedConfig {
    pub max_results: usize,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self { max_results: 6 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.default_category, "Uncategorized");
        assert_eq!(config.search.default_limit, 10);
        assert_eq!(config.related.max_results, 6);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
content_dir: _posts
api:
  database_id: abc123
  timeout_secs: 5
search:
  min_query_length: 3
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.content_dir, "_posts");
        assert_eq!(config.api.database_id().unwrap(), "abc123");
        assert_eq!(config.api.timeout(), Duration::from_secs(5));
        assert_eq!(config.api.token_env, "NOTION_TOKEN");
        assert_eq!(config.search.min_query_length, 3);
        assert_eq!(config.search.default_limit, 10);
    }

    #[test]
    fn test_missing_database_id() {
        let config = ApiConfig::default();
        assert!(matches!(config.database_id(), Err(BlogError::Config(_))));
    }
}
