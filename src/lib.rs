//! unified-blog: blog content core
//!
//! Posts come from two places: a structured-block CMS database and a
//! directory of Markdown files with front-matter. Both are normalized into
//! [`content::UnifiedPost`], merged by slug, and then queried, searched and
//! ranked for related posts.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod merge;
pub mod query;
pub mod related;
pub mod remote;
pub mod search;
pub mod server;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::loader::ContentLoader;
use content::UnifiedPost;
use query::PostIndex;
use remote::{ApiReader, ContentStore, FetchScope, NotionStore};

/// Posts from each source, before merging
#[derive(Debug, Clone, Default)]
pub struct SourcePosts {
    pub api: Vec<UnifiedPost>,
    pub file: Vec<UnifiedPost>,
}

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown post directory
    pub content_dir: PathBuf,
    /// Remote content store, if enabled
    store: Option<Arc<dyn ContentStore>>,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let store: Option<Arc<dyn ContentStore>> = if !config.api.enable {
            None
        } else if config.api.database_id().is_err() {
            tracing::debug!("No api.database_id configured, reading local posts only");
            None
        } else {
            Some(Arc::new(NotionStore::new(config.api.clone())?))
        };

        Ok(Self::with_config(base_dir, config, store))
    }

    /// Create a Blog from parts
    pub fn with_config(
        base_dir: PathBuf,
        config: config::SiteConfig,
        store: Option<Arc<dyn ContentStore>>,
    ) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        Self {
            config,
            base_dir,
            content_dir,
            store,
        }
    }

    /// Read both sources concurrently
    pub async fn fetch_sources(&self, scope: FetchScope) -> Result<SourcePosts> {
        let loader = ContentLoader::new(&self.content_dir, &self.config);
        let file_task = tokio::task::spawn_blocking(move || loader.load_posts());

        let api_task = async {
            match &self.store {
                Some(store) => {
                    ApiReader::new(store.clone(), &self.config)
                        .fetch_posts(scope)
                        .await
                }
                None => Vec::new(),
            }
        };

        let (file, api) = tokio::join!(file_task, api_task);
        let file = file?;

        tracing::info!("Read {} remote and {} local posts", api.len(), file.len());
        Ok(SourcePosts { api, file })
    }

    /// Merged posts from both sources, newest first
    pub async fn get_all_posts(&self) -> Result<Vec<UnifiedPost>> {
        self.get_posts(FetchScope::Public).await
    }

    /// Like [`Blog::get_all_posts`] but including unpublished remote rows
    pub async fn get_all_posts_admin(&self) -> Result<Vec<UnifiedPost>> {
        self.get_posts(FetchScope::All).await
    }

    async fn get_posts(&self, scope: FetchScope) -> Result<Vec<UnifiedPost>> {
        let sources = self.fetch_sources(scope).await?;
        let mut posts = merge::merge_posts(sources.api, sources.file);
        merge::sort_by_date_desc(&mut posts);
        Ok(posts)
    }

    /// Query index over a fresh fetch
    pub async fn index(&self) -> Result<PostIndex> {
        Ok(PostIndex::new(self.get_all_posts().await?))
    }
}
