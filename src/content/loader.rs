//! File-origin reader - loads posts from a flat directory of Markdown files

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::frontmatter::normalize_date;
use super::{FrontMatter, PostSource, PostStatus, UnifiedPost};
use crate::config::SiteConfig;
use crate::error::Result;

/// Loads posts from the local content directory
pub struct ContentLoader {
    content_dir: PathBuf,
    default_category: String,
    excerpt_length: usize,
}

impl ContentLoader {
    /// Create a loader for `content_dir`
    pub fn new(content_dir: impl Into<PathBuf>, config: &SiteConfig) -> Self {
        Self {
            content_dir: content_dir.into(),
            default_category: config.default_category.clone(),
            excerpt_length: config.excerpt_length,
        }
    }

    /// Load every post in the content directory.
    ///
    /// A missing directory yields no posts; files that cannot be read are
    /// skipped with a warning.
    pub fn load_posts(&self) -> Vec<UnifiedPost> {
        if !self.content_dir.is_dir() {
            tracing::debug!("Content directory {:?} not found", self.content_dir);
            return Vec::new();
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Loaded {} local posts", posts.len());
        posts
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<UnifiedPost> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw)?;

        let file_modified = fs::metadata(path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);

        // Header timestamp, then file mtime, then now as a last resort
        let last_modified = fm
            .parse_last_modified()
            .or(file_modified)
            .unwrap_or_else(Utc::now);

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let slug = fm
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| stem.clone());

        let date = fm
            .date
            .as_deref()
            .and_then(normalize_date)
            .unwrap_or_else(|| last_modified.format("%Y-%m-%d").to_string());

        let status = match fm.status.as_deref() {
            Some(label) => PostStatus::from_label(label),
            None if fm.published => PostStatus::Published,
            None => PostStatus::Draft,
        };

        let category = fm
            .category()
            .map(str::to_string)
            .unwrap_or_else(|| self.default_category.clone());

        let title = fm.title.clone().unwrap_or_else(|| stem.clone());

        let mut post = UnifiedPost::new(slug.clone(), title, PostSource::File)
            .with_content(body.trim(), self.excerpt_length);
        post.slug = slug;
        post.description = fm.description.unwrap_or_default();
        post.date = date;
        post.category = category;
        post.tags = fm.tags;
        post.status = status;
        post.is_published = fm.published;
        post.last_modified = last_modified;
        post.author = fm.author;

        Ok(post)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown" || e == "mdx")
        .unwrap_or(false)
}
