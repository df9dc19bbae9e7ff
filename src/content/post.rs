//! Unified post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::frontmatter::parse_date_string;
use super::markdown;
use super::slug::generate_slug;

/// Where a post's raw data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSource {
    /// Structured-block CMS database row
    Api,
    /// Local Markdown file with front-matter
    File,
}

/// Editorial status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    /// Normalize a source-specific status label.
    ///
    /// Labels are matched case-insensitively after stripping emoji and
    /// punctuation; a bare emoji label is matched on its own. Anything
    /// unrecognized is a draft.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if let Some(status) = Self::from_emoji(trimmed) {
            return status;
        }

        let words: String = trimmed
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        let normalized = words.split_whitespace().collect::<Vec<_>>().join(" ");

        match normalized.as_str() {
            "published" | "publish" | "public" | "live" | "done" | "complete" | "completed"
            | "발행" | "발행됨" | "게시" | "완료" => PostStatus::Published,
            "archived" | "archive" | "hidden" | "보관" | "보관됨" => PostStatus::Archived,
            "" => Self::from_emoji_prefix(trimmed).unwrap_or(PostStatus::Draft),
            _ => PostStatus::Draft,
        }
    }

    fn from_emoji(label: &str) -> Option<Self> {
        match label {
            "✅" | "🟢" => Some(PostStatus::Published),
            "📝" | "✏️" | "✏" => Some(PostStatus::Draft),
            "🗄️" | "🗄" | "📦" => Some(PostStatus::Archived),
            _ => None,
        }
    }

    fn from_emoji_prefix(label: &str) -> Option<Self> {
        let first: String = label.chars().take(1).collect();
        Self::from_emoji(&first)
    }
}

/// A post normalized from either content source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedPost {
    /// Identifier assigned by the originating store
    pub id: String,

    pub title: String,

    /// Markdown body
    pub content: String,

    /// Short summary
    pub description: String,

    /// Bounded plain-text preview derived from the content
    pub excerpt: String,

    /// Nominal publish date (YYYY-MM-DD)
    pub date: String,

    pub source: PostSource,

    /// URL-safe identifier, unique after merge
    pub slug: String,

    pub category: String,

    pub tags: Vec<String>,

    pub status: PostStatus,

    /// Publish gate, checked together with `status`
    pub is_published: bool,

    /// Authoritative timestamp for conflict resolution
    pub last_modified: DateTime<Utc>,

    pub author: Option<String>,

    /// Estimated reading time in minutes
    pub reading_time: u32,
}

impl UnifiedPost {
    /// Create a post with the given identity; the slug is derived from the title
    pub fn new(id: impl Into<String>, title: impl Into<String>, source: PostSource) -> Self {
        let title = title.into();
        let slug = generate_slug(&title);
        Self {
            id: id.into(),
            title,
            content: String::new(),
            description: String::new(),
            excerpt: String::new(),
            date: String::new(),
            source,
            slug,
            category: String::new(),
            tags: Vec::new(),
            status: PostStatus::Draft,
            is_published: false,
            last_modified: Utc::now(),
            author: None,
            reading_time: 1,
        }
    }

    /// Set the body and recompute the fields derived from it
    pub fn with_content(mut self, content: impl Into<String>, excerpt_length: usize) -> Self {
        self.content = content.into();
        self.excerpt = markdown::excerpt(&self.content, excerpt_length);
        self.reading_time = markdown::reading_time(&self.content);
        self
    }

    /// Whether the post belongs in public listings
    pub fn is_public(&self) -> bool {
        self.is_published && self.status == PostStatus::Published
    }

    /// Parsed `date`, used for ordering
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_date_string(&self.date)
    }

    /// Whether the post carries `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

/// A category or tag with its post count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    pub name: String,
    /// URL slug of the name
    pub slug: String,
    pub count: usize,
}

impl Taxonomy {
    pub fn new(name: &str, count: usize) -> Self {
        Self {
            name: name.to_string(),
            slug: slug::slugify(name),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(PostStatus::from_label("Published"), PostStatus::Published);
        assert_eq!(PostStatus::from_label("✅ 발행"), PostStatus::Published);
        assert_eq!(PostStatus::from_label("✅"), PostStatus::Published);
        assert_eq!(PostStatus::from_label("📝 Draft"), PostStatus::Draft);
        assert_eq!(PostStatus::from_label("  ARCHIVED "), PostStatus::Archived);
        assert_eq!(PostStatus::from_label("📦"), PostStatus::Archived);
        assert_eq!(PostStatus::from_label("In Progress"), PostStatus::Draft);
        assert_eq!(PostStatus::from_label("something else"), PostStatus::Draft);
        assert_eq!(PostStatus::from_label(""), PostStatus::Draft);
    }

    #[test]
    fn test_new_post_slug_from_title() {
        let post = UnifiedPost::new("row-1", "Hello, World! 2024", PostSource::Api);
        assert_eq!(post.slug, "hello-world-2024");
        assert_eq!(post.id, "row-1");
        assert!(!post.is_public());
    }

    #[test]
    fn test_public_requires_flag_and_status() {
        let mut post = UnifiedPost::new("a", "A", PostSource::File);
        post.status = PostStatus::Published;
        assert!(!post.is_public());
        post.is_published = true;
        assert!(post.is_public());
        post.status = PostStatus::Archived;
        assert!(!post.is_public());
    }

    #[test]
    fn test_with_content_derives_excerpt() {
        let post = UnifiedPost::new("a", "A", PostSource::File)
            .with_content("# Title\n\nSome **bold** text.", 160);
        assert_eq!(post.excerpt, "Title Some bold text.");
        assert_eq!(post.reading_time, 1);
    }

    #[test]
    fn test_serialize_camel_case() {
        let post = UnifiedPost::new("a", "A", PostSource::Api);
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["source"], "api");
        assert_eq!(json["status"], "draft");
        assert!(json.get("isPublished").is_some());
        assert!(json.get("lastModified").is_some());
    }
}
