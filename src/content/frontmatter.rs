//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{BlogError, Result};

/// Accept either a single string or a list of strings; null means empty
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}

/// Front-matter header of a local post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    /// Only the first entry is used; lists are accepted for compatibility
    #[serde(deserialize_with = "string_or_vec", alias = "categories")]
    pub category: Vec<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub status: Option<String>,
    /// Posts are published unless the header says otherwise
    pub published: bool,
    pub slug: Option<String>,
    pub author: Option<String>,
    #[serde(rename = "lastModified", alias = "last_modified", alias = "updated")]
    pub last_modified: Option<String>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            date: None,
            description: None,
            category: Vec::new(),
            tags: Vec::new(),
            status: None,
            published: true,
            slug: None,
            author: None,
            last_modified: None,
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if let Some(rest) = content.strip_prefix(";;;") {
            return Self::parse_json(rest);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let rest = content[3..].trim_start_matches(['\n', '\r']);

        let end_pos = rest
            .find("\n---")
            .ok_or_else(|| BlogError::config("unterminated YAML front-matter"))?;

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // No fallback to defaults here: those would list the post publicly
        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    fn parse_json(rest: &str) -> Result<(Self, &str)> {
        let end_pos = rest
            .find(";;;")
            .ok_or_else(|| BlogError::config("unterminated JSON front-matter"))?;
        let fm: FrontMatter = serde_json::from_str(&rest[..end_pos])?;
        let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);
        Ok((fm, remaining))
    }

    /// First declared category, if any non-empty one exists
    pub fn category(&self) -> Option<&str> {
        self.category
            .iter()
            .map(|c| c.trim())
            .find(|c| !c.is_empty())
    }

    /// Parse the last-modified string into a timestamp
    pub fn parse_last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date or timestamp string in the formats posts commonly use.
/// Values without an offset are taken as UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

/// Normalize a date string to `YYYY-MM-DD`
pub fn normalize_date(s: &str) -> Option<String> {
    parse_date_string(s).map(|dt| dt.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
description: A first post
category: Backend
tags: [rust, axum]
status: published
lastModified: 2024-01-16T09:00:00Z
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(fm.category(), Some("Backend"));
        assert_eq!(fm.tags, vec!["rust", "axum"]);
        assert_eq!(fm.status.as_deref(), Some("published"));
        assert!(fm.published);
        assert_eq!(
            fm.parse_last_modified().unwrap().to_rfc3339(),
            "2024-01-16T09:00:00+00:00"
        );
        assert_eq!(remaining.trim(), "This is the content.");
    }

    #[test]
    fn test_parse_single_string_tags_and_categories_list() {
        let content = r#"---
title: Single Tag Post
tags: Notes
categories:
  - Blog
  - Misc
published: false
---
Body
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
        assert_eq!(fm.category(), Some("Blog"));
        assert!(!fm.published);
        assert_eq!(remaining.trim(), "Body");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Test Post\", \"tags\": [\"a\", \"b\"]}\n;;;\nThis is content.\n";

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert!(remaining.contains("This is content."));
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("Just text.").unwrap();
        assert!(fm.title.is_none());
        assert!(fm.published);
        assert_eq!(remaining, "Just text.");
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: Rust: the hard parts\npublished: false\n---\nBody\n";
        assert!(matches!(FrontMatter::parse(content), Err(BlogError::Yaml(_))));
        assert!(FrontMatter::parse("---\ntitle: Open\npublished: false\n").is_err());
    }

    #[test]
    fn test_null_tags_are_empty() {
        let (fm, _) = FrontMatter::parse("---\ntitle: T\ntags:\n---\n").unwrap();
        assert!(fm.tags.is_empty());
    }

    #[test]
    fn test_updated_alias() {
        let content = "---\ntitle: T\nupdated: 2024-03-01 10:00:00\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.last_modified.as_deref(), Some("2024-03-01 10:00:00"));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(normalize_date("2024-01-15").as_deref(), Some("2024-01-15"));
        assert_eq!(normalize_date("2024/01/15 10:30:00").as_deref(), Some("2024-01-15"));
        assert_eq!(
            normalize_date("2024-01-15T23:30:00.000Z").as_deref(),
            Some("2024-01-15")
        );
        assert!(parse_date_string("not a date").is_none());
        assert!(parse_date_string("").is_none());
    }
}
