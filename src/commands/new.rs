//! Create a new Markdown post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::content::generate_slug;
use crate::Blog;

/// Header written into a new post
#[derive(Debug, Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    description: &'a str,
    category: &'a str,
    tags: &'a [String],
    status: &'a str,
    published: bool,
}

/// Write a front-matter scaffold for a new post and return its path
pub fn create_post(
    blog: &Blog,
    title: &str,
    category: Option<&str>,
    tags: &[String],
    draft: bool,
) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = generate_slug(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title: {:?}", title);
    }

    fs::create_dir_all(&blog.content_dir)?;
    let file_path = blog.content_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold = Scaffold {
        title,
        date: now.format("%Y-%m-%d").to_string(),
        description: "",
        category: category.unwrap_or(&blog.config.default_category),
        tags,
        status: if draft { "draft" } else { "published" },
        published: !draft,
    };
    let content = format!("---\n{}---\n", serde_yaml::to_string(&scaffold)?);

    fs::write(&file_path, content)?;
    tracing::debug!("Wrote scaffold for '{}'", slug);

    Ok(file_path)
}

/// Run the new command
pub fn run(
    blog: &Blog,
    title: &str,
    category: Option<&str>,
    tags: &[String],
    draft: bool,
) -> Result<()> {
    let path = create_post(blog, title, category, tags, draft)?;
    println!("Created: {:?}", path);
    Ok(())
}
