//! Show posts related to a given post

use anyhow::Result;
use clap::ValueEnum;

use crate::related;
use crate::Blog;

/// Relatedness strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RelatedMode {
    /// Category match plus shared tags
    Default,
    /// Shared tags only
    Tags,
    /// Same category, newest first
    Category,
}

/// Print posts related to `slug`
pub async fn run(blog: &Blog, slug: &str, mode: RelatedMode) -> Result<()> {
    let index = blog.index().await?;
    let Some(target) = index.by_slug(slug) else {
        anyhow::bail!("Post not found: {}", slug);
    };

    let max = blog.config.related.max_results;
    println!("Related to '{}':", target.title);

    match mode {
        RelatedMode::Default => {
            for (post, score) in related::related(target, index.published(), max) {
                println!("  {:>5.1}  {} [{}]", score, post.title, post.slug);
            }
        }
        RelatedMode::Tags => {
            for (post, score) in related::related_by_tags(target, index.published(), max) {
                println!("  {:>5.1}  {} [{}]", score, post.title, post.slug);
            }
        }
        RelatedMode::Category => {
            for post in related::same_category(target, index.published(), max) {
                println!("  {}  {} [{}]", post.date, post.title, post.slug);
            }
        }
    }

    Ok(())
}
