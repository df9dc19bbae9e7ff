//! Search posts from the command line

use anyhow::Result;

use crate::search;
use crate::Blog;

/// Print the best matches for `query`
pub async fn run(blog: &Blog, query: &str, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(blog.config.search.default_limit);
    let index = blog.index().await?;
    let results = search::search(query, index.published(), limit);

    if results.is_empty() {
        println!("No posts match '{}'", query);
        return Ok(());
    }

    println!("Results for '{}' ({}):", query, results.len());
    for hit in results {
        println!("  {:>4}  {} [{}]", hit.score, hit.post.title, hit.post.slug);
    }
    Ok(())
}
