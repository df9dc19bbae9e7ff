//! List site content

use anyhow::Result;

use crate::Blog;

/// List site content by type
pub async fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let index = blog.index().await?;

    match content_type {
        "post" | "posts" => {
            let posts = index.published();
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}] ({:?})",
                    post.date, post.title, post.slug, post.source
                );
            }
        }
        "tag" | "tags" => {
            let tags = index.tag_counts();
            println!("Tags ({}):", tags.len());
            for tag in tags {
                println!("  {} ({})", tag.name, tag.count);
            }
        }
        "category" | "categories" => {
            let categories = index.category_counts();
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {} ({})", category.name, category.count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}
