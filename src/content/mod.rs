//! Content module - the unified post model and everything that builds it

pub mod blocks;
mod frontmatter;
pub mod loader;
pub mod markdown;
mod post;
mod slug;

pub use blocks::Block;
pub use frontmatter::{normalize_date, parse_date_string, FrontMatter};
pub use post::{PostSource, PostStatus, Taxonomy, UnifiedPost};
pub use slug::generate_slug;
