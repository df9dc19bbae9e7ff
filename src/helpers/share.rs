//! Social share links for a post

use serde::Serialize;

use super::url::{encode_url, post_url};
use crate::config::SiteConfig;
use crate::content::UnifiedPost;

/// Share targets for one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    pub email: String,
}

/// Build share URLs pointing at the post's permalink
pub fn share_links(config: &SiteConfig, post: &UnifiedPost) -> ShareLinks {
    let url = encode_url(&post_url(config, &post.slug));
    let title = encode_url(&post.title);

    ShareLinks {
        twitter: format!("https://twitter.com/intent/tweet?url={}&text={}", url, title),
        facebook: format!("https://www.facebook.com/sharer/sharer.php?u={}", url),
        linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url),
        email: format!("mailto:?subject={}&body={}", title, url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostSource;

    #[test]
    fn test_share_links_encode_url_and_title() {
        let config = SiteConfig {
            url: "https://example.com".to_string(),
            ..SiteConfig::default()
        };
        let post = UnifiedPost::new("1", "Rust & Me", PostSource::File);
        let links = share_links(&config, &post);

        let encoded = "https%3A%2F%2Fexample.com%2Fposts%2Frust-me%2F";
        assert_eq!(
            links.twitter,
            format!("https://twitter.com/intent/tweet?url={}&text=Rust%20%26%20Me", encoded)
        );
        assert!(links.facebook.ends_with(encoded));
        assert!(links.linkedin.ends_with(encoded));
        assert!(links.email.starts_with("mailto:?subject=Rust%20%26%20Me"));
    }
}
