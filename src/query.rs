//! Lookups over the merged post collection

use std::collections::{BTreeMap, BTreeSet};

use crate::content::{Taxonomy, UnifiedPost};

/// The merged collection plus its publicly visible subset.
///
/// Listing queries only see published posts; `by_slug` searches everything
/// so permalinks keep resolving for unlisted posts.
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    all: Vec<UnifiedPost>,
    published: Vec<UnifiedPost>,
}

impl PostIndex {
    /// Build an index; `posts` should already be sorted for display
    pub fn new(posts: Vec<UnifiedPost>) -> Self {
        let published = posts.iter().filter(|p| p.is_public()).cloned().collect();
        Self {
            all: posts,
            published,
        }
    }

    pub fn all(&self) -> &[UnifiedPost] {
        &self.all
    }

    pub fn published(&self) -> &[UnifiedPost] {
        &self.published
    }

    /// Published posts whose category equals `category`, ignoring case
    pub fn by_category(&self, category: &str) -> Vec<&UnifiedPost> {
        let wanted = category.to_lowercase();
        self.published
            .iter()
            .filter(|p| p.category.to_lowercase() == wanted)
            .collect()
    }

    /// Published posts carrying `tag`, ignoring case
    pub fn by_tag(&self, tag: &str) -> Vec<&UnifiedPost> {
        self.published.iter().filter(|p| p.has_tag(tag)).collect()
    }

    /// Any post, published or not, with exactly this slug
    pub fn by_slug(&self, slug: &str) -> Option<&UnifiedPost> {
        self.all.iter().find(|p| p.slug == slug)
    }

    /// Distinct categories of published posts, sorted
    pub fn all_categories(&self) -> Vec<String> {
        self.published
            .iter()
            .map(|p| p.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct tags of published posts, sorted
    pub fn all_tags(&self) -> Vec<String> {
        self.published
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn category_counts(&self) -> Vec<Taxonomy> {
        count(self.published.iter().map(|p| p.category.as_str()))
    }

    pub fn tag_counts(&self) -> Vec<Taxonomy> {
        count(
            self.published
                .iter()
                .flat_map(|p| p.tags.iter().map(String::as_str)),
        )
    }

    /// Neighbours of a published post: (newer, older)
    pub fn adjacent(&self, slug: &str) -> (Option<&UnifiedPost>, Option<&UnifiedPost>) {
        let Some(pos) = self.published.iter().position(|p| p.slug == slug) else {
            return (None, None);
        };
        let newer = pos.checked_sub(1).and_then(|i| self.published.get(i));
        (newer, self.published.get(pos + 1))
    }
}

fn count<'a>(names: impl Iterator<Item = &'a str>) -> Vec<Taxonomy> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(name, count)| Taxonomy::new(name, count))
        .collect()
}
