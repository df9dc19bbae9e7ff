//! Merging posts from both sources into one collection

use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;

use crate::content::UnifiedPost;

/// Merge API-origin and file-origin posts, keyed by slug.
///
/// File posts are inserted first. An API post is added when its slug is new,
/// or replaces the existing entry outright when its `last_modified` is
/// strictly newer. The result keeps insertion order.
pub fn merge_posts(api_posts: Vec<UnifiedPost>, file_posts: Vec<UnifiedPost>) -> Vec<UnifiedPost> {
    let mut by_slug: IndexMap<String, UnifiedPost> = IndexMap::new();

    for post in file_posts {
        by_slug.insert(post.slug.clone(), post);
    }

    for post in api_posts {
        match by_slug.get(&post.slug) {
            Some(existing) if post.last_modified <= existing.last_modified => {
                tracing::debug!("Keeping newer local copy of {}", post.slug);
            }
            _ => {
                by_slug.insert(post.slug.clone(), post);
            }
        }
    }

    by_slug.into_values().collect()
}

/// Reconcile two versions of the same post.
///
/// The version with the newer `last_modified` provides every field (`a` wins
/// ties), except tags: the result carries the union of both tag lists, the
/// winner's tags first.
pub fn resolve_conflict(a: &UnifiedPost, b: &UnifiedPost) -> UnifiedPost {
    let (winner, loser) = if b.last_modified > a.last_modified {
        (b, a)
    } else {
        (a, b)
    };

    let mut resolved = winner.clone();
    for tag in &loser.tags {
        if !resolved.tags.contains(tag) {
            resolved.tags.push(tag.clone());
        }
    }
    resolved
}

/// Sort posts newest first by their parsed `date`.
/// The sort is stable; posts with an unparseable date go last.
pub fn sort_by_date_desc(posts: &mut [UnifiedPost]) {
    posts.sort_by(|a, b| match (a.timestamp(), b.timestamp()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Sync state of one slug across the two sources
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SyncState {
    ApiOnly,
    FileOnly,
    InSync,
    Conflict { resolved: Box<UnifiedPost> },
}

/// One line of a sync audit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncEntry {
    pub slug: String,
    #[serde(flatten)]
    pub state: SyncState,
}

/// Compare both sources slug by slug.
///
/// Posts present on both sides whose title, content, category or tag set
/// differ are reported as conflicts together with their resolution.
pub fn sync_report(api_posts: &[UnifiedPost], file_posts: &[UnifiedPost]) -> Vec<SyncEntry> {
    let mut pairs: IndexMap<&str, (Option<&UnifiedPost>, Option<&UnifiedPost>)> = IndexMap::new();
    for post in file_posts {
        pairs.entry(post.slug.as_str()).or_default().1 = Some(post);
    }
    for post in api_posts {
        pairs.entry(post.slug.as_str()).or_default().0 = Some(post);
    }

    pairs
        .into_iter()
        .filter_map(|(slug, pair)| {
            let state = match pair {
                (Some(_), None) => SyncState::ApiOnly,
                (None, Some(_)) => SyncState::FileOnly,
                (Some(api), Some(file)) if same_content(api, file) => SyncState::InSync,
                (Some(api), Some(file)) => SyncState::Conflict {
                    resolved: Box::new(resolve_conflict(api, file)),
                },
                (None, None) => return None,
            };
            Some(SyncEntry {
                slug: slug.to_string(),
                state,
            })
        })
        .collect()
}

fn same_content(a: &UnifiedPost, b: &UnifiedPost) -> bool {
    let mut a_tags = a.tags.clone();
    let mut b_tags = b.tags.clone();
    a_tags.sort();
    b_tags.sort();
    a.title == b.title && a.content == b.content && a.category == b.category && a_tags == b_tags
}
