//! Related posts by category and tag overlap

use std::cmp::Ordering;

use crate::content::UnifiedPost;
use crate::merge::sort_by_date_desc;

/// Default number of related posts
pub const DEFAULT_MAX_RESULTS: usize = 6;

const SAME_CATEGORY_POINTS: f64 = 5.0;
const SHARED_TAG_POINTS: f64 = 2.0;
// Added on top of SHARED_TAG_POINTS, so each shared tag counts 2.5.
// Kept for parity with the existing ranking; likely meant to be one term.
const SHARED_TAG_BONUS: f64 = 0.5;

/// Rank candidates by topical similarity to `target`.
///
/// Identical category scores 5, each shared tag scores 2 plus a 0.5 bonus.
/// The target itself (by slug) and zero-score candidates are dropped.
pub fn related<'a>(
    target: &UnifiedPost,
    candidates: &'a [UnifiedPost],
    max_results: usize,
) -> Vec<(&'a UnifiedPost, f64)> {
    rank(target, candidates, max_results, |target, candidate| {
        let mut score = 0.0;
        if target.category == candidate.category {
            score += SAME_CATEGORY_POINTS;
        }
        let shared = shared_tags(target, candidate) as f64;
        score += shared * SHARED_TAG_POINTS;
        score += shared * SHARED_TAG_BONUS;
        score
    })
}

/// Rank candidates by shared tags only, one point per tag
pub fn related_by_tags<'a>(
    target: &UnifiedPost,
    candidates: &'a [UnifiedPost],
    max_results: usize,
) -> Vec<(&'a UnifiedPost, f64)> {
    rank(target, candidates, max_results, |target, candidate| {
        shared_tags(target, candidate) as f64
    })
}

/// Other posts in exactly the same category, newest first
pub fn same_category(
    target: &UnifiedPost,
    candidates: &[UnifiedPost],
    max_results: usize,
) -> Vec<UnifiedPost> {
    let mut posts: Vec<UnifiedPost> = candidates
        .iter()
        .filter(|p| p.slug != target.slug && p.category == target.category)
        .cloned()
        .collect();
    sort_by_date_desc(&mut posts);
    posts.truncate(max_results);
    posts
}

fn rank<'a, F>(
    target: &UnifiedPost,
    candidates: &'a [UnifiedPost],
    max_results: usize,
    score: F,
) -> Vec<(&'a UnifiedPost, f64)>
where
    F: Fn(&UnifiedPost, &UnifiedPost) -> f64,
{
    let mut scored: Vec<(&UnifiedPost, f64)> = candidates
        .iter()
        .filter(|p| p.slug != target.slug)
        .map(|p| (p, score(target, p)))
        .filter(|(_, s)| *s > 0.0)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(max_results);
    scored
}

/// Number of distinct target tags the candidate also carries
fn shared_tags(target: &UnifiedPost, candidate: &UnifiedPost) -> usize {
    let mut seen: Vec<&str> = Vec::new();
    for tag in &target.tags {
        if !seen.contains(&tag.as_str()) && candidate.tags.contains(tag) {
            seen.push(tag);
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostSource;
    use crate::merge::tests::post;

    fn with_category(mut post: UnifiedPost, category: &str) -> UnifiedPost {
        post.category = category.to_string();
        post
    }

    #[test]
    fn test_shared_tag_scores_two_and_a_half() {
        let a = with_category(post(PostSource::File, "a", "2024-01-01", &["x"]), "One");
        let b = with_category(post(PostSource::Api, "b", "2024-02-01", &["x"]), "Two");
        let candidates = vec![a.clone(), b];

        let related = related(&a, &candidates, DEFAULT_MAX_RESULTS);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].0.slug, "b");
        assert_eq!(related[0].1, 2.5);
    }

    #[test]
    fn test_category_and_tags_combine() {
        let target = with_category(post(PostSource::File, "t", "2024-01-01", &["x", "y"]), "Rust");
        let candidates = vec![
            target.clone(),
            with_category(post(PostSource::File, "cat", "2024-01-01", &[]), "Rust"),
            with_category(post(PostSource::File, "both", "2024-01-01", &["x", "y"]), "Rust"),
            with_category(post(PostSource::File, "none", "2024-01-01", &["z"]), "Go"),
        ];

        let related = related(&target, &candidates, DEFAULT_MAX_RESULTS);
        let ranked: Vec<_> = related.iter().map(|(p, s)| (p.slug.as_str(), *s)).collect();
        assert_eq!(ranked, vec![("both", 10.0), ("cat", 5.0)]);
    }

    #[test]
    fn test_never_includes_target() {
        let target = post(PostSource::File, "t", "2024-01-01", &["x"]);
        let twin = post(PostSource::Api, "t", "2024-01-01", &["x"]);
        let candidates = vec![target.clone(), twin];
        assert!(related(&target, &candidates, DEFAULT_MAX_RESULTS).is_empty());
        assert!(related_by_tags(&target, &candidates, DEFAULT_MAX_RESULTS).is_empty());
        assert!(same_category(&target, &candidates, DEFAULT_MAX_RESULTS).is_empty());
    }

    #[test]
    fn test_related_by_tags_ignores_category() {
        let target = with_category(post(PostSource::File, "t", "2024-01-01", &["x", "y"]), "Rust");
        let candidates = vec![
            with_category(post(PostSource::File, "cat", "2024-01-01", &[]), "Rust"),
            with_category(post(PostSource::File, "one", "2024-01-01", &["y"]), "Go"),
            with_category(post(PostSource::File, "two", "2024-01-01", &["x", "y"]), "Go"),
        ];
        let related = related_by_tags(&target, &candidates, 1);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].0.slug, "two");
        assert_eq!(related[0].1, 2.0);
    }

    #[test]
    fn test_same_category_newest_first() {
        let target = with_category(post(PostSource::File, "t", "2024-01-01", &[]), "Rust");
        let candidates = vec![
            with_category(post(PostSource::File, "old", "2023-01-01", &[]), "Rust"),
            with_category(post(PostSource::File, "new", "2024-06-01", &[]), "Rust"),
            with_category(post(PostSource::File, "lower", "2024-07-01", &[]), "rust"),
        ];
        let posts = same_category(&target, &candidates, DEFAULT_MAX_RESULTS);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old"]);
    }
}
