//! Relevance-ranked free-text search
//!
//! Scoring is plain substring containment over lowercased fields, summed
//! per query word:
//!
//! | field       | points                         |
//! |-------------|--------------------------------|
//! | title       | 10, plus 5 if equal to the word |
//! | description | 5                              |
//! | content     | 2                              |
//! | category    | 3                              |
//! | any tag     | 4                              |
//!
//! Short words match inside longer ones ("go" matches "google"); there is
//! no stemming or tokenization of the haystack.

use crate::content::UnifiedPost;

/// Result count used when the caller does not ask for one
pub const DEFAULT_LIMIT: usize = 10;

const TITLE_POINTS: u32 = 10;
const TITLE_EXACT_BONUS: u32 = 5;
const DESCRIPTION_POINTS: u32 = 5;
const CONTENT_POINTS: u32 = 2;
const CATEGORY_POINTS: u32 = 3;
const TAG_POINTS: u32 = 4;

/// A post with its relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPost {
    pub post: UnifiedPost,
    pub score: u32,
}

/// Rank `posts` against `query`, best first, keeping at most `limit`
pub fn search(query: &str, posts: &[UnifiedPost], limit: usize) -> Vec<ScoredPost> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let words: Vec<&str> = query.split_whitespace().collect();

    let mut results: Vec<ScoredPost> = posts
        .iter()
        .filter_map(|post| {
            let score = score_post(post, &words);
            (score > 0).then(|| ScoredPost {
                post: post.clone(),
                score,
            })
        })
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);
    results
}

fn score_post(post: &UnifiedPost, words: &[&str]) -> u32 {
    let title = post.title.to_lowercase();
    let description = post.description.to_lowercase();
    let content = post.content.to_lowercase();
    let category = post.category.to_lowercase();
    let tags: Vec<String> = post.tags.iter().map(|t| t.to_lowercase()).collect();

    words
        .iter()
        .map(|word| {
            let mut score = 0;
            if title.contains(word) {
                score += TITLE_POINTS;
                if title == *word {
                    score += TITLE_EXACT_BONUS;
                }
            }
            if description.contains(word) {
                score += DESCRIPTION_POINTS;
            }
            if content.contains(word) {
                score += CONTENT_POINTS;
            }
            if category.contains(word) {
                score += CATEGORY_POINTS;
            }
            if tags.iter().any(|t| t.contains(word)) {
                score += TAG_POINTS;
            }
            score
        })
        .sum()
}
