//! Slug generation for post titles

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PUNCTUATION: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"[\s_]+").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-{2,}").unwrap();
}

/// Turn a title into a URL-safe slug.
///
/// Lowercases, strips punctuation, turns whitespace into hyphens and
/// collapses repeated hyphens. Non-Latin letters are kept as they are so
/// titles in other scripts still produce a usable slug.
pub fn generate_slug(title: &str) -> String {
    let lower = title.trim().to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}
