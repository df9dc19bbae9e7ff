//! Plain-text views of Markdown bodies: excerpts, table of contents, reading time

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::HashMap;

use super::slug::generate_slug;

/// Words per minute used for reading time estimates
const WORDS_PER_MINUTE: usize = 200;

fn parser(markdown: &str) -> Parser<'_> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    Parser::new_ext(markdown, options)
}

/// Extract the readable text of a Markdown document.
/// Code blocks are skipped; block boundaries become spaces.
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::new();
    let mut in_code_block = false;

    for event in parser(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(t) | Event::Code(t) if !in_code_block => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableCell,
            ) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Bounded plain-text preview of a Markdown document
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    let text = plain_text(markdown);
    if text.chars().count() <= max_chars {
        return text;
    }

    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Estimated reading time in minutes, never less than one
pub fn reading_time(markdown: &str) -> u32 {
    let words = plain_text(markdown).split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// A heading in a post's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    /// Anchor id, unique within the document
    pub anchor: String,
}

/// Collect the headings of a Markdown document in order
pub fn table_of_contents(markdown: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut current: Option<(u8, String)> = None;

    for event in parser(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((heading_depth(level), String::new()));
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&t);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take() {
                    let text = text.trim().to_string();
                    let base = generate_slug(&text);
                    let count = seen.entry(base.clone()).or_insert(0);
                    let anchor = if *count == 0 {
                        base
                    } else {
                        format!("{}-{}", base, count)
                    };
                    *count += 1;
                    entries.push(TocEntry {
                        level,
                        text,
                        anchor,
                    });
                }
            }
            _ => {}
        }
    }

    entries
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_skips_code() {
        let md = "Intro *text*.\n\n```rust\nfn main() {}\n```\n\n- one\n- two";
        assert_eq!(plain_text(md), "Intro text. one two");
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let md = "가나다라마바사 아자차카타파하";
        assert_eq!(excerpt(md, 5), "가나다라마...");
        assert_eq!(excerpt(md, 100), "가나다라마바사 아자차카타파하");
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(""), 1);
        let long = "word ".repeat(401);
        assert_eq!(reading_time(&long), 3);
    }

    #[test]
    fn test_table_of_contents() {
        let md = "# Intro\n\ntext\n\n## Setup `cargo`\n\n## Intro\n\n### Intro";
        let toc = table_of_contents(md);
        assert_eq!(toc.len(), 4);
        assert_eq!(toc[0].anchor, "intro");
        assert_eq!(toc[1].level, 2);
        assert_eq!(toc[1].text, "Setup cargo");
        assert_eq!(toc[1].anchor, "setup-cargo");
        assert_eq!(toc[2].anchor, "intro-1");
        assert_eq!(toc[3].anchor, "intro-2");
    }
}
