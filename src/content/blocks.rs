//! Structured content blocks and their Markdown form

/// A content block from the structured-block store.
///
/// The set is closed: block types the site does not render map to
/// `Unknown`, which produces no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading1(String),
    Heading2(String),
    Heading3(String),
    Paragraph(String),
    BulletedListItem(String),
    NumberedListItem(String),
    Code { language: String, text: String },
    Quote(String),
    Unknown,
}

impl Block {
    /// Markdown for this block, or `None` for blocks that are dropped
    pub fn to_markdown(&self) -> Option<String> {
        match self {
            Block::Heading1(text) => Some(format!("# {}", text)),
            Block::Heading2(text) => Some(format!("## {}", text)),
            Block::Heading3(text) => Some(format!("### {}", text)),
            Block::Paragraph(text) => Some(text.clone()),
            Block::BulletedListItem(text) => Some(format!("- {}", text)),
            Block::NumberedListItem(text) => Some(format!("1. {}", text)),
            Block::Code { language, text } => Some(format!("```{}\n{}\n```", language, text)),
            Block::Quote(text) => Some(
                text.lines()
                    .map(|line| format!("> {}", line))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Block::Unknown => None,
        }
    }

    fn list_kind(&self) -> Option<u8> {
        match self {
            Block::BulletedListItem(_) => Some(0),
            Block::NumberedListItem(_) => Some(1),
            _ => None,
        }
    }
}

/// Join blocks into one Markdown document.
///
/// Blocks are separated by a blank line, except consecutive items of the
/// same list kind which stay on adjacent lines.
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut prev_list: Option<u8> = None;

    for block in blocks {
        let Some(md) = block.to_markdown() else {
            continue;
        };
        let list = block.list_kind();
        if !out.is_empty() {
            if list.is_some() && list == prev_list {
                out.push('\n');
            } else {
                out.push_str("\n\n");
            }
        }
        out.push_str(&md);
        prev_list = list;
    }

    out
}
