//! Structural block segmentation.
//!
//! Splits normalized text into contiguous runs of same-classified,
//! non-empty lines. Empty lines flush the current block; a classification
//! change flushes and starts a new block.

use crate::patterns;
use serde::Serialize;

/// Structural classification of a line run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Header,
    List,
    Code,
    Quote,
    Text,
}

/// A contiguous run of non-empty lines sharing one structural type.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Lines joined with newlines
    pub content: String,
    pub lines: Vec<String>,
}

impl Block {
    fn from_lines(kind: BlockKind, lines: Vec<String>) -> Self {
        Self {
            content: lines.join("\n"),
            kind,
            lines,
        }
    }
}

/// Normalizes text for segmentation: unifies line endings, drops
/// non-printable characters, collapses runs of whitespace inside lines,
/// and removes empty lines.
pub fn normalize_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    unified
        .split('\n')
        .filter_map(|line| {
            let printable: String = line
                .chars()
                .filter(|c| (' '..='~').contains(c) || *c as u32 >= 0xA0)
                .collect();
            let collapsed = printable.split_whitespace().collect::<Vec<_>>().join(" ");
            if collapsed.is_empty() {
                None
            } else {
                Some(collapsed)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Classifies a single line. Checks run in priority order: header, list,
/// code, quote, text.
pub fn classify_line(line: &str) -> BlockKind {
    if patterns::is_markdown_header(line)
        || patterns::is_numbered_item(line)
        || is_shouted_heading(line)
    {
        return BlockKind::Header;
    }

    if patterns::is_bullet_item(line) || patterns::is_numbered_item(line) {
        return BlockKind::List;
    }

    if leading_whitespace(line) >= 4 || line.matches('|').count() > 2 {
        return BlockKind::Code;
    }

    if line.starts_with("> ") {
        return BlockKind::Quote;
    }

    BlockKind::Text
}

/// Splits text into an ordered sequence of structural blocks.
pub fn segment(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current_lines: Vec<String> = Vec::new();
    let mut current_kind: Option<BlockKind> = None;

    for line in text.split('\n') {
        if line.trim().is_empty() {
            if !current_lines.is_empty() {
                blocks.push(Block::from_lines(
                    current_kind.unwrap_or(BlockKind::Text),
                    std::mem::take(&mut current_lines),
                ));
                current_kind = None;
            }
            continue;
        }

        let kind = classify_line(line);
        if current_kind != Some(kind) && !current_lines.is_empty() {
            blocks.push(Block::from_lines(
                current_kind.unwrap_or(BlockKind::Text),
                std::mem::take(&mut current_lines),
            ));
        }

        current_kind = Some(kind);
        current_lines.push(line.to_string());
    }

    if !current_lines.is_empty() {
        blocks.push(Block::from_lines(
            current_kind.unwrap_or(BlockKind::Text),
            current_lines,
        ));
    }

    blocks
}

/// All-caps short lines act as headings in plain-text documents.
fn is_shouted_heading(line: &str) -> bool {
    line.chars().count() < 100
        && line.chars().any(|c| c.is_alphabetic())
        && line
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase())
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
