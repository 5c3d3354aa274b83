//! Block-level parsing.
//!
//! Input splits into paragraphs on blank lines (`\n\n`). Each paragraph is
//! checked for block constructs in priority order: headings (`###` before
//! `##` before `#`, since every deeper marker also starts with `#`), then a
//! fenced code block, then line-oriented content where a `>` line becomes a
//! blockquote and the remaining lines join into a paragraph with soft
//! breaks.

use super::inline;
use super::types::{Block, Heading, Inline};

pub(crate) fn parse_blocks(content: &str) -> (Vec<Block>, Vec<Heading>) {
    let mut blocks = Vec::new();
    let mut headings = Vec::new();

    for paragraph in content.split("\n\n") {
        let trimmed = paragraph.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some((level, text)) = heading_line(trimmed) {
            push_heading(level, text, &mut blocks, &mut headings);
            continue;
        }

        if trimmed.starts_with("```") {
            match fenced_code(trimmed) {
                Some(block) => blocks.push(block),
                // Unterminated fence: the whole paragraph stays literal so
                // the backticks are not re-read as inline code spans.
                None => push_literal_lines(trimmed, &mut blocks),
            }
            continue;
        }

        push_lines(trimmed, &mut blocks);
    }

    (blocks, headings)
}

/// Recognizes `# `, `## `, `### ` prefixes. A `#` run not followed by a
/// space (`#text`, `####…`) is ordinary paragraph text.
fn heading_line(paragraph: &str) -> Option<(u8, &str)> {
    for (marker, level) in [("###", 3u8), ("##", 2), ("#", 1)] {
        if let Some(rest) = paragraph.strip_prefix(marker) {
            return rest.strip_prefix(' ').map(|text| (level, text.trim()));
        }
    }
    None
}

fn push_heading(level: u8, text: &str, blocks: &mut Vec<Block>, headings: &mut Vec<Heading>) {
    let content = inline::scan_inline(text);
    let id = format!("heading-{}", headings.len());
    headings.push(Heading {
        id: id.clone(),
        title: inline::plain_text(&content),
        level,
    });
    blocks.push(Block::Heading { id, level, content });
}

/// A fence is complete only when the paragraph's last line closes it.
/// Anything else falls back to ordinary line handling, which emits the
/// opening fence literally — the same degradation unmatched inline markers
/// get.
fn fenced_code(paragraph: &str) -> Option<Block> {
    let (first, rest) = paragraph.split_once('\n')?;
    let lines: Vec<&str> = rest.lines().collect();
    let (&last, body) = lines.split_last()?;
    if last.trim() != "```" {
        return None;
    }

    let language = first[3..].trim();
    Some(Block::Code {
        language: (!language.is_empty()).then(|| language.to_string()),
        body: body.join("\n"),
    })
}

fn push_literal_lines(paragraph: &str, blocks: &mut Vec<Block>) {
    let lines: Vec<Vec<Inline>> = paragraph
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| vec![Inline::Text(line.to_string())])
        .collect();
    if !lines.is_empty() {
        blocks.push(Block::Paragraph { lines });
    }
}

fn push_lines(paragraph: &str, blocks: &mut Vec<Block>) {
    let mut lines: Vec<Vec<Inline>> = Vec::new();

    for line in paragraph.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(quoted) = line.strip_prefix('>') {
            if !lines.is_empty() {
                blocks.push(Block::Paragraph {
                    lines: std::mem::take(&mut lines),
                });
            }
            blocks.push(Block::Quote {
                content: inline::scan_inline(quoted.trim_start()),
            });
        } else {
            lines.push(inline::scan_inline(line));
        }
    }

    if !lines.is_empty() {
        blocks.push(Block::Paragraph { lines });
    }
}
