//! HTML emission.
//!
//! Text content is escaped with `encode_text`, attribute values with
//! `encode_double_quoted_attribute`; the emitter never outputs markup it did
//! not construct itself. Links open in a new tab and carry
//! `rel="noopener noreferrer"`.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::types::{Block, Inline};

pub(crate) fn document_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for (idx, block) in blocks.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        block_html(block, &mut out);
    }
    out
}

fn block_html(block: &Block, out: &mut String) {
    match block {
        Block::Heading { id, level, content } => {
            let _ = write!(out, "<h{level} id=\"{}\">", encode_double_quoted_attribute(id));
            inline_html(content, out);
            let _ = write!(out, "</h{level}>");
        }
        Block::Paragraph { lines } => {
            out.push_str("<p>");
            for (idx, line) in lines.iter().enumerate() {
                if idx > 0 {
                    out.push_str("<br />");
                }
                inline_html(line, out);
            }
            out.push_str("</p>");
        }
        Block::Quote { content } => {
            out.push_str("<blockquote>");
            inline_html(content, out);
            out.push_str("</blockquote>");
        }
        Block::Code { language, body } => {
            match language {
                Some(lang) => {
                    let _ = write!(
                        out,
                        "<pre><code data-language=\"{}\">",
                        encode_double_quoted_attribute(lang)
                    );
                }
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&encode_text(body));
            out.push_str("</code></pre>");
        }
    }
}

fn inline_html(nodes: &[Inline], out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(&encode_text(text)),
            Inline::Bold(text) => {
                out.push_str("<strong>");
                out.push_str(&encode_text(text));
                out.push_str("</strong>");
            }
            Inline::Italic(text) => {
                out.push_str("<em>");
                out.push_str(&encode_text(text));
                out.push_str("</em>");
            }
            Inline::Strike(text) => {
                out.push_str("<del>");
                out.push_str(&encode_text(text));
                out.push_str("</del>");
            }
            Inline::Code(text) => {
                out.push_str("<code>");
                out.push_str(&encode_text(text));
                out.push_str("</code>");
            }
            Inline::Link { label, href } => {
                let _ = write!(
                    out,
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                    encode_double_quoted_attribute(href)
                );
                out.push_str(&encode_text(label));
                out.push_str("</a>");
            }
        }
    }
}
