//! Markdown-subset renderer.
//!
//! The remote service stores post bodies in a small markdown dialect:
//!
//! - `#` / `##` / `###` headings (each its own paragraph),
//! - `**bold**`, `_italic_`, `~~strikethrough~~`, `` `code` ``,
//! - `[label](url)` links,
//! - fenced code blocks with an optional language tag,
//! - `>` blockquote lines,
//! - blank-line paragraph breaks and single-newline soft breaks.
//!
//! Rendering is total: malformed input degrades to literal text, it never
//! fails. Every pass restarts the heading anchor counter at `heading-0`, so
//! re-rendering changed content always yields fresh, in-order anchors for a
//! table of contents.

mod blocks;
mod html;
mod inline;
mod types;

pub use types::{Block, Heading, Inline, RenderedDocument};

/// Renders one document. Empty input yields an empty document.
pub fn render(content: &str) -> RenderedDocument {
    let (blocks, headings) = blocks::parse_blocks(content);
    let html = html::document_html(&blocks);
    RenderedDocument {
        blocks,
        headings,
        html,
    }
}
