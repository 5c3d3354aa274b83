//! Renderer output types.

use serde::Serialize;

/// A table-of-contents entry for one heading line.
///
/// Anchor ids are sequential (`heading-0`, `heading-1`, …) in document order
/// and restart at zero on every render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub id: String,
    pub title: String,
    pub level: u8,
}

/// An inline span. The sequence is flat: delimited spans carry their raw
/// inner text and are never nested inside each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
    Strike(String),
    Code(String),
    Link { label: String, href: String },
}

/// A block-level construct, one or more per paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        id: String,
        level: u8,
        content: Vec<Inline>,
    },
    /// Lines joined by soft line breaks.
    Paragraph { lines: Vec<Vec<Inline>> },
    Quote { content: Vec<Inline> },
    Code {
        /// Language tag from the opening fence, kept as metadata.
        language: Option<String>,
        body: String,
    },
}

/// The result of one render pass: the typed block sequence, the HTML
/// fragment emitted from it, and the headings in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedDocument {
    pub blocks: Vec<Block>,
    pub headings: Vec<Heading>,
    pub html: String,
}
