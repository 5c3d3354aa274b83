//! Inline span scanner.
//!
//! A single left-to-right pass over a paragraph or heading line. At each
//! position the earliest-starting marker wins; when two markers could start
//! at the same position the check order is fixed: bold (`**`) before
//! strikethrough (`~~`) before italic (`_`) before code (`` ` ``) before
//! link (`[`). Bold must precede italic so `**` is never read as two
//! italics. A marker with no closer is emitted literally and scanning
//! resumes right after it, so no input ever fails.

use super::types::Inline;

enum Step {
    /// A completed span and the byte length it consumed.
    Node(Inline, usize),
    /// Literal text of the given byte length.
    Literal(usize),
}

pub(crate) fn scan_inline(text: &str) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        match next_step(rest) {
            Step::Node(node, consumed) => {
                flush_plain(&mut nodes, &mut plain);
                nodes.push(node);
                rest = &rest[consumed..];
            }
            Step::Literal(len) => {
                plain.push_str(&rest[..len]);
                rest = &rest[len..];
            }
        }
    }

    flush_plain(&mut nodes, &mut plain);
    nodes
}

/// Concatenated text content, markers stripped; links contribute their label.
pub(crate) fn plain_text(nodes: &[Inline]) -> String {
    nodes
        .iter()
        .map(|node| match node {
            Inline::Text(text)
            | Inline::Bold(text)
            | Inline::Italic(text)
            | Inline::Strike(text)
            | Inline::Code(text) => text.as_str(),
            Inline::Link { label, .. } => label.as_str(),
        })
        .collect()
}

fn flush_plain(nodes: &mut Vec<Inline>, plain: &mut String) {
    if !plain.is_empty() {
        nodes.push(Inline::Text(std::mem::take(plain)));
    }
}

fn next_step(rest: &str) -> Step {
    if rest.starts_with("**") {
        return delimited(rest, "**", Inline::Bold);
    }
    if rest.starts_with("~~") {
        return delimited(rest, "~~", Inline::Strike);
    }
    if rest.starts_with('_') {
        return delimited(rest, "_", Inline::Italic);
    }
    if rest.starts_with('`') {
        return delimited(rest, "`", Inline::Code);
    }
    if rest.starts_with('[') {
        return link(rest);
    }

    let first_char_len = rest
        .chars()
        .next()
        .map_or(rest.len(), char::len_utf8);
    Step::Literal(first_char_len)
}

fn delimited(rest: &str, marker: &str, make: fn(String) -> Inline) -> Step {
    let open = marker.len();
    match rest[open..].find(marker) {
        Some(close) => {
            let inner = rest[open..open + close].to_string();
            Step::Node(make(inner), open + close + marker.len())
        }
        None => Step::Literal(open),
    }
}

fn link(rest: &str) -> Step {
    // `[label](url)`; any missing piece downgrades the `[` to literal text.
    let Some(close_bracket) = rest.find(']') else {
        return Step::Literal(1);
    };
    let after = &rest[close_bracket + 1..];
    let Some(parens) = after.strip_prefix('(') else {
        return Step::Literal(1);
    };
    let Some(close_paren) = parens.find(')') else {
        return Step::Literal(1);
    };

    let label = rest[1..close_bracket].to_string();
    let href = parens[..close_paren].to_string();
    // "[" + label + "](" + href + ")"
    let consumed = close_bracket + 2 + close_paren + 1;
    Step::Node(Inline::Link { label, href }, consumed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(scan_inline("just words"), vec![text("just words")]);
    }

    #[test]
    fn bold_italic_strike_code() {
        assert_eq!(
            scan_inline("a **b** _c_ ~~d~~ `e`"),
            vec![
                text("a "),
                Inline::Bold("b".to_string()),
                text(" "),
                Inline::Italic("c".to_string()),
                text(" "),
                Inline::Strike("d".to_string()),
                text(" "),
                Inline::Code("e".to_string()),
            ]
        );
    }

    #[test]
    fn bold_wins_over_italic_at_same_position() {
        assert_eq!(
            scan_inline("**_a_**"),
            vec![Inline::Bold("_a_".to_string())]
        );
    }

    #[test]
    fn spans_are_flat_not_nested() {
        assert_eq!(
            scan_inline("_a **b** c_"),
            vec![Inline::Italic("a **b** c".to_string())]
        );
    }

    #[test]
    fn unmatched_bold_degrades_to_literal() {
        assert_eq!(scan_inline("a **b"), vec![text("a **b")]);
    }

    #[test]
    fn unmatched_markers_degrade_individually() {
        assert_eq!(scan_inline("_a"), vec![text("_a")]);
        assert_eq!(scan_inline("`a"), vec![text("`a")]);
        assert_eq!(scan_inline("~~a"), vec![text("~~a")]);
        assert_eq!(scan_inline("[a"), vec![text("[a")]);
    }

    #[test]
    fn link_parses_label_and_href() {
        assert_eq!(
            scan_inline("see [docs](https://example.com) now"),
            vec![
                text("see "),
                Inline::Link {
                    label: "docs".to_string(),
                    href: "https://example.com".to_string(),
                },
                text(" now"),
            ]
        );
    }

    #[test]
    fn link_without_parens_is_literal() {
        assert_eq!(scan_inline("[label] only"), vec![text("[label] only")]);
    }

    #[test]
    fn link_without_closing_paren_is_literal() {
        assert_eq!(scan_inline("[a](b"), vec![text("[a](b")]);
    }

    #[test]
    fn code_span_keeps_markers_literal_inside() {
        assert_eq!(scan_inline("`**`"), vec![Inline::Code("**".to_string())]);
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(
            scan_inline("héllo **wörld** ✨"),
            vec![
                text("héllo "),
                Inline::Bold("wörld".to_string()),
                text(" ✨"),
            ]
        );
    }

    #[test]
    fn plain_text_strips_markers() {
        let nodes = scan_inline("**a** _b_ [c](d)");
        assert_eq!(plain_text(&nodes), "a b c");
    }
}
