//! Reply text parsing: turns an assistant reply into display blocks.
//!
//! The supported subset is small on purpose: `**Heading**` lines, `* ` bullet
//! items, paragraphs, blank-line breaks, and inline `**bold**` spans.

use std::sync::OnceLock;

use regex::Regex;

/// Inline run of text within a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Plain(String),
    Bold(String),
}

impl InlineSpan {
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Plain(s) | InlineSpan::Bold(s) => s,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, InlineSpan::Bold(_))
    }
}

/// One structural unit of a parsed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    /// Blank line.
    Break,
    /// A line wholly wrapped in `**...**`.
    Heading { text: String },
    /// A line starting with `"* "`.
    BulletItem { spans: Vec<InlineSpan> },
    Paragraph { spans: Vec<InlineSpan> },
}

const BOLD_DELIM: &str = "**";
const BULLET_PREFIX: &str = "* ";

fn bold_pattern() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*.*?\*\*").expect("bold pattern is valid"))
}

/// Parse reply text into blocks, one input line at a time.
/// Empty input yields no blocks.
pub fn parse(text: &str) -> Vec<DisplayBlock> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<DisplayBlock> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Some(DisplayBlock::Break);
    }
    if trimmed.len() > 2 * BOLD_DELIM.len()
        && trimmed.starts_with(BOLD_DELIM)
        && trimmed.ends_with(BOLD_DELIM)
    {
        let inner = &trimmed[BOLD_DELIM.len()..trimmed.len() - BOLD_DELIM.len()];
        return Some(DisplayBlock::Heading {
            text: inner.to_string(),
        });
    }
    if let Some(rest) = trimmed.strip_prefix(BULLET_PREFIX) {
        return Some(DisplayBlock::BulletItem {
            spans: split_inline(rest),
        });
    }
    // \r from CRLF input would otherwise end up in the rendered paragraph
    let spans = split_inline(line.strip_suffix('\r').unwrap_or(line));
    if spans.is_empty() {
        None
    } else {
        Some(DisplayBlock::Paragraph { spans })
    }
}

/// Split a line into plain and bold runs around paired `**` delimiters.
///
/// Empty runs between two adjacent bold pairs are kept; empty runs at either
/// end of the line are not, so `""` yields no spans at all. An unpaired `**`
/// stays in its plain run.
pub fn split_inline(text: &str) -> Vec<InlineSpan> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in bold_pattern().find_iter(text) {
        pieces.push(&text[last..m.start()]);
        pieces.push(m.as_str());
        last = m.end();
    }
    pieces.push(&text[last..]);

    if pieces.first().is_some_and(|p| p.is_empty()) {
        pieces.remove(0);
    }
    if pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }
    pieces.into_iter().map(classify_piece).collect()
}

fn classify_piece(piece: &str) -> InlineSpan {
    if piece.len() >= 2 * BOLD_DELIM.len()
        && piece.starts_with(BOLD_DELIM)
        && piece.ends_with(BOLD_DELIM)
    {
        InlineSpan::Bold(piece[BOLD_DELIM.len()..piece.len() - BOLD_DELIM.len()].to_string())
    } else {
        InlineSpan::Plain(piece.to_string())
    }
}

/// Concatenated text of a span list, without delimiters.
pub fn spans_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> InlineSpan {
        InlineSpan::Plain(s.to_string())
    }

    fn bold(s: &str) -> InlineSpan {
        InlineSpan::Bold(s.to_string())
    }

    #[test]
    fn parse_empty_is_empty() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn parse_whole_line_bold_is_heading() {
        assert_eq!(
            parse("**X**"),
            vec![DisplayBlock::Heading {
                text: "X".to_string()
            }]
        );
    }

    #[test]
    fn parse_heading_uses_trimmed_line() {
        assert_eq!(
            parse("   **Key Highlights**  "),
            vec![DisplayBlock::Heading {
                text: "Key Highlights".to_string()
            }]
        );
    }

    #[test]
    fn parse_four_asterisks_is_not_heading() {
        let blocks = parse("****");
        assert_eq!(
            blocks,
            vec![DisplayBlock::Paragraph {
                spans: vec![bold("")]
            }]
        );
    }

    #[test]
    fn parse_leading_bold_only_is_paragraph() {
        let blocks = parse("**Revenue** grew");
        assert_eq!(
            blocks,
            vec![DisplayBlock::Paragraph {
                spans: vec![bold("Revenue"), plain(" grew")]
            }]
        );
    }

    #[test]
    fn parse_line_ending_in_bold_counts_as_heading() {
        // whole-line rule: starts and ends with the delimiter
        let blocks = parse("**Revenue** grew **fast**");
        assert_eq!(
            blocks,
            vec![DisplayBlock::Heading {
                text: "Revenue** grew **fast".to_string()
            }]
        );
    }

    #[test]
    fn parse_bullet_with_bold() {
        assert_eq!(
            parse("* hello **world**"),
            vec![DisplayBlock::BulletItem {
                spans: vec![plain("hello "), bold("world")]
            }]
        );
    }

    #[test]
    fn parse_indented_bullet() {
        let blocks = parse("   * item");
        assert_eq!(
            blocks,
            vec![DisplayBlock::BulletItem {
                spans: vec![plain("item")]
            }]
        );
    }

    #[test]
    fn parse_star_without_space_is_paragraph() {
        let blocks = parse("*note");
        assert!(matches!(&blocks[0], DisplayBlock::Paragraph { .. }));
    }

    #[test]
    fn parse_paragraph_keeps_untrimmed_text() {
        assert_eq!(
            parse("  indented text"),
            vec![DisplayBlock::Paragraph {
                spans: vec![plain("  indented text")]
            }]
        );
    }

    #[test]
    fn parse_one_break_per_blank_line_in_position() {
        let blocks = parse("a\n\n  \nb\n");
        assert_eq!(blocks.len(), 5);
        assert!(matches!(blocks[0], DisplayBlock::Paragraph { .. }));
        assert_eq!(blocks[1], DisplayBlock::Break);
        assert_eq!(blocks[2], DisplayBlock::Break);
        assert!(matches!(blocks[3], DisplayBlock::Paragraph { .. }));
        assert_eq!(blocks[4], DisplayBlock::Break);
    }

    #[test]
    fn parse_mixed_reply_preserves_order() {
        let text = "**Summary**\nRevenue rose.\n* Q1: **100**\n* Q2: 150";
        let blocks = parse(text);
        assert_eq!(blocks.len(), 4);
        assert!(matches!(&blocks[0], DisplayBlock::Heading { text } if text == "Summary"));
        assert!(matches!(&blocks[1], DisplayBlock::Paragraph { .. }));
        assert_eq!(
            blocks[2],
            DisplayBlock::BulletItem {
                spans: vec![plain("Q1: "), bold("100")]
            }
        );
        assert_eq!(
            blocks[3],
            DisplayBlock::BulletItem {
                spans: vec![plain("Q2: 150")]
            }
        );
    }

    #[test]
    fn parse_strips_carriage_return_from_paragraph() {
        let blocks = parse("line one\r\nline two");
        assert_eq!(
            blocks[0],
            DisplayBlock::Paragraph {
                spans: vec![plain("line one")]
            }
        );
    }

    #[test]
    fn split_inline_middle_bold() {
        assert_eq!(
            split_inline("a**b**c"),
            vec![plain("a"), bold("b"), plain("c")]
        );
    }

    #[test]
    fn split_inline_no_bold() {
        assert_eq!(split_inline("no bold"), vec![plain("no bold")]);
    }

    #[test]
    fn split_inline_empty_string_has_no_spans() {
        assert!(split_inline("").is_empty());
    }

    #[test]
    fn split_inline_non_greedy() {
        assert_eq!(
            split_inline("**a** and **b**"),
            vec![bold("a"), plain(" and "), bold("b")]
        );
    }

    #[test]
    fn split_inline_adjacent_pairs_leave_empty_plain() {
        assert_eq!(
            split_inline("**a****b**"),
            vec![bold("a"), plain(""), bold("b")]
        );
    }

    #[test]
    fn split_inline_unpaired_delimiter_stays_plain() {
        assert_eq!(
            split_inline("growth ** pending"),
            vec![plain("growth ** pending")]
        );
        assert_eq!(
            split_inline("**a** then **"),
            vec![bold("a"), plain(" then **")]
        );
    }

    #[test]
    fn split_inline_lone_delimiter_is_plain() {
        assert_eq!(split_inline("**"), vec![plain("**")]);
    }

    #[test]
    fn spans_text_drops_delimiters() {
        assert_eq!(spans_text(&split_inline("a **b** c")), "a b c");
    }
}
