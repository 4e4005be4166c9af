//! Styled text layout: reply blocks to word-wrapped ratatui lines.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use textwrap::WordSeparator;
use textwrap::core::{Fragment, break_words, display_width};
use textwrap::wrap_algorithms::wrap_first_fit;

use crate::core::reply::{DisplayBlock, InlineSpan};

use super::constants::Palette;

/// A word plus its trailing whitespace, styled by the run it came from.
#[derive(Debug)]
struct StyledWord {
    word: String,
    style: Style,
    whitespace: String,
    whitespace_style: Style,
}

impl Fragment for StyledWord {
    fn width(&self) -> f64 {
        display_width(&self.word) as f64
    }

    fn whitespace_width(&self) -> f64 {
        display_width(&self.whitespace) as f64
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Split runs into words, hard-breaking any word wider than `max_width`.
/// Whitespace that opens a run is attached to the previous word.
fn styled_words(runs: &[(String, Style)], max_width: usize) -> Vec<StyledWord> {
    let mut words: Vec<StyledWord> = Vec::new();
    for (text, style) in runs {
        let found = WordSeparator::AsciiSpace.find_words(text);
        for word in break_words(found, max_width) {
            if word.word.is_empty() {
                if let Some(prev) = words.last_mut() {
                    prev.whitespace.push_str(word.whitespace);
                    prev.whitespace_style = *style;
                }
                continue;
            }
            words.push(StyledWord {
                word: word.word.to_string(),
                style: *style,
                whitespace: word.whitespace.to_string(),
                whitespace_style: *style,
            });
        }
    }
    words
}

/// Word-wrap styled runs to `width` columns. The first line starts with
/// `indent_first`, continuation lines with `indent_rest`.
pub(crate) fn wrap_spans(
    runs: &[(String, Style)],
    width: usize,
    indent_first: Span<'static>,
    indent_rest: Span<'static>,
) -> Vec<Line<'static>> {
    let first_width = width.saturating_sub(display_width(&indent_first.content)).max(1);
    let rest_width = width.saturating_sub(display_width(&indent_rest.content)).max(1);
    let words = styled_words(runs, first_width.min(rest_width));
    let line_widths = [first_width as f64, rest_width as f64];

    let mut indent = Some(indent_first);
    wrap_first_fit(&words, &line_widths)
        .into_iter()
        .map(|fragments| {
            let lead = indent.take().unwrap_or_else(|| indent_rest.clone());
            let mut spans = vec![lead];
            for (i, w) in fragments.iter().enumerate() {
                spans.push(Span::styled(w.word.clone(), w.style));
                // trailing whitespace is dropped at the end of a line
                if i + 1 < fragments.len() && !w.whitespace.is_empty() {
                    spans.push(Span::styled(w.whitespace.clone(), w.whitespace_style));
                }
            }
            Line::from(spans)
        })
        .collect()
}

fn inline_runs(spans: &[InlineSpan], palette: &Palette) -> Vec<(String, Style)> {
    spans
        .iter()
        .map(|span| {
            let style = if span.is_bold() {
                Style::default()
                    .fg(palette.strong)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            (span.text().to_string(), style)
        })
        .collect()
}

/// Lay out reply blocks. Each break is one blank line.
pub(crate) fn blocks_to_lines(
    blocks: &[DisplayBlock],
    width: usize,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for block in blocks {
        match block {
            DisplayBlock::Break => lines.push(Line::default()),
            DisplayBlock::Heading { text } => {
                let style = Style::default()
                    .fg(palette.strong)
                    .add_modifier(Modifier::BOLD);
                lines.extend(wrap_spans(
                    &[(text.clone(), style)],
                    width,
                    Span::raw(""),
                    Span::raw(""),
                ));
            }
            DisplayBlock::BulletItem { spans } => {
                lines.extend(wrap_spans(
                    &inline_runs(spans, palette),
                    width,
                    Span::styled("• ", Style::default().fg(palette.accent)),
                    Span::raw("  "),
                ));
            }
            DisplayBlock::Paragraph { spans } => {
                lines.extend(wrap_spans(
                    &inline_runs(spans, palette),
                    width,
                    Span::raw(""),
                    Span::raw(""),
                ));
            }
        }
    }
    lines
}

/// Plain text wrapped without styling (user messages, notices).
pub(crate) fn plain_to_lines(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![Line::default()]
            } else {
                wrap_spans(
                    &[(line.to_string(), style)],
                    width,
                    Span::raw(""),
                    Span::raw(""),
                )
            }
        })
        .collect()
}

/// Truncate to `max_width` columns, ending with "…" when cut.
pub(crate) fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut w = 0;
    for c in s.chars() {
        let cw = display_width(c.encode_utf8(&mut [0; 4]));
        if w + cw + 1 > max_width {
            break;
        }
        w += cw;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Theme;
    use crate::core::reply::parse;
    use crate::tui::constants::palette;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn words_carry_whitespace_and_style() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let runs = vec![
            ("Net ".to_string(), Style::default()),
            ("income".to_string(), bold),
            (" rose".to_string(), Style::default()),
        ];
        let words = styled_words(&runs, 80);
        let texts: Vec<(&str, &str)> = words
            .iter()
            .map(|w| (w.word.as_str(), w.whitespace.as_str()))
            .collect();
        assert_eq!(texts, vec![("Net", " "), ("income", " "), ("rose", "")]);
        assert_eq!(words[1].style, bold);
        assert_eq!(words[1].whitespace_style, Style::default());
    }

    #[test]
    fn wrapped_lines_have_no_edge_whitespace() {
        let lines = wrap_spans(
            &[("  alpha   beta gamma  ".to_string(), Style::default())],
            11,
            Span::raw(""),
            Span::raw(""),
        );
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["alpha", "beta gamma"]);
    }

    #[test]
    fn matches_plain_textwrap_output() {
        let sample = "Revenue grew strongly across every segment in the third quarter";
        let lines = wrap_spans(
            &[(sample.to_string(), Style::default())],
            20,
            Span::raw(""),
            Span::raw(""),
        );
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        let options = textwrap::Options::new(20)
            .word_separator(WordSeparator::AsciiSpace)
            .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
        let expected: Vec<String> = textwrap::wrap(sample, options)
            .into_iter()
            .map(|l| l.into_owned())
            .collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn empty_runs_yield_indent_only_line() {
        let lines = wrap_spans(&[], 10, Span::raw("• "), Span::raw("  "));
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "• ");
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_spans(
            &[("the quick brown fox jumps".to_string(), Style::default())],
            10,
            Span::raw(""),
            Span::raw(""),
        );
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn wrap_hard_splits_long_words() {
        let lines = wrap_spans(
            &[("abcdefghij".to_string(), Style::default())],
            4,
            Span::raw(""),
            Span::raw(""),
        );
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn bullet_continuation_is_indented() {
        let p = palette(Theme::Light);
        let lines = blocks_to_lines(&parse("* alpha beta gamma delta"), 12, p);
        assert_eq!(line_text(&lines[0]), "• alpha beta");
        assert_eq!(line_text(&lines[1]), "  gamma");
        assert_eq!(line_text(&lines[2]), "  delta");
    }

    #[test]
    fn bold_runs_keep_bold_style() {
        let p = palette(Theme::Dark);
        let lines = blocks_to_lines(&parse("Net **income** rose"), 80, p);
        assert_eq!(lines.len(), 1);
        let bold: Vec<&str> = lines[0]
            .spans
            .iter()
            .filter(|s| s.style.add_modifier.contains(Modifier::BOLD))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(bold, vec!["income"]);
        assert_eq!(line_text(&lines[0]), "Net income rose");
    }

    #[test]
    fn each_break_is_one_blank_line() {
        let p = palette(Theme::Light);
        let blocks = parse("**Title**\n\n\nBody\n\n");
        let breaks = blocks
            .iter()
            .filter(|b| matches!(b, DisplayBlock::Break))
            .count();
        let lines = blocks_to_lines(&blocks, 40, p);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["Title", "", "", "Body", "", ""]);
        assert_eq!(texts.iter().filter(|t| t.is_empty()).count(), breaks);
    }

    #[test]
    fn leading_break_is_kept() {
        let p = palette(Theme::Dark);
        let lines = blocks_to_lines(&parse("\nA"), 40, p);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["", "A"]);
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        let t = truncate_with_ellipsis("hello world", 8);
        assert_eq!(t, "hello w…");
        assert_eq!(truncate_with_ellipsis("ab", 1), "…");
    }
}
