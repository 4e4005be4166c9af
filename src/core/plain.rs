//! Plain-text rendering of replies and charts for stdout (`-p`, `history show`).

use textwrap::Options;

use crate::core::api::sources_line;
use crate::core::chart::{
    ChartKind, ChartSpec, GroupedSeries, PieSlices, Projection, TrendPoint, ViewMode,
    format_percent, format_value, project, summarize,
};
use crate::core::reply::{DisplayBlock, spans_text};
use crate::core::session::{ChatEntry, Role};

pub const DEFAULT_WIDTH: usize = 80;

/// Widest bar drawn in the individual view.
const BAR_WIDTH: usize = 24;

fn push_wrapped(out: &mut Vec<String>, text: &str, options: &Options) {
    out.extend(textwrap::wrap(text, options).into_iter().map(|l| l.into_owned()));
}

/// Render display blocks as wrapped lines. Headings are upper-cased, bullets
/// get a `•` marker, and every break is one blank line.
pub fn render_blocks(blocks: &[DisplayBlock], width: usize) -> Vec<String> {
    let width = width.max(8);
    let mut out = Vec::new();
    for block in blocks {
        match block {
            DisplayBlock::Break => out.push(String::new()),
            DisplayBlock::Heading { text } => {
                push_wrapped(&mut out, &text.to_uppercase(), &Options::new(width));
            }
            DisplayBlock::BulletItem { spans } => {
                let options = Options::new(width)
                    .initial_indent("• ")
                    .subsequent_indent("  ");
                push_wrapped(&mut out, &spans_text(spans), &options);
            }
            DisplayBlock::Paragraph { spans } => {
                push_wrapped(&mut out, &spans_text(spans), &Options::new(width));
            }
        }
    }
    out
}

fn pad_table(rows: &[Vec<String>]) -> Vec<String> {
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..cols)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|s| textwrap::core::display_width(s))
                .max()
                .unwrap_or(0)
        })
        .collect();
    rows.iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let pad = widths[i].saturating_sub(textwrap::core::display_width(cell));
                    if i == 0 {
                        format!("{}{}", cell, " ".repeat(pad))
                    } else {
                        format!("{}{}", " ".repeat(pad), cell)
                    }
                })
                .collect();
            cells.join("  ").trim_end().to_string()
        })
        .collect()
}

fn grouped_lines(series: &GroupedSeries) -> Vec<String> {
    let mut rows = Vec::with_capacity(series.rows.len() + 1);
    let mut header = vec!["Period".to_string()];
    header.extend(series.metrics.iter().cloned());
    rows.push(header);
    for row in &series.rows {
        let mut cells = vec![row.period.clone()];
        cells.extend(
            series
                .metrics
                .iter()
                .map(|m| row.get(m).map(format_value).unwrap_or_else(|| "-".to_string())),
        );
        rows.push(cells);
    }
    pad_table(&rows)
}

fn individual_lines(pie: &PieSlices) -> Vec<String> {
    let proportions = pie.proportions();
    let rows: Vec<Vec<String>> = pie
        .slices
        .iter()
        .enumerate()
        .map(|(i, obs)| {
            let share = proportions.as_ref().map(|p| p[i]);
            let bar_len = share
                .map(|s| (s.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize)
                .unwrap_or(0);
            vec![
                obs.label.clone(),
                format_value(obs.value),
                share.map(format_percent).unwrap_or_else(|| "-".to_string()),
                "█".repeat(bar_len),
            ]
        })
        .collect();
    pad_table(&rows)
}

fn comparison_lines(points: &[TrendPoint]) -> Vec<String> {
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| {
            vec![
                format!("{}.", p.index),
                p.display_name.clone(),
                format_value(p.value),
                p.full_label.clone(),
            ]
        })
        .collect();
    pad_table(&rows)
}

/// Render a chart: title with view label, the projection as a table, and a
/// summary footer. A chart without data renders nothing.
pub fn render_chart(chart: &ChartSpec, mode: ViewMode) -> Vec<String> {
    let mut out = Vec::new();
    if chart.is_empty() {
        return out;
    }
    if let ChartKind::Unsupported(kind) = &chart.kind {
        out.push(chart.display_title());
        out.push(format!("Unsupported chart type: {}", kind));
        return out;
    }
    let Some(projection) = project(chart, mode) else {
        return out;
    };
    out.push(format!("{} [{}]", chart.display_title(), mode.label()));
    out.extend(match &projection {
        Projection::Grouped(series) => grouped_lines(series),
        Projection::Individual(pie) => individual_lines(pie),
        Projection::Comparison(points) => comparison_lines(points),
    });
    if let Some(stats) = summarize(chart) {
        out.push(format!(
            "Data points: {}  Total: {}",
            chart.data.len(),
            format_value(stats.total)
        ));
        out.push(format!(
            "Max: {}  Min: {}  Average: {}  Metrics: {}",
            format_value(stats.max),
            format_value(stats.min),
            format_value(stats.average),
            stats.metric_count
        ));
    }
    out
}

/// Render an assistant reply: text, chart, and sources.
pub fn render_reply(entry: &ChatEntry, width: usize) -> String {
    let mut lines = render_blocks(&entry.blocks(), width);
    if let Some(chart) = entry.chart.as_ref().filter(|c| !c.is_empty()) {
        lines.push(String::new());
        lines.extend(render_chart(chart, entry.view_mode));
    }
    if !entry.sources.is_empty() {
        lines.push(String::new());
        lines.push(format!("Sources: {}", sources_line(&entry.sources)));
    }
    lines.join("\n")
}

/// Render a whole conversation as a transcript.
pub fn render_transcript(entries: &[ChatEntry], width: usize) -> String {
    entries
        .iter()
        .map(|entry| match entry.role {
            Role::User => format!("> {}", entry.text.trim()),
            Role::Assistant => render_reply(entry, width),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::{ChatReply, Source};
    use crate::core::chart::Observation;
    use crate::core::reply::parse;

    fn sample_chart(kind: ChartKind) -> ChartSpec {
        ChartSpec {
            kind,
            title: Some("Quarterly results".to_string()),
            data: vec![
                Observation::new("Revenue Q1", 100.0),
                Observation::new("Revenue Q2", 150.0),
                Observation::new("Profit Q1", 20.0),
            ],
        }
    }

    #[test]
    fn blocks_render_headings_bullets_and_breaks() {
        let lines = render_blocks(
            &parse("**Summary**\n\n\n* revenue **up**\nPlain text\n"),
            40,
        );
        assert_eq!(
            lines,
            vec!["SUMMARY", "", "", "• revenue up", "Plain text", ""]
        );
    }

    #[test]
    fn each_break_is_one_blank_line() {
        let blocks = parse("A\n\n\nB");
        let breaks = blocks
            .iter()
            .filter(|b| matches!(b, DisplayBlock::Break))
            .count();
        let lines = render_blocks(&blocks, 80);
        assert_eq!(lines, vec!["A", "", "", "B"]);
        assert_eq!(lines.iter().filter(|l| l.is_empty()).count(), breaks);
    }

    #[test]
    fn leading_breaks_are_kept() {
        assert_eq!(render_blocks(&parse("\nA"), 80), vec!["", "A"]);
    }

    #[test]
    fn long_bullets_wrap_with_hanging_indent() {
        let lines = render_blocks(&parse("* one two three four five six"), 12);
        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("• "));
        assert!(lines[1..].iter().all(|l| l.starts_with("  ")));
    }

    #[test]
    fn grouped_chart_renders_table_and_footer() {
        let lines = render_chart(&sample_chart(ChartKind::Bar), ViewMode::Grouped);
        assert_eq!(lines[0], "Quarterly results [Grouped]");
        assert!(lines[1].starts_with("Period"));
        assert!(lines[1].contains("Revenue") && lines[1].contains("Profit"));
        assert!(lines[2].starts_with("Q1"));
        assert!(lines[2].contains("100.0") && lines[2].contains("20.0"));
        assert!(lines[3].starts_with("Q2"));
        assert!(lines[3].contains("150.0") && lines[3].ends_with('-'));
        assert_eq!(lines[4], "Data points: 3  Total: 270.0");
        assert!(lines[5].contains("Metrics: 2"));
    }

    #[test]
    fn individual_chart_shows_percentages() {
        let lines = render_chart(&sample_chart(ChartKind::Pie), ViewMode::Individual);
        assert!(lines[1].starts_with("Revenue Q1"));
        assert!(lines[1].contains("37%"));
        assert!(lines[2].contains("56%"));
    }

    #[test]
    fn zero_total_individual_chart_has_no_percentages() {
        let chart = ChartSpec {
            kind: ChartKind::Pie,
            title: None,
            data: vec![Observation::new("A", 0.0), Observation::new("B", 0.0)],
        };
        let lines = render_chart(&chart, ViewMode::Individual);
        assert_eq!(lines[0], "Pie Chart [Individual]");
        assert!(!lines[1].contains('%'));
    }

    #[test]
    fn comparison_chart_lists_points_in_order() {
        let lines = render_chart(&sample_chart(ChartKind::Line), ViewMode::Comparison);
        assert_eq!(lines[0], "Quarterly results [Trend]");
        assert!(lines[1].starts_with("1."));
        assert!(lines[3].starts_with("3.") && lines[3].contains("Profit Q1"));
    }

    #[test]
    fn unsupported_chart_renders_notice() {
        let chart = sample_chart(ChartKind::Unsupported("scatter".to_string()));
        let lines = render_chart(&chart, ViewMode::Grouped);
        assert_eq!(lines[1], "Unsupported chart type: scatter");
    }

    #[test]
    fn chart_without_data_renders_nothing() {
        for kind in [
            ChartKind::Bar,
            ChartKind::Unsupported("scatter".to_string()),
        ] {
            let chart = ChartSpec {
                kind,
                title: Some("Empty".to_string()),
                data: Vec::new(),
            };
            assert!(render_chart(&chart, ViewMode::Grouped).is_empty());
        }
    }

    #[test]
    fn reply_with_empty_chart_has_no_separator() {
        let mut entry = ChatEntry::assistant(ChatReply {
            text: "Done".to_string(),
            sources: Vec::new(),
            chart: None,
            session_id: None,
        });
        entry.chart = Some(ChartSpec {
            kind: ChartKind::Unsupported("radar".to_string()),
            title: None,
            data: Vec::new(),
        });
        assert_eq!(render_reply(&entry, 80), "Done");
    }

    #[test]
    fn reply_includes_sources() {
        let entry = ChatEntry::assistant(ChatReply {
            text: "Done".to_string(),
            sources: vec![Source::new("0123456789abcdef")],
            chart: None,
            session_id: None,
        });
        assert_eq!(render_reply(&entry, 80), "Done\n\nSources: 01234567");
    }

    #[test]
    fn transcript_marks_user_turns() {
        let entries = vec![ChatEntry::user("Hi"), ChatEntry::error("Request cancelled.")];
        assert_eq!(
            render_transcript(&entries, 80),
            "> Hi\n\nRequest cancelled."
        );
    }
}
