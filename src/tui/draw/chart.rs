//! Chart panel drawn inside the message list.
//!
//! Widgets are rendered into an off-screen buffer and converted to lines so
//! the chart scrolls together with the surrounding text.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Widget};

use crate::core::chart::{
    ChartKind, ChartSpec, GroupedSeries, PieSlices, Projection, SummaryStats, TrendPoint,
    ViewMode, format_percent, format_value, project, summarize,
};

use super::super::constants::{CHART_HEIGHT, Palette, chart_color};
use super::super::text::truncate_with_ellipsis;

/// Copy a rendered buffer into lines, merging runs of equal style.
fn buffer_to_lines(buf: &Buffer) -> Vec<Line<'static>> {
    let width = buf.area.width as usize;
    if width == 0 {
        return Vec::new();
    }
    buf.content
        .chunks(width)
        .map(|row| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut text = String::new();
            let mut style: Option<Style> = None;
            for cell in row {
                let cell_style = cell.style();
                if style.is_some_and(|s| s != cell_style) {
                    spans.push(Span::styled(std::mem::take(&mut text), style.unwrap_or_default()));
                }
                style = Some(cell_style);
                text.push_str(cell.symbol());
            }
            if !text.is_empty() {
                spans.push(Span::styled(text, style.unwrap_or_default()));
            }
            Line::from(spans)
        })
        .collect()
}

fn render_offscreen(widget: impl Widget, width: u16, height: u16) -> Vec<Line<'static>> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_to_lines(&buf)
}

/// Bar heights must be integers; scale so small values keep their proportions.
fn bar_scale(max: f64) -> f64 {
    if max > 0.0 && max < 100.0 {
        100.0 / max
    } else {
        1.0
    }
}

fn bar_height(value: f64, scale: f64) -> u64 {
    (value.max(0.0) * scale).round() as u64
}

fn legend_line(metrics: &[String], palette: &Palette) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, metric) in metrics.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled("■ ", Style::default().fg(chart_color(i))));
        spans.push(Span::styled(metric.clone(), Style::default().fg(palette.text)));
    }
    Line::from(spans)
}

fn grouped_lines(series: &GroupedSeries, width: u16, palette: &Palette) -> Vec<Line<'static>> {
    let total_bars: usize = series.rows.iter().map(|r| r.values.len()).sum();
    let groups = series.rows.len().max(1);
    let group_gap: u16 = 2;
    let usable = (width as usize).saturating_sub(group_gap as usize * (groups - 1));
    let bar_width = (usable / total_bars.max(1)).saturating_sub(1).clamp(1, 9) as u16;

    let max = series
        .rows
        .iter()
        .flat_map(|r| r.values.iter().map(|(_, v)| *v))
        .fold(0.0, f64::max);
    let scale = bar_scale(max);

    let mut chart = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(1)
        .group_gap(group_gap)
        .label_style(Style::default().fg(palette.muted));
    for row in &series.rows {
        let bars: Vec<Bar> = row
            .values
            .iter()
            .map(|(metric, value)| {
                let idx = series
                    .metrics
                    .iter()
                    .position(|m| m == metric)
                    .unwrap_or(0);
                Bar::default()
                    .value(bar_height(*value, scale))
                    .text_value(format_value(*value))
                    .style(Style::default().fg(chart_color(idx)))
                    .value_style(
                        Style::default()
                            .fg(palette.bg)
                            .bg(chart_color(idx))
                            .add_modifier(Modifier::BOLD),
                    )
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(row.period.clone()))
                .bars(&bars),
        );
    }

    let mut lines = render_offscreen(chart, width, CHART_HEIGHT);
    lines.push(legend_line(&series.metrics, palette));
    lines
}

fn individual_lines(pie: &PieSlices, width: u16, palette: &Palette) -> Vec<Line<'static>> {
    let proportions = pie.proportions();
    let label_w = pie
        .slices
        .iter()
        .map(|o| textwrap::core::display_width(&o.label))
        .max()
        .unwrap_or(0)
        .min(24);
    // label, space, bar, space, "100%", space, value
    let bar_max = (width as usize).saturating_sub(label_w + 18).max(4);

    pie.slices
        .iter()
        .enumerate()
        .map(|(i, obs)| {
            let share = proportions.as_ref().map(|p| p[i]);
            let bar_len = share
                .map(|s| (s.clamp(0.0, 1.0) * bar_max as f64).round() as usize)
                .unwrap_or(0);
            let label = truncate_with_ellipsis(&obs.label, label_w);
            let pad = label_w.saturating_sub(textwrap::core::display_width(&label));
            Line::from(vec![
                Span::styled(
                    format!("{}{} ", label, " ".repeat(pad)),
                    Style::default().fg(palette.text),
                ),
                Span::styled("█".repeat(bar_len), Style::default().fg(chart_color(i))),
                Span::styled(
                    "░".repeat(bar_max - bar_len.min(bar_max)),
                    Style::default().fg(palette.border),
                ),
                Span::styled(
                    format!(
                        " {:>4}",
                        share.map(format_percent).unwrap_or_else(|| "-".to_string())
                    ),
                    Style::default()
                        .fg(palette.strong)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", format_value(obs.value)),
                    Style::default().fg(palette.muted),
                ),
            ])
        })
        .collect()
}

fn comparison_lines(points: &[TrendPoint], width: u16, palette: &Palette) -> Vec<Line<'static>> {
    let data: Vec<(f64, f64)> = points.iter().map(|p| (p.index as f64, p.value)).collect();
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        });
    let pad = ((max - min) * 0.1).max(1.0);
    let y_bounds = [min - pad, max + pad];
    let x_bounds = [1.0, (points.len() as f64).max(2.0)];

    let x_labels: Vec<String> = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 => {
            vec![first.display_name.clone(), last.display_name.clone()]
        }
        (Some(only), _) => vec![only.display_name.clone()],
        _ => Vec::new(),
    };
    let y_labels = vec![format_value(min), format_value(max)];

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(chart_color(0)))
            .data(&data),
    ];
    let axis_style = Style::default().fg(palette.muted);
    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds(y_bounds)
                .labels(y_labels),
        );
    render_offscreen(chart, width, CHART_HEIGHT)
}

fn stats_line(count: usize, stats: &SummaryStats, palette: &Palette) -> Line<'static> {
    let key = Style::default().fg(palette.muted);
    let value = Style::default().fg(palette.strong);
    Line::from(vec![
        Span::styled("Data points: ", key),
        Span::styled(count.to_string(), value),
        Span::styled("  Total: ", key),
        Span::styled(format_value(stats.total), value),
        Span::styled("  Max: ", key),
        Span::styled(format_value(stats.max), value),
        Span::styled("  Min: ", key),
        Span::styled(format_value(stats.min), value),
        Span::styled("  Avg: ", key),
        Span::styled(format_value(stats.average), value),
    ])
}

fn title_line(chart: &ChartSpec, mode: ViewMode, palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::styled(
        chart.display_title(),
        Style::default()
            .fg(palette.strong)
            .add_modifier(Modifier::BOLD),
    )];
    if !matches!(chart.kind, ChartKind::Unsupported(_)) {
        spans.push(Span::styled(
            format!("  [{}] Ctrl+V", mode.label()),
            Style::default().fg(palette.muted),
        ));
    }
    Line::from(spans)
}

/// Lines for a chart panel `width` columns wide. Empty for a chart without data.
pub(crate) fn chart_lines(
    chart: &ChartSpec,
    mode: ViewMode,
    width: u16,
    palette: &Palette,
) -> Vec<Line<'static>> {
    if chart.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![title_line(chart, mode, palette)];
    if let ChartKind::Unsupported(kind) = &chart.kind {
        lines.push(Line::from(Span::styled(
            format!("Unsupported chart type: {}", kind),
            Style::default().fg(palette.muted),
        )));
        return lines;
    }
    let Some(projection) = project(chart, mode) else {
        return Vec::new();
    };
    lines.extend(match &projection {
        Projection::Grouped(series) => grouped_lines(series, width, palette),
        Projection::Individual(pie) => individual_lines(pie, width, palette),
        Projection::Comparison(points) => comparison_lines(points, width, palette),
    });
    if let Some(stats) = summarize(chart) {
        lines.push(stats_line(chart.data.len(), &stats, palette));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chart::Observation;
    use crate::core::config::Theme;
    use crate::tui::constants::palette;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn spec(kind: ChartKind) -> ChartSpec {
        ChartSpec {
            kind,
            title: None,
            data: vec![
                Observation::new("Revenue 2023", 120.0),
                Observation::new("Revenue 2024", 150.0),
                Observation::new("Costs 2023", 80.0),
            ],
        }
    }

    #[test]
    fn grouped_panel_has_title_chart_legend_and_stats() {
        let lines = chart_lines(
            &spec(ChartKind::Bar),
            ViewMode::Grouped,
            60,
            palette(Theme::Light),
        );
        assert!(text(&lines[0]).starts_with("Bar Chart"));
        // title + chart rows + legend + stats
        assert_eq!(lines.len(), 1 + CHART_HEIGHT as usize + 2);
        let legend = text(&lines[lines.len() - 2]);
        assert!(legend.contains("Revenue") && legend.contains("Costs"));
        assert!(text(&lines[lines.len() - 1]).starts_with("Data points: 3  Total: 350.0"));
        assert!(lines[1..=CHART_HEIGHT as usize].iter().all(|l| l.width() == 60));
    }

    #[test]
    fn individual_panel_has_one_row_per_slice() {
        let lines = chart_lines(
            &spec(ChartKind::Pie),
            ViewMode::Individual,
            60,
            palette(Theme::Dark),
        );
        assert_eq!(lines.len(), 1 + 3 + 1);
        assert!(text(&lines[1]).contains("34%"));
        assert!(text(&lines[2]).contains("43%"));
    }

    #[test]
    fn comparison_panel_renders_chart_area() {
        let lines = chart_lines(
            &spec(ChartKind::Line),
            ViewMode::Comparison,
            50,
            palette(Theme::Light),
        );
        assert!(text(&lines[0]).contains("[Trend]"));
        assert_eq!(lines.len(), 1 + CHART_HEIGHT as usize + 1);
    }

    #[test]
    fn unsupported_kind_shows_notice() {
        let lines = chart_lines(
            &spec(ChartKind::Unsupported("radar".to_string())),
            ViewMode::Grouped,
            40,
            palette(Theme::Light),
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(text(&lines[1]), "Unsupported chart type: radar");
    }

    #[test]
    fn chart_without_data_has_no_lines() {
        for kind in [ChartKind::Pie, ChartKind::Unsupported("radar".to_string())] {
            let chart = ChartSpec {
                kind,
                title: Some("Empty".to_string()),
                data: Vec::new(),
            };
            assert!(chart_lines(&chart, ViewMode::Grouped, 40, palette(Theme::Dark)).is_empty());
        }
    }

    #[test]
    fn bar_heights_scale_small_values() {
        assert_eq!(bar_scale(0.5), 200.0);
        assert_eq!(bar_scale(5000.0), 1.0);
        assert_eq!(bar_height(-3.0, 1.0), 0);
        assert_eq!(bar_height(0.25, 200.0), 50);
    }
}
