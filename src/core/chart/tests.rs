//! Chart projection and statistics tests.

use super::*;

fn spec(kind: ChartKind, data: &[(&str, f64)]) -> ChartSpec {
    ChartSpec {
        kind,
        title: None,
        data: data.iter().map(|(l, v)| Observation::new(*l, *v)).collect(),
    }
}

fn revenue_margin() -> ChartSpec {
    spec(
        ChartKind::Bar,
        &[("Revenue Q1", 100.0), ("Revenue Q2", 150.0), ("Margin Q1", 20.0)],
    )
}

#[test]
fn split_label_metric_and_period() {
    assert_eq!(
        split_label("Revenue Q1 2024"),
        LabelParts {
            metric: "Revenue".to_string(),
            period: "Q1 2024".to_string()
        }
    );
}

#[test]
fn split_label_single_token_defaults_period() {
    let parts = split_label("Margin");
    assert_eq!(parts.metric, "Margin");
    assert_eq!(parts.period, DEFAULT_PERIOD);
}

#[test]
fn split_label_blank_is_empty_metric() {
    let parts = split_label("   ");
    assert_eq!(parts.metric, "");
    assert_eq!(parts.period, "Current");
}

#[test]
fn split_label_collapses_whitespace_runs() {
    assert_eq!(split_label("  Revenue   Q1\tFY24 ").period, "Q1 FY24");
}

#[test]
fn grouped_worked_example() {
    let Some(Projection::Grouped(series)) = project(&revenue_margin(), ViewMode::Grouped) else {
        panic!("expected grouped projection");
    };
    assert_eq!(series.metrics, vec!["Revenue", "Margin"]);
    assert_eq!(
        series.rows,
        vec![
            GroupedRow {
                period: "Q1".to_string(),
                values: vec![("Revenue".to_string(), 100.0), ("Margin".to_string(), 20.0)],
            },
            GroupedRow {
                period: "Q2".to_string(),
                values: vec![("Revenue".to_string(), 150.0)],
            },
        ]
    );
    assert_eq!(series.rows[1].get("Margin"), None);

    let stats = summarize(&revenue_margin()).expect("stats");
    assert_eq!(stats.metric_count, 2);
    assert_eq!(stats.total, 270.0);
    assert_eq!(stats.max, 150.0);
    assert_eq!(stats.min, 20.0);
    assert_eq!(stats.average, 90.0);
}

#[test]
fn grouped_rows_follow_period_discovery_order() {
    let chart = spec(
        ChartKind::Bar,
        &[
            ("Margin Q3", 1.0),
            ("Revenue Q1", 2.0),
            ("Revenue Q3", 3.0),
            ("Costs", 4.0),
        ],
    );
    let Some(Projection::Grouped(series)) = project(&chart, ViewMode::Grouped) else {
        panic!("expected grouped projection");
    };
    let periods: Vec<&str> = series.rows.iter().map(|r| r.period.as_str()).collect();
    assert_eq!(periods, vec!["Q3", "Q1", "Current"]);
    assert_eq!(series.metrics, vec!["Margin", "Revenue", "Costs"]);
    let q3: Vec<&str> = series.rows[0].values.iter().map(|(m, _)| m.as_str()).collect();
    assert_eq!(q3, vec!["Margin", "Revenue"]);
}

#[test]
fn grouped_row_count_matches_distinct_periods_and_keys_are_metrics() {
    let chart = spec(
        ChartKind::Bar,
        &[
            ("A Q1", 1.0),
            ("B Q1", 2.0),
            ("A Q2", 3.0),
            ("C Q3", 4.0),
            ("B Q2", 5.0),
        ],
    );
    let Some(Projection::Grouped(series)) = project(&chart, ViewMode::Grouped) else {
        panic!("expected grouped projection");
    };
    assert_eq!(series.rows.len(), 3);
    for row in &series.rows {
        for (metric, _) in &row.values {
            assert!(series.metrics.contains(metric));
        }
    }
}

#[test]
fn grouped_duplicate_metric_period_keeps_first() {
    let chart = spec(ChartKind::Bar, &[("Revenue Q1", 10.0), ("Revenue Q1", 99.0)]);
    let Some(Projection::Grouped(series)) = project(&chart, ViewMode::Grouped) else {
        panic!("expected grouped projection");
    };
    assert_eq!(series.rows.len(), 1);
    assert_eq!(series.rows[0].get("Revenue"), Some(10.0));
}

#[test]
fn individual_passes_observations_through() {
    let chart = revenue_margin();
    let Some(Projection::Individual(pie)) = project(&chart, ViewMode::Individual) else {
        panic!("expected individual projection");
    };
    assert_eq!(pie.slices, chart.data);
    let props = pie.proportions().expect("non-zero total");
    assert!((props.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    assert!((props[1] - 150.0 / 270.0).abs() < 1e-9);
}

#[test]
fn individual_zero_total_has_no_proportions() {
    let chart = spec(ChartKind::Pie, &[("A", 0.0), ("B", 0.0)]);
    let Some(Projection::Individual(pie)) = project(&chart, ViewMode::Individual) else {
        panic!("expected individual projection");
    };
    assert_eq!(pie.proportions(), None);
}

#[test]
fn comparison_maps_one_to_one_in_order() {
    let chart = revenue_margin();
    let Some(Projection::Comparison(points)) = project(&chart, ViewMode::Comparison) else {
        panic!("expected comparison projection");
    };
    assert_eq!(points.len(), chart.data.len());
    for (i, point) in points.iter().enumerate() {
        assert_eq!(point.index, i + 1);
        assert_eq!(point.full_label, chart.data[i].label);
        assert_eq!(point.value, chart.data[i].value);
    }
    assert_eq!(points[2].display_name, "Margin");
}

#[test]
fn empty_data_projects_to_none_for_every_mode() {
    let chart = spec(ChartKind::Bar, &[]);
    for mode in ViewMode::ALL {
        assert_eq!(project(&chart, mode), None);
    }
    assert_eq!(summarize(&chart), None);
}

#[test]
fn projection_reports_its_mode() {
    let chart = revenue_margin();
    for mode in ViewMode::ALL {
        assert_eq!(project(&chart, mode).map(|p| p.view_mode()), Some(mode));
    }
}

#[test]
fn summarize_total_and_bounds() {
    let chart = spec(
        ChartKind::Line,
        &[("x", -5.0), ("y", 12.5), ("z", 0.0), ("x 2", 7.5)],
    );
    let stats = summarize(&chart).expect("stats");
    assert_eq!(stats.total, 15.0);
    assert!(stats.max >= stats.min);
    assert_eq!(stats.max, 12.5);
    assert_eq!(stats.min, -5.0);
    assert_eq!(stats.metric_count, 3);
}

#[test]
fn summarize_is_independent_of_single_point() {
    let chart = spec(ChartKind::Bar, &[("Only", 42.0)]);
    let stats = summarize(&chart).expect("stats");
    assert_eq!((stats.max, stats.min, stats.average), (42.0, 42.0, 42.0));
    assert_eq!(stats.metric_count, 1);
}

#[test]
fn chart_kind_from_server_string() {
    assert_eq!(ChartKind::from("pie".to_string()), ChartKind::Pie);
    assert_eq!(
        ChartKind::from("area".to_string()),
        ChartKind::Unsupported("area".to_string())
    );
    assert_eq!(String::from(ChartKind::Line), "line");
}

#[test]
fn chart_default_title() {
    assert_eq!(ChartKind::Bar.default_title(), "Bar Chart");
    assert_eq!(
        ChartKind::Unsupported("scatter".to_string()).default_title(),
        "Scatter Chart"
    );
    let mut chart = revenue_margin();
    assert_eq!(chart.display_title(), "Bar Chart");
    chart.title = Some("Quarterly revenue".to_string());
    assert_eq!(chart.display_title(), "Quarterly revenue");
}

#[test]
fn chart_spec_serde_uses_type_field() {
    let chart: ChartSpec = serde_json::from_value(serde_json::json!({
        "type": "line",
        "data": [{"label": "Revenue Q1", "value": 1.5}]
    }))
    .expect("valid chart");
    assert_eq!(chart.kind, ChartKind::Line);
    assert_eq!(chart.title, None);
    let back = serde_json::to_value(&chart).expect("serialize");
    assert_eq!(back["type"], "line");
    assert!(back.get("title").is_none());
}

#[test]
fn view_mode_parse_and_cycle() {
    assert_eq!("Grouped".parse::<ViewMode>(), Ok(ViewMode::Grouped));
    assert_eq!(" comparison ".parse::<ViewMode>(), Ok(ViewMode::Comparison));
    assert!("pie".parse::<ViewMode>().is_err());
    assert_eq!(ViewMode::Comparison.next(), ViewMode::Grouped);
    assert_eq!(ChartKind::Pie.default_view(), ViewMode::Individual);
    assert_eq!(ChartKind::Line.default_view(), ViewMode::Comparison);
}
