//! View-mode projections of a chart series.

use std::collections::{HashMap, HashSet};

use super::{ChartSpec, Observation, ViewMode};

/// Period used when a label carries only a metric name.
pub const DEFAULT_PERIOD: &str = "Current";

/// A label split into its metric name and period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelParts {
    pub metric: String,
    pub period: String,
}

/// Split a label on whitespace: first token is the metric, the rest (joined
/// with single spaces) is the period. A label with no tokens has metric `""`.
pub fn split_label(label: &str) -> LabelParts {
    let mut tokens = label.split_whitespace();
    let metric = tokens.next().unwrap_or("").to_string();
    let rest: Vec<&str> = tokens.collect();
    let period = if rest.is_empty() {
        DEFAULT_PERIOD.to_string()
    } else {
        rest.join(" ")
    };
    LabelParts { metric, period }
}

/// One period of a grouped series: the metrics observed at that period.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRow {
    pub period: String,
    /// (metric, value) in metric discovery order. Metrics without an
    /// observation at this period are absent.
    pub values: Vec<(String, f64)>,
}

impl GroupedRow {
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(m, _)| m == metric)
            .map(|(_, v)| *v)
    }
}

/// Observations grouped by period, one column per metric.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSeries {
    /// Metric names in first-discovery order.
    pub metrics: Vec<String>,
    /// One row per distinct period, in first-appearance order.
    pub rows: Vec<GroupedRow>,
}

/// Observations rendered as proportional slices.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlices {
    pub slices: Vec<Observation>,
}

impl PieSlices {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|o| o.value).sum()
    }

    /// Share of the total per slice. `None` when the total is zero.
    pub fn proportions(&self) -> Option<Vec<f64>> {
        let total = self.total();
        if total == 0.0 {
            return None;
        }
        Some(self.slices.iter().map(|o| o.value / total).collect())
    }
}

/// One point of the trend view.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// 1-based position in the input.
    pub index: usize,
    /// First whitespace token of the label.
    pub display_name: String,
    pub value: f64,
    pub full_label: String,
}

/// A chart series reshaped for one view mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Grouped(GroupedSeries),
    Individual(PieSlices),
    Comparison(Vec<TrendPoint>),
}

impl Projection {
    pub fn view_mode(&self) -> ViewMode {
        match self {
            Projection::Grouped(_) => ViewMode::Grouped,
            Projection::Individual(_) => ViewMode::Individual,
            Projection::Comparison(_) => ViewMode::Comparison,
        }
    }
}

/// Project a chart for the given view mode. `None` when the chart has no data.
pub fn project(spec: &ChartSpec, mode: ViewMode) -> Option<Projection> {
    if spec.data.is_empty() {
        return None;
    }
    let projection = match mode {
        ViewMode::Grouped => Projection::Grouped(group_by_period(&spec.data)),
        ViewMode::Individual => Projection::Individual(PieSlices {
            slices: spec.data.clone(),
        }),
        ViewMode::Comparison => Projection::Comparison(trend_points(&spec.data)),
    };
    Some(projection)
}

fn group_by_period(data: &[Observation]) -> GroupedSeries {
    // metric -> (period, value) in insertion order
    let mut groups: Vec<(String, Vec<(String, f64)>)> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut periods: Vec<String> = Vec::new();
    let mut seen_periods: HashSet<String> = HashSet::new();

    for obs in data {
        let LabelParts { metric, period } = split_label(&obs.label);
        if seen_periods.insert(period.clone()) {
            periods.push(period.clone());
        }
        let idx = *group_index.entry(metric.clone()).or_insert_with(|| {
            groups.push((metric, Vec::new()));
            groups.len() - 1
        });
        groups[idx].1.push((period, obs.value));
    }

    let rows = periods
        .into_iter()
        .map(|period| {
            let values = groups
                .iter()
                .filter_map(|(metric, entries)| {
                    // first observation wins when a metric repeats a period
                    entries
                        .iter()
                        .find(|(p, _)| *p == period)
                        .map(|(_, v)| (metric.clone(), *v))
                })
                .collect();
            GroupedRow { period, values }
        })
        .collect();

    GroupedSeries {
        metrics: groups.into_iter().map(|(metric, _)| metric).collect(),
        rows,
    }
}

fn trend_points(data: &[Observation]) -> Vec<TrendPoint> {
    data.iter()
        .enumerate()
        .map(|(i, obs)| TrendPoint {
            index: i + 1,
            display_name: split_label(&obs.label).metric,
            value: obs.value,
            full_label: obs.label.clone(),
        })
        .collect()
}
