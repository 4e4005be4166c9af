//! Summary statistics over a chart series.

use std::collections::HashSet;

use super::{ChartSpec, split_label};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub max: f64,
    pub min: f64,
    pub average: f64,
    pub total: f64,
    /// Distinct metric names (first label token) in the series.
    pub metric_count: usize,
}

/// Compute stats over all observations. `None` when the chart has no data.
pub fn summarize(spec: &ChartSpec) -> Option<SummaryStats> {
    if spec.data.is_empty() {
        return None;
    }
    let values = spec.data.iter().map(|o| o.value);
    let total: f64 = values.clone().sum();
    let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
    let min = values.fold(f64::INFINITY, f64::min);
    let metric_count = spec
        .data
        .iter()
        .map(|o| split_label(&o.label).metric)
        .collect::<HashSet<_>>()
        .len();
    Some(SummaryStats {
        max,
        min,
        average: total / spec.data.len() as f64,
        total,
        metric_count,
    })
}
