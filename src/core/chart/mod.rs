//! Chart data attached to assistant replies: typed specs, view-mode
//! projections, summary statistics, and display formatting.
//!
//! Everything here is pure: callers own the input and get fresh output on
//! every call.

mod format;
mod projection;
mod stats;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use format::{format_percent, format_value};
pub use projection::{
    DEFAULT_PERIOD, GroupedRow, GroupedSeries, LabelParts, PieSlices, Projection, TrendPoint,
    project, split_label,
};
pub use stats::{SummaryStats, summarize};

/// One labeled numeric data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub label: String,
    pub value: f64,
}

impl Observation {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Chart type requested by the server. Unknown types are kept verbatim so
/// the renderer can report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Unsupported(String),
}

impl ChartKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
            ChartKind::Unsupported(s) => s,
        }
    }

    /// View mode a freshly received chart of this kind starts in.
    pub fn default_view(&self) -> ViewMode {
        match self {
            ChartKind::Pie => ViewMode::Individual,
            ChartKind::Line => ViewMode::Comparison,
            ChartKind::Bar | ChartKind::Unsupported(_) => ViewMode::Grouped,
        }
    }

    /// Fallback title: capitalized type name followed by "Chart".
    pub fn default_title(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{} Chart", first.to_uppercase(), chars.as_str()),
            None => "Chart".to_string(),
        }
    }
}

impl From<String> for ChartKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "bar" => ChartKind::Bar,
            "pie" => ChartKind::Pie,
            "line" => ChartKind::Line,
            _ => ChartKind::Unsupported(s),
        }
    }
}

impl From<ChartKind> for String {
    fn from(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Unsupported(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// A chart attached to a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub data: Vec<Observation>,
}

impl ChartSpec {
    /// Title to show: the server title when non-empty, else "<Type> Chart".
    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .unwrap_or_else(|| self.kind.default_title())
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Caller-selected projection style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Bars grouped by period, one series per metric.
    #[default]
    Grouped,
    /// One proportional slice per observation.
    Individual,
    /// Trend line in input order.
    Comparison,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Grouped, ViewMode::Individual, ViewMode::Comparison];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grouped => "grouped",
            ViewMode::Individual => "individual",
            ViewMode::Comparison => "comparison",
        }
    }

    /// Short label for headers and hints.
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Grouped => "Grouped",
            ViewMode::Individual => "Individual",
            ViewMode::Comparison => "Trend",
        }
    }

    pub fn next(self) -> ViewMode {
        match self {
            ViewMode::Grouped => ViewMode::Individual,
            ViewMode::Individual => ViewMode::Comparison,
            ViewMode::Comparison => ViewMode::Grouped,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown view mode '{}' (expected grouped, individual, or comparison)",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests;
