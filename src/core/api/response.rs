//! Validation boundary for chat API responses.
//!
//! The server payload is loosely typed. Every field is checked here and
//! normalized to a fixed shape; nothing downstream inspects raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::chart::{ChartKind, ChartSpec, Observation};

/// Reply text used when the server omits `response`.
pub const NO_RESPONSE_TEXT: &str = "No response received";

/// Number of characters of a source id shown in the sources line.
const SOURCE_PREVIEW_LEN: usize = 8;

/// A document the reply was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub source: String,
    /// Any other fields the server attached, kept for persistence.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Source {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            extra: Map::new(),
        }
    }

    pub fn short_id(&self) -> String {
        self.source.chars().take(SOURCE_PREVIEW_LEN).collect()
    }
}

/// A normalized chat reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub sources: Vec<Source>,
    pub chart: Option<ChartSpec>,
    pub session_id: Option<String>,
}

impl ChatReply {
    /// Normalize a raw JSON response. Never fails: missing or mistyped fields
    /// fall back to their documented defaults.
    pub fn from_value(value: &Value) -> Self {
        let text = value
            .get("response")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_RESPONSE_TEXT)
            .to_string();
        let sources = value
            .get("sources")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(parse_source).collect())
            .unwrap_or_default();
        let chart = value.get("chart").and_then(parse_chart);
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(String::from);
        Self {
            text,
            sources,
            chart,
            session_id,
        }
    }
}

fn parse_source(value: &Value) -> Option<Source> {
    let obj = value.as_object()?;
    let mut source = Source::new(obj.get("source")?.as_str()?);
    source.extra = obj
        .iter()
        .filter(|(k, _)| k.as_str() != "source")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Some(source)
}

/// Parse a chart object. Returns `None` when it is not an object, has no
/// type string, or has no usable data points.
fn parse_chart(value: &Value) -> Option<ChartSpec> {
    let obj = value.as_object()?;
    let kind = ChartKind::from(obj.get("type")?.as_str()?.to_string());
    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .map(String::from);
    let items = obj.get("data").and_then(Value::as_array)?;
    let data: Vec<Observation> = items.iter().filter_map(parse_observation).collect();
    if data.len() < items.len() {
        log::warn!(
            "Dropped {} chart data point(s) without a numeric value",
            items.len() - data.len()
        );
    }
    if data.is_empty() {
        return None;
    }
    Some(ChartSpec { kind, title, data })
}

fn parse_observation(value: &Value) -> Option<Observation> {
    let obj = value.as_object()?;
    let number = obj.get("value")?.as_f64().filter(|v| v.is_finite())?;
    let label = obj
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    Some(Observation::new(label, number))
}

/// Sources line for display: first characters of each source id, comma separated.
pub fn sources_line(sources: &[Source]) -> String {
    sources
        .iter()
        .map(Source::short_id)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_response_is_normalized() {
        let reply = ChatReply::from_value(&json!({
            "response": "**Summary**\nRevenue grew.",
            "sources": [{"source": "annual-report-2024.pdf", "page": 3}],
            "chart": {
                "type": "bar",
                "title": "Revenue",
                "data": [{"label": "Revenue Q1", "value": 100}, {"label": "Revenue Q2", "value": 150.5}]
            },
            "sessionId": "abc-123"
        }));
        assert_eq!(reply.text, "**Summary**\nRevenue grew.");
        assert_eq!(reply.sources.len(), 1);
        assert_eq!(reply.sources[0].short_id(), "annual-r");
        assert_eq!(reply.sources[0].extra.get("page"), Some(&json!(3)));
        let chart = reply.chart.expect("chart");
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.title.as_deref(), Some("Revenue"));
        assert_eq!(chart.data[1], Observation::new("Revenue Q2", 150.5));
        assert_eq!(reply.session_id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn missing_response_uses_placeholder() {
        let reply = ChatReply::from_value(&json!({}));
        assert_eq!(reply.text, NO_RESPONSE_TEXT);
        assert!(reply.sources.is_empty());
        assert!(reply.chart.is_none());
        assert!(reply.session_id.is_none());
    }

    #[test]
    fn non_string_response_uses_placeholder() {
        let reply = ChatReply::from_value(&json!({"response": 42}));
        assert_eq!(reply.text, NO_RESPONSE_TEXT);
    }

    #[test]
    fn non_array_sources_become_empty() {
        let reply = ChatReply::from_value(&json!({"response": "x", "sources": "doc.pdf"}));
        assert!(reply.sources.is_empty());
    }

    #[test]
    fn malformed_source_entries_are_dropped() {
        let reply = ChatReply::from_value(&json!({
            "response": "x",
            "sources": [{"source": "a"}, {"name": "b"}, "c", {"source": 7}]
        }));
        assert_eq!(reply.sources, vec![Source::new("a")]);
    }

    #[test]
    fn empty_chart_data_is_no_chart() {
        let reply = ChatReply::from_value(&json!({
            "response": "x",
            "chart": {"type": "pie", "data": []}
        }));
        assert!(reply.chart.is_none());
    }

    #[test]
    fn chart_without_type_is_no_chart() {
        let reply = ChatReply::from_value(&json!({
            "response": "x",
            "chart": {"data": [{"label": "A", "value": 1}]}
        }));
        assert!(reply.chart.is_none());
    }

    #[test]
    fn unknown_chart_type_is_kept_as_unsupported() {
        let reply = ChatReply::from_value(&json!({
            "chart": {"type": "radar", "data": [{"label": "A", "value": 1}]}
        }));
        assert_eq!(
            reply.chart.map(|c| c.kind),
            Some(ChartKind::Unsupported("radar".to_string()))
        );
    }

    #[test]
    fn chart_points_without_numeric_value_are_dropped() {
        let reply = ChatReply::from_value(&json!({
            "chart": {"type": "line", "data": [
                {"label": "A", "value": "12"},
                {"label": "B"},
                {"value": 3},
                {"label": "C", "value": 4.5}
            ]}
        }));
        let chart = reply.chart.expect("chart");
        assert_eq!(
            chart.data,
            vec![Observation::new("", 3.0), Observation::new("C", 4.5)]
        );
    }

    #[test]
    fn sources_line_joins_short_ids() {
        let sources = vec![Source::new("0123456789"), Source::new("abc")];
        assert_eq!(sources_line(&sources), "01234567, abc");
    }

    #[test]
    fn source_roundtrips_extra_fields() {
        let src: Source =
            serde_json::from_value(json!({"source": "doc-1", "score": 0.8})).expect("source");
        assert_eq!(src.extra.get("score"), Some(&json!(0.8)));
        let back = serde_json::to_value(&src).expect("serialize");
        assert_eq!(back, json!({"source": "doc-1", "score": 0.8}));
    }
}
