//! Number formatting for chart labels, tooltips, and footers.

/// Format a chart value: values of 1000 and above are grouped by thousands
/// with up to three fraction digits (`1,234.56`); anything smaller, negatives
/// included, keeps one decimal (`12.5`, `-5000.0`).
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value < 1000.0 {
        return format!("{:.1}", value);
    }
    let fixed = format!("{:.3}", value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// Whole-number percentage for a fraction in `0.0..=1.0` (e.g. `0.424` -> `42%`).
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}
