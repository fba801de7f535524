//! ASCII bar charts and share lines for terminal output.
//!
//! This is intentionally "dumb" (fixed-width bars), optimized for:
//! - quick visual comparison of a few magnitudes
//! - deterministic output (helpful for golden tests)
//!
//! Bar length is proportional to `|value|` relative to the largest magnitude;
//! negative values are drawn with `-` instead of `#`.

use crate::domain::{FeatureImportance, PredictionResult};

/// Render a horizontal bar chart.
pub fn render_bar_chart(title: &str, bars: &[(&str, f64)], width: usize, fmt_value: fn(f64) -> String) -> String {
    let width = width.max(5);
    let label_w = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max_abs = bars
        .iter()
        .map(|(_, v)| v.abs())
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    for &(label, value) in bars {
        let len = if max_abs > 0.0 && value.is_finite() {
            ((value.abs() / max_abs) * width as f64).round() as usize
        } else {
            0
        };
        let ch = if value < 0.0 { '-' } else { '#' };
        let bar: String = std::iter::repeat_n(ch, len).collect();
        let line = format!("{label:<label_w$} | {bar:<width$} {}", fmt_value(value));
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Lower bound / point estimate / upper bound.
pub fn render_band_chart(result: &PredictionResult, width: usize) -> String {
    render_bar_chart(
        "Salary band:",
        &[
            ("Lower Bound", result.lower_bound),
            ("Predicted", result.point_estimate),
            ("Upper Bound", result.upper_bound),
        ],
        width,
        |v| crate::report::fmt_currency(v, 0),
    )
}

/// Lower bound / point estimate / upper bound as shares of their sum, the
/// one-line stand-in for a pie chart.
///
/// Shares are undefined when the sum is not positive; those print as `n/a`.
pub fn render_band_shares(result: &PredictionResult) -> String {
    let parts = [
        ("Lower Bound", result.lower_bound),
        ("Predicted", result.point_estimate),
        ("Upper Bound", result.upper_bound),
    ];
    let total: f64 = parts.iter().map(|(_, v)| v).sum();
    let shares: Vec<String> = parts
        .iter()
        .map(|&(label, v)| {
            if total > 0.0 && total.is_finite() {
                format!("{label} {:.2}%", v / total * 100.0)
            } else {
                format!("{label} n/a")
            }
        })
        .collect();
    format!("Band shares: {}\n", shares.join(" | "))
}

/// Feature importance, in the order given (callers pass it sorted).
pub fn render_importance_chart(importances: &[FeatureImportance], width: usize) -> String {
    let bars: Vec<(&str, f64)> = importances
        .iter()
        .map(|i| (i.feature.as_str(), i.importance))
        .collect();
    render_bar_chart("Feature importance (|coefficient|):", &bars, width, |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_chart_golden_snapshot_small() {
        let txt = render_bar_chart("T", &[("a", 10.0), ("bbb", 5.0), ("c", -2.5)], 10, |v| format!("{v:.1}"));
        let expected = concat!(
            "T\n",
            "a   | ########## 10.0\n",
            "bbb | #####      5.0\n",
            "c   | ---        -2.5\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn all_zero_values_draw_empty_bars() {
        let txt = render_bar_chart("Z", &[("x", 0.0)], 8, |v| format!("{v}"));
        assert_eq!(txt, "Z\nx |          0\n");
    }

    #[test]
    fn band_chart_lists_three_bars() {
        let r = PredictionResult {
            point_estimate: 100.0,
            lower_bound: 90.0,
            upper_bound: 110.0,
        };
        let txt = render_band_chart(&r, 20);
        assert!(txt.contains("Lower Bound"));
        assert!(txt.contains("Predicted"));
        assert!(txt.contains("₹110"));
    }

    #[test]
    fn band_shares_golden() {
        let r = PredictionResult {
            point_estimate: 100.0,
            lower_bound: 90.0,
            upper_bound: 110.0,
        };
        assert_eq!(
            render_band_shares(&r),
            "Band shares: Lower Bound 30.00% | Predicted 33.33% | Upper Bound 36.67%\n"
        );
    }

    #[test]
    fn band_shares_undefined_without_positive_total() {
        let zero = PredictionResult {
            point_estimate: 0.0,
            lower_bound: 0.0,
            upper_bound: 0.0,
        };
        assert_eq!(
            render_band_shares(&zero),
            "Band shares: Lower Bound n/a | Predicted n/a | Upper Bound n/a\n"
        );
    }
}
