//! Terminal and text-report formatting.

use crate::data::{SampleData, SampleInsights};
use crate::domain::{EmployeeProfile, FeatureImportance, PredictionResult};
use crate::encode::FEATURE_NAMES;
use crate::report::SalaryReport;

/// Group the integer part with commas: `1234567.891, 2` -> `1,234,567.89`.
pub fn fmt_thousands(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let s = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };

    let len = int_part.len();
    let mut out = String::with_capacity(s.len() + len / 3 + 1);
    // Suppress "-0" when the value rounds to zero.
    if v < 0.0 && s.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

pub fn fmt_currency(v: f64, decimals: usize) -> String {
    format!("₹{}", fmt_thousands(v, decimals))
}

fn fmt_accuracy(r2: f64) -> String {
    format!("{:.2}%", r2 * 100.0)
}

/// Point estimate, band, and model accuracy.
pub fn format_prediction(result: &PredictionResult, accuracy: f64) -> String {
    let mut out = String::new();
    out.push_str("=== Salary Prediction ===\n");
    out.push_str(&format!("Predicted Salary : {}\n", fmt_currency(result.point_estimate, 2)));
    out.push_str(&format!("Lower Bound      : {}\n", fmt_currency(result.lower_bound, 0)));
    out.push_str(&format!("Upper Bound      : {}\n", fmt_currency(result.upper_bound, 0)));
    out.push_str(&format!("Model Accuracy (R²): {}\n", fmt_accuracy(accuracy)));
    out
}

pub fn format_input_summary(profile: &EmployeeProfile) -> String {
    let mut out = String::new();
    out.push_str("Input summary:\n");
    out.push_str(&format!("- Education : {}\n", profile.education_level.display_name()));
    out.push_str(&format!("- Experience: {} years\n", profile.experience_years));
    out.push_str(&format!("- Age       : {}\n", profile.age));
    out.push_str(&format!("- Job Title : {}\n", profile.job_title.display_name()));
    out.push_str(&format!("- Location  : {}\n", profile.location.display_name()));
    out
}

/// Importance chart (or a plain list when charts are off), or the informational
/// fallback when the model has none.
pub fn format_importances(importances: Option<&[FeatureImportance]>, width: usize, chart: bool) -> String {
    match importances {
        Some(imp) if !imp.is_empty() && chart => crate::plot::render_importance_chart(imp, width),
        Some(imp) if !imp.is_empty() => format_importance_list(imp),
        _ => "Feature importance not available for this model.\n".to_string(),
    }
}

pub fn format_importance_list(importances: &[FeatureImportance]) -> String {
    let name_w = importances.iter().map(|i| i.feature.len()).max().unwrap_or(0);
    let mut out = String::from("Feature importance (|coefficient|):\n");
    for i in importances {
        out.push_str(&format!("- {:<name_w$} {:.2}\n", i.feature, i.importance));
    }
    out
}

/// Reference rows with their predictions.
pub fn format_samples(samples: &SampleData) -> String {
    let mut out = String::new();
    out.push_str("Sample predictions:\n");

    let mut header = String::new();
    for name in FEATURE_NAMES {
        header.push_str(&format!("{name:>w$} ", w = name.len()));
    }
    header.push_str(&format!("{:>16}", "Predicted (₹)"));
    out.push_str(header.trim_end());
    out.push('\n');

    for row in &samples.rows {
        let values = crate::encode::FeatureVector::from(row.features).values();
        let mut line = String::new();
        for (name, v) in FEATURE_NAMES.iter().zip(values) {
            line.push_str(&format!("{:>w$} ", v, w = name.len()));
        }
        line.push_str(&format!("{:>16}", fmt_thousands(row.predicted, 2)));
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn format_insights(insights: &SampleInsights) -> String {
    let mut out = String::new();
    out.push_str("Dataset insights:\n");
    out.push_str(&format!("- Sample Avg Salary    : {}\n", fmt_currency(insights.avg_salary, 0)));
    out.push_str(&format!(
        "- Most Common Job Title: {}\n",
        insights.most_common_job_title.display_name()
    ));
    out.push_str(&format!("- Avg Experience       : {:.1} years\n", insights.avg_experience));
    out
}

/// Plain-text report for export. Uses `Rs.` so the file stays ASCII-friendly.
pub fn format_report_text(report: &SalaryReport) -> String {
    let r = &report.result;
    let p = &report.profile;
    let mut out = String::new();
    out.push_str("Employee Salary Prediction Report\n");
    out.push_str(&format!("Generated: {}\n\n", report.generated_at.format("%Y-%m-%d %H:%M:%S %:z")));
    out.push_str(&format!("Predicted Salary: Rs. {}\n", fmt_thousands(r.point_estimate, 2)));
    out.push_str(&format!("Lower Bound: Rs. {}\n", fmt_thousands(r.lower_bound, 0)));
    out.push_str(&format!("Upper Bound: Rs. {}\n", fmt_thousands(r.upper_bound, 0)));
    out.push_str(&format!("Model Accuracy (R2): {}\n\n", fmt_accuracy(report.accuracy_r2)));
    out.push_str("Input Summary:\n");
    out.push_str(&format!("Education Level: {}\n", p.education_level.display_name()));
    out.push_str(&format!("Experience: {} years\n", p.experience_years));
    out.push_str(&format!("Age: {}\n", p.age));
    out.push_str(&format!("Job Title: {}\n", p.job_title.display_name()));
    out.push_str(&format!("Location: {}\n", p.location.display_name()));
    out
}
