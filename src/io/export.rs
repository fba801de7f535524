//! Export prediction reports (text/JSON/PDF) and batch results (CSV).
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tracing::info;

use crate::domain::{EmployeeProfile, PredictionResult};
use crate::encode::{FEATURE_NAMES, encode};
use crate::error::AppError;
use crate::report::{SalaryReport, format_report_text};

/// Write the plain-text summary report.
pub fn write_report_text(path: &Path, report: &SalaryReport) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create report '{}': {e}", path.display())))?;
    file.write_all(format_report_text(report).as_bytes())
        .map_err(|e| AppError::usage(format!("Failed to write report: {e}")))?;
    info!(path = %path.display(), "wrote text report");
    Ok(())
}

/// Write the summary report as pretty JSON.
pub fn write_report_json(path: &Path, report: &SalaryReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create report JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::usage(format!("Failed to write report JSON: {e}")))?;
    info!(path = %path.display(), "wrote JSON report");
    Ok(())
}

/// A4 portrait, in points.
const PDF_PAGE_SIZE: (i64, i64) = (595, 842);
const PDF_MARGIN: i64 = 50;
const PDF_TITLE_SIZE: i64 = 16;
const PDF_BODY_SIZE: i64 = 11;
const PDF_LEADING: i64 = 16;

/// Write the summary report as a one-page PDF.
///
/// The page carries the same lines as the text report, the title in a larger
/// font. Helvetica with WinAnsi encoding keeps the file free of embedded fonts.
pub fn write_report_pdf(path: &Path, report: &SalaryReport) -> Result<(), AppError> {
    let text = format_report_text(report);
    let mut doc = build_report_pdf(&text)?;
    doc.save(path)
        .map_err(|e| AppError::usage(format!("Failed to write report PDF '{}': {e}", path.display())))?;
    info!(path = %path.display(), "wrote PDF report");
    Ok(())
}

fn build_report_pdf(text: &str) -> Result<Document, AppError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let (width, height) = PDF_PAGE_SIZE;
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("TL", vec![PDF_LEADING.into()]),
        Operation::new("Td", vec![PDF_MARGIN.into(), (height - PDF_MARGIN).into()]),
    ];
    for (i, line) in text.lines().enumerate() {
        let size = if i == 0 { PDF_TITLE_SIZE } else { PDF_BODY_SIZE };
        operations.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(pdf_safe(line))]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations }
        .encode()
        .map_err(|e| AppError::usage(format!("Failed to encode report PDF page: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    Ok(doc)
}

/// Type1 base fonts only cover single-byte text.
fn pdf_safe(line: &str) -> String {
    line.chars().map(|c| if c.is_ascii() { c } else { '?' }).collect()
}

/// One scored batch row.
#[derive(Debug, Clone)]
pub struct BatchRow {
    pub line: usize,
    pub profile: EmployeeProfile,
    pub result: PredictionResult,
}

/// Write batch predictions: inputs, encoded features, then the band.
pub fn write_batch_csv<W: Write>(out: W, rows: &[BatchRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header: Vec<&str> = vec!["line", "education", "experience", "age", "job_title", "location"];
    header.extend(FEATURE_NAMES);
    header.extend(["predicted", "lower_bound", "upper_bound"]);
    writer
        .write_record(&header)
        .map_err(|e| AppError::usage(format!("Failed to write export CSV header: {e}")))?;

    for row in rows {
        let p = &row.profile;
        let mut record = vec![
            row.line.to_string(),
            p.education_level.display_name().to_string(),
            p.experience_years.to_string(),
            p.age.to_string(),
            p.job_title.display_name().to_string(),
            p.location.display_name().to_string(),
        ];
        record.extend(encode(p).values().iter().map(|v| v.to_string()));
        record.push(format!("{:.2}", row.result.point_estimate));
        record.push(format!("{:.2}", row.result.lower_bound));
        record.push(format!("{:.2}", row.result.upper_bound));
        writer
            .write_record(&record)
            .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Create `path` and write batch predictions to it.
pub fn write_batch_csv_file(path: &Path, rows: &[BatchRow]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_batch_csv(file, rows)?;
    info!(path = %path.display(), rows = rows.len(), "wrote batch predictions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EducationLevel, JobTitle, Location};

    #[test]
    fn pdf_report_reloads_with_all_fields() {
        use chrono::{Local, TimeZone};

        let profile = EmployeeProfile {
            education_level: EducationLevel::PhD,
            experience_years: 20,
            age: 45,
            job_title: JobTitle::Director,
            location: Location::Rural,
        };
        let report = SalaryReport {
            generated_at: Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            model_kind: "linear".to_string(),
            accuracy_r2: 0.83,
            features: encode(&profile).to_record(),
            profile,
            result: PredictionResult {
                point_estimate: 128250.0,
                lower_bound: 115425.0,
                upper_bound: 141075.0,
            },
            importances: None,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        write_report_pdf(&path, &report).unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        let text = doc.extract_text(&[1]).unwrap();
        for expected in [
            "Employee Salary Prediction Report",
            "Predicted Salary: Rs. 128,250.00",
            "Lower Bound: Rs. 115,425",
            "Upper Bound: Rs. 141,075",
            "Model Accuracy (R2): 83.00%",
            "Input Summary:",
            "Education Level: PhD",
            "Experience: 20 years",
            "Job Title: Director",
            "Location: Rural",
        ] {
            assert!(text.contains(expected), "missing {expected:?} in {text:?}");
        }
    }

    #[test]
    fn pdf_text_is_single_byte() {
        assert_eq!(pdf_safe("R² ₹1"), "R? ?1");
    }

    #[test]
    fn batch_csv_layout() {
        let rows = vec![BatchRow {
            line: 2,
            profile: EmployeeProfile {
                education_level: EducationLevel::Bachelors,
                experience_years: 10,
                age: 35,
                job_title: JobTitle::Manager,
                location: Location::Suburban,
            },
            result: PredictionResult {
                point_estimate: 100.0,
                lower_bound: 90.0,
                upper_bound: 110.0,
            },
        }];

        let mut buf = Vec::new();
        write_batch_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "line,education,experience,age,job_title,location,Education,Experience,Age,\
             Job_Title_Director,Job_Title_Engineer,Job_Title_Manager,Location_Suburban,Location_Urban,\
             predicted,lower_bound,upper_bound"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2,Bachelor's,10,35,Manager,Suburban,1,10,35,0,0,1,1,0,100.00,90.00,110.00"
        );
    }
}
