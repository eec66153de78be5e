//! CSV loading for the course catalog and MOOC list.

use crate::models::{CourseRecord, DatasetKind, MoocRecord};
use crate::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Outcome of loading one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Dataset that was loaded.
    pub dataset: DatasetKind,
    /// Rows turned into records.
    pub loaded: usize,
    /// Malformed rows that were skipped.
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct CourseRow {
    #[serde(rename = "Course ID")]
    course_id: Option<String>,
    #[serde(rename = "Course Name")]
    course_name: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MoocRow {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "About")]
    about: Option<String>,
    #[serde(rename = "Link")]
    link: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::OperationFailed {
        operation: "open_catalog".to_string(),
        cause: format!("{}: {e}", path.display()),
    })
}

fn skip_row(dataset: DatasetKind, line: usize, reason: &str) {
    tracing::warn!(
        dataset = dataset.as_str(),
        line,
        reason,
        "Skipping malformed catalog row"
    );
    metrics::counter!(
        "coursematch_catalog_rows_skipped_total",
        "dataset" => dataset.as_str()
    )
    .increment(1);
}

/// Reads catalog courses from semicolon-separated CSV with the columns
/// `Course ID`, `Course Name` and `Description`.
///
/// Rows without an id or name, or that fail to parse, are skipped.
///
/// # Errors
///
/// Returns an error if the header cannot be read.
pub fn read_courses<R: Read>(reader: R) -> Result<(Vec<CourseRecord>, LoadReport)> {
    let dataset = DatasetKind::Courses;
    let mut csv = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);
    csv.headers().map_err(|e| Error::OperationFailed {
        operation: "read_course_headers".to_string(),
        cause: e.to_string(),
    })?;

    let mut records = Vec::new();
    let mut skipped = 0;
    for (idx, row) in csv.deserialize::<CourseRow>().enumerate() {
        let line = idx + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                skip_row(dataset, line, &e.to_string());
                skipped += 1;
                continue;
            },
        };
        let (Some(course_id), Some(name)) = (non_blank(row.course_id), non_blank(row.course_name))
        else {
            skip_row(dataset, line, "missing Course ID or Course Name");
            skipped += 1;
            continue;
        };
        records.push(CourseRecord::new(
            course_id,
            name,
            row.description.unwrap_or_default().trim(),
        ));
    }

    let report = LoadReport {
        dataset,
        loaded: records.len(),
        skipped,
    };
    Ok((records, report))
}

/// Reads MOOCs from comma-separated CSV with the columns `Name`, `About`
/// and `Link`.
///
/// Rows without a name, or that fail to parse, are skipped.
///
/// # Errors
///
/// Returns an error if the header cannot be read.
pub fn read_moocs<R: Read>(reader: R) -> Result<(Vec<MoocRecord>, LoadReport)> {
    let dataset = DatasetKind::Moocs;
    let mut csv = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    csv.headers().map_err(|e| Error::OperationFailed {
        operation: "read_mooc_headers".to_string(),
        cause: e.to_string(),
    })?;

    let mut records = Vec::new();
    let mut skipped = 0;
    for (idx, row) in csv.deserialize::<MoocRow>().enumerate() {
        let line = idx + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                skip_row(dataset, line, &e.to_string());
                skipped += 1;
                continue;
            },
        };
        let Some(name) = non_blank(row.name) else {
            skip_row(dataset, line, "missing Name");
            skipped += 1;
            continue;
        };
        records.push(MoocRecord::new(
            name,
            row.about.unwrap_or_default().trim(),
            row.link.unwrap_or_default().trim(),
        ));
    }

    let report = LoadReport {
        dataset,
        loaded: records.len(),
        skipped,
    };
    Ok((records, report))
}

/// Loads catalog courses from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its header read.
pub fn load_courses(path: &Path) -> Result<(Vec<CourseRecord>, LoadReport)> {
    read_courses(open(path)?)
}

/// Loads MOOCs from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its header read.
pub fn load_moocs(path: &Path) -> Result<(Vec<MoocRecord>, LoadReport)> {
    read_moocs(open(path)?)
}
