use crate::errors::{GradeError, Result};
use crate::sample::Sample;

use csv::ReaderBuilder;
use fs_err as fs;
use tracing::debug;

use std::io::Read;
use std::path::Path;

/// Reads course samples from a two-column csv file: the course code and a
/// comma-separated list of grades, e.g.
///
/// ```text
/// Course,Grades
/// MATH 151,"0.95,1,1,1,1,1,1,1,0.96,0.99,1.05,0.81"
/// ```
pub fn read_samples(file_path: &Path, has_header: bool) -> Result<Vec<Sample>> {
    let file = fs::File::open(file_path)?;
    let samples = read_samples_from(file, has_header)?;
    debug!(
        path = %file_path.display(),
        courses = samples.len(),
        "read grade records"
    );
    Ok(samples)
}

pub fn read_samples_from<R: Read>(reader: R, has_header: bool) -> Result<Vec<Sample>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(reader);

    let mut samples = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());
        // Unquoted grade lists spill into extra columns.
        let (Some(code), Some(grades), None) = (record.get(0), record.get(1), record.get(2))
        else {
            return Err(GradeError::MalformedRecord { line });
        };
        samples.push(Sample::new(code, parse_grades(code, grades)?));
    }

    Ok(samples)
}

/// Parses a comma-separated grade list. A blank field is an empty list.
pub fn parse_grades(code: &str, field: &str) -> Result<Vec<f64>> {
    if field.trim().is_empty() {
        return Ok(Vec::new());
    }

    field
        .split(',')
        .map(|token| -> Result<f64> {
            let token = token.trim();
            let value = token
                .parse::<f64>()
                .map_err(|_| GradeError::InvalidGradeValue {
                    code: code.to_string(),
                    token: token.to_string(),
                })?;
            if !value.is_finite() {
                return Err(GradeError::NonFiniteGrade {
                    code: code.to_string(),
                    value,
                });
            }
            Ok(value)
        })
        .collect()
}
