use crate::errors::Result;
use crate::quartiles::{self, FiveNumberSummary};

/// One course's grades as read from a single input row.
///
/// Rows sharing a course code are kept as separate samples.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    code: String,
    grades: Vec<f64>,
}

impl Sample {
    pub fn new(code: impl Into<String>, grades: Vec<f64>) -> Self {
        Self {
            code: code.into(),
            grades,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn grades(&self) -> &[f64] {
        &self.grades
    }

    pub fn summarize(&self) -> Result<FiveNumberSummary> {
        quartiles::summarize(&self.grades).map_err(|e| e.for_course(&self.code))
    }
}
