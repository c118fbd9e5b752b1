use crate::errors::Result;
use crate::quartiles::FiveNumberSummary;
use crate::sample::Sample;

use prettytable::{format, Cell, Row, Table};
use tracing::debug;

const HEADERS: [&str; 6] = [
    "Course Code",
    "Minimum",
    "First Quartile",
    "Median",
    "Third Quartile",
    "Maximum",
];

const SIGNIFICANT_DIGITS: i32 = 6;

/// Formats a table value like C's `%g`: six significant digits, trailing
/// zeros dropped, exponent form only for very small or large magnitudes.
pub fn format_value(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        );
    }

    let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
    trim_fraction(&format!("{:.*}", decimals, value)).to_string()
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DisplayRow {
    pub label: String,
    #[serde(flatten)]
    pub summary: FiveNumberSummary,
    #[serde(skip)]
    pub sort_key: usize,
}

/// Ordered rows handed to both the table and the box-plot renderer, so row
/// `i` of the table always describes plot `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    rows: Vec<DisplayRow>,
}

/// Summarizes every partitioned sample, keeping the partition order.
///
/// Fails on the first sample that cannot be summarized; no partial report is
/// produced.
pub fn assemble(partitioned: &[(&Sample, &str)]) -> Result<Report> {
    let rows = partitioned
        .iter()
        .enumerate()
        .map(|(sort_key, (sample, label))| -> Result<DisplayRow> {
            let summary = sample.summarize()?;
            debug!(label, ?summary, "summarized course");
            Ok(DisplayRow {
                label: label.to_string(),
                summary,
                sort_key,
            })
        })
        .collect::<Result<Vec<DisplayRow>>>()?;

    Ok(Report { rows })
}

impl Report {
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.set_titles(Row::new(HEADERS.iter().map(|h| Cell::new(h)).collect()));

        for row in self.rows.iter() {
            let mut cells: Vec<Cell> = Vec::new();
            cells.push(Cell::new(&row.label));
            for value in row.summary.values() {
                cells.push(Cell::new_align(
                    &format_value(value),
                    format::Alignment::RIGHT,
                ));
            }
            table.add_row(Row::new(cells));
        }

        table
    }

    pub fn print(&self) {
        self.to_table().printstd();
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }
}
