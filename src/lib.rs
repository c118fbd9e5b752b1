//! Five-number summaries and box plots of per-course grades.
//!
//! Courses missing from a whitelist are shown under a shared
//! [`redaction::REDACTION_TOKEN`] label, after all visible courses and in a
//! random order, so their statistics are published without their identity.

pub mod errors;
pub mod fileio;
pub mod graph;
pub mod quartiles;
pub mod redaction;
pub mod report;
pub mod sample;

pub use errors::{GradeError, Result};
pub use quartiles::{summarize, FiveNumberSummary};
pub use redaction::{partition, Whitelist, REDACTION_TOKEN};
pub use report::{assemble, DisplayRow, Report};
pub use sample::Sample;
