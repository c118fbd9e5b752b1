pub type Result<T> = std::result::Result<T, GradeError>;

#[derive(Debug, thiserror::Error)]
pub enum GradeError {
    #[error("course {code:?} has no grade values")]
    EmptySample { code: String },

    #[error("course {code:?} has a non-finite grade value {value}")]
    NonFiniteGrade { code: String, value: f64 },

    #[error("course {code:?} has a non-numeric grade value {token:?}")]
    InvalidGradeValue { code: String, token: String },

    #[error("record on line {line} must have exactly a course code and a quoted grade list")]
    MalformedRecord { line: u64 },

    #[error("failed to read csv input")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("damaged graph configuration")]
    Config(#[from] serde_json::Error),

    #[error("failed to render box plots: {0}")]
    Plot(String),
}

impl GradeError {
    /// Attaches a course code to an error raised before the code was known.
    pub(crate) fn for_course(self, course: &str) -> Self {
        match self {
            Self::EmptySample { .. } => Self::EmptySample {
                code: course.to_string(),
            },
            Self::NonFiniteGrade { value, .. } => Self::NonFiniteGrade {
                code: course.to_string(),
                value,
            },
            other => other,
        }
    }
}
