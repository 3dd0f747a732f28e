use crate::error::AppError;

/// Reasons a single uploaded file is rejected. Local to that file: sibling
/// files in the same batch are still processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("file is empty")]
    EmptyFile,
    #[error("{}", ambiguous_message(.line_number, .line, .first_line))]
    AmbiguousDelimiter {
        line_number: usize,
        line: String,
        first_line: bool,
    },
    #[error("invalid format on line {line_number}: {line}")]
    MalformedLine { line_number: usize, line: String },
}

fn ambiguous_message(line_number: &usize, line: &str, first_line: &bool) -> String {
    if *first_line {
        "multiple delimiters found on the same line; use only one delimiter type per file"
            .to_string()
    } else {
        format!("multiple delimiters found on line {}: {}", line_number, line)
    }
}

impl ParseError {
    /// Stable machine-readable identifier for API responses
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::EmptyFile => "empty_file",
            ParseError::AmbiguousDelimiter { .. } => "ambiguous_delimiter",
            ParseError::MalformedLine { .. } => "malformed_line",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PhraseServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<PhraseServiceError> for AppError {
    fn from(err: PhraseServiceError) -> Self {
        match err {
            PhraseServiceError::Invalid(msg) => AppError::BadRequest(msg),
            PhraseServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
