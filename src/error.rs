//! Error types for parsing and conversion.

use thiserror::Error;

/// A structural failure in the citation file.
///
/// `line` is 1-based and points at the line where the offending block starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("BibTeX parse error at line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    /// Create a parse error located at `line`.
    pub fn at_line(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Represents errors that can occur while converting a bibliography.
///
/// Every variant is fatal for the run: there is no per-record recovery.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid year in entry '{id}': {}", describe_year(.value))]
    InvalidYear { id: String, value: Option<String> },

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn describe_year(value: &Option<String>) -> String {
    match value {
        Some(value) => format!("'{}' is not an integer", value),
        None => "field is missing".to_string(),
    }
}
