//! Crate-level error type

use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::config::ConfigError;
use crate::interpolate::InterpolationError;
use crate::snippet::{ExtractError, SnippetError};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Snippet(#[from] SnippetError),

    /// An interpolation column that does not parse
    #[error("row {row}, column {column}: {error}")]
    Expression {
        row: usize,
        column: usize,
        /// The column's text, for rendering the error report
        source_text: String,
        #[source]
        error: InterpolationError,
    },

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("could not read snippet: {0}")]
    Extract(#[from] ExtractError),
}

impl Error {
    /// Annotated report for expression errors, the plain message otherwise
    pub fn report(&self, filename: &str) -> String {
        match self {
            Error::Expression {
                source_text, error, ..
            } => format!("{}\n{}", self, error.format(source_text, filename)),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::Interpolation;

    #[test]
    fn test_expression_report_shows_source() {
        let source = "rep + 1";
        let error = Interpolation::parse(source).unwrap_err();
        let err = Error::Expression {
            row: 2,
            column: 11,
            source_text: source.to_string(),
            error,
        };
        assert!(err.to_string().starts_with("row 2, column 11: "));
        let report = err.report("tooltip");
        assert!(report.contains("rep + 1"));
    }

    #[test]
    fn test_snippet_error_is_transparent() {
        let err: Error = SnippetError::input_at(1, 2, "missing").into();
        assert_eq!(err.to_string(), "row 1, column 2: missing");
    }
}
