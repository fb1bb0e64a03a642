//! Error types for graphwalk CLI operations.

use graphwalk::GraphError;
use std::io;
use thiserror::Error;

/// The error type for graphwalk CLI operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input or output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed text input.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line (or row) number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// The input parsed but does not describe a valid graph or grid.
    #[error("Invalid input")]
    Graph(#[from] GraphError),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}

/// A specialized Result type for graphwalk CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_error_is_the_source() {
        let err = Error::from(GraphError::EmptyInput);
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("empty input: at least one row and one column are required")
        );
    }

    #[test]
    fn test_parse_error_message() {
        let err = Error::parse(3, "expected two node ids");
        assert_eq!(err.to_string(), "Parse error on line 3: expected two node ids");
    }
}
