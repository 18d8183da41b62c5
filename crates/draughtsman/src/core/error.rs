//! Core error types for diagram model processing
//!
//! Statement-level failures are recovered inside the parsers and never
//! reach this enum; these variants cover the failures the library does
//! surface to its callers.

use thiserror::Error;

/// Core error types for diagram model processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Database error: {message}")]
    DatabaseError { message: String },

    #[error("Detection error: {message}")]
    DetectionError { message: String },

    #[error("Unknown source kind: {source_kind}")]
    UnknownSourceKind { source_kind: String },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    /// Create a new database error
    pub fn database_error(message: String) -> Self {
        Self::DatabaseError { message }
    }

    /// Create a new detection error
    pub fn detection_error(message: String) -> Self {
        Self::DetectionError { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let error = DiagramError::parse_error("Invalid syntax".to_string(), 5, 10);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Parse error"));
        assert!(error_msg.contains("Invalid syntax"));
        assert!(error_msg.contains("line 5"));
        assert!(error_msg.contains("column 10"));
    }

    #[test]
    fn test_database_error() {
        let error = DiagramError::database_error("Database error".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Database error"));
    }

    #[test]
    fn test_detection_error() {
        let error = DiagramError::detection_error("Detection failed".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Detection error"));
        assert!(error_msg.contains("Detection failed"));
    }

    #[test]
    fn test_unknown_source_kind() {
        let error = DiagramError::UnknownSourceKind {
            source_kind: "cobol".to_string(),
        };
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unknown source kind"));
        assert!(error_msg.contains("cobol"));
    }
}
