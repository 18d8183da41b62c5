//! Shared type definitions for diagram model processing
//!
//! Contains the types used by both diagram plugins: the source-language
//! kind and the presentation position slot carried by every model node.

use std::fmt;
use std::str::FromStr;

/// Source language a diagram model is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// SQL `CREATE TABLE` DDL, parsed into an entity-relationship model
    Sql,
    /// Java class/interface/enum declarations, parsed into a UML class model
    Java,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Sql => write!(f, "sql"),
            SourceKind::Java => write!(f, "java"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sql" => Ok(SourceKind::Sql),
            "java" => Ok(SourceKind::Java),
            _ => Err(format!("Unknown source kind: {}", s)),
        }
    }
}

/// 2-D position of a diagram node
///
/// Owned by the rendering collaborator; the parsers only seed it via the
/// layout passes and never read it back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_display() {
        assert_eq!(SourceKind::Sql.to_string(), "sql");
        assert_eq!(SourceKind::Java.to_string(), "java");
    }

    #[test]
    fn test_source_kind_from_str() {
        assert_eq!("sql".parse::<SourceKind>(), Ok(SourceKind::Sql));
        assert_eq!("Java".parse::<SourceKind>(), Ok(SourceKind::Java));
        assert!("cobol".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_position_default_is_origin() {
        let pos = Position::default();
        assert_eq!(pos, Position::new(0.0, 0.0));
    }
}
