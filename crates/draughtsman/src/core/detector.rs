//! Core detector trait for source language identification
//!
//! This trait defines the interface for detecting which source language an
//! input blob is written in, so the orchestrator can pick a parser.

use super::SourceKind;

/// Core trait for source language detectors
///
/// Each plugin provides a detector that recognizes the lexical shape of
/// its source language (DDL keywords for SQL, declaration headers for
/// Java).
///
/// # Example
/// ```
/// use draughtsman::core::Detector;
/// use draughtsman::plugins::er::SqlDetector;
///
/// let detector = SqlDetector::new();
/// assert!(detector.detect("CREATE TABLE users (id INT);"));
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the input matches this source language
    fn detect(&self, input: &str) -> bool;

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, input: &str) -> f64;

    /// Get the source kind this detector recognizes
    fn source_kind(&self) -> SourceKind;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}
