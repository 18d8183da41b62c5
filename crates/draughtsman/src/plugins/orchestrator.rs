//! Plugin orchestrator for coordinating the model-building pipeline
//!
//! The orchestrator manages the flow of data through the plugins:
//! Detector → Parser → Database → Layout

use anyhow::Result;
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{Detector, DiagramError, Parser, SourceKind};
use crate::plugins::er::{ErDatabase, GridLayout, SqlParser};
use crate::plugins::uml::{CascadeLayout, JavaParser, UmlDatabase};

/// A fully built diagram model, tagged by the source kind it came from
#[derive(Debug)]
pub enum SourceModel {
    EntityRelationship(ErDatabase),
    ClassDiagram(UmlDatabase),
}

impl SourceModel {
    pub fn source_kind(&self) -> SourceKind {
        match self {
            SourceModel::EntityRelationship(_) => SourceKind::Sql,
            SourceModel::ClassDiagram(_) => SourceKind::Java,
        }
    }
}

/// Plugin orchestrator that coordinates the entire pipeline
///
/// The orchestrator wires detectors, parsers, and layout pieces together
/// so callers can run a full pipeline without handling each trait
/// manually. Detectors are consulted in registration order, so detection
/// is deterministic for a given registry.
pub struct Orchestrator {
    detectors: Vec<Box<dyn Detector>>,
}

impl Orchestrator {
    /// Create a new empty orchestrator
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Create a new orchestrator with both built-in detectors registered
    pub fn with_default_plugins() -> Self {
        let mut orchestrator = Self::new();
        orchestrator.register_detector(Box::new(crate::plugins::er::SqlDetector::new()));
        orchestrator.register_detector(Box::new(crate::plugins::uml::JavaDetector::new()));
        orchestrator
    }

    /// Register a detector plugin
    pub fn register_detector(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Get the source kinds the registered detectors cover
    pub fn registered_kinds(&self) -> Vec<SourceKind> {
        self.detectors.iter().map(|d| d.source_kind()).collect()
    }

    /// Detect the source kind of the input text
    pub fn detect_source_kind(&self, input: &str) -> Result<SourceKind> {
        let detect_span = span!(Level::INFO, "detect_source_kind", input_len = input.len());
        let _enter = detect_span.enter();

        trace!("Starting source kind detection");

        for detector in &self.detectors {
            let confidence = detector.confidence(input);
            trace!(kind = %detector.source_kind(), confidence, "Checking detector");
            if detector.detect(input) {
                info!(kind = %detector.source_kind(), confidence, "Detected source kind");
                return Ok(detector.source_kind());
            }
        }

        warn!("No suitable detector found for input");
        Err(DiagramError::detection_error("No suitable detector found for input".to_string()).into())
    }

    /// Process input through the complete pipeline
    ///
    /// Runs detector → parser → layout and returns the populated model.
    pub fn process(&self, input: &str) -> Result<SourceModel> {
        let process_span = span!(Level::INFO, "process_source", input_len = input.len());
        let _enter = process_span.enter();

        info!("Starting model building pipeline");

        let kind = self.detect_source_kind(input)?;
        debug!(kind = %kind, "Source kind detected");

        match kind {
            SourceKind::Sql => Ok(SourceModel::EntityRelationship(self.process_sql(input)?)),
            SourceKind::Java => Ok(SourceModel::ClassDiagram(self.process_java(input)?)),
        }
    }

    /// Process SQL DDL directly (skip detection)
    ///
    /// Useful when the caller already knows the source kind.
    pub fn process_sql(&self, input: &str) -> Result<ErDatabase> {
        let sql_span = span!(Level::INFO, "process_sql", input_len = input.len());
        let _enter = sql_span.enter();

        let mut database = ErDatabase::new();
        SqlParser::new().parse(input, &mut database)?;
        GridLayout::new().apply(&mut database);

        debug!(
            entities = database.entity_count(),
            relationships = database.relationship_count(),
            "SQL pipeline completed"
        );
        Ok(database)
    }

    /// Process Java source directly (skip detection)
    pub fn process_java(&self, input: &str) -> Result<UmlDatabase> {
        let java_span = span!(Level::INFO, "process_java", input_len = input.len());
        let _enter = java_span.enter();

        let mut database = UmlDatabase::new();
        JavaParser::new().parse(input, &mut database)?;
        CascadeLayout::new().apply(&mut database);

        debug!(
            classes = database.class_count(),
            relationships = database.relationship_count(),
            "Java pipeline completed"
        );
        Ok(database)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::with_default_plugins()
    }
}
