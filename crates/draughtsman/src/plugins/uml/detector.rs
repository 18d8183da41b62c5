//! Java source detector
//!
//! Identifies Java class/interface/enum source from its lexical shape.

use crate::core::{Detector, SourceKind};

/// Detector for Java class syntax
pub struct JavaDetector;

impl JavaDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for JavaDetector {
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) > 0.5
    }

    fn confidence(&self, input: &str) -> f64 {
        // SQL DDL also contains parenthesized bodies; rule it out first
        if input.to_uppercase().contains("CREATE TABLE") {
            return 0.0;
        }

        let has_declaration = input.contains("class ")
            || input.contains("interface ")
            || input.contains("enum ");

        if has_declaration && input.contains('{') {
            return 1.0;
        }
        if input.trim_start().starts_with("package ") {
            return 0.6;
        }

        0.0
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Java
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["class", "interface", "enum", "extends", "implements"]
    }
}
