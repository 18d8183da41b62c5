//! Cascade layout for class diagrams
//!
//! Offsets each class diagonally from the previous one. Presentation
//! only; stubs are placed like any other class.

use super::database::UmlDatabase;
use crate::core::Position;

const START: f64 = 100.0;
const STEP: f64 = 50.0;

/// Diagonal cascade placement for classes
pub struct CascadeLayout;

impl CascadeLayout {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, database: &mut UmlDatabase) {
        for (i, class) in database.classes_mut().iter_mut().enumerate() {
            let offset = START + STEP * (i + 1) as f64;
            class.position = Position::new(offset, offset);
        }
    }
}

impl Default for CascadeLayout {
    fn default() -> Self {
        Self::new()
    }
}
