//! Grid auto-layout for ER diagrams
//!
//! Seeds entity positions on a square-ish grid so the rendering
//! collaborator has a sensible initial placement. Presentation only; the
//! parser never reads these coordinates back.

use super::database::ErDatabase;
use crate::core::Position;

const CELL_WIDTH: f64 = 250.0;
const CELL_HEIGHT: f64 = 300.0;
const START_X: f64 = 50.0;
const START_Y: f64 = 50.0;

/// Grid layout for entity placement
pub struct GridLayout;

impl GridLayout {
    pub fn new() -> Self {
        Self
    }

    /// Distribute the entities over `ceil(sqrt(n))` columns
    pub fn apply(&self, database: &mut ErDatabase) {
        let count = database.entity_count();
        if count == 0 {
            return;
        }

        let cols = (count as f64).sqrt().ceil() as usize;

        for (i, entity) in database.entities_mut().iter_mut().enumerate() {
            let row = i / cols;
            let col = i % cols;
            entity.position = Position::new(
                START_X + col as f64 * CELL_WIDTH,
                START_Y + row as f64 * CELL_HEIGHT,
            );
        }
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::er::Entity;

    fn database_with(n: usize) -> ErDatabase {
        let mut db = ErDatabase::new();
        for i in 0..n {
            db.add_entity(Entity::new(format!("t{}", i))).unwrap();
        }
        db
    }

    #[test]
    fn test_empty_database_is_untouched() {
        let mut db = database_with(0);
        GridLayout::new().apply(&mut db);
        assert_eq!(db.entity_count(), 0);
    }

    #[test]
    fn test_single_entity_at_origin_cell() {
        let mut db = database_with(1);
        GridLayout::new().apply(&mut db);
        assert_eq!(db.entities()[0].position, Position::new(50.0, 50.0));
    }

    #[test]
    fn test_four_entities_fill_two_by_two() {
        let mut db = database_with(4);
        GridLayout::new().apply(&mut db);

        let positions: Vec<_> = db.entities().iter().map(|e| e.position).collect();
        assert_eq!(positions[0], Position::new(50.0, 50.0));
        assert_eq!(positions[1], Position::new(300.0, 50.0));
        assert_eq!(positions[2], Position::new(50.0, 350.0));
        assert_eq!(positions[3], Position::new(300.0, 350.0));
    }

    #[test]
    fn test_five_entities_use_three_columns() {
        let mut db = database_with(5);
        GridLayout::new().apply(&mut db);

        // ceil(sqrt(5)) == 3, so the fourth entity wraps to row 1
        assert_eq!(db.entities()[3].position, Position::new(50.0, 350.0));
    }
}
