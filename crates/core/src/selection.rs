//! Restricts which cells a generation pass may touch.

use crate::shape::{Region, Shape};
use crate::types::Pos;

/// An empty mask selects everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionMask {
    areas: Vec<Shape>,
}

impl SelectionMask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_areas(areas: impl IntoIterator<Item = Shape>) -> Self {
        Self { areas: areas.into_iter().collect() }
    }

    /// Replaces the current areas.
    pub fn install(&mut self, areas: impl IntoIterator<Item = Shape>) {
        self.areas = areas.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn areas(&self) -> &[Shape] {
        &self.areas
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn is_selected(&self, pos: Pos) -> bool {
        self.areas.is_empty() || self.areas.iter().any(|area| area.contains(pos))
    }

    /// True when every cell of `shape` is selected.
    pub fn covers(&self, shape: &Shape) -> bool {
        self.areas.is_empty() || shape.area().into_iter().all(|pos| self.is_selected(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;

    #[test]
    fn empty_mask_selects_everything() {
        let mask = SelectionMask::new();
        assert!(mask.is_selected(Pos::new(-100, 7)));
        assert!(mask.covers(&Shape::rectangle(Pos::new(0, 0), Size::new(50, 50))));
    }

    #[test]
    fn installed_areas_restrict_selection_until_cleared() {
        let mut mask = SelectionMask::new();
        mask.install([
            Shape::rectangle(Pos::new(0, 0), Size::new(3, 3)),
            Shape::rectangle(Pos::new(10, 10), Size::new(2, 2)),
        ]);
        assert!(mask.is_selected(Pos::new(2, 2)));
        assert!(mask.is_selected(Pos::new(11, 11)));
        assert!(!mask.is_selected(Pos::new(5, 5)));
        assert!(!mask.covers(&Shape::rectangle(Pos::new(1, 1), Size::new(3, 3))));
        assert!(mask.covers(&Shape::rectangle(Pos::new(1, 1), Size::new(2, 2))));

        mask.clear();
        assert!(mask.is_empty());
        assert!(mask.is_selected(Pos::new(5, 5)));
    }
}
