//! Geometric regions: area and perimeter enumeration plus containment.

use serde::{Deserialize, Serialize};

use crate::types::{Pos, Size};

/// Capabilities every shape offers to placement and selection code.
pub trait Region {
    fn center(&self) -> Pos;
    fn size(&self) -> Size;
    /// Every coordinate covered by the shape.
    fn area(&self) -> Vec<Pos>;
    /// Every coordinate on the shape's boundary, each reported once.
    fn perimeter(&self) -> Vec<Pos>;
    fn contains(&self, pos: Pos) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    top_left: Pos,
    size: Size,
}

impl Rectangle {
    pub fn new(top_left: Pos, size: Size) -> Self {
        Self { top_left, size }
    }

    pub fn top_left(&self) -> Pos {
        self.top_left
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn right(&self) -> i32 {
        self.top_left.x + self.size.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.top_left.y + self.size.height - 1
    }
}

impl Region for Rectangle {
    fn center(&self) -> Pos {
        let half_width = (self.size.width + 1).div_euclid(2);
        let half_height = (self.size.height + 1).div_euclid(2);
        self.top_left.offset(half_width, half_height)
    }

    fn size(&self) -> Size {
        self.size
    }

    fn area(&self) -> Vec<Pos> {
        let mut coordinates = Vec::with_capacity(self.size.area());
        for x in self.top_left.x..=self.right() {
            for y in self.top_left.y..=self.bottom() {
                coordinates.push(Pos::new(x, y));
            }
        }
        coordinates
    }

    fn perimeter(&self) -> Vec<Pos> {
        if self.size.is_empty() {
            return Vec::new();
        }
        let (left, top, right, bottom) =
            (self.top_left.x, self.top_left.y, self.right(), self.bottom());

        let mut ring = Vec::new();
        ring.extend((left..=right).map(|x| Pos::new(x, top)));
        ring.extend((top + 1..=bottom).map(|y| Pos::new(right, y)));
        if bottom > top {
            ring.extend((left..right).rev().map(|x| Pos::new(x, bottom)));
        }
        if right > left {
            ring.extend((top + 1..bottom).rev().map(|y| Pos::new(left, y)));
        }
        ring
    }

    fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x <= self.right()
            && pos.y <= self.bottom()
    }
}

/// Closed set of shapes a room or selection can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Rectangle(Rectangle),
}

impl Shape {
    pub fn rectangle(top_left: Pos, size: Size) -> Self {
        Shape::Rectangle(Rectangle::new(top_left, size))
    }

    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match self {
            Shape::Rectangle(rectangle) => Some(rectangle),
        }
    }

    /// Anchor used for deterministic room ordering.
    pub fn top_left(&self) -> Pos {
        match self {
            Shape::Rectangle(rectangle) => rectangle.top_left(),
        }
    }
}

impl Region for Shape {
    fn center(&self) -> Pos {
        match self {
            Shape::Rectangle(rectangle) => rectangle.center(),
        }
    }

    fn size(&self) -> Size {
        match self {
            Shape::Rectangle(rectangle) => rectangle.size(),
        }
    }

    fn area(&self) -> Vec<Pos> {
        match self {
            Shape::Rectangle(rectangle) => rectangle.area(),
        }
    }

    fn perimeter(&self) -> Vec<Pos> {
        match self {
            Shape::Rectangle(rectangle) => rectangle.perimeter(),
        }
    }

    fn contains(&self, pos: Pos) -> bool {
        match self {
            Shape::Rectangle(rectangle) => rectangle.contains(pos),
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(rectangle: Rectangle) -> Self {
        Shape::Rectangle(rectangle)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn center_rounds_half_size_up() {
        let odd = Rectangle::new(Pos::new(2, 3), Size::new(3, 5));
        assert_eq!(odd.center(), Pos::new(4, 6));

        let even = Rectangle::new(Pos::new(0, 0), Size::new(4, 2));
        assert_eq!(even.center(), Pos::new(2, 1));
    }

    #[test]
    fn area_covers_every_cell_exactly_once() {
        let rectangle = Rectangle::new(Pos::new(1, 1), Size::new(3, 2));
        let area = rectangle.area();
        assert_eq!(area.len(), 6);
        let unique: BTreeSet<Pos> = area.iter().copied().collect();
        assert_eq!(unique.len(), 6);
        assert!(area.iter().all(|&pos| rectangle.contains(pos)));
    }

    #[test]
    fn perimeter_is_the_boundary_ring_without_duplicates() {
        let rectangle = Rectangle::new(Pos::new(0, 0), Size::new(4, 3));
        let ring = rectangle.perimeter();
        let unique: BTreeSet<Pos> = ring.iter().copied().collect();
        assert_eq!(ring.len(), 10);
        assert_eq!(unique.len(), 10);
        assert!(!unique.contains(&Pos::new(1, 1)));
        assert!(!unique.contains(&Pos::new(2, 1)));
        assert_eq!(ring.first(), Some(&Pos::new(0, 0)));
    }

    #[test]
    fn degenerate_perimeters_do_not_double_count() {
        let column = Rectangle::new(Pos::new(5, 5), Size::new(1, 3));
        assert_eq!(column.perimeter(), vec![Pos::new(5, 5), Pos::new(5, 6), Pos::new(5, 7)]);

        let row = Rectangle::new(Pos::new(5, 5), Size::new(3, 1));
        assert_eq!(row.perimeter(), vec![Pos::new(5, 5), Pos::new(6, 5), Pos::new(7, 5)]);

        let empty = Rectangle::new(Pos::new(5, 5), Size::new(0, 3));
        assert!(empty.perimeter().is_empty());
        assert!(empty.area().is_empty());
    }

    #[test]
    fn containment_is_inclusive_of_edges() {
        let rectangle = Rectangle::new(Pos::new(2, 2), Size::new(3, 3));
        assert!(rectangle.contains(Pos::new(2, 2)));
        assert!(rectangle.contains(Pos::new(4, 4)));
        assert!(!rectangle.contains(Pos::new(5, 4)));
        assert!(!rectangle.contains(Pos::new(1, 3)));
    }

    #[test]
    fn shapes_round_trip_through_tagged_json() {
        let shape = Shape::rectangle(Pos::new(1, 2), Size::new(3, 4));
        let json = serde_json::to_string(&shape).expect("serialize shape");
        assert!(json.contains("\"shape\":\"rectangle\""));
        let parsed: Shape = serde_json::from_str(&json).expect("parse shape");
        assert_eq!(parsed, shape);
    }
}
