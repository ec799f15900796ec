use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Saturates at the `i32` bounds instead of wrapping.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y.saturating_add(dy), x: self.x.saturating_add(dx) }
    }

    /// Squared euclidean distance; avoids floating point until a caller needs the root.
    pub fn distance_squared(self, other: Pos) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

/// Width and height of a region, in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> usize {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        self.width as usize * self.height as usize
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Here,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::Here,
    ];

    /// Center plus the four diagonal neighbors.
    pub const STAR: [Direction; 5] = [
        Direction::Here,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Center plus the four orthogonal neighbors.
    pub const PLUS: [Direction; 5] = [
        Direction::Here,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    /// The eight neighbors, center excluded.
    pub const SURROUND: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Hex star: center plus the four diagonal neighbors.
    pub const HEX_STAR: [Direction; 5] = [
        Direction::Here,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Hex plus: center, the two row neighbors, and one diagonal pair.
    pub const HEX_PLUS: [Direction; 5] = [
        Direction::Here,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::West,
        Direction::East,
    ];

    /// The six neighbors of a hex cell.
    pub const HEX_SURROUND: [Direction; 6] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Square-grid offset as `(dx, dy)`.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
            Direction::Here => (0, 0),
        }
    }

    /// Square-grid neighbor; see [`Topology::neighbor`] for hex grids.
    pub fn apply(self, pos: Pos) -> Pos {
        let (dx, dy) = self.offset();
        pos.offset(dx, dy)
    }
}

/// Cell adjacency of a grid.
///
/// Hex grids use offset rows: even rows sit half a cell to the right of odd rows, and a
/// hex cell has no `North` or `South` neighbor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    #[default]
    Square,
    Hex,
}

impl Topology {
    /// Position one step from `pos` in `direction`, or `None` when the topology has no
    /// such neighbor.
    pub fn neighbor(self, pos: Pos, direction: Direction) -> Option<Pos> {
        match self {
            Topology::Square => Some(direction.apply(pos)),
            Topology::Hex => {
                let even_row = pos.y.rem_euclid(2) == 0;
                let (east_shift, west_shift) = if even_row { (1, 0) } else { (0, -1) };
                let (dx, dy) = match direction {
                    Direction::North | Direction::South => return None,
                    Direction::NorthEast => (east_shift, -1),
                    Direction::SouthEast => (east_shift, 1),
                    Direction::SouthWest => (west_shift, 1),
                    Direction::NorthWest => (west_shift, -1),
                    Direction::East => (1, 0),
                    Direction::West => (-1, 0),
                    Direction::Here => (0, 0),
                };
                Some(pos.offset(dx, dy))
            }
        }
    }

    pub fn star(self) -> &'static [Direction] {
        match self {
            Topology::Square => &Direction::STAR,
            Topology::Hex => &Direction::HEX_STAR,
        }
    }

    pub fn plus(self) -> &'static [Direction] {
        match self {
            Topology::Square => &Direction::PLUS,
            Topology::Hex => &Direction::HEX_PLUS,
        }
    }

    pub fn surround(self) -> &'static [Direction] {
        match self {
            Topology::Square => &Direction::SURROUND,
            Topology::Hex => &Direction::HEX_SURROUND,
        }
    }
}
