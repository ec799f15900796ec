//! The spatial grid generators draw into: a dense cell array plus a movable cursor.
//!
//! Every movement and drawing operation is total. Out-of-range input is either clamped
//! into the grid or ignored, depending on the `safe`/`safe_mode` flag, so generation
//! code never needs its own bounds checks.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::tile::TileType;
use crate::types::{Direction, Pos, Size, Topology};

#[derive(Clone, Debug)]
pub struct Cell {
    position: Pos,
    tile_type: Option<TileType>,
    metadata: BTreeMap<String, String>,
}

impl Cell {
    fn new(position: Pos) -> Self {
        Self { position, tile_type: None, metadata: BTreeMap::new() }
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    /// A cell is active exactly when it carries a tile type.
    pub fn is_active(&self) -> bool {
        self.tile_type.is_some()
    }

    pub fn tile_type(&self) -> Option<&TileType> {
        self.tile_type.as_ref()
    }

    pub fn activate(&mut self, tile_type: &TileType) {
        self.tile_type = Some(tile_type.clone());
    }

    pub fn deactivate(&mut self) {
        self.tile_type = None;
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }
}

#[derive(Clone, Debug)]
pub struct SpatialGrid {
    size: Size,
    topology: Topology,
    cells: Vec<Cell>,
    current: Pos,
}

impl SpatialGrid {
    pub fn new(width: i32, height: i32) -> Result<Self, ConfigError> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::GridDimensions { width, height });
        }
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(Pos::new(x, y)));
            }
        }
        Ok(Self {
            size: Size::new(width, height),
            topology: Topology::Square,
            cells,
            current: Pos::new(0, 0),
        })
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Position of the cursor.
    pub fn cursor(&self) -> Pos {
        self.current
    }

    pub fn current(&self) -> &Cell {
        &self.cells[self.index_unchecked(self.current)]
    }

    pub fn is_position_safe(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.size.width && pos.y < self.size.height
    }

    pub fn clamp(&self, pos: Pos) -> Pos {
        Pos::new(pos.x.clamp(0, self.size.width - 1), pos.y.clamp(0, self.size.height - 1))
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos).map(|index| &self.cells[index])
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.index(pos).map(|index| &mut self.cells[index])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn is_active(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(Cell::is_active)
    }

    /// Returns false when `pos` lies outside the grid.
    pub fn activate(&mut self, pos: Pos, tile_type: &TileType) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.activate(tile_type);
                true
            }
            None => false,
        }
    }

    pub fn deactivate(&mut self, pos: Pos) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.deactivate();
                true
            }
            None => false,
        }
    }

    pub fn count_active(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_active()).count()
    }

    pub fn move_to(&mut self, target: Pos) {
        self.current = self.clamp(target);
    }

    /// Neighbor of the cursor. Directions the topology lacks (north and south on hex
    /// grids) yield `None` in either mode.
    pub fn relative_query(&self, direction: Direction, safe: bool) -> Option<&Cell> {
        let target = self.topology.neighbor(self.current, direction)?;
        let target = if safe { self.clamp(target) } else { target };
        self.cell(target)
    }

    /// Batched [`Self::relative_query`]; out-of-range directions map to `None`.
    pub fn relative_query_set(
        &self,
        directions: impl IntoIterator<Item = Direction>,
    ) -> BTreeMap<Direction, Option<&Cell>> {
        directions
            .into_iter()
            .map(|direction| (direction, self.relative_query(direction, false)))
            .collect()
    }

    /// Walks the cursor to `target`, one cell per axis per step, activating every cell it
    /// visits (both endpoints included) that is not already active.
    pub fn line_to(&mut self, target: Pos, tile_type: &TileType, safe_mode: bool) {
        let target = if safe_mode {
            self.clamp(target)
        } else if self.is_position_safe(target) {
            target
        } else {
            return;
        };

        loop {
            let index = self.index_unchecked(self.current);
            if !self.cells[index].is_active() {
                self.cells[index].activate(tile_type);
            }
            if self.current == target {
                break;
            }
            self.current = self
                .current
                .offset((target.x - self.current.x).signum(), (target.y - self.current.y).signum());
        }
    }

    /// Activates the rectangle anchored at the cursor. The cursor stays on the anchor.
    pub fn fill_rect(&mut self, dimensions: Size, tile_type: &TileType, safe_mode: bool) {
        let Some(far_corner) = self.far_corner(dimensions, safe_mode) else {
            return;
        };
        let anchor = self.current;
        for y in anchor.y..=far_corner.y {
            for x in anchor.x..=far_corner.x {
                let index = self.index_unchecked(Pos::new(x, y));
                self.cells[index].activate(tile_type);
            }
        }
    }

    /// Activates only the perimeter of the rectangle anchored at the cursor.
    pub fn draw_rect(&mut self, dimensions: Size, tile_type: &TileType, safe_mode: bool) {
        let Some(far_corner) = self.far_corner(dimensions, safe_mode) else {
            return;
        };
        let anchor = self.current;
        self.line_to(Pos::new(far_corner.x, anchor.y), tile_type, true);
        self.line_to(far_corner, tile_type, true);
        self.line_to(Pos::new(anchor.x, far_corner.y), tile_type, true);
        self.line_to(anchor, tile_type, true);
    }

    pub fn query_active_cells(&self, is_active: bool) -> BTreeMap<Pos, &Cell> {
        self.cells
            .iter()
            .filter(|cell| cell.is_active() == is_active)
            .map(|cell| (cell.position(), cell))
            .collect()
    }

    /// Far corner of a rectangle anchored at the cursor, clipped in safe mode and
    /// rejected when it leaves the grid otherwise.
    fn far_corner(&self, dimensions: Size, safe_mode: bool) -> Option<Pos> {
        if dimensions.is_empty() {
            return None;
        }
        let far_corner = self.current.offset(dimensions.width - 1, dimensions.height - 1);
        if safe_mode {
            Some(self.clamp(far_corner))
        } else if self.is_position_safe(far_corner) {
            Some(far_corner)
        } else {
            None
        }
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.is_position_safe(pos).then(|| self.index_unchecked(pos))
    }

    fn index_unchecked(&self, pos: Pos) -> usize {
        (pos.y as usize) * (self.size.width as usize) + (pos.x as usize)
    }
}
