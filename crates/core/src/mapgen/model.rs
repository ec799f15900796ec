//! Renderer-facing copies of generated grids.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::grid::SpatialGrid;
use crate::types::Pos;

/// Tile name per cell, row-major; `None` marks an inactive cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Option<String>>,
}

impl GridSnapshot {
    pub fn capture(grid: &SpatialGrid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            tiles: grid
                .cells()
                .map(|cell| cell.tile_type().map(|tile| tile.name().to_owned()))
                .collect(),
        }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.width.to_le_bytes());
        bytes.extend(self.height.to_le_bytes());
        for tile in &self.tiles {
            match tile {
                None => bytes.push(0),
                Some(name) => {
                    bytes.push(1);
                    bytes.extend((name.len() as u32).to_le_bytes());
                    bytes.extend(name.as_bytes());
                }
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    pub fn tile_at(&self, pos: Pos) -> Option<&str> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        self.tiles[(pos.y as usize) * (self.width as usize) + (pos.x as usize)].as_deref()
    }

    pub fn active_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_some()).count()
    }

    /// `.` for active cells, `#` for inactive ones, one line per row.
    pub fn to_ascii(&self) -> String {
        let width = self.width.max(1) as usize;
        let mut out = String::with_capacity(self.tiles.len() + self.tiles.len() / width);
        for row in self.tiles.chunks(width) {
            out.extend(row.iter().map(|tile| if tile.is_some() { '.' } else { '#' }));
            out.push('\n');
        }
        out
    }

    /// Names of every tile type present, sorted.
    pub fn tile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tiles.iter().flatten().map(String::as_str).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl From<&SpatialGrid> for GridSnapshot {
    fn from(grid: &SpatialGrid) -> Self {
        Self::capture(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileType;
    use crate::types::Size;

    fn sample_grid() -> SpatialGrid {
        let mut grid = SpatialGrid::new(4, 3).expect("grid");
        grid.move_to(Pos::new(1, 1));
        grid.fill_rect(Size::new(2, 1), &TileType::new("floor"), false);
        grid.activate(Pos::new(3, 0), &TileType::new("water"));
        grid
    }

    #[test]
    fn ascii_marks_active_cells_with_dots() {
        let snapshot = GridSnapshot::capture(&sample_grid());
        assert_eq!(snapshot.to_ascii(), "###.\n#..#\n####\n");
        assert_eq!(snapshot.active_count(), 3);
        assert_eq!(snapshot.tile_at(Pos::new(3, 0)), Some("water"));
        assert_eq!(snapshot.tile_at(Pos::new(0, 0)), None);
        assert_eq!(snapshot.tile_at(Pos::new(9, 0)), None);
        assert_eq!(snapshot.tile_names(), ["floor", "water"]);
    }

    #[test]
    fn fingerprint_tracks_tile_names() {
        let grid = sample_grid();
        let mut renamed = grid.clone();
        renamed.activate(Pos::new(3, 0), &TileType::new("lava"));

        let original = GridSnapshot::capture(&grid);
        assert_eq!(original.fingerprint(), GridSnapshot::from(&grid).fingerprint());
        assert_ne!(original.fingerprint(), GridSnapshot::capture(&renamed).fingerprint());
    }

    #[test]
    fn snapshot_survives_json() {
        let snapshot = GridSnapshot::capture(&sample_grid());
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let restored: GridSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, snapshot);
    }
}
