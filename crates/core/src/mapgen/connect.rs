//! Corridor carving between rooms and the default position-ordered room chain.

use crate::grid::SpatialGrid;
use crate::room::Room;
use crate::tile::TileType;
use crate::types::Pos;

/// Bend of the L-shaped corridor from `from` to `to`: same column as `from`, same row as `to`.
pub fn corridor_corner(from: &Room, to: &Room) -> Pos {
    let (start, end) = (from.center(), to.center());
    Pos::new(start.x, end.y)
}

/// Cells an L-shaped corridor between the two room centers passes through, in walk order.
pub fn corridor_cells(from: &Room, to: &Room) -> Vec<Pos> {
    let (start, corner, end) = (from.center(), corridor_corner(from, to), to.center());
    let mut cells = vec![start];
    let mut current = start;
    for target in [corner, end] {
        while current != target {
            current = current
                .offset((target.x - current.x).signum(), (target.y - current.y).signum());
            cells.push(current);
        }
    }
    cells
}

/// Carves a city-block corridor: vertical leg from `from`'s center, then horizontal to `to`'s.
pub fn carve_corridor(grid: &mut SpatialGrid, from: &Room, to: &Room, tile_type: &TileType) {
    grid.move_to(from.center());
    grid.line_to(corridor_corner(from, to), tile_type, true);
    grid.line_to(to.center(), tile_type, true);
}

/// Pairs consecutive rooms after ordering them by top-left column, then row.
pub fn chain_by_position(rooms: &[Room]) -> Vec<(Room, Room)> {
    let mut ordered: Vec<&Room> = rooms.iter().collect();
    ordered.sort_by_key(|room| {
        let top_left = room.shape().top_left();
        (top_left.x, top_left.y)
    });
    ordered.windows(2).map(|pair| (pair[0].clone(), pair[1].clone())).collect()
}
