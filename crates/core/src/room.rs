//! Rooms and the feasibility checks used before placing them.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::grid::SpatialGrid;
use crate::shape::{Region, Shape};
use crate::types::Pos;

static NEXT_ROOM_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique, handed out in increasing order and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u64);

impl RoomId {
    fn next() -> Self {
        Self(NEXT_ROOM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    shape: Shape,
}

impl Room {
    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn center(&self) -> Pos {
        self.shape.center()
    }

    /// Swaps in a new footprint while keeping the room's identity.
    pub(crate) fn reshape(&mut self, shape: Shape) {
        self.shape = shape;
    }
}

/// Creates a room with a fresh id.
pub fn generate_room(shape: impl Into<Shape>) -> Room {
    Room { id: RoomId::next(), shape: shape.into() }
}

/// True when no cell the room covers is active.
pub fn is_room_area_vacant(room: &Room, grid: &SpatialGrid) -> bool {
    room.shape.area().into_iter().all(|pos| !grid.is_active(pos))
}

/// True when the room is vacant and the one-cell ring around its footprint is empty too.
///
/// Every perimeter coordinate's 3x3 neighborhood is scanned; neighbors inside the shape or
/// off the grid are skipped.
pub fn is_room_area_isolated(room: &Room, grid: &SpatialGrid) -> bool {
    if !is_room_area_vacant(room, grid) {
        return false;
    }
    room.shape.perimeter().into_iter().all(|edge| {
        (-1..=1).all(|dy| {
            (-1..=1).all(|dx| {
                let neighbor = edge.offset(dx, dy);
                room.shape.contains(neighbor) || !grid.is_active(neighbor)
            })
        })
    })
}
