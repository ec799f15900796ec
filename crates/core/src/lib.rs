pub mod error;
pub mod grid;
pub mod mapgen;
pub mod room;
pub mod selection;
pub mod shape;
pub mod tile;
pub mod types;

pub use error::{ConfigError, GenerateError};
pub use grid::{Cell, SpatialGrid};
pub use mapgen::*;
pub use room::{Room, RoomId, generate_room, is_room_area_isolated, is_room_area_vacant};
pub use selection::SelectionMask;
pub use shape::{Rectangle, Region, Shape};
pub use tile::{TileType, TileTypeRegistry};
pub use types::*;
