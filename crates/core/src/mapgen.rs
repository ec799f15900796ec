//! Procedural room generation: placement strategies, room connectivity, and the
//! builder that runs them in sequence over one grid.

pub mod config;
pub mod events;
pub mod graph;
pub mod model;
pub mod tree;

mod builder;
mod connect;
mod generator;
mod seed;

pub use builder::{BuiltMap, MapBuilder};
pub use config::{
    BasicRoomConfig, BspConfig, CellularConfig, DEFAULT_ATTEMPTS_PER_ROOM, GeneratorConfig,
    MapConfig, StrategyConfig,
};
pub use connect::{carve_corridor, chain_by_position, corridor_cells, corridor_corner};
pub use events::{EventLog, GridEvent, GridEventKind, GridObserver, IgnoreEvents};
pub use generator::{FLOOR_TILE, GenerationStats, Generator, GeneratorState, StepResult};
pub use model::GridSnapshot;
pub use seed::{derive_generator_seed, mix_seed_stream};

use crate::error::GenerateError;

pub fn build_map(
    config: MapConfig,
    observer: &mut dyn GridObserver,
) -> Result<BuiltMap, GenerateError> {
    MapBuilder::new(config).build(observer)
}
