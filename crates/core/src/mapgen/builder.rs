//! Runs a sequence of generators over one shared grid.

use crate::error::GenerateError;
use crate::grid::SpatialGrid;
use crate::room::Room;
use crate::selection::SelectionMask;
use crate::tile::TileTypeRegistry;

use super::config::{GeneratorConfig, MapConfig};
use super::events::GridObserver;
use super::generator::{GenerationStats, Generator};
use super::model::GridSnapshot;
use super::seed::derive_generator_seed;

#[derive(Clone, Debug)]
pub struct BuiltMap {
    pub grid: SpatialGrid,
    /// Rooms of every generator, in placement order.
    pub rooms: Vec<Room>,
    pub tile_types: TileTypeRegistry,
    /// One entry per generator, in sequence order.
    pub stats: Vec<GenerationStats>,
    pub seed: u64,
}

impl BuiltMap {
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid)
    }
}

#[derive(Clone, Debug)]
pub struct MapBuilder {
    config: MapConfig,
    seed: u64,
}

impl MapBuilder {
    pub fn new(config: MapConfig) -> Self {
        let seed = config.seed.unwrap_or_default();
        Self { config, seed }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Seed the generator at `index` runs with: its pinned seed, or one derived from the run seed.
    pub fn seed_for(&self, index: usize, generator: &GeneratorConfig) -> u64 {
        generator.seed.unwrap_or_else(|| derive_generator_seed(self.seed, index))
    }

    /// Runs every generator to completion, forwarding all of their events to `observer`.
    ///
    /// Each generator sees only its own selected areas; the mask starts empty for the next
    /// one. The whole sequence is validated before any generator runs.
    pub fn build(&self, observer: &mut dyn GridObserver) -> Result<BuiltMap, GenerateError> {
        self.config.validate()?;
        let mut grid = SpatialGrid::new(self.config.width, self.config.height)?
            .with_topology(self.config.topology);
        log::info!(
            "building {}x{} map with {} generators, seed {}",
            self.config.width,
            self.config.height,
            self.config.generators.len(),
            self.seed
        );

        let mut rooms = Vec::new();
        let mut tile_types = TileTypeRegistry::new();
        let mut stats = Vec::with_capacity(self.config.generators.len());
        for (index, config) in self.config.generators.iter().enumerate() {
            let mut selection = SelectionMask::new();
            selection.install(config.selected_areas.iter().copied());

            let mut generator = Generator::new(config.clone(), grid)
                .with_seed(self.seed_for(index, config))
                .with_selection(selection);
            generator.run(observer)?;

            log::debug!(
                "generator {index} ({}) done: {:?}",
                generator.strategy_name(),
                generator.stats()
            );
            rooms.extend(generator.rooms().iter().cloned());
            tile_types.merge(generator.tile_types());
            stats.push(generator.stats());
            grid = generator.into_grid();
        }

        Ok(BuiltMap { grid, rooms, tile_types, stats, seed: self.seed })
    }
}
