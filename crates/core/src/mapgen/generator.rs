//! Step-driven generator lifecycle shared by every placement strategy.

use std::collections::VecDeque;
use std::thread;

use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::error::GenerateError;
use crate::grid::SpatialGrid;
use crate::room::Room;
use crate::selection::SelectionMask;
use crate::tile::{TileType, TileTypeRegistry};

use super::config::{GeneratorConfig, StrategyConfig};
use super::connect::{carve_corridor, chain_by_position, corridor_cells};
use super::events::{GridEvent, GridEventKind, GridObserver};
use super::seed::seeded_rng;

mod basic;
mod bsp;
mod cellular;

/// Name of the tile type every strategy activates cells with.
pub const FLOOR_TILE: &str = "floor";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum GeneratorState {
    Created,
    Began,
    PlacingRooms,
    ConnectingRooms,
    Finalized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    Continue,
    Done,
}

/// Counters describing what a run did, including work it gave up on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub rooms_placed: usize,
    /// Basic placement slots that hit the attempt cap.
    pub slots_abandoned: usize,
    /// Partition leaves whose carved room fell outside the selection.
    pub partitions_skipped: usize,
    pub corridors_carved: usize,
    pub corridors_skipped: usize,
    pub life_cycles_run: usize,
}

/// Outcome of one placement step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    /// The grid changed; observers get an `Updated` event.
    Changed,
    /// Work happened but the grid is as it was.
    Unchanged,
    Finished,
}

/// Everything a strategy may read or mutate during a run.
pub(crate) struct GenerationContext {
    pub(crate) grid: SpatialGrid,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) selection: SelectionMask,
    pub(crate) floor: TileType,
    pub(crate) rooms: Vec<Room>,
    pub(crate) stats: GenerationStats,
}

impl GenerationContext {
    pub(crate) fn new(
        grid: SpatialGrid,
        seed: u64,
        selection: SelectionMask,
        floor: TileType,
    ) -> Self {
        Self {
            grid,
            rng: seeded_rng(seed),
            selection,
            floor,
            rooms: Vec::new(),
            stats: GenerationStats::default(),
        }
    }
}

pub(crate) trait Strategy {
    fn name(&self) -> &'static str;

    /// Prepares the run. Called once, after validation and before `Generated` is emitted.
    fn begin(&mut self, context: &mut GenerationContext);

    fn place_step(&mut self, context: &mut GenerationContext) -> Placement;

    /// Room pairs to join with corridors, carved in order.
    fn plan_connections(&mut self, context: &mut GenerationContext) -> Vec<(Room, Room)> {
        chain_by_position(&context.rooms)
    }
}

fn strategy_for(config: &StrategyConfig) -> Box<dyn Strategy> {
    match config {
        StrategyConfig::BasicRoomPlacement(config) => {
            Box::new(basic::BasicRoomPlacement::new(config.clone()))
        }
        StrategyConfig::BinarySpacePartition(config) => {
            Box::new(bsp::BinarySpacePartition::new(config.clone()))
        }
        StrategyConfig::CellularAutomata(config) => {
            Box::new(cellular::CellularAutomata::new(config.clone()))
        }
    }
}

/// Runs one strategy over a grid it owns until `Finalized`.
///
/// The caller drives the lifecycle: [`Generator::begin`] once, then [`Generator::step`]
/// until it reports [`StepResult::Done`]. [`Generator::run`] does both, sleeping for the
/// configured step delay in between.
pub struct Generator {
    config: GeneratorConfig,
    strategy: Box<dyn Strategy>,
    context: GenerationContext,
    tile_types: TileTypeRegistry,
    state: GeneratorState,
    pending_connections: VecDeque<(Room, Room)>,
    seed: u64,
}

impl Generator {
    /// Unpinned configurations run with seed 0 unless [`Generator::with_seed`] overrides it.
    pub fn new(config: GeneratorConfig, grid: SpatialGrid) -> Self {
        let mut tile_types = TileTypeRegistry::new();
        let floor = tile_types.register(TileType::new(FLOOR_TILE));
        let seed = config.seed.unwrap_or_default();
        Self {
            strategy: strategy_for(&config.strategy),
            context: GenerationContext::new(grid, seed, SelectionMask::new(), floor),
            config,
            tile_types,
            state: GeneratorState::Created,
            pending_connections: VecDeque::new(),
            seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.context.rng = seeded_rng(seed);
        self
    }

    pub fn with_selection(mut self, selection: SelectionMask) -> Self {
        self.context.selection = selection;
        self
    }

    /// Validates the configuration against the grid, prepares the strategy and emits
    /// `Generated`. A rejected configuration leaves the grid untouched.
    pub fn begin(&mut self, observer: &mut dyn GridObserver) -> Result<(), GenerateError> {
        if self.state != GeneratorState::Created {
            return Err(GenerateError::AlreadyStarted);
        }
        let (width, height) = (self.context.grid.width(), self.context.grid.height());
        self.config.validate(width, height)?;

        log::info!(
            "{} starting on {width}x{height} grid with seed {}",
            self.strategy.name(),
            self.seed
        );
        self.strategy.begin(&mut self.context);
        self.state = GeneratorState::Began;
        self.emit(observer, GridEventKind::Generated);
        Ok(())
    }

    /// Advances by one unit of work: a room slot, a partition leaf, a life cycle or a
    /// corridor. Once finalized, further calls report `Done` and change nothing.
    pub fn step(&mut self, observer: &mut dyn GridObserver) -> Result<StepResult, GenerateError> {
        loop {
            match self.state {
                GeneratorState::Created => return Err(GenerateError::NotStarted),
                GeneratorState::Began => self.state = GeneratorState::PlacingRooms,
                GeneratorState::PlacingRooms => match self.strategy.place_step(&mut self.context) {
                    Placement::Changed => {
                        self.emit(observer, GridEventKind::Updated);
                        return Ok(StepResult::Continue);
                    }
                    Placement::Unchanged => return Ok(StepResult::Continue),
                    Placement::Finished => {
                        let connections = self.strategy.plan_connections(&mut self.context);
                        log::debug!(
                            "{} placed {} rooms, {} corridors planned",
                            self.strategy.name(),
                            self.context.rooms.len(),
                            connections.len()
                        );
                        self.pending_connections = connections.into();
                        self.state = GeneratorState::ConnectingRooms;
                    }
                },
                GeneratorState::ConnectingRooms => {
                    let Some((from, to)) = self.pending_connections.pop_front() else {
                        self.finalize(observer);
                        return Ok(StepResult::Done);
                    };
                    self.connect(observer, &from, &to);
                    return Ok(StepResult::Continue);
                }
                GeneratorState::Finalized => return Ok(StepResult::Done),
            }
        }
    }

    /// Begins if needed and steps until finalized.
    pub fn run(&mut self, observer: &mut dyn GridObserver) -> Result<(), GenerateError> {
        if self.state == GeneratorState::Created {
            self.begin(observer)?;
        }
        let delay = self.config.step_delay();
        while self.step(observer)? == StepResult::Continue {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
        Ok(())
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.context.grid
    }

    pub fn into_grid(self) -> SpatialGrid {
        self.context.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.context.rooms
    }

    pub fn selection(&self) -> &SelectionMask {
        &self.context.selection
    }

    pub fn tile_types(&self) -> &TileTypeRegistry {
        &self.tile_types
    }

    pub fn stats(&self) -> GenerationStats {
        self.context.stats
    }

    fn connect(&mut self, observer: &mut dyn GridObserver, from: &Room, to: &Room) {
        let selection = &self.context.selection;
        let allowed = selection.is_empty()
            || corridor_cells(from, to).into_iter().all(|pos| selection.is_selected(pos));
        if !allowed {
            log::debug!("corridor {} -> {} leaves the selection; skipped", from.id(), to.id());
            self.context.stats.corridors_skipped += 1;
            return;
        }
        carve_corridor(&mut self.context.grid, from, to, &self.context.floor);
        self.context.stats.corridors_carved += 1;
        self.emit(observer, GridEventKind::Updated);
    }

    fn finalize(&mut self, observer: &mut dyn GridObserver) {
        self.state = GeneratorState::Finalized;
        let stats = self.context.stats;
        log::info!(
            "{} finalized: {} rooms, {} corridors, {} active cells",
            self.strategy.name(),
            stats.rooms_placed,
            stats.corridors_carved,
            self.context.grid.count_active()
        );
        self.emit(observer, GridEventKind::Finalized);
    }

    fn emit(&self, observer: &mut dyn GridObserver, kind: GridEventKind) {
        observer.on_event(&GridEvent {
            kind,
            source: self.strategy.name(),
            grid: &self.context.grid,
        });
    }
}
