//! Cave-like layouts from a Life-style simulation seeded with small stamps.

use std::ops::RangeInclusive;

use crate::grid::{Cell, SpatialGrid};
use crate::mapgen::config::CellularConfig;
use crate::mapgen::seed::random_range;
use crate::room::Room;
use crate::selection::SelectionMask;
use crate::tile::TileType;
use crate::types::Pos;

use super::{GenerationContext, Placement, Strategy};

pub(super) struct CellularAutomata {
    config: CellularConfig,
    cycles_run: u32,
}

impl CellularAutomata {
    pub(super) fn new(config: CellularConfig) -> Self {
        Self { config, cycles_run: 0 }
    }

    fn start_points(&self, grid: &SpatialGrid) -> usize {
        let cells = grid.size().area() as f64;
        ((cells * self.config.starting_density).round() as usize).max(1)
    }

    /// Stamps alternate between the grid topology's star and plus patterns.
    fn seed_stamps(&self, context: &mut GenerationContext) {
        let start_points = self.start_points(&context.grid);
        log::debug!("seeding {start_points} stamps");
        for index in 0..start_points {
            let x = random_range(&mut context.rng, 0, context.grid.width() - 1);
            let y = random_range(&mut context.rng, 0, context.grid.height() - 1);
            context.grid.move_to(Pos::new(x, y));

            let topology = context.grid.topology();
            let pattern = if index % 2 == 0 { topology.star() } else { topology.plus() };
            let targets: Vec<Pos> = context
                .grid
                .relative_query_set(pattern.iter().copied())
                .into_values()
                .flatten()
                .map(Cell::position)
                .filter(|&pos| context.selection.is_selected(pos))
                .collect();
            for pos in targets {
                context.grid.activate(pos, &context.floor);
            }
        }
    }

    fn survival(&self) -> RangeInclusive<usize> {
        usize::from(self.config.min_neighbors_for_sustained_life)
            ..=usize::from(self.config.max_neighbors_for_sustained_life)
    }

    fn birth(&self) -> RangeInclusive<usize> {
        usize::from(self.config.min_neighbors_for_new_life)
            ..=usize::from(self.config.max_neighbors_for_new_life)
    }

    /// One synchronous generation over the selected cells; unselected cells keep their state.
    fn run_life_cycle(&self, grid: &mut SpatialGrid, selection: &SelectionMask, floor: &TileType) {
        let (survival, birth) = (self.survival(), self.birth());
        let surround = grid.topology().surround();
        let mut next = Vec::with_capacity(grid.size().area());
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let pos = Pos::new(x, y);
                if !selection.is_selected(pos) {
                    continue;
                }
                grid.move_to(pos);
                let neighbors = grid
                    .relative_query_set(surround.iter().copied())
                    .into_values()
                    .flatten()
                    .filter(|cell| cell.is_active())
                    .count();
                let alive = grid.is_active(pos);
                let rule = if alive { &survival } else { &birth };
                next.push((pos, alive, rule.contains(&neighbors)));
            }
        }

        for (pos, was_alive, alive) in next {
            match (was_alive, alive) {
                (false, true) => {
                    grid.activate(pos, floor);
                }
                (true, false) => {
                    grid.deactivate(pos);
                }
                _ => {}
            }
        }
    }
}

impl Strategy for CellularAutomata {
    fn name(&self) -> &'static str {
        "cellular_automata"
    }

    fn begin(&mut self, context: &mut GenerationContext) {
        self.cycles_run = 0;
        self.seed_stamps(context);
    }

    /// One life cycle per step.
    fn place_step(&mut self, context: &mut GenerationContext) -> Placement {
        if self.cycles_run >= self.config.life_cycles {
            return Placement::Finished;
        }
        self.run_life_cycle(&mut context.grid, &context.selection, &context.floor);
        self.cycles_run += 1;
        context.stats.life_cycles_run += 1;
        Placement::Changed
    }

    /// Caves are left as grown; there are no rooms to join.
    fn plan_connections(&mut self, _context: &mut GenerationContext) -> Vec<(Room, Room)> {
        Vec::new()
    }
}
