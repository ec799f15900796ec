//! Binary space partitioning: one room carved per leaf, joined through a nearest-neighbor graph.

use rand_chacha::ChaCha8Rng;

use crate::mapgen::config::BspConfig;
use crate::mapgen::graph::RoomGraph;
use crate::mapgen::seed::{random_bool, random_range};
use crate::mapgen::tree::{Axis, RoomTree};
use crate::room::Room;
use crate::shape::{Rectangle, Region, Shape};
use crate::types::{Pos, Size};

use super::{GenerationContext, Placement, Strategy};

/// Smallest share of a leaf's side a carved room may take.
const MIN_ROOM_FRACTION: f64 = 0.33;

pub(super) struct BinarySpacePartition {
    config: BspConfig,
    tree: Option<RoomTree>,
    leaves: Vec<usize>,
    next_leaf: usize,
    carved: Vec<usize>,
}

impl BinarySpacePartition {
    pub(super) fn new(config: BspConfig) -> Self {
        Self { config, tree: None, leaves: Vec::new(), next_leaf: 0, carved: Vec::new() }
    }
}

impl Strategy for BinarySpacePartition {
    fn name(&self) -> &'static str {
        "binary_space_partition"
    }

    fn begin(&mut self, context: &mut GenerationContext) {
        let grid_area = Rectangle::new(Pos::new(0, 0), context.grid.size());
        let first_axis = if random_bool(&mut context.rng) { Axis::X } else { Axis::Y };
        let mut tree = RoomTree::new(grid_area);
        tree.subdivide(first_axis, self.config.division_depth);

        if tree.len() == 1 {
            log::warn!(
                "{}x{} grid is too small to partition; carving a single room",
                grid_area.width(),
                grid_area.height()
            );
        } else if tree.max_depth() < self.config.division_depth {
            log::debug!(
                "partitioning stopped at depth {} of {}",
                tree.max_depth(),
                self.config.division_depth
            );
        }

        self.leaves = tree.leaves();
        self.next_leaf = 0;
        self.carved.clear();
        self.tree = Some(tree);
    }

    /// Carves the next leaf's room.
    fn place_step(&mut self, context: &mut GenerationContext) -> Placement {
        let Some(tree) = self.tree.as_mut() else {
            return Placement::Finished;
        };
        let Some(&leaf) = self.leaves.get(self.next_leaf) else {
            return Placement::Finished;
        };
        self.next_leaf += 1;

        let shape = carve_shape(&mut context.rng, tree.node(leaf).area);
        if !context.selection.covers(&shape) {
            log::debug!("partition leaf {leaf} lies outside the selection; skipped");
            context.stats.partitions_skipped += 1;
            return Placement::Unchanged;
        }

        let room = &mut tree.node_mut(leaf).room;
        room.reshape(shape);
        context.grid.move_to(shape.top_left());
        context.grid.fill_rect(shape.size(), &context.floor, true);
        context.rooms.push(room.clone());
        context.stats.rooms_placed += 1;
        self.carved.push(leaf);
        Placement::Changed
    }

    fn plan_connections(&mut self, context: &mut GenerationContext) -> Vec<(Room, Room)> {
        let Some(tree) = self.tree.as_ref() else {
            return Vec::new();
        };
        let mut graph =
            RoomGraph::from_rooms(self.carved.iter().map(|&leaf| tree.node(leaf).room.clone()));
        graph.connect_nearest(
            &mut context.rng,
            self.config.min_connections_per_room,
            self.config.max_connections_per_room,
        );
        graph.unique_connections()
    }
}

/// Random rectangle inside `leaf`, each side between a third and all of the leaf's.
fn carve_shape(rng: &mut ChaCha8Rng, leaf: Rectangle) -> Shape {
    let width = random_range(rng, min_carved_length(leaf.width()), leaf.width());
    let height = random_range(rng, min_carved_length(leaf.height()), leaf.height());
    let offset_x = random_range(rng, 0, leaf.width() - width);
    let offset_y = random_range(rng, 0, leaf.height() - height);
    Shape::rectangle(leaf.top_left().offset(offset_x, offset_y), Size::new(width, height))
}

fn min_carved_length(length: i32) -> i32 {
    ((f64::from(length) * MIN_ROOM_FRACTION).floor() as i32).max(1)
}
