//! Binary space partition tree stored as a flat arena.

use crate::room::{Room, generate_room};
use crate::shape::Rectangle;
use crate::types::{Pos, Size};

/// A split is abandoned when the smaller half would be this long or shorter.
pub const MIN_PARTITION_SIZE: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn flipped(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PartitionNode {
    pub area: Rectangle,
    pub depth: u32,
    pub parent: Option<usize>,
    pub children: Option<(usize, usize)>,
    /// Split axis used to create this node's children, if any.
    pub split_axis: Option<Axis>,
    pub room: Room,
}

impl PartitionNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct RoomTree {
    nodes: Vec<PartitionNode>,
}

impl RoomTree {
    pub const ROOT: usize = 0;

    pub fn new(area: Rectangle) -> Self {
        let root = PartitionNode {
            area,
            depth: 0,
            parent: None,
            children: None,
            split_axis: None,
            room: generate_room(area),
        };
        Self { nodes: vec![root] }
    }

    /// Splits recursively, alternating axes per level, until `depth` levels exist or a
    /// branch's partitions become too small.
    pub fn subdivide(&mut self, first_axis: Axis, depth: u32) {
        self.subdivide_node(Self::ROOT, first_axis, depth);
    }

    pub fn node(&self, index: usize) -> &PartitionNode {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut PartitionNode {
        &mut self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaf indices, left subtree before right subtree.
    pub fn leaves(&self) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut pending = vec![Self::ROOT];
        while let Some(index) = pending.pop() {
            match self.nodes[index].children {
                Some((left, right)) => {
                    pending.push(right);
                    pending.push(left);
                }
                None => leaves.push(index),
            }
        }
        leaves
    }

    pub fn leaf_rooms(&self) -> Vec<Room> {
        self.leaves().into_iter().map(|index| self.nodes[index].room.clone()).collect()
    }

    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    fn subdivide_node(&mut self, index: usize, axis: Axis, depth_remaining: u32) {
        if depth_remaining == 0 {
            return;
        }
        let parent = &self.nodes[index];
        let Some((first, second)) = split_area(parent.area, axis) else {
            log::debug!(
                "partition {:?} too small to split along {axis:?} at depth {}",
                parent.area,
                parent.depth
            );
            return;
        };

        let depth = parent.depth + 1;
        let left = self.push_child(index, first, depth);
        let right = self.push_child(index, second, depth);
        self.nodes[index].children = Some((left, right));
        self.nodes[index].split_axis = Some(axis);

        self.subdivide_node(left, axis.flipped(), depth_remaining - 1);
        self.subdivide_node(right, axis.flipped(), depth_remaining - 1);
    }

    fn push_child(&mut self, parent: usize, area: Rectangle, depth: u32) -> usize {
        self.nodes.push(PartitionNode {
            area,
            depth,
            parent: Some(parent),
            children: None,
            split_axis: None,
            room: generate_room(area),
        });
        self.nodes.len() - 1
    }
}

/// Halves `area` along `axis`; the second half takes the odd cell.
pub fn split_area(area: Rectangle, axis: Axis) -> Option<(Rectangle, Rectangle)> {
    let top_left = area.top_left();
    let length = match axis {
        Axis::X => area.width(),
        Axis::Y => area.height(),
    };
    let first_length = length / 2;
    let second_length = length - first_length;
    if first_length <= MIN_PARTITION_SIZE {
        return None;
    }

    Some(match axis {
        Axis::X => (
            Rectangle::new(top_left, Size::new(first_length, area.height())),
            Rectangle::new(
                Pos::new(top_left.x + first_length, top_left.y),
                Size::new(second_length, area.height()),
            ),
        ),
        Axis::Y => (
            Rectangle::new(top_left, Size::new(area.width(), first_length)),
            Rectangle::new(
                Pos::new(top_left.x, top_left.y + first_length),
                Size::new(area.width(), second_length),
            ),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Region;

    fn root(width: i32, height: i32) -> Rectangle {
        Rectangle::new(Pos::new(0, 0), Size::new(width, height))
    }

    #[test]
    fn split_halves_cover_the_parent_exactly() {
        let (left, right) = split_area(root(9, 12), Axis::X).expect("splittable");
        assert_eq!(left, Rectangle::new(Pos::new(0, 0), Size::new(4, 12)));
        assert_eq!(right, Rectangle::new(Pos::new(4, 0), Size::new(5, 12)));
        assert_eq!(left.area().len() + right.area().len(), 9 * 12);
    }

    #[test]
    fn split_is_abandoned_at_the_size_floor() {
        assert!(split_area(root(7, 40), Axis::X).is_none());
        assert!(split_area(root(8, 40), Axis::X).is_some());
        assert!(split_area(root(40, 7), Axis::Y).is_none());
    }

    #[test]
    fn depth_matches_request_when_space_allows() {
        let mut tree = RoomTree::new(root(64, 64));
        tree.subdivide(Axis::X, 3);
        assert_eq!(tree.leaves().len(), 8);
        assert_eq!(tree.max_depth(), 3);
        assert!(tree.leaves().iter().all(|&leaf| tree.node(leaf).depth == 3));
    }

    #[test]
    fn axes_alternate_per_level() {
        let mut tree = RoomTree::new(root(64, 64));
        tree.subdivide(Axis::Y, 2);
        assert_eq!(tree.node(RoomTree::ROOT).split_axis, Some(Axis::Y));
        let (left, right) = tree.node(RoomTree::ROOT).children.expect("root split");
        assert_eq!(tree.node(left).split_axis, Some(Axis::X));
        assert_eq!(tree.node(right).split_axis, Some(Axis::X));
        assert_eq!(tree.node(left).parent, Some(RoomTree::ROOT));
    }

    #[test]
    fn small_grids_stop_early_without_undersized_partitions() {
        let mut tree = RoomTree::new(root(20, 10));
        tree.subdivide(Axis::X, 6);
        for leaf in tree.leaves() {
            let area = tree.node(leaf).area;
            assert!(area.width() > MIN_PARTITION_SIZE && area.height() > MIN_PARTITION_SIZE);
        }
        assert!(tree.max_depth() < 6);
    }

    #[test]
    fn leaves_are_listed_left_to_right() {
        let mut tree = RoomTree::new(root(32, 8));
        tree.subdivide(Axis::X, 1);
        let xs: Vec<i32> =
            tree.leaves().iter().map(|&leaf| tree.node(leaf).area.top_left().x).collect();
        assert_eq!(xs, [0, 16]);
        assert_eq!(tree.leaf_rooms().len(), 2);
    }
}
