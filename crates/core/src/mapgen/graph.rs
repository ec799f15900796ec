//! Room adjacency graph with coordinate indexes for approximate nearest-neighbor lookup.

use std::collections::{BTreeMap, BTreeSet};

use rand_chacha::ChaCha8Rng;
use slotmap::{SlotMap, new_key_type};

use super::seed::random_range;
use crate::room::{Room, RoomId};
use crate::types::Pos;

new_key_type! {
    pub struct NodeKey;
}

#[derive(Clone, Debug)]
pub struct RoomGraphNode {
    room: Room,
    connected: Vec<NodeKey>,
}

impl RoomGraphNode {
    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn position(&self) -> Pos {
        self.room.center()
    }

    /// Peers in the order the edges were added.
    pub fn connected_nodes(&self) -> &[NodeKey] {
        &self.connected
    }
}

#[derive(Clone, Debug, Default)]
pub struct RoomGraph {
    nodes: SlotMap<NodeKey, RoomGraphNode>,
    order: Vec<NodeKey>,
    x_index: BTreeMap<i32, Vec<NodeKey>>,
    y_index: BTreeMap<i32, Vec<NodeKey>>,
}

impl RoomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let mut graph = Self::new();
        for room in rooms {
            graph.add_room(room);
        }
        graph
    }

    pub fn add_room(&mut self, room: Room) -> NodeKey {
        let center = room.center();
        let key = self.nodes.insert(RoomGraphNode { room, connected: Vec::new() });
        self.order.push(key);
        self.x_index.entry(center.x).or_default().push(key);
        self.y_index.entry(center.y).or_default().push(key);
        key
    }

    /// Adds a symmetric edge. Self-loops and repeated edges are ignored.
    pub fn add_room_connection(&mut self, left: NodeKey, right: NodeKey) {
        if left == right || !self.nodes.contains_key(left) || !self.nodes.contains_key(right) {
            return;
        }
        for (from, to) in [(left, right), (right, left)] {
            let connected = &mut self.nodes[from].connected;
            if !connected.contains(&to) {
                connected.push(to);
            }
        }
    }

    pub fn node(&self, key: NodeKey) -> Option<&RoomGraphNode> {
        self.nodes.get(key)
    }

    /// Node keys in insertion order.
    pub fn keys(&self) -> &[NodeKey] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Up to `count` nodes near `key`, closest first.
    ///
    /// Candidates are the `count + 1` nearest coordinate buckets of each axis index,
    /// ranked afterwards by rounded euclidean distance. This is a cheap pre-filter, not an
    /// exact k-nearest search. Equal distances keep the order candidates were found in.
    pub fn get_closest_nodes(&self, key: NodeKey, count: usize) -> Vec<NodeKey> {
        let Some(reference) = self.nodes.get(key) else {
            return Vec::new();
        };
        if count == 0 {
            return Vec::new();
        }
        let center = reference.position();

        let mut candidates: BTreeMap<i64, Vec<NodeKey>> = BTreeMap::new();
        self.collect_candidates(key, center, center.x, &self.x_index, count + 1, &mut candidates);
        self.collect_candidates(key, center, center.y, &self.y_index, count + 1, &mut candidates);

        candidates.into_values().flatten().take(count).collect()
    }

    /// Gives every node a random number of edges to its nearest neighbors.
    pub fn connect_nearest(
        &mut self,
        rng: &mut ChaCha8Rng,
        min_connections: i32,
        max_connections: i32,
    ) {
        for key in self.order.clone() {
            let wanted = random_range(rng, min_connections, max_connections).max(0) as usize;
            for neighbor in self.get_closest_nodes(key, wanted) {
                self.add_room_connection(key, neighbor);
            }
        }
    }

    /// Every undirected edge exactly once, discovered in node insertion order.
    pub fn unique_connections(&self) -> Vec<(Room, Room)> {
        let mut consumed: BTreeSet<(RoomId, RoomId)> = BTreeSet::new();
        let mut connections = Vec::new();
        for &key in &self.order {
            let left = &self.nodes[key];
            for &peer in &left.connected {
                let right = &self.nodes[peer];
                let (left_id, right_id) = (left.room.id(), right.room.id());
                if consumed.insert((left_id.min(right_id), left_id.max(right_id))) {
                    connections.push((left.room.clone(), right.room.clone()));
                }
            }
        }
        connections
    }

    fn collect_candidates(
        &self,
        reference: NodeKey,
        center: Pos,
        coordinate: i32,
        index: &BTreeMap<i32, Vec<NodeKey>>,
        bucket_limit: usize,
        candidates: &mut BTreeMap<i64, Vec<NodeKey>>,
    ) {
        let mut buckets: Vec<i32> = index.keys().copied().collect();
        buckets.sort_by_key(|&value| value.abs_diff(coordinate));

        for value in buckets.into_iter().take(bucket_limit) {
            for &key in &index[&value] {
                if key == reference {
                    continue;
                }
                let squared = center.distance_squared(self.nodes[key].position());
                let distance = (squared as f64).sqrt().round() as i64;
                let bucket = candidates.entry(distance).or_default();
                if !bucket.contains(&key) {
                    bucket.push(key);
                }
            }
        }
    }
}
