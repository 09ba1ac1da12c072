//! The room graph produced by one generation run
//!
//! Nodes live in an arena in creation order; a position index gives O(1)
//! lookup by grid slot. Parent/child links are arena indices, so the tree is
//! acyclic by construction.

use hashbrown::HashMap;
use serde::Serialize;

use super::{Direction, Doors, GridPos, NodeId, RoomNode, RoomType, WorldPos};

/// Finished dungeon layout
#[derive(Debug, Clone, Serialize)]
pub struct RoomGraph {
    nodes: Vec<RoomNode>,
    #[serde(skip)]
    index: HashMap<GridPos, NodeId>,
    room_spacing: f32,
    target_rooms: u32,
    min_rooms: u32,
}

impl RoomGraph {
    /// Create a graph holding only the start room
    pub(crate) fn with_start(room_spacing: f32, target_rooms: u32, min_rooms: u32) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            room_spacing,
            target_rooms,
            min_rooms,
        };
        graph.insert(RoomNode::start());
        graph
    }

    /// Add a node; the slot must be free
    pub(crate) fn insert(&mut self, node: RoomNode) -> NodeId {
        debug_assert!(!self.index.contains_key(&node.grid_position));
        let id = NodeId(self.nodes.len());
        self.index.insert(node.grid_position, id);
        self.nodes.push(node);
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut RoomNode {
        &mut self.nodes[id.index()]
    }

    /// Rederive every door flag from grid adjacency
    pub(crate) fn sync_doors(&mut self) {
        for i in 0..self.nodes.len() {
            let pos = self.nodes[i].grid_position;
            let mut doors = Doors::empty();
            for dir in Direction::ALL {
                if self.index.contains_key(&pos.step(dir)) {
                    doors |= Doors::side(dir);
                }
            }
            self.nodes[i].doors = doors;
        }
    }

    /// Number of rooms
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true for a generated graph
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Is there a room at `pos`
    pub fn contains(&self, pos: GridPos) -> bool {
        self.index.contains_key(&pos)
    }

    /// Arena index of the room at `pos`
    pub fn id_at(&self, pos: GridPos) -> Option<NodeId> {
        self.index.get(&pos).copied()
    }

    /// Room at `pos`
    pub fn get(&self, pos: GridPos) -> Option<&RoomNode> {
        self.id_at(pos).map(|id| &self.nodes[id.index()])
    }

    /// Room by arena index
    ///
    /// # Panics
    /// If `id` did not come from this graph.
    pub fn node(&self, id: NodeId) -> &RoomNode {
        &self.nodes[id.index()]
    }

    /// Room next to `pos` in `dir`
    pub fn neighbor(&self, pos: GridPos, dir: Direction) -> Option<&RoomNode> {
        self.get(pos.step(dir))
    }

    /// All rooms in creation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &RoomNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// All rooms in creation order
    pub fn nodes(&self) -> &[RoomNode] {
        &self.nodes
    }

    /// The start room (always arena slot 0)
    pub fn start(&self) -> &RoomNode {
        &self.nodes[0]
    }

    /// The boss room, absent only for single-room layouts
    pub fn boss(&self) -> Option<&RoomNode> {
        self.nodes.iter().find(|n| n.room_type == RoomType::Boss)
    }

    /// Critical path from the start room to the boss room
    ///
    /// Empty when there is no boss.
    pub fn critical_path(&self) -> Vec<NodeId> {
        let Some(boss) = self.nodes.iter().position(|n| n.room_type == RoomType::Boss) else {
            return Vec::new();
        };
        let mut path = Vec::new();
        let mut cursor = Some(NodeId(boss));
        while let Some(id) = cursor {
            path.push(id);
            cursor = self.nodes[id.index()].parent;
        }
        path.reverse();
        path
    }

    /// Rooms of the given type, in creation order
    pub fn rooms_of_type(&self, room_type: RoomType) -> impl Iterator<Item = &RoomNode> {
        self.nodes.iter().filter(move |n| n.room_type == room_type)
    }

    /// Deepest tree depth in the layout
    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// World-space centre of a grid slot
    pub fn world_position(&self, pos: GridPos) -> WorldPos {
        pos.to_world(self.room_spacing)
    }

    pub fn room_spacing(&self) -> f32 {
        self.room_spacing
    }

    /// Room count drawn for this run
    pub fn target_rooms(&self) -> u32 {
        self.target_rooms
    }

    /// Configured lower bound on the room count
    pub fn min_rooms(&self) -> u32 {
        self.min_rooms
    }

    /// Rooms missing below `min_rooms`
    pub fn shortfall(&self) -> u32 {
        self.min_rooms.saturating_sub(self.nodes.len() as u32)
    }

    /// Fewer rooms than `min_rooms` because the frontier ran out
    pub fn is_degenerate(&self) -> bool {
        self.shortfall() > 0
    }
}
