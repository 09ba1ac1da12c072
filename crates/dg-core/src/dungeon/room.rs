//! Room types and graph nodes
//!
//! Defines the room kinds a layout can contain and the per-slot node record:
//! - 7 room types from Start to Elite
//! - RoomNode with grid slot, depth, tree links, critical flag and doors

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Doors, GridPos};

/// Room kinds
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum RoomType {
    /// Entry room at the grid origin
    Start,
    /// Ordinary combat room
    #[default]
    Normal,
    /// End of the critical path
    Boss,
    Shop,
    Treasure,
    Secret,
    /// Harder combat room, only rolled late in a run
    Elite,
}

impl RoomType {
    /// Types that can be rolled or placed as special rooms
    pub const SPECIAL_ROOMS: [RoomType; 4] = [
        RoomType::Shop,
        RoomType::Treasure,
        RoomType::Secret,
        RoomType::Elite,
    ];

    /// Check if this is a special room
    pub fn is_special(self) -> bool {
        Self::SPECIAL_ROOMS.contains(&self)
    }

    /// Rooms that fall back to a generic layout when no dedicated asset exists
    pub fn uses_generic_layout(self) -> bool {
        matches!(self, RoomType::Normal | RoomType::Elite)
    }
}

/// Index of a node in the graph arena
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One occupied grid slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomNode {
    /// Slot in the layout grid (unique per graph)
    pub grid_position: GridPos,
    /// Kind of room
    pub room_type: RoomType,
    /// Tree distance from the start room
    pub depth: u32,
    /// Node this one was expanded from (None only for the start room)
    pub parent: Option<NodeId>,
    /// Nodes expanded from this one, in creation order
    pub children: Vec<NodeId>,
    /// On the start-to-boss path
    pub is_critical_path: bool,
    /// Door signature
    pub doors: Doors,
}

impl RoomNode {
    /// Create the start room at the origin
    pub fn start() -> Self {
        Self {
            grid_position: GridPos::ORIGIN,
            room_type: RoomType::Start,
            depth: 0,
            parent: None,
            children: Vec::new(),
            is_critical_path: false,
            doors: Doors::empty(),
        }
    }

    /// Create a node expanded from `parent`
    pub fn child_of(parent: NodeId, parent_depth: u32, pos: GridPos, room_type: RoomType) -> Self {
        Self {
            grid_position: pos,
            room_type,
            depth: parent_depth + 1,
            parent: Some(parent),
            children: Vec::new(),
            is_critical_path: false,
            doors: Doors::empty(),
        }
    }

    /// No tree children
    pub fn is_dead_end(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_start(&self) -> bool {
        self.room_type == RoomType::Start
    }

    pub fn is_boss(&self) -> bool {
        self.room_type == RoomType::Boss
    }
}
