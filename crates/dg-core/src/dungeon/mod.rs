//! Dungeon layout system
//!
//! Contains grid geometry, room nodes, the room graph, the generator and the
//! consumer-side template and door helpers.

mod door_placer;
mod doors;
mod generation;
mod graph;
mod grid;
mod room;
mod template;

pub use door_placer::{
    DEFAULT_DOOR_OFFSET_FACTOR, DoorPlacement, HORIZONTAL_DOOR_ROTATION, place_doors,
};
pub use doors::Doors;
pub use generation::{DungeonGenerator, generate};
pub use graph::RoomGraph;
pub use grid::{Direction, GridPos, WorldPos};
pub use room::{NodeId, RoomNode, RoomType};
pub use template::{
    AssetSource, InstantiationPlan, ResolvedAsset, RoomPlacement, RoomTemplate, TemplateSet,
    plan_instantiation,
};
