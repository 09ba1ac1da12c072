//! Door placement between adjacent rooms
//!
//! Only the east and north neighbour of each room is visited, so every
//! adjacent pair yields exactly one door.

use serde::Serialize;

use super::{Direction, GridPos, RoomGraph, WorldPos};

/// Share of the room spacing a door sits away from the origin room's centre
pub const DEFAULT_DOOR_OFFSET_FACTOR: f32 = 0.5;

/// Rotation (degrees about Z) of doors on East/West connections
pub const HORIZONTAL_DOOR_ROTATION: f32 = 90.0;

/// One door between two rooms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoorPlacement {
    pub origin: GridPos,
    pub neighbor: GridPos,
    pub direction: Direction,
    pub position: WorldPos,
    pub rotation_degrees: f32,
}

impl DoorPlacement {
    /// Stable object name, `Door_{x}_{y}_{dx}_{dy}`
    pub fn name(&self) -> String {
        let (dx, dy) = self.direction.offset();
        format!("Door_{}_{}_{}_{}", self.origin.x, self.origin.y, dx, dy)
    }
}

/// One door per adjacent pair of rooms
pub fn place_doors(graph: &RoomGraph, offset_factor: f32) -> Vec<DoorPlacement> {
    let offset = graph.room_spacing() * offset_factor;
    let mut doors = Vec::new();

    for (_, node) in graph.iter() {
        for dir in [Direction::East, Direction::North] {
            let neighbor = node.grid_position.step(dir);
            if !node.doors.has(dir) || !graph.contains(neighbor) {
                continue;
            }
            let rotation_degrees = if dir.is_horizontal() {
                HORIZONTAL_DOOR_ROTATION
            } else {
                0.0
            };
            doors.push(DoorPlacement {
                origin: node.grid_position,
                neighbor,
                direction: dir,
                position: graph.world_position(node.grid_position).offset(dir, offset),
                rotation_degrees,
            });
        }
    }

    doors
}
