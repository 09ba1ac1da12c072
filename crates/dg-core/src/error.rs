//! Error types for configuration and template resolution

use thiserror::Error;

use crate::dungeon::{Doors, RoomType};

/// Invalid generator configuration
///
/// Raised before any room is created; no partial graph is ever produced.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("min_rooms must be at least 1")]
    MinRoomsZero,

    #[error("min_rooms ({min}) is greater than max_rooms ({max})")]
    RoomRange { min: u32, max: u32 },

    #[error("room_spacing must be a positive finite number, got {value}")]
    InvalidSpacing { value: f32 },

    #[error("max_branching_depth must be at least 1")]
    BranchingDepthZero,

    #[error("{field} must be a percentage in 0..=100, got {value}")]
    ChanceOutOfRange { field: &'static str, value: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Consumer-side template resolution failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("no template or default asset for {room_type} room with doors {doors}")]
    Unavailable { room_type: RoomType, doors: Doors },
}

/// Failure reading a template set from disk
#[derive(Error, Debug)]
pub enum TemplateLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
