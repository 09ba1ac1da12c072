//! dg-core: room-graph dungeon layout generator
//!
//! Builds a grid of rooms connected by doors, with a critical path from the
//! start room to a boss room and special rooms along the way. The crate has
//! no rendering or engine dependencies; consumers read the finished
//! [`RoomGraph`](dungeon::RoomGraph) and instantiate it however they like.
//!
//! ```
//! use dg_core::{GeneratorConfig, generate};
//!
//! let graph = generate(&GeneratorConfig::default(), 42).unwrap();
//! assert!(graph.start().is_start());
//! ```

pub mod config;
pub mod dungeon;
pub mod error;

mod rng;

pub use config::GeneratorConfig;
pub use dungeon::{DungeonGenerator, RoomGraph, generate};
pub use error::{ConfigError, TemplateError, TemplateLoadError};
pub use rng::LayoutRng;
