//! Generator configuration
//!
//! Configuration can be built in code, taken from [`GeneratorConfig::default`],
//! or loaded from a JSON file. Missing fields in a file fall back to defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters for one dungeon layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Lower bound of the room target (inclusive)
    pub min_rooms: u32,
    /// Upper bound of the room target (inclusive)
    pub max_rooms: u32,
    /// World-unit distance between adjacent grid cells
    pub room_spacing: f32,
    /// Nodes at this depth are never expanded
    pub max_branching_depth: u32,
    /// Percent chance of a Shop roll at creation time
    pub shop_chance: u32,
    /// Percent chance of a Treasure roll at creation time
    pub treasure_chance: u32,
    /// Percent chance of a Secret roll at creation time
    pub secret_room_chance: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_rooms: 8,
            max_rooms: 15,
            room_spacing: 20.0,
            max_branching_depth: 3,
            shop_chance: 10,
            treasure_chance: 15,
            secret_room_chance: 5,
        }
    }
}

impl GeneratorConfig {
    /// Check parameter ranges
    ///
    /// A chance sum above 100 is accepted (the later bands are simply never
    /// reached) but logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_rooms == 0 {
            return Err(ConfigError::MinRoomsZero);
        }
        if self.min_rooms > self.max_rooms {
            return Err(ConfigError::RoomRange {
                min: self.min_rooms,
                max: self.max_rooms,
            });
        }
        if !self.room_spacing.is_finite() || self.room_spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing {
                value: self.room_spacing,
            });
        }
        if self.max_branching_depth == 0 {
            return Err(ConfigError::BranchingDepthZero);
        }

        for (field, value) in [
            ("shop_chance", self.shop_chance),
            ("treasure_chance", self.treasure_chance),
            ("secret_room_chance", self.secret_room_chance),
        ] {
            if value > 100 {
                return Err(ConfigError::ChanceOutOfRange { field, value });
            }
        }

        if self.special_chance_total() > 100 {
            warn!(
                "special room chances sum to {}%; shop rolls may never succeed",
                self.special_chance_total()
            );
        }

        Ok(())
    }

    /// Sum of the three creation-time special chances
    pub fn special_chance_total(&self) -> u32 {
        self.secret_room_chance + self.treasure_chance + self.shop_chance
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
