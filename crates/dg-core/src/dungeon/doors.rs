//! Per-room door flags

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::Direction;

bitflags! {
    /// Doors present on a room, one bit per side
    ///
    /// A room's door signature is this set; templates are matched on it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Doors: u8 {
        const NORTH = 0x01;
        const SOUTH = 0x02;
        const EAST = 0x04;
        const WEST = 0x08;
    }
}

impl Doors {
    /// The flag for a single side
    pub const fn side(dir: Direction) -> Doors {
        match dir {
            Direction::North => Doors::NORTH,
            Direction::South => Doors::SOUTH,
            Direction::East => Doors::EAST,
            Direction::West => Doors::WEST,
        }
    }

    /// Build from the four booleans, in north/south/east/west order
    pub fn from_sides(north: bool, south: bool, east: bool, west: bool) -> Doors {
        let mut doors = Doors::empty();
        doors.set(Doors::NORTH, north);
        doors.set(Doors::SOUTH, south);
        doors.set(Doors::EAST, east);
        doors.set(Doors::WEST, west);
        doors
    }

    pub fn has(self, dir: Direction) -> bool {
        self.contains(Doors::side(dir))
    }

    pub fn north(self) -> bool {
        self.contains(Doors::NORTH)
    }

    pub fn south(self) -> bool {
        self.contains(Doors::SOUTH)
    }

    pub fn east(self) -> bool {
        self.contains(Doors::EAST)
    }

    pub fn west(self) -> bool {
        self.contains(Doors::WEST)
    }

    /// Number of doors
    pub fn count(self) -> u32 {
        self.bits().count_ones()
    }
}

/// Renders as e.g. `N-E-` (north and east open)
impl fmt::Display for Doors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |flag: Doors, c: char| if self.contains(flag) { c } else { '-' };
        write!(
            f,
            "{}{}{}{}",
            mark(Doors::NORTH, 'N'),
            mark(Doors::SOUTH, 'S'),
            mark(Doors::EAST, 'E'),
            mark(Doors::WEST, 'W')
        )
    }
}

// Serialized as the four named booleans so template files stay readable
#[derive(Serialize, Deserialize)]
struct DoorSides {
    #[serde(default)]
    north: bool,
    #[serde(default)]
    south: bool,
    #[serde(default)]
    east: bool,
    #[serde(default)]
    west: bool,
}

impl Serialize for Doors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        DoorSides {
            north: self.north(),
            south: self.south(),
            east: self.east(),
            west: self.west(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Doors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let sides = DoorSides::deserialize(deserializer)?;
        Ok(Doors::from_sides(
            sides.north,
            sides.south,
            sides.east,
            sides.west,
        ))
    }
}
