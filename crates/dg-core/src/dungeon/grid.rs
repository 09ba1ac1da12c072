//! Grid coordinates, cardinal directions and world mapping

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Integer room slot in the layout grid
///
/// `y` grows northwards, matching world space.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// The start room slot
    pub const ORIGIN: GridPos = GridPos { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring slot in `dir`
    pub const fn step(self, dir: Direction) -> GridPos {
        let (dx, dy) = dir.offset();
        GridPos {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// World-space centre of this slot for the given spacing
    pub fn to_world(self, spacing: f32) -> WorldPos {
        WorldPos {
            x: self.x as f32 * spacing,
            y: self.y as f32 * spacing,
            z: 0.0,
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction between grid slots
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Expansion order before shuffling
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Grid offset `(dx, dy)`
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// East/West connections
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::West | Direction::East)
    }
}

/// World-space position of a room or door
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    /// Move `distance` units along `dir` in the XY plane
    pub fn offset(self, dir: Direction, distance: f32) -> WorldPos {
        let (dx, dy) = dir.offset();
        WorldPos {
            x: self.x + dx as f32 * distance,
            y: self.y + dy as f32 * distance,
            z: self.z,
        }
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_step_and_opposite() {
        for dir in Direction::iter() {
            let p = GridPos::new(3, -2);
            assert_eq!(p.step(dir).step(dir.opposite()), p);
            assert_ne!(p.step(dir), p);
        }
    }

    #[test]
    fn test_north_is_positive_y() {
        assert_eq!(GridPos::ORIGIN.step(Direction::North), GridPos::new(0, 1));
        assert_eq!(GridPos::ORIGIN.step(Direction::East), GridPos::new(1, 0));
    }

    #[test]
    fn test_world_mapping() {
        let w = GridPos::new(2, -3).to_world(20.0);
        assert_eq!(w, WorldPos { x: 40.0, y: -60.0, z: 0.0 });
    }

    #[test]
    fn test_world_offset() {
        let w = GridPos::new(1, 1).to_world(10.0).offset(Direction::West, 5.0);
        assert_eq!(w, WorldPos { x: 5.0, y: 10.0, z: 0.0 });
    }

    #[test]
    fn test_horizontal() {
        assert!(Direction::East.is_horizontal());
        assert!(Direction::West.is_horizontal());
        assert!(!Direction::North.is_horizontal());
        assert!(!Direction::South.is_horizontal());
    }
}
