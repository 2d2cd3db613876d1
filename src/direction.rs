//! Compass directions and grid offsets
//!
//! All neighbor walking in the crate goes through these tables so that
//! iteration order is identical everywhere.

use std::str::FromStr;

use crate::error::GenerationError;

/// The eight compass directions.
/// Order: N, NE, E, SE, S, SW, W, NW
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub fn all() -> &'static [Direction; 8] {
        &ALL
    }

    /// (dx, dy) unit offset for this direction
    pub fn offset(&self) -> (i32, i32) {
        DIR_OFFSETS[*self as usize]
    }

    pub fn is_cardinal(&self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::NorthEast => "ne",
            Direction::East => "e",
            Direction::SouthEast => "se",
            Direction::South => "s",
            Direction::SouthWest => "sw",
            Direction::West => "w",
            Direction::NorthWest => "nw",
        }
    }
}

pub const ALL: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

/// Direction offsets (dx, dy), indexed by `Direction as usize`
pub const DIR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // W
    (-1, -1), // NW
];

/// The four cardinal directions in their fixed walk order: N, E, S, W.
/// Maze carving and connector scanning depend on this exact order.
pub const CARDINAL: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

/// The four diagonal directions: NE, SE, SW, NW
pub const INTERCARDINAL: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

/// A grid coordinate, printable and parseable as `"x,y"`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let x = parts.next().and_then(|p| p.trim().parse::<usize>().ok());
        let y = parts.next().and_then(|p| p.trim().parse::<usize>().ok());
        match (x, y, parts.next()) {
            (Some(x), Some(y), None) => Ok(Point { x, y }),
            _ => Err(GenerationError::InvalidPoint(s.to_string())),
        }
    }
}
