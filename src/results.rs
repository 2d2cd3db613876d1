//! Generation results
//!
//! Bundles everything a caller needs from one `build`: the placed rooms,
//! the tile grid and the seed that produced them (auto-generated slug
//! included, so the run can be reproduced bit for bit).

use serde::Serialize;

use crate::direction::Point;
use crate::error::GenerationError;
use crate::grid::Grid;
use crate::room::Room;
use crate::tile::{Tile, TileType};

/// Immutable view of a generated dungeon
#[derive(Clone, Debug, Serialize)]
pub struct Results {
    pub rooms: Vec<Room>,
    pub grid: Grid,
    /// The exact seed used by the PRNG
    pub seed: String,
}

impl Results {
    pub(crate) fn new(rooms: Vec<Room>, grid: Grid, seed: String) -> Self {
        Self { rooms, grid, seed }
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// The tile at (x, y), or an out-of-range error
    pub fn tile(&self, x: usize, y: usize) -> Result<&Tile, GenerationError> {
        self.grid.tile(x, y)
    }

    /// The tile named by its `"x,y"` string form
    pub fn tile_at_point(&self, point: &str) -> Result<&Tile, GenerationError> {
        let point: Point = point.parse()?;
        self.grid.tile(point.x, point.y)
    }

    pub fn floor_count(&self) -> usize {
        self.grid.iter().filter(|t| t.kind == TileType::Floor).count()
    }

    pub fn door_count(&self) -> usize {
        self.grid.iter().filter(|t| t.kind == TileType::Door).count()
    }

    /// Number of distinct regions present on the grid
    pub fn region_count(&self) -> usize {
        self.grid
            .iter()
            .filter(|t| t.region >= 0)
            .map(|t| t.region)
            .collect::<std::collections::HashSet<i32>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{build, Stage};

    fn sample() -> Results {
        build(Stage::with_seed(15, 15, "results")).unwrap()
    }

    #[test]
    fn test_tile_accessor_checks_bounds() {
        let results = sample();
        assert!(results.tile(0, 0).is_ok());
        let err = results.tile(99, 0).unwrap_err();
        assert!(matches!(err, GenerationError::OutOfRangeTile { x: 99, .. }));
    }

    #[test]
    fn test_tile_at_point() {
        let results = sample();
        let tile = results.tile_at_point("3,4").unwrap();
        assert_eq!((tile.x, tile.y), (3, 4));
        assert!(results.tile_at_point("nope").is_err());
        assert!(results.tile_at_point("99,99").is_err());
    }

    #[test]
    fn test_counts_are_consistent() {
        let results = sample();
        assert!(results.floor_count() > 0);
        assert!(results.region_count() >= results.rooms.len());
        let total = results.width() * results.height();
        assert!(results.floor_count() + results.door_count() < total);
    }

    #[test]
    fn test_json_shape() {
        let results = sample();
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["seed"], "results");
        assert_eq!(json["grid"]["width"], 15);
        let first = &json["grid"]["tiles"][0];
        assert_eq!(first["x"], 0);
        assert_eq!(first["y"], 0);
        assert_eq!(first["type"], "wall");
        assert!(first.get("region").is_none(), "region ids stay internal");
        assert!(json["rooms"].is_array());
    }
}
