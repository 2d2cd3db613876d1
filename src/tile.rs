//! Tile cells and their classification

use serde::Serialize;

use crate::region::NO_REGION;

/// What occupies a tile. Only `Wall`, `Floor` and `Door` are produced by the
/// generator; `Shaft` and `Stairs` exist for downstream annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Wall,
    Floor,
    Door,
    Shaft,
    Stairs,
}

impl TileType {
    /// Anything that is not solid rock
    pub fn is_passable(&self) -> bool {
        !matches!(self, TileType::Wall)
    }
}

/// Which pipeline stage carved a region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionType {
    Room,
    Corridor,
}

/// A single cell of the grid.
///
/// `x` and `y` are fixed at construction. `region` is `NO_REGION` (-1) for
/// untouched walls; door tiles also keep `NO_REGION` and act as bridge nodes
/// between the regions they join.
///
/// The JSON form is `{ "x": .., "y": .., "type": ".." }`; the string form is
/// `"x,y"`.
#[derive(Clone, Debug, Serialize)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    #[serde(rename = "type")]
    pub kind: TileType,
    #[serde(skip)]
    pub region: i32,
    #[serde(skip)]
    pub region_type: Option<RegionType>,
}

impl Tile {
    pub fn new(x: usize, y: usize, kind: TileType) -> Self {
        Self {
            x,
            y,
            kind,
            region: NO_REGION,
            region_type: None,
        }
    }

    /// Reset to untouched wall
    pub fn reset(&mut self) {
        self.kind = TileType::Wall;
        self.region = NO_REGION;
        self.region_type = None;
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_has_no_region() {
        let tile = Tile::new(3, 5, TileType::Wall);
        assert_eq!(tile.region, NO_REGION);
        assert!(tile.region_type.is_none());
    }

    #[test]
    fn test_string_form() {
        let tile = Tile::new(12, 4, TileType::Floor);
        assert_eq!(tile.to_string(), "12,4");
    }

    #[test]
    fn test_json_form() {
        let mut tile = Tile::new(2, 9, TileType::Door);
        tile.region = 7;
        tile.region_type = Some(RegionType::Corridor);
        let json = serde_json::to_value(&tile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "x": 2, "y": 9, "type": "door" }),
            "JSON form carries exactly x, y and type"
        );
    }

    #[test]
    fn test_passability() {
        assert!(!TileType::Wall.is_passable());
        assert!(TileType::Floor.is_passable());
        assert!(TileType::Door.is_passable());
        assert!(TileType::Stairs.is_passable());
    }

    #[test]
    fn test_reset() {
        let mut tile = Tile::new(0, 0, TileType::Floor);
        tile.region = 3;
        tile.region_type = Some(RegionType::Room);
        tile.reset();
        assert_eq!(tile.kind, TileType::Wall);
        assert_eq!(tile.region, NO_REGION);
        assert!(tile.region_type.is_none());
    }
}
