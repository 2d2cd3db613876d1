//! The tile grid
//!
//! A flat `width * height` arena of tiles indexed row-major. Tiles do not
//! store neighbor back-references; neighbor access is derived from the
//! direction offset tables, so there is exactly one canonical tile per
//! coordinate.

use serde::Serialize;

use crate::direction::Direction;
use crate::error::GenerationError;
use crate::query::NeighborQuery;
use crate::tile::{Tile, TileType};

#[derive(Clone, Debug, Serialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Allocate a full grid of tiles of the given type
    pub fn filled(width: usize, height: usize, kind: TileType) -> Self {
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::new(x, y, kind));
            }
        }
        Self { width, height, tiles }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Unchecked accessor; out-of-grid coordinates are a programming error
    pub fn get(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        let idx = self.index(x, y);
        &mut self.tiles[idx]
    }

    /// Checked accessor for callers outside the pipeline
    pub fn tile(&self, x: usize, y: usize) -> Result<&Tile, GenerationError> {
        if x < self.width && y < self.height {
            Ok(self.get(x, y))
        } else {
            Err(GenerationError::OutOfRangeTile {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Coordinate one step in `dir`, if it stays on the grid
    pub fn offset(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        self.step(x, y, dir, 1)
    }

    /// Coordinate `distance` steps in `dir`, if it stays on the grid
    pub fn step(&self, x: usize, y: usize, dir: Direction, distance: i64) -> Option<(usize, usize)> {
        let (dx, dy) = dir.offset();
        let nx = x as i64 + dx as i64 * distance;
        let ny = y as i64 + dy as i64 * distance;
        if self.in_bounds(nx, ny) {
            Some((nx as usize, ny as usize))
        } else {
            None
        }
    }

    /// The neighbor tile one step in `dir`
    pub fn neighbor(&self, x: usize, y: usize, dir: Direction) -> Option<&Tile> {
        self.offset(x, y, dir).map(|(nx, ny)| self.get(nx, ny))
    }

    /// Start a fluent neighbor query at (x, y)
    pub fn neighbors(&self, x: usize, y: usize) -> NeighborQuery<'_> {
        NeighborQuery::new(self, x, y)
    }

    /// Iterate all tiles row by row
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::NO_REGION;

    #[test]
    fn test_filled_allocates_every_tile() {
        let grid = Grid::filled(7, 5, TileType::Wall);
        assert_eq!(grid.iter().count(), 35);
        for tile in grid.iter() {
            assert_eq!(tile.kind, TileType::Wall);
            assert_eq!(tile.region, NO_REGION);
        }
        assert_eq!(grid.get(6, 4).x, 6);
        assert_eq!(grid.get(6, 4).y, 4);
    }

    #[test]
    fn test_one_canonical_tile_per_coordinate() {
        let mut grid = Grid::filled(5, 5, TileType::Wall);
        grid.get_mut(2, 1).kind = TileType::Floor;
        // The same mutation is visible through a neighbor walk
        let via_neighbor = grid.neighbor(2, 2, Direction::North).unwrap();
        assert_eq!(via_neighbor.kind, TileType::Floor);
    }

    #[test]
    fn test_corner_has_three_neighbors() {
        let grid = Grid::filled(5, 5, TileType::Wall);
        let present = Direction::all()
            .iter()
            .filter(|&&d| grid.neighbor(0, 0, d).is_some())
            .count();
        assert_eq!(present, 3);
    }

    #[test]
    fn test_center_has_eight_neighbors() {
        let grid = Grid::filled(5, 5, TileType::Wall);
        let present = Direction::all()
            .iter()
            .filter(|&&d| grid.neighbor(2, 2, d).is_some())
            .count();
        assert_eq!(present, 8);
    }

    #[test]
    fn test_step_stops_at_edge() {
        let grid = Grid::filled(5, 5, TileType::Wall);
        assert_eq!(grid.step(1, 1, Direction::East, 3), Some((4, 1)));
        assert_eq!(grid.step(1, 1, Direction::East, 4), None);
        assert_eq!(grid.step(1, 1, Direction::North, 2), None);
    }

    #[test]
    fn test_checked_tile_errors_out_of_range() {
        let grid = Grid::filled(5, 5, TileType::Wall);
        assert!(grid.tile(4, 4).is_ok());
        let err = grid.tile(5, 0).unwrap_err();
        assert_eq!(
            err,
            GenerationError::OutOfRangeTile { x: 5, y: 0, width: 5, height: 5 }
        );
    }
}
