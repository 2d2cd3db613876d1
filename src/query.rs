//! Fluent neighbor queries
//!
//! A query is an immutable filter descriptor over a start tile: direction
//! set, BFS radius, and type/region predicates. Nothing is traversed until
//! `get()` materializes the result. The start tile itself is never part of
//! the result, each tile appears at most once, and traversal never leaves
//! the grid.

use crate::direction::{Direction, ALL, CARDINAL, INTERCARDINAL};
use crate::grid::Grid;
use crate::tile::{Tile, TileType};

fn mask_of(dirs: &[Direction]) -> u8 {
    dirs.iter().fold(0u8, |m, &d| m | (1 << d as usize))
}

/// Filter descriptor; every builder method returns the updated descriptor
#[derive(Clone)]
pub struct NeighborQuery<'a> {
    grid: &'a Grid,
    start: (usize, usize),
    directions: Option<u8>,
    levels: usize,
    kind_is: Option<TileType>,
    kind_not: Option<TileType>,
    region_is: Option<i32>,
    region_not: Option<i32>,
    unique_regions: bool,
}

impl<'a> NeighborQuery<'a> {
    pub fn new(grid: &'a Grid, x: usize, y: usize) -> Self {
        Self {
            grid,
            start: (x, y),
            directions: None,
            levels: 1,
            kind_is: None,
            kind_not: None,
            region_is: None,
            region_not: None,
            unique_regions: false,
        }
    }

    /// Allow the four cardinal traversal directions (the default)
    pub fn cardinal(mut self) -> Self {
        self.directions = Some(self.directions.unwrap_or(0) | mask_of(&CARDINAL));
        self
    }

    /// Allow the four diagonal traversal directions. Combine with
    /// `cardinal()` to walk all eight.
    pub fn intercardinal(mut self) -> Self {
        self.directions = Some(self.directions.unwrap_or(0) | mask_of(&INTERCARDINAL));
        self
    }

    /// BFS radius; `0` means unlimited, flooding across matching tiles
    pub fn levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Keep only tiles of this type
    pub fn tile_type(mut self, kind: TileType) -> Self {
        self.kind_is = Some(kind);
        self
    }

    /// Keep only tiles not of this type
    pub fn not_tile_type(mut self, kind: TileType) -> Self {
        self.kind_not = Some(kind);
        self
    }

    /// Keep only tiles of this region
    pub fn region(mut self, region: i32) -> Self {
        self.region_is = Some(region);
        self
    }

    /// Keep only tiles not of this region
    pub fn not_region(mut self, region: i32) -> Self {
        self.region_not = Some(region);
        self
    }

    /// Collapse the result to at most one tile per distinct region id
    pub fn unique_regions(mut self) -> Self {
        self.unique_regions = true;
        self
    }

    /// Override the start tile
    pub fn start(mut self, x: usize, y: usize) -> Self {
        self.start = (x, y);
        self
    }

    fn matches(&self, tile: &Tile) -> bool {
        if let Some(kind) = self.kind_is {
            if tile.kind != kind {
                return false;
            }
        }
        if let Some(kind) = self.kind_not {
            if tile.kind == kind {
                return false;
            }
        }
        if let Some(region) = self.region_is {
            if tile.region != region {
                return false;
            }
        }
        if let Some(region) = self.region_not {
            if tile.region == region {
                return false;
            }
        }
        true
    }

    /// Materialize the query as a list of tile coordinates in BFS order
    pub fn get(&self) -> Vec<(usize, usize)> {
        let mask = self.directions.unwrap_or_else(|| mask_of(&CARDINAL));
        let unlimited = self.levels == 0;
        let grid = self.grid;

        let mut visited = vec![false; grid.width * grid.height];
        let mut result: Vec<(usize, usize)> = Vec::new();
        let mut frontier = vec![self.start];
        visited[self.start.1 * grid.width + self.start.0] = true;

        let mut depth = 0;
        while !frontier.is_empty() && (unlimited || depth < self.levels) {
            depth += 1;
            let mut next = Vec::new();
            for (x, y) in frontier {
                for &dir in ALL.iter().filter(|&&d| mask & (1 << d as usize) != 0) {
                    let Some((nx, ny)) = grid.offset(x, y, dir) else {
                        continue;
                    };
                    let idx = ny * grid.width + nx;
                    if visited[idx] {
                        continue;
                    }
                    visited[idx] = true;
                    let matched = self.matches(grid.get(nx, ny));
                    if matched {
                        result.push((nx, ny));
                    }
                    // An unlimited flood only spreads across matching
                    // tiles; a bounded radius walks everything inside it.
                    if matched || !unlimited {
                        next.push((nx, ny));
                    }
                }
            }
            frontier = next;
        }

        if self.unique_regions {
            let mut seen = std::collections::HashSet::new();
            result.retain(|&(x, y)| seen.insert(grid.get(x, y).region));
        }
        result
    }
}
