//! The generation pipeline
//!
//! Orchestrates `fill -> add_rooms -> grow_maze xN -> connect_regions ->
//! remove_dead_ends?` over a single grid, one region counter and one seeded
//! PRNG. Every stochastic decision goes through the PRNG in a fixed order,
//! so a `(stage, options, seed)` triple reproduces the dungeon exactly.

use std::collections::BTreeMap;

use crate::direction::{Direction, CARDINAL};
use crate::error::GenerationError;
use crate::grid::Grid;
use crate::region::{RegionCounter, NO_REGION};
use crate::results::Results;
use crate::rng::DungeonRng;
use crate::room::Room;
use crate::tile::{RegionType, TileType};

const MIN_STAGE_DIMENSION: usize = 5;

/// Iteration cap for a single maze-growth call. The outer sweep restarts
/// growth at every remaining odd cell, so coverage never depends on it.
const MAZE_GROWTH_CAP: usize = 500;

/// Generation tunables
#[derive(Clone, Debug)]
pub struct Options {
    /// Attempts and inverse acceptance chance when placing doors between a
    /// pair of regions
    pub door_chance: u32,
    /// Upper bound on the doors joining one pair of regions
    pub max_doors: u32,
    /// Number of room placement attempts
    pub room_tries: u32,
    /// Raises the room size draw ceiling
    pub room_extra_size: u32,
    /// Probability (0-100) that a corridor keeps its direction when it can
    pub winding_percent: u32,
    /// Scale factor applied to the normalized stage dimensions
    pub multiplier: usize,
    /// Prune corridors that lead nowhere
    pub remove_dead_ends: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            door_chance: 50,
            max_doors: 5,
            room_tries: 50,
            room_extra_size: 0,
            winding_percent: 50,
            multiplier: 1,
            remove_dead_ends: false,
        }
    }
}

/// The stage to build: requested dimensions and an optional seed string
#[derive(Clone, Debug, Default)]
pub struct Stage {
    pub width: usize,
    pub height: usize,
    /// Slug-style seed; a random slug is generated when absent
    pub seed: Option<String>,
}

impl Stage {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, seed: None }
    }

    pub fn with_seed(width: usize, height: usize, seed: impl Into<String>) -> Self {
        Self {
            width,
            height,
            seed: Some(seed.into()),
        }
    }
}

/// Build a dungeon with default options
pub fn build(stage: Stage) -> Result<Results, GenerationError> {
    build_with_options(stage, Options::default())
}

/// Build a dungeon with explicit options
pub fn build_with_options(stage: Stage, options: Options) -> Result<Results, GenerationError> {
    let mut generator = Generator::new(stage, options)?;
    generator.run();
    Ok(generator.into_results())
}

struct Generator {
    options: Options,
    multiplier: usize,
    grid: Grid,
    rng: DungeonRng,
    regions: RegionCounter,
    rooms: Vec<Room>,
}

impl Generator {
    /// Validate and normalize the stage, then fill the grid with walls
    fn new(stage: Stage, options: Options) -> Result<Self, GenerationError> {
        if stage.width < MIN_STAGE_DIMENSION {
            return Err(GenerationError::InvalidDimension {
                dimension: "width",
                value: stage.width,
            });
        }
        if stage.height < MIN_STAGE_DIMENSION {
            return Err(GenerationError::InvalidDimension {
                dimension: "height",
                value: stage.height,
            });
        }

        // Even dimensions are raised to the next odd number so the odd
        // lattice reaches every side, then both are scaled.
        let multiplier = options.multiplier.max(1);
        let mut width = stage.width;
        let mut height = stage.height;
        if width % 2 == 0 {
            width += 1;
        }
        if height % 2 == 0 {
            height += 1;
        }
        width *= multiplier;
        height *= multiplier;

        let rng = match stage.seed {
            Some(seed) => DungeonRng::from_seed(seed),
            None => DungeonRng::from_random_slug(),
        };

        Ok(Self {
            options,
            multiplier,
            grid: Grid::filled(width, height, TileType::Wall),
            rng,
            regions: RegionCounter::new(),
            rooms: Vec::new(),
        })
    }

    fn run(&mut self) {
        self.add_rooms();
        self.grow_mazes();
        self.connect_regions();
        if self.options.remove_dead_ends {
            self.remove_dead_ends();
        }
    }

    fn into_results(self) -> Results {
        Results::new(self.rooms, self.grid, self.rng.seed().to_string())
    }

    fn carve(&mut self, x: usize, y: usize, region: i32, kind: RegionType) {
        let tile = self.grid.get_mut(x, y);
        tile.kind = TileType::Floor;
        tile.region = region;
        tile.region_type = Some(kind);
    }

    // ---- rooms ----------------------------------------------------------

    /// Rejection-sample rooms onto the odd lattice. Every attempt makes the
    /// same five draws (size, rectangularity, axis, x, y) whether or not it
    /// is accepted, keeping the stream aligned.
    fn add_rooms(&mut self) {
        let extra = self.options.room_extra_size as i32;
        for _ in 0..self.options.room_tries {
            let size = self.rng.int_between(1, 3 + extra) * 2 + 1;
            let rectangularity = self.rng.int_between(0, 1 + size / 2) * 2;
            let mut width = size;
            let mut height = size;
            // Extend one axis only, which keeps aspect ratios in check
            if self.rng.one_in(2) {
                width += rectangularity;
            } else {
                height += rectangularity;
            }
            width = width.min(self.outer_limit(self.grid.width));
            height = height.min(self.outer_limit(self.grid.height));

            let grid_width = self.grid.width as i32;
            let grid_height = self.grid.height as i32;
            let mut x = self.rng.int_between(0, (grid_width - width) / 2) * 2 + 1;
            let mut y = self.rng.int_between(0, (grid_height - height) / 2) * 2 + 1;
            if x + width >= grid_width {
                x = (grid_width - width - 1).max(1);
            }
            if y + height >= grid_height {
                y = (grid_height - height - 1).max(1);
            }

            let room = Room::new(x as usize, y as usize, width as usize, height as usize);
            if self.rooms.iter().any(|existing| existing.touches(&room)) {
                continue;
            }

            let region = self.regions.start();
            for (tx, ty) in room.tiles() {
                self.carve(tx, ty, region, RegionType::Room);
            }
            self.rooms.push(room);
        }
    }

    /// Largest room extent allowed along a stage dimension, kept odd
    fn outer_limit(&self, dimension: usize) -> i32 {
        let mut limit = dimension as i32 - 4 * self.multiplier as i32;
        if dimension > 10 {
            limit = limit.min((dimension as i32 + 1) / 2);
        }
        limit = limit.max(1);
        if limit % 2 == 0 {
            limit -= 1;
        }
        limit
    }

    // ---- mazes ----------------------------------------------------------

    /// Run maze growth from every odd cell still walled in
    fn grow_mazes(&mut self) {
        let mut y = 1;
        while y < self.grid.height {
            let mut x = 1;
            while x < self.grid.width {
                if self.grid.get(x, y).kind != TileType::Floor {
                    self.grow_maze(x, y);
                }
                x += 2;
            }
            y += 2;
        }
    }

    /// Growing-tree maze carving from one lattice cell
    fn grow_maze(&mut self, start_x: usize, start_y: usize) {
        // Starting against existing floor would double-carve; the cell
        // stays a wall and can still serve as a connector site.
        let open = self
            .grid
            .neighbors(start_x, start_y)
            .cardinal()
            .intercardinal()
            .tile_type(TileType::Floor)
            .get();
        if !open.is_empty() {
            return;
        }

        let winding = self.options.winding_percent as i32;
        let region = self.regions.start();
        self.carve(start_x, start_y, region, RegionType::Corridor);

        let mut cells: Vec<(usize, usize)> = vec![(start_x, start_y)];
        let mut last_dir: Option<Direction> = None;
        let mut iterations = 0;

        while iterations < MAZE_GROWTH_CAP {
            let Some(&cell) = cells.last() else { break };
            iterations += 1;

            let candidates: Vec<Direction> = CARDINAL
                .iter()
                .copied()
                .filter(|&dir| self.can_carve(cell, dir))
                .collect();

            if candidates.is_empty() {
                cells.pop();
                last_dir = None;
                continue;
            }

            let dir = match last_dir {
                // Keep going straight with probability windingPercent/100
                Some(last)
                    if candidates.contains(&last)
                        && self.rng.int_between(1, 100) <= winding =>
                {
                    last
                }
                _ => {
                    // Turn whenever an alternative exists
                    let pool: Vec<Direction> = match last_dir {
                        Some(last) if candidates.len() > 1 => {
                            candidates.iter().copied().filter(|&d| d != last).collect()
                        }
                        _ => candidates,
                    };
                    pool[self.rng.int_between(0, pool.len() as i32 - 1) as usize]
                }
            };

            let (dx, dy) = dir.offset();
            let wall_x = (cell.0 as i64 + dx as i64) as usize;
            let wall_y = (cell.1 as i64 + dy as i64) as usize;
            let dest_x = (cell.0 as i64 + 2 * dx as i64) as usize;
            let dest_y = (cell.1 as i64 + 2 * dy as i64) as usize;
            self.carve(wall_x, wall_y, region, RegionType::Corridor);
            self.carve(dest_x, dest_y, region, RegionType::Corridor);
            cells.push((dest_x, dest_y));
            last_dir = Some(dir);
        }
    }

    /// A direction is carveable when the cell three steps out is still an
    /// in-bounds wall and the lattice cell two steps out is not yet floor
    fn can_carve(&self, cell: (usize, usize), dir: Direction) -> bool {
        let Some((end_x, end_y)) = self.grid.step(cell.0, cell.1, dir, 3) else {
            return false;
        };
        if self.grid.get(end_x, end_y).kind != TileType::Wall {
            return false;
        }
        let (dx, dy) = dir.offset();
        let dest_x = (cell.0 as i64 + 2 * dx as i64) as usize;
        let dest_y = (cell.1 as i64 + 2 * dy as i64) as usize;
        self.grid.get(dest_x, dest_y).kind != TileType::Floor
    }

    // ---- connectors -----------------------------------------------------

    /// Join every pair of adjacent regions through at least one door
    fn connect_regions(&mut self) {
        // Untagged walls bordering two or more regions, grouped by the
        // sorted set of region ids they border. BTreeMap keeps group
        // order independent of hashing, which the PRNG stream relies on.
        let mut groups: BTreeMap<Vec<i32>, Vec<(usize, usize)>> = BTreeMap::new();
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                if self.grid.get(x, y).kind != TileType::Wall {
                    continue;
                }
                let mut bordered: Vec<i32> = self
                    .grid
                    .neighbors(x, y)
                    .not_region(NO_REGION)
                    .unique_regions()
                    .get()
                    .into_iter()
                    .map(|(nx, ny)| self.grid.get(nx, ny).region)
                    .collect();
                if bordered.len() < 2 {
                    continue;
                }
                bordered.sort_unstable();
                groups.entry(bordered).or_default().push((x, y));
            }
        }

        let door_chance = self.options.door_chance as i32;
        let max_doors = self.options.max_doors as i32;

        for (key, connectors) in groups {
            let target = self.rng.int_between(1, max_doors);
            let mut placed = 0;
            let mut failed_by_chance: Vec<(usize, usize)> = Vec::new();

            for _ in 0..door_chance {
                if placed >= target {
                    break;
                }
                let pick = self.rng.int_between(0, connectors.len() as i32 - 1) as usize;
                let (x, y) = connectors[pick];
                if self.grid.get(x, y).kind == TileType::Door {
                    continue;
                }
                if is_corner(&self.grid, x, y)
                    || has_adjacent_door(&self.grid, x, y)
                    || is_at_end(&self.grid, x, y)
                {
                    continue;
                }
                if self.rng.one_in(door_chance) {
                    self.grid.get_mut(x, y).kind = TileType::Door;
                    placed += 1;
                } else {
                    failed_by_chance.push((x, y));
                }
            }

            // Every group must end up with a door; force one if chance
            // never cooperated.
            if placed == 0 {
                let pool: &[(usize, usize)] = if failed_by_chance.is_empty() {
                    &connectors
                } else {
                    &failed_by_chance
                };
                if pool.is_empty() {
                    let ids: Vec<String> = key.iter().map(|id| id.to_string()).collect();
                    eprintln!(
                        "warning: failed to add doors between regions {}",
                        ids.join("-")
                    );
                } else {
                    let pick = self.rng.int_between(0, pool.len() as i32 - 1) as usize;
                    let (x, y) = pool[pick];
                    self.grid.get_mut(x, y).kind = TileType::Door;
                }
            }
        }
    }

    // ---- dead ends ------------------------------------------------------

    /// Repeatedly wall in corridor tiles with at most one open side until a
    /// full pass changes nothing. Room interiors are never touched.
    fn remove_dead_ends(&mut self) {
        loop {
            let mut changed = false;
            for y in 0..self.grid.height {
                for x in 0..self.grid.width {
                    if self.grid.get(x, y).kind == TileType::Wall {
                        continue;
                    }
                    if self.rooms.iter().any(|room| room.contains(x, y)) {
                        continue;
                    }
                    let exits = self
                        .grid
                        .neighbors(x, y)
                        .not_tile_type(TileType::Wall)
                        .get()
                        .len();
                    if exits <= 1 {
                        self.grid.get_mut(x, y).reset();
                        changed = true;
                    }
                }
            }
            if !changed {
                return;
            }
        }
    }
}

/// A concave corner: exactly one of the four diagonal quadrants has both of
/// its cardinal sides open. Doors on these look wrong.
pub(crate) fn is_corner(grid: &Grid, x: usize, y: usize) -> bool {
    let floor = |dir: Direction| {
        grid.neighbor(x, y, dir)
            .map(|tile| tile.kind == TileType::Floor)
            .unwrap_or(false)
    };
    let quadrants = [
        (Direction::North, Direction::East),
        (Direction::East, Direction::South),
        (Direction::South, Direction::West),
        (Direction::West, Direction::North),
    ];
    quadrants
        .iter()
        .filter(|&&(a, b)| floor(a) && floor(b))
        .count()
        == 1
}

/// The tip of a corridor: exactly one cardinally adjacent floor tile
pub(crate) fn is_at_end(grid: &Grid, x: usize, y: usize) -> bool {
    grid.neighbors(x, y).tile_type(TileType::Floor).get().len() == 1
}

/// Any door on the eight surrounding tiles
fn has_adjacent_door(grid: &Grid, x: usize, y: usize) -> bool {
    !grid
        .neighbors(x, y)
        .cardinal()
        .intercardinal()
        .tile_type(TileType::Door)
        .get()
        .is_empty()
}
