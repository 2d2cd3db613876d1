//! Dungeon generation library
//!
//! A procedural 2D grid-dungeon generator featuring:
//! - Seeded, fully reproducible generation (slug-style string seeds)
//! - Room placement on an odd lattice with non-overlap constraints
//! - Growing-tree maze corridors with a winding bias
//! - Region labeling and door placement between adjacent regions
//! - Optional dead-end pruning
//! - ASCII and PNG map export

pub mod ascii;
pub mod direction;
pub mod error;
pub mod export;
pub mod generator;
pub mod grid;
pub mod query;
pub mod region;
pub mod results;
pub mod rng;
pub mod room;
pub mod tile;
