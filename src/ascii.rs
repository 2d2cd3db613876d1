//! ASCII rendering and export for generated dungeons
//!
//! Provides functions to render a dungeon as ASCII text and export it to a
//! file with a small metadata header.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::results::Results;
use crate::tile::TileType;

/// Get the ASCII character for a tile type
pub fn tile_char(kind: TileType) -> char {
    match kind {
        TileType::Wall => '#',
        TileType::Floor => '.',
        TileType::Door => '+',
        TileType::Shaft => '>',
        TileType::Stairs => '<',
    }
}

/// Render the tile matrix as one character per tile, row by row
pub fn render(results: &Results) -> String {
    let mut out = String::with_capacity((results.width() + 1) * results.height());
    for y in 0..results.height() {
        for x in 0..results.width() {
            out.push(tile_char(results.grid.get(x, y).kind));
        }
        out.push('\n');
    }
    out
}

/// Region view: floors keyed by region id, walls and doors as in `render`.
/// Useful for eyeballing the region partition.
pub fn render_regions(results: &Results) -> String {
    const KEYS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = String::with_capacity((results.width() + 1) * results.height());
    for y in 0..results.height() {
        for x in 0..results.width() {
            let tile = results.grid.get(x, y);
            if tile.kind == TileType::Floor && tile.region >= 0 {
                out.push(KEYS[tile.region as usize % KEYS.len()] as char);
            } else {
                out.push(tile_char(tile.kind));
            }
        }
        out.push('\n');
    }
    out
}

/// Export the map as ASCII text with a metadata header
pub fn export_ascii(results: &Results, path: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(
        file,
        "=== DUNGEON MAP ({}x{}) seed={} ===",
        results.width(),
        results.height(),
        results.seed
    )?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(
        file,
        "Rooms: {} | Regions: {} | Doors: {}",
        results.rooms.len(),
        results.region_count(),
        results.door_count()
    )?;
    writeln!(file)?;
    writeln!(file, "LEGEND:")?;
    writeln!(file, "  # = wall    . = floor    + = door")?;
    writeln!(file)?;
    write!(file, "{}", render(results))?;
    Ok(())
}
