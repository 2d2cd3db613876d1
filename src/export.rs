//! PNG export of dungeon maps

use image::{ImageBuffer, Rgb, RgbImage};

use crate::results::Results;
use crate::tile::TileType;

/// Get the paint color for a tile type
pub fn tile_color(kind: TileType) -> [u8; 3] {
    match kind {
        TileType::Wall => [38, 36, 44],
        TileType::Floor => [203, 194, 170],
        TileType::Door => [166, 94, 46],
        TileType::Shaft => [92, 96, 112],
        TileType::Stairs => [228, 214, 130],
    }
}

/// Export the dungeon as a PNG, painting each tile as a `scale` x `scale`
/// pixel block
pub fn export_png(results: &Results, path: &str, scale: usize) -> Result<(), image::ImageError> {
    let scale = scale.max(1) as u32;
    let mut img: RgbImage = ImageBuffer::new(
        results.width() as u32 * scale,
        results.height() as u32 * scale,
    );

    for y in 0..results.height() {
        for x in 0..results.width() {
            let color = Rgb(tile_color(results.grid.get(x, y).kind));
            for py in 0..scale {
                for px in 0..scale {
                    img.put_pixel(x as u32 * scale + px, y as u32 * scale + py, color);
                }
            }
        }
    }

    img.save(path)
}
