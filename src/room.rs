//! Room rectangles

use serde::Serialize;

/// An axis-aligned room rectangle.
///
/// Accepted rooms have odd width and height and sit on the odd lattice, with
/// at least one wall tile between the room and the grid edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// True if the interior contains the tile at (x, y)
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// True if the two interiors share at least one tile
    pub fn overlaps(&self, other: &Room) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// True if the rectangles inflated by one tile on every side overlap,
    /// i.e. there is no full wall tile left between the two rooms.
    pub fn touches(&self, other: &Room) -> bool {
        self.inflated().overlaps(&other.inflated())
    }

    /// Iterate the interior tiles row by row
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (x0, y0, w, h) = (self.x, self.y, self.width, self.height);
        (y0..y0 + h).flat_map(move |y| (x0..x0 + w).map(move |x| (x, y)))
    }

    fn inflated(&self) -> Room {
        Room {
            x: self.x.saturating_sub(1),
            y: self.y.saturating_sub(1),
            width: self.width + if self.x == 0 { 1 } else { 2 },
            height: self.height + if self.y == 0 { 1 } else { 2 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let room = Room::new(1, 1, 3, 3);
        assert!(room.contains(1, 1));
        assert!(room.contains(3, 3));
        assert!(!room.contains(4, 1));
        assert!(!room.contains(1, 4));
        assert!(!room.contains(0, 2));
    }

    #[test]
    fn test_overlaps() {
        let a = Room::new(1, 1, 3, 3);
        assert!(a.overlaps(&Room::new(3, 3, 3, 3)));
        assert!(!a.overlaps(&Room::new(4, 1, 3, 3)));
        assert!(!a.overlaps(&Room::new(1, 4, 3, 3)));
    }

    #[test]
    fn test_rooms_with_single_wall_between_touch() {
        // Interiors end at x=3 and start at x=5: one wall column at x=4
        let a = Room::new(1, 1, 3, 3);
        let b = Room::new(5, 1, 3, 3);
        assert!(a.touches(&b));
        assert!(b.touches(&a));
    }

    #[test]
    fn test_rooms_with_two_walls_between_do_not_touch() {
        let a = Room::new(1, 1, 3, 3);
        let b = Room::new(6, 1, 3, 3);
        assert!(!a.touches(&b));
    }

    #[test]
    fn test_diagonal_touch() {
        let a = Room::new(1, 1, 3, 3);
        let b = Room::new(4, 4, 3, 3);
        assert!(a.touches(&b), "diagonally adjacent corners touch after inflation");
        // One diagonal wall between the corners still counts as touching
        assert!(a.touches(&Room::new(5, 5, 3, 3)));
        assert!(!a.touches(&Room::new(6, 6, 3, 3)));
    }

    #[test]
    fn test_tiles_cover_interior() {
        let room = Room::new(2, 3, 3, 2);
        let tiles: Vec<(usize, usize)> = room.tiles().collect();
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0], (2, 3));
        assert_eq!(tiles[5], (4, 4));
        assert!(tiles.iter().all(|&(x, y)| room.contains(x, y)));
    }
}
