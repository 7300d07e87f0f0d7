/// Owned, bounds-checked tile grid.
///
/// The only 2-D tile container in the game. Consumers never index a
/// nested Vec directly; all access goes through coordinate methods
/// that reject out-of-range positions.

use super::tile::Tile;

#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, tile: Tile) -> Grid {
        Grid { width, height, cells: vec![tile; width * height] }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Signed-coordinate bounds test, for targets computed as
    /// position + direction delta.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        if x < self.width && y < self.height {
            Some(&mut self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = tile;
        }
    }

    /// Iterate all cells as ((x, y), tile).
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Tile)> + '_ {
        let w = self.width;
        self.cells.iter().enumerate().map(move |(i, &t)| ((i % w, i / w), t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_roundtrip() {
        let mut g = Grid::filled(4, 3, Tile::Mined);
        g.set(3, 2, Tile::ground(5));
        assert_eq!(g.get(3, 2), Some(Tile::ground(5)));
        assert_eq!(g.get(0, 0), Some(Tile::Mined));
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let mut g = Grid::filled(4, 3, Tile::Mined);
        assert_eq!(g.get(4, 0), None);
        assert_eq!(g.get(0, 3), None);
        assert!(g.get_mut(9, 9).is_none());
        g.set(4, 0, Tile::ground(1)); // silently ignored
        assert_eq!(g.cells().count(), 12);
        assert!(g.cells().all(|(_, t)| t == Tile::Mined));
    }

    #[test]
    fn signed_bounds() {
        let g = Grid::filled(4, 3, Tile::Mined);
        assert!(g.in_bounds(0, 0));
        assert!(g.in_bounds(3, 2));
        assert!(!g.in_bounds(-1, 0));
        assert!(!g.in_bounds(0, -1));
        assert!(!g.in_bounds(4, 0));
        assert!(!g.in_bounds(0, 3));
    }
}
