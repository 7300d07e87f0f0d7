/// The player: position, facing, and the collected-mineral tally.
/// One player persists across all levels.

use super::mineral::Mineral;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Grid delta for one step in this direction. Y grows downward.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Stable index for per-direction state (cooldown slots).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: usize,
    pub y: usize,
    pub facing: Direction,
    /// Collected count per mineral, indexed by `Mineral::index()`.
    /// Monotonically non-decreasing.
    materials: [u32; Mineral::ALL.len()],
}

impl Player {
    pub fn new(x: usize, y: usize) -> Player {
        Player { x, y, facing: Direction::Up, materials: [0; Mineral::ALL.len()] }
    }

    /// Add one unit of a mineral. Returns the new total.
    pub fn collect(&mut self, mineral: Mineral) -> u32 {
        let slot = &mut self.materials[mineral.index()];
        *slot += 1;
        *slot
    }

    pub fn count(&self, mineral: Mineral) -> u32 {
        self.materials[mineral.index()]
    }

    pub fn total_collected(&self) -> u32 {
        self.materials.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_cardinal() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn direction_indices_are_distinct() {
        let mut seen = [false; 4];
        for d in Direction::ALL {
            assert!(!seen[d.index()]);
            seen[d.index()] = true;
        }
    }

    #[test]
    fn collect_tallies_per_mineral() {
        let mut p = Player::new(0, 0);
        assert_eq!(p.count(Mineral::Copper), 0);
        assert_eq!(p.collect(Mineral::Copper), 1);
        assert_eq!(p.collect(Mineral::Copper), 2);
        assert_eq!(p.collect(Mineral::Ruby), 1);
        assert_eq!(p.count(Mineral::Copper), 2);
        assert_eq!(p.count(Mineral::Ruby), 1);
        assert_eq!(p.total_collected(), 3);
    }
}
