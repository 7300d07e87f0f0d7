/// Level generator.
///
/// Every cell outside the fixed 5x5 spawn square is a Bernoulli draw:
/// ore (level's mineral, mineral HP) with probability `ore_chance`,
/// otherwise ground (level's ground HP). The spawn square is cleared
/// to mined tiles. Levels past the first get an open prev-door portal
/// at the spawn center. Exactly one locked next door lands on a
/// uniformly chosen non-spawn, non-door cell.

use rand::Rng;

use crate::domain::grid::Grid;
use crate::domain::mineral::{self, Mineral};
use crate::domain::tile::Tile;

pub const GRID_WIDTH: usize = 20;
pub const GRID_HEIGHT: usize = 20;
pub const SPAWN_SIZE: usize = 5;

const NEXT_DOOR_BASE_HP: u32 = 50;
const NEXT_DOOR_HP_PER_LEVEL: u32 = 20;

/// A generated level: the grid plus where the player enters it.
#[derive(Clone, Debug)]
pub struct Level {
    pub grid: Grid,
    pub spawn: (usize, usize),
}

/// Geometric center of the grid; also the spawn point and (for
/// levels above the first) the portal location.
pub fn spawn_center() -> (usize, usize) {
    (GRID_WIDTH / 2, GRID_HEIGHT / 2)
}

/// Is (x, y) inside the spawn square?
pub fn in_spawn_area(x: usize, y: usize) -> bool {
    let (cx, cy) = spawn_center();
    let half = SPAWN_SIZE / 2;
    x + half >= cx && x <= cx + half && y + half >= cy && y <= cy + half
}

pub fn hp_for_next_door(level: u32) -> u32 {
    NEXT_DOOR_BASE_HP + level * NEXT_DOOR_HP_PER_LEVEL
}

pub fn generate(level: u32, ore_chance: f64, rng: &mut impl Rng) -> Level {
    let mineral = Mineral::for_level(level);
    let ground_hp = mineral::ground_hp(level);

    let mut grid = Grid::filled(GRID_WIDTH, GRID_HEIGHT, Tile::Mined);
    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH {
            if in_spawn_area(x, y) {
                continue; // spawn square stays mined
            }
            let tile = if rng.gen_bool(ore_chance) {
                Tile::ore(mineral)
            } else {
                Tile::ground(ground_hp)
            };
            grid.set(x, y, tile);
        }
    }

    let spawn = spawn_center();
    if level > 1 {
        grid.set(spawn.0, spawn.1, Tile::prev_door());
    }

    place_next_door(&mut grid, level, rng);

    Level { grid, spawn }
}

/// Put the locked next door on a uniformly chosen eligible cell.
/// With no eligible cell the level simply has no forward door; that
/// cannot happen at the fixed grid size but is handled rather than
/// assumed away.
fn place_next_door(grid: &mut Grid, level: u32, rng: &mut impl Rng) {
    let candidates: Vec<(usize, usize)> = grid
        .cells()
        .filter(|&((x, y), tile)| !in_spawn_area(x, y) && !tile.is_door())
        .map(|(pos, _)| pos)
        .collect();

    if candidates.is_empty() {
        return;
    }
    let (x, y) = candidates[rng.gen_range(0..candidates.len())];
    grid.set(x, y, Tile::locked_next_door(hp_for_next_door(level)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tile::{DoorKind, DoorState};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0xD1660)
    }

    #[test]
    fn spawn_area_is_a_centered_5x5() {
        // 20x20 grid: center (10,10), square spans rows/cols 8..=12
        assert!(in_spawn_area(10, 10));
        assert!(in_spawn_area(8, 8));
        assert!(in_spawn_area(12, 12));
        assert!(!in_spawn_area(7, 10));
        assert!(!in_spawn_area(10, 13));
        assert!(!in_spawn_area(0, 0));
    }

    #[test]
    fn spawn_square_is_cleared() {
        for level in [1, 2, 5, 10] {
            let lvl = generate(level, 0.2, &mut rng());
            for ((x, y), tile) in lvl.grid.cells() {
                if in_spawn_area(x, y) && (x, y) != spawn_center() {
                    assert_eq!(tile, Tile::Mined, "level {level} cell ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn level_one_has_no_portal() {
        let lvl = generate(1, 0.2, &mut rng());
        let (cx, cy) = spawn_center();
        assert_eq!(lvl.grid.get(cx, cy), Some(Tile::Mined));
    }

    #[test]
    fn deeper_levels_have_an_open_portal_at_center() {
        for level in [2, 3, 10] {
            let lvl = generate(level, 0.2, &mut rng());
            let (cx, cy) = spawn_center();
            assert_eq!(lvl.grid.get(cx, cy), Some(Tile::prev_door()), "level {level}");
        }
    }

    #[test]
    fn exactly_one_locked_next_door_outside_spawn() {
        for level in 1..=10 {
            let lvl = generate(level, 0.2, &mut rng());
            let doors: Vec<_> = lvl
                .grid
                .cells()
                .filter(|&(_, t)| {
                    matches!(t, Tile::Door { kind: DoorKind::Next, .. })
                })
                .collect();
            assert_eq!(doors.len(), 1, "level {level}");
            let ((x, y), door) = doors[0];
            assert!(!in_spawn_area(x, y));
            let expected = 50 + 20 * level;
            assert_eq!(
                door,
                Tile::Door {
                    kind: DoorKind::Next,
                    state: DoorState::Locked,
                    hp: expected,
                    max_hp: expected,
                }
            );
        }
    }

    #[test]
    fn cells_outside_spawn_are_mineable_or_door() {
        let lvl = generate(3, 0.2, &mut rng());
        let mineral = Mineral::for_level(3);
        for ((x, y), tile) in lvl.grid.cells() {
            if in_spawn_area(x, y) {
                continue;
            }
            match tile {
                Tile::Ground { hp, max_hp } => {
                    assert_eq!((hp, max_hp), (7, 7));
                }
                Tile::Ore { mineral: m, hp, max_hp } => {
                    assert_eq!(m, mineral);
                    assert_eq!((hp, max_hp), (mineral.ore_hp(), mineral.ore_hp()));
                }
                Tile::Door { kind: DoorKind::Next, .. } => {}
                other => panic!("unexpected tile {other:?} at ({x},{y})"),
            }
        }
    }

    #[test]
    fn ore_chance_extremes() {
        // p=0: no ore anywhere
        let lvl = generate(1, 0.0, &mut rng());
        assert!(!lvl.grid.cells().any(|(_, t)| matches!(t, Tile::Ore { .. })));
        // p=1: everything outside spawn is ore except the next door
        let lvl = generate(1, 1.0, &mut rng());
        let ore = lvl.grid.cells().filter(|(_, t)| matches!(t, Tile::Ore { .. })).count();
        assert_eq!(ore, GRID_WIDTH * GRID_HEIGHT - SPAWN_SIZE * SPAWN_SIZE - 1);
    }
}
