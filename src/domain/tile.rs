/// Tile variants and their properties.
/// HP and resource fields exist only on variants where they are
/// meaningful, so invalid combinations cannot be represented.

use super::mineral::Mineral;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DoorKind {
    /// Gate to the following level. Starts locked, opens after damage.
    Next,
    /// Portal back to the previous level. Always open, never damaged.
    Prev,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DoorState {
    Locked,
    Open,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    /// Mineable, yields nothing.
    Ground { hp: u32, max_hp: u32 },
    /// Mineable, yields one unit of `mineral` when depleted.
    Ore { mineral: Mineral, hp: u32, max_hp: u32 },
    /// Depleted. Walkable, permanent for the level's lifetime.
    Mined,
    Door { kind: DoorKind, state: DoorState, hp: u32, max_hp: u32 },
}

impl Tile {
    pub fn ground(hp: u32) -> Tile {
        Tile::Ground { hp, max_hp: hp }
    }

    pub fn ore(mineral: Mineral) -> Tile {
        let hp = mineral.ore_hp();
        Tile::Ore { mineral, hp, max_hp: hp }
    }

    pub fn locked_next_door(hp: u32) -> Tile {
        Tile::Door { kind: DoorKind::Next, state: DoorState::Locked, hp, max_hp: hp }
    }

    /// Prev doors are open from creation and carry no HP.
    pub fn prev_door() -> Tile {
        Tile::Door { kind: DoorKind::Prev, state: DoorState::Open, hp: 0, max_hp: 0 }
    }

    /// Can the player stand on this tile?
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Mined)
    }

    /// Does this tile take damage from a directional action?
    pub fn is_damageable(self) -> bool {
        matches!(
            self,
            Tile::Ground { .. }
                | Tile::Ore { .. }
                | Tile::Door { kind: DoorKind::Next, state: DoorState::Locked, .. }
        )
    }

    pub fn is_door(self) -> bool {
        matches!(self, Tile::Door { .. })
    }

    /// Remaining/maximum HP, for HP-bar rendering. `None` for tiles
    /// with no health (Mined, prev doors, open doors).
    pub fn hp_bar(self) -> Option<(u32, u32)> {
        match self {
            Tile::Ground { hp, max_hp } | Tile::Ore { hp, max_hp, .. } => Some((hp, max_hp)),
            Tile::Door { state: DoorState::Locked, hp, max_hp, .. } if max_hp > 0 => {
                Some((hp, max_hp))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ore_starts_at_full_hp() {
        let t = Tile::ore(Mineral::Iron);
        assert_eq!(t.hp_bar(), Some((5, 5)));
        assert!(t.is_damageable());
        assert!(!t.is_walkable());
    }

    #[test]
    fn prev_door_is_open_and_immune() {
        let t = Tile::prev_door();
        assert_eq!(
            t,
            Tile::Door { kind: DoorKind::Prev, state: DoorState::Open, hp: 0, max_hp: 0 }
        );
        assert!(!t.is_damageable());
        assert_eq!(t.hp_bar(), None);
    }

    #[test]
    fn locked_next_door_is_damageable() {
        let t = Tile::locked_next_door(70);
        assert!(t.is_damageable());
        assert_eq!(t.hp_bar(), Some((70, 70)));
    }

    #[test]
    fn mined_is_the_only_walkable_tile() {
        assert!(Tile::Mined.is_walkable());
        assert!(!Tile::ground(5).is_walkable());
        assert!(!Tile::prev_door().is_walkable());
        assert_eq!(Tile::Mined.hp_bar(), None);
    }
}
