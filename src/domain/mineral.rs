/// The ten minerals and the per-level difficulty tables.
///
/// Each level yields exactly one mineral; deeper levels pair harder
/// ore with harder ground. The tables are fixed game data, not tuned
/// at runtime.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mineral {
    Copper,
    Iron,
    Gold,
    Emerald,
    Sapphire,
    Ruby,
    Diamond,
    Amethyst,
    Topaz,
    Obsidian,
}

impl Mineral {
    /// Canonical inventory order. Also the level order: level N mines ALL[N-1].
    pub const ALL: [Mineral; 10] = [
        Mineral::Copper,
        Mineral::Iron,
        Mineral::Gold,
        Mineral::Emerald,
        Mineral::Sapphire,
        Mineral::Ruby,
        Mineral::Diamond,
        Mineral::Amethyst,
        Mineral::Topaz,
        Mineral::Obsidian,
    ];

    /// The mineral mined on a given level (1-based). Levels past the
    /// table mine the deepest mineral.
    pub fn for_level(level: u32) -> Mineral {
        let idx = (level.max(1) as usize - 1).min(Self::ALL.len() - 1);
        Self::ALL[idx]
    }

    /// Base HP of an ore vein of this mineral.
    pub fn ore_hp(self) -> u32 {
        match self {
            Mineral::Copper => 3,
            Mineral::Iron => 5,
            Mineral::Gold => 70,
            Mineral::Emerald => 100,
            Mineral::Sapphire => 120,
            Mineral::Ruby => 150,
            Mineral::Diamond => 180,
            Mineral::Amethyst => 210,
            Mineral::Topaz => 250,
            Mineral::Obsidian => 300,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mineral::Copper => "Copper",
            Mineral::Iron => "Iron",
            Mineral::Gold => "Gold",
            Mineral::Emerald => "Emerald",
            Mineral::Sapphire => "Sapphire",
            Mineral::Ruby => "Ruby",
            Mineral::Diamond => "Diamond",
            Mineral::Amethyst => "Amethyst",
            Mineral::Topaz => "Topaz",
            Mineral::Obsidian => "Obsidian",
        }
    }

    /// Stable index into per-mineral count arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// HP of a plain ground tile on a given level. The jump at level 4
/// is intentional: early levels are a tutorial.
pub fn ground_hp(level: u32) -> u32 {
    match level {
        0 | 1 => 5,
        2 => 6,
        3 => 7,
        4 => 85,
        5 => 100,
        6 => 120,
        7 => 145,
        8 => 175,
        9 => 210,
        _ => 250,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_mineral_mapping() {
        assert_eq!(Mineral::for_level(1), Mineral::Copper);
        assert_eq!(Mineral::for_level(2), Mineral::Iron);
        assert_eq!(Mineral::for_level(10), Mineral::Obsidian);
        // Past the table: deepest mineral
        assert_eq!(Mineral::for_level(99), Mineral::Obsidian);
        // Defensive: level 0 behaves like level 1
        assert_eq!(Mineral::for_level(0), Mineral::Copper);
    }

    #[test]
    fn ore_hp_table() {
        assert_eq!(Mineral::Copper.ore_hp(), 3);
        assert_eq!(Mineral::Iron.ore_hp(), 5);
        assert_eq!(Mineral::Gold.ore_hp(), 70);
        assert_eq!(Mineral::Obsidian.ore_hp(), 300);
    }

    #[test]
    fn ground_hp_table() {
        assert_eq!(ground_hp(1), 5);
        assert_eq!(ground_hp(3), 7);
        assert_eq!(ground_hp(4), 85);
        assert_eq!(ground_hp(10), 250);
        assert_eq!(ground_hp(11), 250);
    }

    #[test]
    fn canonical_order_is_stable() {
        assert_eq!(Mineral::ALL.len(), 10);
        assert_eq!(Mineral::ALL[0].index(), 0);
        assert_eq!(Mineral::ALL[9].index(), 9);
        assert_eq!(Mineral::ALL[0].name(), "Copper");
        assert_eq!(Mineral::ALL[9].name(), "Obsidian");
    }
}
