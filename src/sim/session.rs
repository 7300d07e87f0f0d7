/// GameSession: the single owner of all mutable game state.
///
/// Holds the registry, the checked-out active level, the player, and
/// the portal-exit flag. `transition()` is the only code that changes
/// the current level or swaps the active grid; the action resolver
/// mutates tiles only through `grid_mut()`. The renderer reads and
/// never writes.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::domain::grid::Grid;
use crate::domain::player::Player;
use super::event::GameEvent;
use super::gen::Level;
use super::registry::LevelRegistry;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Title,
    Playing,
    /// Terminal: the game freezes on the completion screen.
    GameComplete,
}

pub struct GameSession {
    registry: LevelRegistry,
    active: Level,
    pub current_level: u32,
    pub max_level: u32,
    pub player: Player,
    /// Portal-exit flag: has the player stepped off the spawn center
    /// since entering this level? Gates the prev-door transition.
    pub left_spawn: bool,
    pub inventory_open: bool,
    pub phase: Phase,
    pub message: String,
    pub message_timer: u32,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> GameSession {
        let rng = match config.world.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut registry = LevelRegistry::new(config.world.ore_chance, rng);
        let active = registry.checkout(1);
        let (sx, sy) = active.spawn;
        GameSession {
            registry,
            active,
            current_level: 1,
            max_level: config.world.max_level,
            player: Player::new(sx, sy),
            left_spawn: false,
            inventory_open: false,
            phase: Phase::Title,
            message: String::new(),
            message_timer: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.active.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.active.grid
    }

    #[inline]
    pub fn spawn(&self) -> (usize, usize) {
        self.active.spawn
    }

    pub fn begin(&mut self) {
        self.phase = Phase::Playing;
    }

    /// Level transition controller.
    ///
    /// `target == 0`: no-op (cannot go below level 1). Above the max
    /// level: game completed, terminal, no grid swap. Otherwise swap
    /// the active level through the registry, respawn the player at
    /// the target's spawn center, and reset the portal-exit flag.
    pub fn transition(&mut self, target: u32, events: &mut Vec<GameEvent>) {
        if target == 0 {
            return;
        }
        if target > self.max_level {
            self.phase = Phase::GameComplete;
            events.push(GameEvent::GameCompleted);
            return;
        }

        let incoming = self.registry.checkout(target);
        let outgoing = std::mem::replace(&mut self.active, incoming);
        self.registry.check_in(self.current_level, outgoing);
        self.current_level = target;

        let (sx, sy) = self.active.spawn;
        self.player.x = sx;
        self.player.y = sy;
        self.left_spawn = false;
        events.push(GameEvent::LevelEntered { level: target });
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    /// Per-frame message countdown.
    pub fn tick_message(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::tile::Tile;
    use crate::sim::gen;

    fn session() -> GameSession {
        let mut config = GameConfig::default();
        config.world.seed = Some(42);
        let mut s = GameSession::new(&config);
        s.begin();
        s
    }

    #[test]
    fn starts_on_level_one_at_spawn_center() {
        let s = session();
        assert_eq!(s.current_level, 1);
        assert_eq!((s.player.x, s.player.y), gen::spawn_center());
        assert!(!s.left_spawn);
    }

    #[test]
    fn transition_below_level_one_is_a_noop() {
        let mut s = session();
        let mut events = vec![];
        s.transition(0, &mut events);
        assert_eq!(s.current_level, 1);
        assert!(events.is_empty());
    }

    #[test]
    fn transition_swaps_level_and_resets_player() {
        let mut s = session();
        s.player.x = 0;
        s.player.y = 0;
        s.left_spawn = true;

        let mut events = vec![];
        s.transition(2, &mut events);
        assert_eq!(s.current_level, 2);
        assert_eq!((s.player.x, s.player.y), gen::spawn_center());
        assert!(!s.left_spawn);
        assert_eq!(events, vec![GameEvent::LevelEntered { level: 2 }]);
    }

    #[test]
    fn transition_past_max_level_completes_the_game() {
        let mut s = session();
        let mut events = vec![];
        s.transition(s.max_level + 1, &mut events);
        assert_eq!(s.phase, Phase::GameComplete);
        assert_eq!(events, vec![GameEvent::GameCompleted]);
        // No grid swap: still on level 1
        assert_eq!(s.current_level, 1);
    }

    #[test]
    fn mutations_survive_a_round_trip() {
        let mut s = session();
        s.grid_mut().set(0, 0, Tile::Mined);

        let mut events = vec![];
        s.transition(2, &mut events);
        s.transition(1, &mut events);
        assert_eq!(s.grid().get(0, 0), Some(Tile::Mined));
    }
}
