/// Action resolver: turns an accepted directional input into exactly
/// one tile or player mutation.
///
/// Rate limiting is a pure timestamp comparison per direction: held
/// auto-repeat input is accepted at most every `repeat_cooldown`,
/// fresh presses every `fresh_cooldown`, measured from the last
/// accepted action in that direction. Rejected input changes nothing.
///
/// Dispatch on the target tile:
///   - locked next door  -> damage; opens at 0 HP
///   - open next door    -> level-up transition
///   - prev door         -> step onto it; level-down if the player has
///                          left the spawn center since entering
///   - ground / ore      -> damage; at 0 HP becomes mined, ore pays out
///   - mined             -> move; stepping off center arms the portal

use std::time::{Duration, Instant};

use crate::domain::player::Direction;
use crate::domain::tile::{DoorKind, DoorState, Tile};
use super::event::GameEvent;
use super::session::{GameSession, Phase};

pub struct ActionResolver {
    fresh_cooldown: Duration,
    repeat_cooldown: Duration,
    last_accepted: [Option<Instant>; 4],
}

impl ActionResolver {
    pub fn new(fresh_cooldown: Duration, repeat_cooldown: Duration) -> ActionResolver {
        ActionResolver { fresh_cooldown, repeat_cooldown, last_accepted: [None; 4] }
    }

    /// Cooldown gate. Accepting records `now` for the direction.
    fn accept(&mut self, dir: Direction, repeat: bool, now: Instant) -> bool {
        let window = if repeat { self.repeat_cooldown } else { self.fresh_cooldown };
        let slot = &mut self.last_accepted[dir.index()];
        if let Some(last) = *slot {
            if now.duration_since(last) < window {
                return false;
            }
        }
        *slot = Some(now);
        true
    }

    /// Apply one directional input. Returns the events it produced
    /// (empty when the input was dropped or hit nothing).
    pub fn apply(
        &mut self,
        session: &mut GameSession,
        dir: Direction,
        repeat: bool,
        now: Instant,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if session.phase != Phase::Playing {
            return events;
        }
        if !self.accept(dir, repeat, now) {
            return events;
        }

        session.player.facing = dir;

        let (dx, dy) = dir.delta();
        let tx = session.player.x as i32 + dx;
        let ty = session.player.y as i32 + dy;
        if !session.grid().in_bounds(tx, ty) {
            return events;
        }
        let (tx, ty) = (tx as usize, ty as usize);
        let target = match session.grid().get(tx, ty) {
            Some(tile) => tile,
            None => return events,
        };

        match target {
            Tile::Door { kind: DoorKind::Next, state: DoorState::Locked, hp, max_hp } => {
                let hp = hp.saturating_sub(1);
                if hp == 0 {
                    session.grid_mut().set(
                        tx,
                        ty,
                        Tile::Door { kind: DoorKind::Next, state: DoorState::Open, hp: 0, max_hp },
                    );
                    events.push(GameEvent::DoorOpened { x: tx, y: ty });
                } else {
                    session.grid_mut().set(
                        tx,
                        ty,
                        Tile::Door { kind: DoorKind::Next, state: DoorState::Locked, hp, max_hp },
                    );
                }
            }

            Tile::Door { kind: DoorKind::Next, state: DoorState::Open, .. } => {
                let target_level = session.current_level + 1;
                session.transition(target_level, &mut events);
            }

            Tile::Door { kind: DoorKind::Prev, .. } => {
                // Always step onto the portal tile
                session.player.x = tx;
                session.player.y = ty;
                if session.left_spawn {
                    let target_level = session.current_level.saturating_sub(1);
                    session.transition(target_level, &mut events);
                }
            }

            Tile::Ground { hp, max_hp } => {
                let hp = hp.saturating_sub(1);
                if hp == 0 {
                    session.grid_mut().set(tx, ty, Tile::Mined);
                    events.push(GameEvent::TileMined { x: tx, y: ty });
                } else {
                    session.grid_mut().set(tx, ty, Tile::Ground { hp, max_hp });
                }
            }

            Tile::Ore { mineral, hp, max_hp } => {
                let hp = hp.saturating_sub(1);
                if hp == 0 {
                    session.grid_mut().set(tx, ty, Tile::Mined);
                    let total = session.player.collect(mineral);
                    events.push(GameEvent::TileMined { x: tx, y: ty });
                    events.push(GameEvent::MineralCollected { mineral, total });
                } else {
                    session.grid_mut().set(tx, ty, Tile::Ore { mineral, hp, max_hp });
                }
            }

            Tile::Mined => {
                session.player.x = tx;
                session.player.y = ty;
                if (tx, ty) != session.spawn() {
                    session.left_spawn = true;
                }
            }
        }

        events
    }
}
