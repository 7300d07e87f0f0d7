/// Events emitted by the action resolver and transition controller.
/// The presentation layer consumes these for the message bar.

use crate::domain::mineral::Mineral;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    TileMined { x: usize, y: usize },
    MineralCollected { mineral: Mineral, total: u32 },
    DoorOpened { x: usize, y: usize },
    LevelEntered { level: u32 },
    GameCompleted,
}
