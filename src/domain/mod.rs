pub mod grid;
pub mod mineral;
pub mod player;
pub mod tile;
