mod board;
pub mod heuristic;
mod state;

pub use board::{Action, Direction, Isolation, Loc, HEIGHT, WIDTH};
pub use heuristic::{Evaluate, Heuristic};
pub use state::{GameState, Player};
