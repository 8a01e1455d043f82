use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// player whose turn it is after `ply_count` half-moves
    pub fn from_ply(ply_count: u32) -> Self {
        match ply_count % 2 {
            0 => Player::First,
            _ => Player::Second,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

// flip the player, i.e. First -> Second and Second -> First
impl std::ops::Not for Player {
    type Output = Player;

    fn not(self) -> Self::Output {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::First => write!(f, "Player 1"),
            Player::Second => write!(f, "Player 2"),
        }
    }
}

/*====================================================================================================================*/

/// Read-only view of a game position, as consumed by the search.
///
/// Positions are values: `result` returns a new position and never mutates `self`.
pub trait GameState: Clone {
    type Action: Copy + Eq + Debug;
    type Loc: Copy + Eq + Debug;

    /// number of half-moves played so far
    fn ply_count(&self) -> u32;

    /// the player to move
    fn player(&self) -> Player {
        Player::from_ply(self.ply_count())
    }

    /// `None` while the player's piece has not been placed yet
    fn loc(&self, player: Player) -> Option<Self::Loc>;

    /// legal actions of the player to move, in a fixed enumeration order
    fn actions(&self) -> Vec<Self::Action>;

    /// position after the player to move takes `action`
    ///
    /// # Panics
    ///
    /// may panic if `action` is not legal in this position
    fn result(&self, action: Self::Action) -> Self;

    fn terminal_test(&self) -> bool;

    /// payoff for `player` at a terminal position: positive is a win, negative a loss, 0 elsewhere
    fn utility(&self, player: Player) -> f64;

    /// squares reachable in one move from `loc`; every open square for an unplaced piece
    fn liberties(&self, loc: Option<Self::Loc>) -> Vec<Self::Loc>;

    fn mobility(&self, player: Player) -> usize {
        self.liberties(self.loc(player)).len()
    }
}
