use std::fmt::{Debug, Display};

use lazy_static::lazy_static;

use super::state::{GameState, Player};

pub const WIDTH: u8 = 11;
pub const HEIGHT: u8 = 9;

// two padding columns per row, so a knight offset can never wrap into the neighbouring row
const STRIDE: u8 = WIDTH + 2;
const SIZE: usize = STRIDE as usize * HEIGHT as usize;

const fn blank_board() -> u128 {
    let mut board = 0u128;
    let mut row = 0;
    while row < HEIGHT {
        let mut col = 0;
        while col < WIDTH {
            board |= 1 << (row as usize * STRIDE as usize + col as usize);
            col += 1;
        }
        row += 1;
    }
    board
}

const BLANK_BOARD: u128 = blank_board();

/*====================================================================================================================*/

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Loc(u8);

impl Loc {
    pub fn new(row: u8, col: u8) -> Self {
        assert!(row < HEIGHT && col < WIDTH, "Cell ({row}, {col}) is off the board");
        Loc(row * STRIDE + col)
    }

    pub fn row(&self) -> u8 {
        self.0 / STRIDE
    }

    pub fn col(&self) -> u8 {
        self.0 % STRIDE
    }

    fn index(&self) -> usize {
        self.0 as usize
    }

    fn bit(&self) -> u128 {
        1 << self.0
    }
}

impl Debug for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Loc({}, {})", self.row(), self.col())
    }
}

/*====================================================================================================================*/

/// the eight knight jumps, in the order they are enumerated as actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    NNE,
    ENE,
    ESE,
    SSE,
    SSW,
    WSW,
    WNW,
    NNW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NNE,
        Direction::ENE,
        Direction::ESE,
        Direction::SSE,
        Direction::SSW,
        Direction::WSW,
        Direction::WNW,
        Direction::NNW,
    ];

    /// (row, column) displacement
    fn delta(self) -> (i8, i8) {
        match self {
            Direction::NNE => (2, 1),
            Direction::ENE => (1, 2),
            Direction::ESE => (-1, 2),
            Direction::SSE => (-2, 1),
            Direction::SSW => (-2, -1),
            Direction::WSW => (-1, -2),
            Direction::WNW => (1, -2),
            Direction::NNW => (2, -1),
        }
    }

    /// landing cell of a jump from `from`, ignoring whether it is blocked
    pub fn target(self, from: Loc) -> Option<Loc> {
        KNIGHT_TARGETS[from.index()][self as usize]
    }
}

lazy_static! {
    static ref KNIGHT_TARGETS: Vec<[Option<Loc>; 8]> = (0..SIZE)
        .map(|index| {
            let row = (index / STRIDE as usize) as i8;
            let col = (index % STRIDE as usize) as i8;

            Direction::ALL.map(|direction| {
                let (d_row, d_col) = direction.delta();
                let (row, col) = (row + d_row, col + d_col);

                let on_board = (0..HEIGHT as i8).contains(&row) && (0..WIDTH as i8).contains(&col);
                on_board.then(|| Loc::new(row as u8, col as u8))
            })
        })
        .collect();
}

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// initial placement of a piece that is not on the board yet
    Place(Loc),
    /// knight jump from the current location
    Jump(Direction),
}

/*====================================================================================================================*/

/// A knight's Isolation position.
///
/// Every cell a piece has stood on is blocked for the rest of the game. The player to move loses once their
/// piece has no open cell to jump to.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Isolation {
    // set bit = open cell
    open: u128,

    ply_count: u32,

    locs: [Option<Loc>; 2],
}

impl Isolation {
    pub fn new() -> Self {
        Isolation {
            open: BLANK_BOARD,
            ply_count: 0,
            locs: [None, None],
        }
    }

    /// empty board with the given cells blocked from the start
    pub fn with_blocked(blocked: &[Loc]) -> Self {
        let mut board = Isolation::new();

        for loc in blocked {
            board.open &= !loc.bit();
        }

        board
    }

    pub fn is_open(&self, loc: Loc) -> bool {
        self.open & loc.bit() != 0
    }

    pub fn open_cells(&self) -> Vec<Loc> {
        (0..SIZE as u8).map(Loc).filter(|&loc| self.is_open(loc)).collect()
    }

    fn has_liberties(&self, player: Player) -> bool {
        match self.locs[player.index()] {
            Some(loc) => Direction::ALL
                .iter()
                .filter_map(|direction| direction.target(loc))
                .any(|target| self.is_open(target)),
            None => self.open != 0,
        }
    }
}

impl Default for Isolation {
    fn default() -> Self {
        Isolation::new()
    }
}

impl GameState for Isolation {
    type Action = Action;
    type Loc = Loc;

    fn ply_count(&self) -> u32 {
        self.ply_count
    }

    fn loc(&self, player: Player) -> Option<Loc> {
        self.locs[player.index()]
    }

    fn actions(&self) -> Vec<Action> {
        match self.loc(self.player()) {
            None => self.open_cells().into_iter().map(Action::Place).collect(),
            Some(loc) => Direction::ALL
                .into_iter()
                .filter(|direction| direction.target(loc).is_some_and(|target| self.is_open(target)))
                .map(Action::Jump)
                .collect(),
        }
    }

    fn result(&self, action: Action) -> Self {
        let player = self.player();

        let destination = match (action, self.loc(player)) {
            (Action::Place(loc), None) => loc,
            (Action::Jump(direction), Some(from)) => direction
                .target(from)
                .unwrap_or_else(|| panic!("{player} at {from:?} can't jump {direction:?} off the board")),
            (action, loc) => panic!("Action {action:?} is not applicable to {player} at {loc:?}"),
        };

        assert!(
            self.is_open(destination),
            "{player} is trying to move to blocked cell {destination:?}"
        );

        let mut next = *self;
        next.open &= !destination.bit();
        next.locs[player.index()] = Some(destination);
        next.ply_count += 1;
        next
    }

    fn terminal_test(&self) -> bool {
        !self.has_liberties(self.player()) || !self.has_liberties(!self.player())
    }

    fn utility(&self, player: Player) -> f64 {
        if !self.terminal_test() {
            return 0.0;
        }

        // the player to move wins iff they can still move (their opponent must be the stuck one)
        let active_wins = self.has_liberties(self.player());

        if active_wins == (player == self.player()) {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }
    }

    fn liberties(&self, loc: Option<Loc>) -> Vec<Loc> {
        match loc {
            Some(loc) => KNIGHT_TARGETS[loc.index()]
                .iter()
                .flatten()
                .copied()
                .filter(|&target| self.is_open(target))
                .collect(),
            None => self.open_cells(),
        }
    }
}

impl Display for Isolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..HEIGHT).rev() {
            for col in 0..WIDTH {
                let loc = Loc::new(row, col);

                let cell = if self.locs[0] == Some(loc) {
                    '1'
                } else if self.locs[1] == Some(loc) {
                    '2'
                } else if self.is_open(loc) {
                    '.'
                } else {
                    '#'
                };

                write!(f, "{cell}")?;
                if col + 1 < WIDTH {
                    write!(f, " ")?;
                }
            }

            if row > 0 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

impl Debug for Isolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Isolation(ply {}, {:?})\n{}", self.ply_count, self.locs, self)
    }
}

/*====================================================================================================================*/
