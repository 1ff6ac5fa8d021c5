//! Cell, player and the board abstraction shared by both games

use std::fmt::{Debug, Display};

use crate::error::{Error, Result};

/// One of the two sides of a game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    /// Plays `X`, moves first unless the shell decides otherwise
    One,
    /// Plays `O`
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }

    pub fn symbol(&self) -> char {
        self.owner().map_or('.', Player::symbol)
    }

    pub(crate) fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'X' | 'x' => Some(Cell::PlayerOne),
            'O' | 'o' => Some(Cell::PlayerTwo),
            '.' | '-' | '_' | ' ' => Some(Cell::Empty),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// A fixed-size game board that can be searched
///
/// Boards are values: [`play`](Position::play) and [`apply`](Position::apply)
/// return a fresh board and never touch `self`, so every node of a search
/// tree owns its own copy.
pub trait Position: Clone + Debug {
    /// A cell index (3×3) or a column index (Connect 4)
    type Move: Copy + Eq + Debug + Display;

    /// Deepest search that can make sense on this board
    const DEPTH_LIMIT: usize;

    /// All legal moves in ascending order
    ///
    /// The order is the tie-break for move selection and assigns the
    /// ordinals of child nodes in a search trace.
    fn legal_moves(&self) -> Vec<Self::Move>;

    fn is_legal(&self, target: Self::Move) -> bool {
        self.illegal_reason(target).is_none()
    }

    /// Returns the board after `player` plays `target`
    ///
    /// The move must be legal, callers check with
    /// [`is_legal`](Position::is_legal) or use [`apply`](Position::apply).
    fn play(&self, target: Self::Move, player: Player) -> Self;

    /// Checked version of [`play`](Position::play)
    fn apply(&self, target: Self::Move, player: Player) -> Result<Self> {
        match self.illegal_reason(target) {
            Some(reason) => Err(Error::IllegalMove {
                target: self.move_index(target),
                reason,
            }),
            None => Ok(self.play(target, player)),
        }
    }

    /// Why `target` cannot be played, or `None` when it is legal
    fn illegal_reason(&self, target: Self::Move) -> Option<&'static str>;

    /// Numeric index of a move for error reporting
    fn move_index(&self, target: Self::Move) -> usize;

    /// True iff `player` owns one of the game's winning lines
    fn is_win(&self, player: Player) -> bool;

    /// True iff no empty cell remains
    fn is_full(&self) -> bool;

    /// Preferred move when nothing tactical is going on
    fn center(&self) -> Option<Self::Move> {
        None
    }

    fn winner(&self) -> Option<Player> {
        [Player::One, Player::Two]
            .iter()
            .copied()
            .find(|&player| self.is_win(player))
    }

    fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }
}
