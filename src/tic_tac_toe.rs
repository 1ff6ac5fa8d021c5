//! The 3×3 connect-three game

use std::fmt;
use std::str::FromStr;

use crate::board::{Cell, Player, Position};
use crate::error::Error;

/// Side length of the board
pub const SIZE: usize = 3;

/// Number of cells on the board
pub const CELLS: usize = SIZE * SIZE;

/// Rows, columns and both main diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A 3×3 board, cells numbered 0–8 left-to-right, top-to-bottom
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TicTacToe {
    cells: [Cell; CELLS],
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
        }
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn num_moves(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Position for TicTacToe {
    type Move = usize;

    const DEPTH_LIMIT: usize = CELLS;

    fn legal_moves(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| self.cells[i].is_empty()).collect()
    }

    fn play(&self, target: usize, player: Player) -> Self {
        debug_assert!(self.is_legal(target), "cell {} is not playable", target);
        let mut next = *self;
        next.cells[target] = player.into();
        next
    }

    fn illegal_reason(&self, target: usize) -> Option<&'static str> {
        if target >= CELLS {
            Some("cell out of range")
        } else if !self.cells[target].is_empty() {
            Some("cell already taken")
        } else {
            None
        }
    }

    fn move_index(&self, target: usize) -> usize {
        target
    }

    fn is_win(&self, player: Player) -> bool {
        let target = Cell::from(player);
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == target))
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    fn center(&self) -> Option<usize> {
        Some(CELLS / 2)
    }
}

/// Parses nine cells (`X`, `O` and `.`/`-`/`_` for empty), ignoring `/`
/// and whitespace between rows, e.g. `"XO./.X./..O"`
impl FromStr for TicTacToe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Self::new();
        let mut count = 0;

        for symbol in s.chars().filter(|c| *c != '/' && !c.is_whitespace()) {
            let cell = Cell::from_symbol(symbol)
                .ok_or_else(|| Error::invalid_board(format!("unknown cell '{}'", symbol)))?;
            if count == CELLS {
                return Err(Error::invalid_board(format!(
                    "expected {} cells, got more in '{}'",
                    CELLS, s
                )));
            }
            board.cells[count] = cell;
            count += 1;
        }

        if count != CELLS {
            return Err(Error::invalid_board(format!(
                "expected {} cells, got {} in '{}'",
                CELLS, count, s
            )));
        }
        Ok(board)
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(SIZE).enumerate() {
            if row > 0 {
                f.write_str("/")?;
            }
            for cell in cells {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
