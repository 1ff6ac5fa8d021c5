//! The 7×6 'Connect 4' game

use static_assertions::*;

use std::fmt;
use std::str::FromStr;

use crate::board::{Cell, Player, Position};
use crate::error::Error;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// Length of a winning alignment
pub const ALIGNMENT: usize = 4;

// a 4-window has to fit in both directions
const_assert!(WIDTH >= ALIGNMENT && HEIGHT >= ALIGNMENT);

/// Number of distinct 4-cell windows on the board in all four orientations
pub const NUM_WINDOWS: usize = (WIDTH - 3) * HEIGHT
    + WIDTH * (HEIGHT - 3)
    + 2 * (WIDTH - 3) * (HEIGHT - 3);

/// Cell indices of every 4-window: horizontal, vertical, and both diagonals
pub const WINDOWS: [[usize; ALIGNMENT]; NUM_WINDOWS] = window_table();

const fn index(column: usize, row: usize) -> usize {
    column + WIDTH * row
}

const fn window_table() -> [[usize; ALIGNMENT]; NUM_WINDOWS] {
    let mut table = [[0; ALIGNMENT]; NUM_WINDOWS];
    let mut n = 0;
    let mut row = 0;
    while row < HEIGHT {
        let mut column = 0;
        while column < WIDTH {
            let (c, r) = (column, row);
            if c + 3 < WIDTH {
                table[n] = [index(c, r), index(c + 1, r), index(c + 2, r), index(c + 3, r)];
                n += 1;
            }
            if r + 3 < HEIGHT {
                table[n] = [index(c, r), index(c, r + 1), index(c, r + 2), index(c, r + 3)];
                n += 1;
            }
            // diagonal /
            if c + 3 < WIDTH && r + 3 < HEIGHT {
                table[n] = [
                    index(c, r),
                    index(c + 1, r + 1),
                    index(c + 2, r + 2),
                    index(c + 3, r + 3),
                ];
                n += 1;
            }
            // diagonal \
            if c + 3 < WIDTH && r >= 3 {
                table[n] = [
                    index(c, r),
                    index(c + 1, r - 1),
                    index(c + 2, r - 2),
                    index(c + 3, r - 3),
                ];
                n += 1;
            }
            column += 1;
        }
        row += 1;
    }
    table
}

/// A Connect 4 board
///
/// Cells are stored left-to-right, bottom-to-top, so row 0 is the row
/// pieces land on first.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConnectFour {
    cells: [Cell; WIDTH * HEIGHT],
    heights: [usize; WIDTH],
    num_moves: usize,
    last_move: Option<(usize, usize)>,
}

impl ConnectFour {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
            heights: [0; WIDTH],
            num_moves: 0,
            last_move: None,
        }
    }

    /// Replays a game given as 1-indexed column digits, player One first
    ///
    /// Fails on anything that is not a column, on full columns and on
    /// moves played after a player already connected four.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, Error> {
        let mut board = Self::new();
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    if board.winner().is_some() {
                        return Err(Error::invalid_board("game is already over"));
                    }
                    board = board.apply(column - 1, player)?;
                    player = player.other();
                }
                _ => {
                    return Err(Error::invalid_board(format!(
                        "could not parse '{}' as a valid move",
                        column_char
                    )))
                }
            }
        }
        Ok(board)
    }

    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.cells[index(column, row)]
    }

    pub fn cells(&self) -> &[Cell; WIDTH * HEIGHT] {
        &self.cells
    }

    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// `(column, row)` of the most recently placed piece
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    fn playable(&self, column: usize) -> bool {
        self.heights[column] < HEIGHT
    }

    /// Whether the piece at `(column, row)` is part of a 4-alignment
    ///
    /// Only the four lines through that cell are scanned, which is all that
    /// can change when the piece was the last one placed.
    pub fn is_win_at(&self, column: usize, row: usize) -> bool {
        let player = self.cell(column, row);
        if player.is_empty() {
            return false;
        }

        for &(dx, dy) in [(1i32, 0i32), (0, 1), (1, 1), (1, -1)].iter() {
            // the anchor itself
            let mut run = 1;
            for &sign in [-1i32, 1].iter() {
                let mut x = column as i32 + sign * dx;
                let mut y = row as i32 + sign * dy;
                loop {
                    if x < 0
                        || x >= WIDTH as i32
                        || y < 0
                        || y >= HEIGHT as i32
                        || self.cells[index(x as usize, y as usize)] != player
                    {
                        break;
                    }
                    x += sign * dx;
                    y += sign * dy;
                    run += 1;
                }
            }
            if run >= ALIGNMENT {
                return true;
            }
        }

        false
    }

    /// Whether the most recently placed piece completed an alignment
    pub fn last_move_wins(&self) -> bool {
        match self.last_move {
            Some((column, row)) => self.is_win_at(column, row),
            None => false,
        }
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl Position for ConnectFour {
    type Move = usize;

    const DEPTH_LIMIT: usize = WIDTH * HEIGHT;

    fn legal_moves(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.playable(column)).collect()
    }

    fn play(&self, column: usize, player: Player) -> Self {
        debug_assert!(self.is_legal(column), "column {} is not playable", column);
        let mut next = *self;
        let row = next.heights[column];
        next.cells[index(column, row)] = player.into();
        next.heights[column] += 1;
        next.num_moves += 1;
        next.last_move = Some((column, row));
        next
    }

    fn illegal_reason(&self, column: usize) -> Option<&'static str> {
        if column >= WIDTH {
            Some("column out of range")
        } else if !self.playable(column) {
            Some("column full")
        } else {
            None
        }
    }

    fn move_index(&self, column: usize) -> usize {
        column
    }

    fn is_win(&self, player: Player) -> bool {
        let target = Cell::from(player);
        WINDOWS
            .iter()
            .any(|window| window.iter().all(|&i| self.cells[i] == target))
    }

    fn is_full(&self) -> bool {
        self.num_moves == WIDTH * HEIGHT
    }

    fn center(&self) -> Option<usize> {
        Some(WIDTH / 2)
    }
}

/// Parses six rows of seven cells, top row first, separated by `/` or
/// newlines, e.g. `"......./......./......./......./...O.../..XXO.."`
impl FromStr for ConnectFour {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .split(|c: char| c == '/' || c == '\n')
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        if rows.len() != HEIGHT {
            return Err(Error::invalid_board(format!(
                "expected {} rows, got {}",
                HEIGHT,
                rows.len()
            )));
        }

        let mut board = Self::new();
        for (top_index, text) in rows.iter().enumerate() {
            let row = HEIGHT - 1 - top_index;
            let cells: Vec<char> = text.chars().collect();
            if cells.len() != WIDTH {
                return Err(Error::invalid_board(format!(
                    "row '{}' has {} cells, expected {}",
                    text,
                    cells.len(),
                    WIDTH
                )));
            }
            for (column, &symbol) in cells.iter().enumerate() {
                board.cells[index(column, row)] = Cell::from_symbol(symbol)
                    .ok_or_else(|| Error::invalid_board(format!("unknown cell '{}'", symbol)))?;
            }
        }

        for column in 0..WIDTH {
            let height = (0..HEIGHT)
                .take_while(|&row| !board.cell(column, row).is_empty())
                .count();
            if (height..HEIGHT).any(|row| !board.cell(column, row).is_empty()) {
                return Err(Error::invalid_board(format!(
                    "floating piece in column {}",
                    column + 1
                )));
            }
            board.heights[column] = height;
            board.num_moves += height;
        }
        Ok(board)
    }
}

impl fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..HEIGHT).rev() {
            for column in 0..WIDTH {
                write!(f, "{}", self.cell(column, row).symbol())?;
            }
            if row > 0 {
                f.write_str("/")?;
            }
        }
        Ok(())
    }
}
