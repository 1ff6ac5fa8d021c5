//! Static evaluation of leaf positions
//!
//! Scores are always from the AI's point of view: positive is good for the
//! maximizing side.

use crate::board::{Cell, Player, Position};
use crate::connect_four::{ConnectFour, HEIGHT, WIDTH, WINDOWS};
use crate::tic_tac_toe::TicTacToe;

pub type Score = i32;

/// Lower sentinel for alpha, below every reachable score
pub const MIN_SCORE: Score = -Score::MAX;
/// Upper sentinel for beta, above every reachable score
pub const MAX_SCORE: Score = Score::MAX;

/// Scores leaves of the search tree
pub trait Evaluator<P: Position> {
    /// Score of a finished game, or `None` while the game is still running
    fn terminal(&self, position: &P, depth: usize) -> Option<Score>;

    /// Score of a running game whose search was cut off by the depth limit
    fn heuristic(&self, position: &P) -> Score;

    fn evaluate(&self, position: &P, depth: usize) -> Score {
        self.terminal(position, depth)
            .unwrap_or_else(|| self.heuristic(position))
    }
}

/// Exact scoring for the 3×3 game
///
/// Wins are worth `10 - depth` so faster wins are preferred, losses
/// `depth - 10` so they are postponed. Anything else is worth 0.
#[derive(Copy, Clone, Debug)]
pub struct ExactScore {
    pub ai: Player,
}

impl ExactScore {
    pub const WIN: Score = 10;

    pub fn new(ai: Player) -> Self {
        Self { ai }
    }
}

impl Evaluator<TicTacToe> for ExactScore {
    fn terminal(&self, position: &TicTacToe, depth: usize) -> Option<Score> {
        if position.is_win(self.ai) {
            Some(Self::WIN - depth as Score)
        } else if position.is_win(self.ai.other()) {
            Some(depth as Score - Self::WIN)
        } else if position.is_full() {
            Some(0)
        } else {
            None
        }
    }

    fn heuristic(&self, _position: &TicTacToe) -> Score {
        0
    }
}

/// Window-counting heuristic for Connect 4
///
/// Blocking an opponent's three outweighs building one's own.
#[derive(Copy, Clone, Debug)]
pub struct WindowHeuristic {
    pub ai: Player,
}

impl WindowHeuristic {
    pub const WIN: Score = 1000;
    pub const OWN_THREE: Score = 10;
    pub const OWN_TWO: Score = 3;
    pub const OPPONENT_THREE: Score = -15;
    pub const OPPONENT_TWO: Score = -3;
    pub const CENTER: Score = 2;

    pub fn new(ai: Player) -> Self {
        Self { ai }
    }

    /// Contribution of a single 4-cell window
    pub fn score_window(&self, window: &[Cell]) -> Score {
        let own = Cell::from(self.ai);
        let opponent = Cell::from(self.ai.other());
        let own_count = window.iter().filter(|&&cell| cell == own).count();
        let opponent_count = window.iter().filter(|&&cell| cell == opponent).count();
        let empty = window.iter().filter(|cell| cell.is_empty()).count();

        match (own_count, opponent_count, empty) {
            (3, 0, 1) => Self::OWN_THREE,
            (2, 0, 2) => Self::OWN_TWO,
            (0, 3, 1) => Self::OPPONENT_THREE,
            (0, 2, 2) => Self::OPPONENT_TWO,
            _ => 0,
        }
    }

    fn center_score(&self, position: &ConnectFour) -> Score {
        let own = Cell::from(self.ai);
        (0..HEIGHT)
            .map(|row| position.cell(WIDTH / 2, row))
            .map(|cell| match cell {
                Cell::Empty => 0,
                cell if cell == own => Self::CENTER,
                _ => -Self::CENTER,
            })
            .sum()
    }
}

impl Evaluator<ConnectFour> for WindowHeuristic {
    fn terminal(&self, position: &ConnectFour, _depth: usize) -> Option<Score> {
        if position.is_win(self.ai) {
            Some(Self::WIN)
        } else if position.is_win(self.ai.other()) {
            Some(-Self::WIN)
        } else if position.is_full() {
            Some(0)
        } else {
            None
        }
    }

    fn heuristic(&self, position: &ConnectFour) -> Score {
        let cells = position.cells();
        let windows: Score = WINDOWS
            .iter()
            .map(|window| {
                let cells = [
                    cells[window[0]],
                    cells[window[1]],
                    cells[window[2]],
                    cells[window[3]],
                ];
                self.score_window(&cells)
            })
            .sum();
        windows + self.center_score(position)
    }
}
