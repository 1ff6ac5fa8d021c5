//! Alpha-beta game-tree search for two small perfect-information games:
//! 3×3 tic-tac-toe and 7×6 'Connect 4'
//!
//! Both games share one board abstraction ([`Position`]), one family of
//! static evaluators and one alpha-beta search. The 3×3 search can record
//! every node it visits (including the siblings skipped by a cutoff) for
//! inspection after the move was made.
//!
//! # Basic Usage
//!
//! ```
//! use alphabeta::{driver::Agent, eval::ExactScore, tic_tac_toe::TicTacToe};
//! use alphabeta::{Player, Position, SearchConfig};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board: TicTacToe = "OO./XX./X..".parse()?;
//! let mut agent = Agent::new(
//!     ExactScore::new(Player::Two),
//!     Player::Two,
//!     SearchConfig::tic_tac_toe(),
//! );
//! let cell = agent.choose_move(&mut board)?;
//!
//! assert_eq!(cell, 2);
//! assert!(board.is_win(Player::Two));
//!# Ok(())
//!# }
//! ```

pub mod error;

pub mod config;

pub mod board;

pub mod tic_tac_toe;

pub mod connect_four;

pub mod eval;

pub mod trace;

pub mod search;

pub mod driver;

pub mod report;

mod test;

pub use board::{Cell, Player, Position};
pub use config::{Difficulty, SearchConfig};
pub use error::{Error, Result};
pub use eval::{Score, MAX_SCORE, MIN_SCORE};
