//! Error types for the game engine

use thiserror::Error;

/// Errors surfaced by the board model and the search driver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A move targets an occupied cell, a full column or a cell off the board
    #[error("invalid move {target}: {reason}")]
    IllegalMove { target: usize, reason: &'static str },

    /// The driver was asked to move on a board with no legal moves left
    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("invalid board: {message}")]
    InvalidBoard { message: String },

    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}

impl Error {
    pub(crate) fn invalid_board(message: impl Into<String>) -> Self {
        Error::InvalidBoard {
            message: message.into(),
        }
    }
}

/// Result alias for fallible engine operations
pub type Result<T> = std::result::Result<T, Error>;
