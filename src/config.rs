//! Search configuration and AI difficulty tiers

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Tunable parameters of a single search session
///
/// The searcher clamps `max_depth` into `[1, P::DEPTH_LIMIT]` for the game
/// it is searching, so a preset can be shared freely.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of plies below the root after which positions are scored statically
    pub max_depth: usize,
    /// Record every visited and skipped node in a `SearchTrace`
    pub trace: bool,
    /// Search the root's children on the rayon thread pool
    pub parallel: bool,
}

impl SearchConfig {
    /// Full-depth search with node tracing, as used for the 3×3 game
    pub fn tic_tac_toe() -> Self {
        Self {
            max_depth: 9,
            trace: true,
            parallel: false,
        }
    }

    /// Depth-limited heuristic search without tracing, as used for Connect 4
    pub fn connect_four() -> Self {
        Self {
            max_depth: 5,
            trace: false,
            parallel: false,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::tic_tac_toe()
    }
}

/// How hard the computer player tries
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Difficulty {
    /// Uniformly random legal moves
    Easy,
    /// Takes immediate wins, blocks immediate losses, prefers the center
    Medium,
    /// Full alpha-beta search
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Hard
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            _ => Err(Error::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}
