//! Picks the computer player's moves

use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::board::{Player, Position};
use crate::config::{Difficulty, SearchConfig};
use crate::error::{Error, Result};
use crate::eval::Evaluator;
use crate::search::{SearchResult, SearchStats, Searcher};
use crate::trace::SearchTrace;

/// The computer player of one game
///
/// Wraps a [`Searcher`] with the bookkeeping of a single turn: clearing the
/// previous trace, running the search from the live board and playing the
/// chosen move on it. Lower difficulties skip the search entirely.
pub struct Agent<P: Position, E> {
    searcher: Searcher<P, E>,
    difficulty: Difficulty,
    rng: StdRng,
    last_result: Option<SearchResult<P::Move>>,
}

impl<P, E> Agent<P, E>
where
    P: Position + Send + Sync,
    P::Move: Send + Sync,
    E: Evaluator<P> + Clone + Send + Sync,
{
    pub fn new(evaluator: E, ai: Player, config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(evaluator, ai, config),
            difficulty: Difficulty::Hard,
            rng: StdRng::from_entropy(),
            last_result: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Makes the random choices of the lower difficulties reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn ai(&self) -> Player {
        self.searcher.ai()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn searcher(&self) -> &Searcher<P, E> {
        &self.searcher
    }

    /// Counters of the most recent decision
    pub fn stats(&self) -> SearchStats {
        self.searcher.stats
    }

    /// Nodes of the most recent search, if tracing is enabled
    pub fn trace(&self) -> Option<&SearchTrace<P>> {
        self.searcher.trace()
    }

    /// Root result of the most recent search, `None` if no search ran
    pub fn last_result(&self) -> Option<&SearchResult<P::Move>> {
        self.last_result.as_ref()
    }

    /// Chooses the AI's move, plays it on `position` and returns it
    ///
    /// Fails with [`Error::NoLegalMoves`] if the board has no legal move
    /// left; `position` is untouched in that case.
    pub fn choose_move(&mut self, position: &mut P) -> Result<P::Move> {
        self.searcher.reset();
        self.last_result = None;

        let moves = position.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }

        let chosen = match self.difficulty {
            Difficulty::Easy => self.random_move(&moves),
            Difficulty::Medium => self.tactical_move(position, &moves),
            Difficulty::Hard => {
                let result = self.searcher.decide(position);
                let chosen = result.best_move;
                self.last_result = Some(result);
                chosen
            }
        }
        .ok_or(Error::NoLegalMoves)?;

        *position = position.apply(chosen, self.ai())?;
        info!(
            "{} ({}) plays {} after {} nodes",
            self.ai().symbol(),
            self.difficulty,
            chosen,
            self.searcher.stats.nodes
        );
        Ok(chosen)
    }

    fn random_move(&mut self, moves: &[P::Move]) -> Option<P::Move> {
        moves.choose(&mut self.rng).copied()
    }

    /// Win now, else block the opponent's win, else the center, else random
    fn tactical_move(&mut self, position: &P, moves: &[P::Move]) -> Option<P::Move> {
        let ai = self.ai();
        let winning = |player: Player| {
            moves
                .iter()
                .copied()
                .find(|&candidate| position.play(candidate, player).is_win(player))
        };

        winning(ai)
            .or_else(|| winning(ai.other()))
            .or_else(|| position.center().filter(|&center| position.is_legal(center)))
            .or_else(|| self.random_move(moves))
    }
}
