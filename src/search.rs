//! Minimax game tree search with alpha-beta pruning

use log::{debug, warn};
use rayon::prelude::*;

use std::ops::AddAssign;

use crate::board::{Player, Position};
use crate::config::SearchConfig;
use crate::eval::{Evaluator, Score, MAX_SCORE, MIN_SCORE};
use crate::trace::{NodeId, NodeKind, SearchTrace, TraceNode};

/// Result of searching one node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// Backed-up minimax value of the node
    pub value: Score,
    /// Move to the best child, `None` at leaves
    pub best_move: Option<M>,
    /// The node's entry in the search trace, if tracing is enabled
    pub node: Option<NodeId>,
}

/// Node counters of a search session (for diagnostics only)
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes actually searched, leaves included
    pub nodes: usize,
    /// Number of cutoffs that fired
    pub cutoffs: usize,
    /// Siblings never searched because of a cutoff
    pub pruned: usize,
}

impl SearchStats {
    /// Searched nodes plus the nodes skipped by cutoffs
    pub fn total(&self) -> usize {
        self.nodes + self.pruned
    }

    /// Share of all considered nodes that were skipped, in `[0, 1]`
    pub fn efficiency(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.pruned as f64 / self.total() as f64
        }
    }
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
        self.pruned += other.pruned;
    }
}

/// An alpha-beta searcher for one game and one AI player
///
/// # Notes
/// The AI is always the maximizing side. Each node searches its own copy
/// of the board, children are tried in ascending move order and only a
/// strictly better value replaces the running best, so ties resolve to the
/// leftmost move.
#[derive(Clone)]
pub struct Searcher<P: Position, E> {
    evaluator: E,
    ai: Player,
    config: SearchConfig,

    /// Counters of the searches run since the last reset
    pub stats: SearchStats,
    trace: Option<SearchTrace<P>>,
}

impl<P: Position, E: Evaluator<P>> Searcher<P, E> {
    /// Creates a searcher, clamping the depth limit to what the game allows
    pub fn new(evaluator: E, ai: Player, mut config: SearchConfig) -> Self {
        let max_depth = config.max_depth.clamp(1, P::DEPTH_LIMIT);
        if max_depth != config.max_depth {
            debug!(
                "clamping search depth {} to {}",
                config.max_depth, max_depth
            );
            config.max_depth = max_depth;
        }
        if config.trace && config.parallel {
            warn!("node tracing requires a sequential search, ignoring parallel setting");
            config.parallel = false;
        }

        Self {
            evaluator,
            ai,
            config,
            stats: SearchStats::default(),
            trace: if config.trace {
                Some(SearchTrace::new())
            } else {
                None
            },
        }
    }

    pub fn ai(&self) -> Player {
        self.ai
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// The nodes recorded since the last reset, if tracing is enabled
    pub fn trace(&self) -> Option<&SearchTrace<P>> {
        self.trace.as_ref()
    }

    /// Clears counters and the trace before a new decision
    pub fn reset(&mut self) {
        self.stats = SearchStats::default();
        if let Some(trace) = &mut self.trace {
            trace.clear();
        }
    }

    /// Searches `position` with the AI to move and an unbounded window
    pub fn search_root(&mut self, position: &P) -> SearchResult<P::Move> {
        self.search(position, 0, MIN_SCORE, MAX_SCORE, true)
    }

    /// Performs game tree search
    ///
    /// Returns the value of `position` seen from the AI and the move that
    /// achieves it. `depth` is the distance from the root, the search stops
    /// at terminal positions and at the configured maximum depth.
    pub fn search(
        &mut self,
        position: &P,
        depth: usize,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> SearchResult<P::Move> {
        self.search_node(position, depth, alpha, beta, maximizing, 0)
    }

    fn search_node(
        &mut self,
        position: &P,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        ordinal: usize,
    ) -> SearchResult<P::Move> {
        self.stats.nodes += 1;
        let bounds = (alpha, beta);

        if let Some(value) = self.leaf_value(position, depth) {
            let kind = NodeKind::Evaluated {
                value,
                best_move: None,
            };
            let node = self.record(position, depth, ordinal, bounds, kind, Vec::new());
            return SearchResult {
                value,
                best_move: None,
                node,
            };
        }

        let moves = position.legal_moves();
        let (mover, mut best) = if maximizing {
            (self.ai, MIN_SCORE)
        } else {
            (self.ai.other(), MAX_SCORE)
        };
        let mut best_move = None;
        let mut children = Vec::new();

        for (i, &candidate) in moves.iter().enumerate() {
            let next = position.play(candidate, mover);
            let result = self.search_node(&next, depth + 1, alpha, beta, !maximizing, i);
            children.extend(result.node);

            if maximizing {
                if result.value > best {
                    best = result.value;
                    best_move = Some(candidate);
                }
                alpha = alpha.max(best);
            } else {
                if result.value < best {
                    best = result.value;
                    best_move = Some(candidate);
                }
                beta = beta.min(best);
            }

            // the opponent will never allow this node, the remaining
            // siblings cannot change the result
            if beta <= alpha {
                self.stats.cutoffs += 1;
                self.stats.pruned += moves.len() - i - 1;
                if let Some(trace) = &mut self.trace {
                    for (j, &skipped) in moves.iter().enumerate().skip(i + 1) {
                        children.push(trace.push(TraceNode {
                            parent: None,
                            children: Vec::new(),
                            ordinal: j,
                            depth: depth + 1,
                            alpha,
                            beta,
                            board: position.play(skipped, mover),
                            kind: NodeKind::Skipped,
                        }));
                    }
                }
                break;
            }
        }

        let kind = NodeKind::Evaluated {
            value: best,
            best_move,
        };
        let node = self.record(position, depth, ordinal, bounds, kind, children);
        SearchResult {
            value: best,
            best_move,
            node,
        }
    }

    fn leaf_value(&self, position: &P, depth: usize) -> Option<Score> {
        match self.evaluator.terminal(position, depth) {
            Some(value) => Some(value),
            None if depth >= self.config.max_depth => Some(self.evaluator.heuristic(position)),
            None => None,
        }
    }

    fn record(
        &mut self,
        position: &P,
        depth: usize,
        ordinal: usize,
        (alpha, beta): (Score, Score),
        kind: NodeKind<P::Move>,
        children: Vec<NodeId>,
    ) -> Option<NodeId> {
        let trace = self.trace.as_mut()?;
        Some(trace.push(TraceNode {
            parent: None,
            children,
            ordinal,
            depth,
            alpha,
            beta,
            board: position.clone(),
            kind,
        }))
    }
}

impl<P, E> Searcher<P, E>
where
    P: Position + Send + Sync,
    P::Move: Send + Sync,
    E: Evaluator<P> + Clone + Send + Sync,
{
    /// Searches the root's children on the rayon thread pool
    ///
    /// Every child gets the full window, so no bounds are shared between
    /// threads. The value and the (leftmost) best move are the same as the
    /// sequential search's, only fewer cutoffs fire. Falls back to
    /// [`search_root`](Searcher::search_root) when tracing is enabled.
    pub fn search_parallel(&mut self, position: &P) -> SearchResult<P::Move> {
        if self.trace.is_some() || self.leaf_value(position, 0).is_some() {
            return self.search_root(position);
        }
        self.stats.nodes += 1;

        let worker = Searcher::<P, E> {
            evaluator: self.evaluator.clone(),
            ai: self.ai,
            config: self.config,
            stats: SearchStats::default(),
            trace: None,
        };
        let ai = self.ai;
        let moves = position.legal_moves();
        let results: Vec<(P::Move, Score, SearchStats)> = moves
            .par_iter()
            .enumerate()
            .map(|(i, &candidate)| {
                let mut worker = worker.clone();
                let next = position.play(candidate, ai);
                let result = worker.search_node(&next, 1, MIN_SCORE, MAX_SCORE, false, i);
                (candidate, result.value, worker.stats)
            })
            .collect();

        let mut best = MIN_SCORE;
        let mut best_move = None;
        for (candidate, value, stats) in results {
            self.stats += stats;
            if value > best {
                best = value;
                best_move = Some(candidate);
            }
        }

        SearchResult {
            value: best,
            best_move,
            node: None,
        }
    }

    /// Runs the parallel or sequential root search, as configured
    pub fn decide(&mut self, position: &P) -> SearchResult<P::Move> {
        let result = if self.config.parallel {
            self.search_parallel(position)
        } else {
            self.search_root(position)
        };
        debug!(
            "searched {} nodes, pruned {} in {} cutoffs: value {}, best move {:?}",
            self.stats.nodes, self.stats.pruned, self.stats.cutoffs, result.value, result.best_move
        );
        result
    }
}

/// Plain minimax without pruning, for checking the alpha-beta search
///
/// Uses the same leaf rules, move order and tie-break as [`Searcher`].
pub fn minimax<P: Position, E: Evaluator<P>>(
    evaluator: &E,
    ai: Player,
    position: &P,
    depth: usize,
    max_depth: usize,
    maximizing: bool,
) -> (Score, Option<P::Move>) {
    if let Some(value) = evaluator.terminal(position, depth) {
        return (value, None);
    }
    if depth >= max_depth {
        return (evaluator.heuristic(position), None);
    }

    let mover = if maximizing { ai } else { ai.other() };
    let mut best = if maximizing { MIN_SCORE } else { MAX_SCORE };
    let mut best_move = None;
    for candidate in position.legal_moves() {
        let next = position.play(candidate, mover);
        let (value, _) = minimax(evaluator, ai, &next, depth + 1, max_depth, !maximizing);
        if (maximizing && value > best) || (!maximizing && value < best) {
            best = value;
            best_move = Some(candidate);
        }
    }
    (best, best_move)
}
