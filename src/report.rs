//! Post-move summary of a traced search

use rand::{seq::SliceRandom, RngCore};

use std::collections::BTreeSet;
use std::fmt;

use crate::board::Position;
use crate::trace::{NodeId, SearchTrace};

/// Most nodes shown when a trace is sampled
pub const DISPLAY_LIMIT: usize = 20;
/// Evaluated nodes sampled from each depth level
pub const SAMPLES_PER_DEPTH: usize = 3;
/// Skipped nodes sampled from the whole trace
pub const PRUNED_SAMPLES: usize = 3;

/// How to pick nodes when a trace is too large to show in full
pub enum Sampling<'r> {
    /// The first nodes of each group in display order
    Leading,
    /// Uniformly random nodes of each group
    Random(&'r mut dyn RngCore),
}

/// Node counts of a traced search
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraceSummary {
    /// Evaluated and skipped nodes
    pub total: usize,
    pub evaluated: usize,
    /// Skipped siblings
    pub pruned: usize,
    /// Nodes at which a cutoff fired
    pub cutoffs: usize,
    /// `pruned / total`, 0 for an empty trace
    pub efficiency: f64,
}

impl fmt::Display for TraceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total nodes: {}", self.total)?;
        writeln!(f, "Nodes evaluated: {}", self.evaluated)?;
        write!(
            f,
            "Nodes pruned: {} ({:.2}%) in {} cutoffs",
            self.pruned,
            self.efficiency * 100.0,
            self.cutoffs
        )
    }
}

pub struct TraceReport<'t, P: Position> {
    trace: &'t SearchTrace<P>,
}

impl<'t, P: Position> TraceReport<'t, P> {
    pub fn new(trace: &'t SearchTrace<P>) -> Self {
        Self { trace }
    }

    pub fn trace(&self) -> &'t SearchTrace<P> {
        self.trace
    }

    pub fn summary(&self) -> TraceSummary {
        let total = self.trace.len();
        let pruned = self.trace.skipped();
        let cutoffs = self
            .trace
            .iter()
            .filter(|(_, node)| {
                node.children.iter().any(|&child| {
                    self.trace
                        .get(child)
                        .map_or(false, |child| child.is_skipped())
                })
            })
            .count();

        TraceSummary {
            total,
            evaluated: total - pruned,
            pruned,
            cutoffs,
            efficiency: if total == 0 {
                0.0
            } else {
                pruned as f64 / total as f64
            },
        }
    }

    /// Every node ordered by depth, then by tree address
    pub fn ordered(&self) -> Vec<NodeId> {
        let mut keyed: Vec<(usize, Vec<usize>, NodeId)> = self
            .trace
            .iter()
            .map(|(id, node)| (node.depth, self.trace.path(id), id))
            .collect();
        keyed.sort();
        keyed.into_iter().map(|(_, _, id)| id).collect()
    }

    /// The nodes worth showing, in display order
    ///
    /// Small traces are shown in full. Larger ones are cut down to the
    /// root, a few evaluated nodes from every depth and a few skipped
    /// nodes, at most [`DISPLAY_LIMIT`] in total.
    pub fn sample(&self, mut sampling: Sampling<'_>) -> Vec<NodeId> {
        let ordered = self.ordered();
        if ordered.len() <= DISPLAY_LIMIT {
            return ordered;
        }

        let mut chosen = Vec::new();
        chosen.extend(self.trace.root());

        let depths: BTreeSet<usize> = ordered
            .iter()
            .filter_map(|&id| self.trace.get(id))
            .map(|node| node.depth)
            .collect();
        for depth in depths {
            let group: Vec<NodeId> = ordered
                .iter()
                .copied()
                .filter(|id| !chosen.contains(id))
                .filter(|&id| {
                    self.trace
                        .get(id)
                        .map_or(false, |node| node.depth == depth && !node.is_skipped())
                })
                .collect();
            chosen.extend(pick(&group, SAMPLES_PER_DEPTH, &mut sampling));
        }

        let pruned: Vec<NodeId> = ordered
            .iter()
            .copied()
            .filter(|&id| self.trace.get(id).map_or(false, |node| node.is_skipped()))
            .collect();
        chosen.extend(pick(&pruned, PRUNED_SAMPLES, &mut sampling));

        chosen.truncate(DISPLAY_LIMIT);
        ordered
            .into_iter()
            .filter(|id| chosen.contains(id))
            .collect()
    }
}

fn pick(group: &[NodeId], count: usize, sampling: &mut Sampling<'_>) -> Vec<NodeId> {
    match sampling {
        Sampling::Leading => group.iter().take(count).copied().collect(),
        Sampling::Random(rng) => group.choose_multiple(&mut **rng, count).copied().collect(),
    }
}
