//! Arena of the nodes visited by a traced search
//!
//! Nodes are recorded in post-order: children before their parent, and the
//! placeholders for siblings skipped by a cutoff before the node that cut
//! off. The root is therefore always the last node of a finished search.

use crate::board::Position;
use crate::eval::Score;

/// Index of a node in a [`SearchTrace`]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What happened to a node
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind<M> {
    /// The node was searched and backed up a value
    Evaluated {
        value: Score,
        /// Move to the best child, `None` for leaves
        best_move: Option<M>,
    },
    /// The node was never searched because a cutoff fired at its parent
    Skipped,
}

#[derive(Clone, Debug)]
pub struct TraceNode<P: Position> {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Position among the parent's legal moves
    pub ordinal: usize,
    pub depth: usize,
    /// Bounds in effect when the node was reached
    pub alpha: Score,
    pub beta: Score,
    pub board: P,
    pub kind: NodeKind<P::Move>,
}

impl<P: Position> TraceNode<P> {
    pub fn is_skipped(&self) -> bool {
        matches!(self.kind, NodeKind::Skipped)
    }

    pub fn value(&self) -> Option<Score> {
        match self.kind {
            NodeKind::Evaluated { value, .. } => Some(value),
            NodeKind::Skipped => None,
        }
    }

    pub fn best_move(&self) -> Option<P::Move> {
        match self.kind {
            NodeKind::Evaluated { best_move, .. } => best_move,
            NodeKind::Skipped => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchTrace<P: Position> {
    nodes: Vec<TraceNode<P>>,
}

impl<P: Position> SearchTrace<P> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Appends a node and links its already recorded children back to it
    pub(crate) fn push(&mut self, node: TraceNode<P>) -> NodeId {
        let id = NodeId(self.nodes.len());
        for child in node.children.iter() {
            self.nodes[child.0].parent = Some(id);
        }
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&TraceNode<P>> {
        self.nodes.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TraceNode<P>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub fn root(&self) -> Option<NodeId> {
        match self.nodes.last() {
            Some(node) if node.parent.is_none() => Some(NodeId(self.nodes.len() - 1)),
            _ => None,
        }
    }

    /// Child ordinals from the root down to `id`; empty for the root
    pub fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            path.push(self.nodes[current.0].ordinal);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Tree address of a node: `"0"` for the root, `"0-2-1"` for the
    /// second child of the third child of the root
    pub fn label(&self, id: NodeId) -> String {
        let mut label = String::from("0");
        for ordinal in self.path(id) {
            label.push('-');
            label.push_str(&ordinal.to_string());
        }
        label
    }

    pub fn evaluated(&self) -> usize {
        self.nodes.iter().filter(|node| !node.is_skipped()).count()
    }

    pub fn skipped(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_skipped()).count()
    }

    /// Evaluated nodes scored statically
    pub fn leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| !node.is_skipped() && node.children.is_empty())
            .count()
    }

    /// Evaluated nodes that backed up a value from their children
    pub fn internal(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| !node.is_skipped() && !node.children.is_empty())
            .count()
    }
}

impl<P: Position> Default for SearchTrace<P> {
    fn default() -> Self {
        Self::new()
    }
}
