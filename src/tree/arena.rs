//! Arena-backed move tree.
//!
//! Nodes live in a flat `Vec<BoardNode>` and refer to each other through
//! [`NodeId`] indices. The tree is append-only: nodes are never removed or
//! re-parented, so an index stays valid for the lifetime of the tree. Parents
//! are always allocated before their children, which keeps every child index
//! strictly greater than its parent's.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::node::{BoardNode, NodeId};
use crate::{
    Error, Result,
    tictactoe::{Board, Symbol},
};

/// Deduplicating tree of board states rooted at the empty board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTree {
    nodes: Vec<BoardNode>,
}

/// Summary counts over a [`MoveTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: usize,
    pub own_move_nodes: usize,
    pub opponent_nodes: usize,
}

impl MoveTree {
    /// Create a tree holding only the empty-board root.
    pub fn new() -> Self {
        Self {
            nodes: vec![BoardNode::root()],
        }
    }

    /// The root node ID (always 0).
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Get a node by ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[inline]
    pub fn get(&self, id: NodeId) -> &BoardNode {
        &self.nodes[id.index()]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut BoardNode {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over the children of `id` in creation order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &BoardNode)> + '_ {
        self.get(id)
            .children
            .iter()
            .map(move |&child| (child, self.get(child)))
    }

    /// Child of `node` whose state equals `state`, if one has been recorded.
    pub fn find_child(&self, node: NodeId, state: &Board) -> Option<NodeId> {
        self.get(node)
            .children
            .iter()
            .copied()
            .find(|&child| self.get(child).state == *state)
    }

    /// Record that this player placed `symbol` at `position` from `node`.
    ///
    /// Returns the child holding the resulting board, creating it on first
    /// sight. An existing child is returned as recorded.
    ///
    /// # Errors
    ///
    /// * [`Error::BoardMismatch`] when `prior` is not the state of `node`.
    /// * [`Error::InvalidMove`] / [`Error::InvalidPosition`] when the move
    ///   cannot be applied to `prior`.
    pub fn record_own_move(
        &mut self,
        node: NodeId,
        prior: &Board,
        position: usize,
        symbol: Symbol,
    ) -> Result<NodeId> {
        let current = self.get(node).state;
        if current != *prior {
            return Err(Error::BoardMismatch {
                expected: current.encode(),
                actual: prior.encode(),
            });
        }

        let next = prior.with_move(position, symbol)?;
        if let Some(existing) = self.find_child(node, &next) {
            return Ok(existing);
        }

        Ok(self.append_child(node, next, Some(position)))
    }

    /// Record a board produced by the opponent from `node`.
    ///
    /// Returns `node` itself when `resulting` equals its state (nothing was
    /// played since), otherwise the matching child, creating it on first sight
    /// with `move_played` unset.
    ///
    /// # Errors
    ///
    /// [`Error::InconsistentBoard`] when `resulting` is not `node`'s state plus
    /// exactly one placement.
    pub fn record_opponent_move(&mut self, node: NodeId, resulting: &Board) -> Result<NodeId> {
        let current = self.get(node).state;
        if current == *resulting {
            return Ok(node);
        }
        if current.single_placement(resulting).is_none() {
            return Err(Error::InconsistentBoard {
                previous: current.encode(),
                actual: resulting.encode(),
            });
        }

        if let Some(existing) = self.find_child(node, resulting) {
            return Ok(existing);
        }
        Ok(self.append_child(node, *resulting, None))
    }

    fn append_child(&mut self, parent: NodeId, state: Board, move_played: Option<usize>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(BoardNode::child(parent, state, move_played));
        self.get_mut(parent).children.push(id);
        debug!(
            parent = %parent,
            node = %id,
            state = %state.encode(),
            ?move_played,
            "created tree node"
        );
        id
    }

    /// Symbol this tree's own moves were played with, `None` until the first
    /// own move is recorded.
    pub fn own_symbol(&self) -> Option<Symbol> {
        self.nodes.iter().find_map(|node| {
            let position = node.move_played?;
            node.state.get_cell(position).ok()?.symbol()
        })
    }

    /// Add `delta` to the score of `from` and each of its ancestors up to and
    /// including the root. Returns the number of nodes updated.
    pub fn backpropagate(&mut self, from: NodeId, delta: i64) -> usize {
        let mut touched = 0;
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let node = self.get_mut(id);
            node.score += delta;
            touched += 1;
            cursor = node.parent;
        }
        debug!(from = %from, delta, touched, "backpropagated outcome");
        touched
    }

    /// Walk from `from` up to the root, yielding `from` first.
    pub fn path_to_root(&self, from: NodeId) -> PathToRoot<'_> {
        PathToRoot {
            tree: self,
            cursor: Some(from),
        }
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.path_to_root(id).count() - 1
    }

    /// Check the structural invariants of the tree.
    ///
    /// Used after loading a tree from storage, where the invariants the
    /// recording operations maintain cannot be assumed.
    ///
    /// # Errors
    ///
    /// [`Error::CorruptTree`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let corrupt = |message: String| Err(Error::CorruptTree { message });

        let Some(root) = self.nodes.first() else {
            return corrupt("tree has no root node".to_string());
        };
        if root.parent.is_some() || root.move_played.is_some() || !root.state.is_empty() {
            return corrupt("root must be the empty board with no parent or move".to_string());
        }

        let own = self.own_symbol();
        let mut referenced = vec![false; self.nodes.len()];
        for (index, node) in self.nodes.iter().enumerate() {
            let id = NodeId::new(index);
            let mut sibling_states = HashSet::with_capacity(node.children.len());

            for &child_id in &node.children {
                if child_id.index() <= index || child_id.index() >= self.nodes.len() {
                    return corrupt(format!("node {id} has out-of-order child {child_id}"));
                }
                if std::mem::replace(&mut referenced[child_id.index()], true) {
                    return corrupt(format!("node {child_id} has more than one parent"));
                }

                let child = self.get(child_id);
                if child.parent != Some(id) {
                    return corrupt(format!("node {child_id} does not point back to {id}"));
                }
                if !sibling_states.insert(child.state) {
                    return corrupt(format!(
                        "node {id} has duplicate children for state '{}'",
                        child.state.encode()
                    ));
                }

                let Some((position, placed)) = node.state.single_placement(&child.state) else {
                    return corrupt(format!("node {child_id} is not a single placement after {id}"));
                };
                if let Some(played) = child.move_played
                    && played != position
                {
                    return corrupt(format!(
                        "node {child_id} records move {played} but cell {position} changed"
                    ));
                }
                let expected = if child.is_own_move() {
                    own
                } else {
                    own.map(Symbol::opponent)
                };
                if let Some(expected) = expected
                    && placed.symbol() != Some(expected)
                {
                    return corrupt(format!(
                        "node {child_id} places {} where {expected} was expected",
                        placed.to_char()
                    ));
                }
            }
        }

        if let Some(orphan) = referenced.iter().skip(1).position(|&seen| !seen) {
            return corrupt(format!("node {} is unreachable", NodeId::new(orphan + 1)));
        }
        Ok(())
    }

    /// Summary counts over the whole tree.
    pub fn stats(&self) -> TreeStats {
        let mut depths = vec![0usize; self.nodes.len()];
        let mut stats = TreeStats {
            nodes: self.nodes.len(),
            ..TreeStats::default()
        };

        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                depths[index] = depths[parent.index()] + 1;
                if node.is_own_move() {
                    stats.own_move_nodes += 1;
                } else {
                    stats.opponent_nodes += 1;
                }
            }
            if node.is_leaf() {
                stats.leaves += 1;
            }
            stats.max_depth = stats.max_depth.max(depths[index]);
        }
        stats
    }
}

impl Default for MoveTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the ancestors of a node, see [`MoveTree::path_to_root`].
pub struct PathToRoot<'a> {
    tree: &'a MoveTree,
    cursor: Option<NodeId>,
}

impl Iterator for PathToRoot<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.cursor?;
        self.cursor = self.tree.get(current).parent;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        Board::from_string(s).unwrap()
    }

    #[test]
    fn new_tree_has_empty_root() {
        let tree = MoveTree::new();
        let root = tree.get(tree.root());
        assert!(root.state().is_empty());
        assert_eq!(root.move_played(), None);
        assert_eq!(root.parent(), None);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn record_own_move_is_idempotent() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let empty = Board::new();

        let first = tree.record_own_move(root, &empty, 4, Symbol::X).unwrap();
        let second = tree.record_own_move(root, &empty, 4, Symbol::X).unwrap();

        assert_eq!(first, second);
        assert_eq!(tree.get(root).children().len(), 1);
        assert_eq!(tree.get(first).move_played(), Some(4));
        assert_eq!(tree.get(first).state(), &board("....X...."));
    }

    #[test]
    fn record_own_move_rejects_stale_board() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let err = tree
            .record_own_move(root, &board("X........"), 4, Symbol::O)
            .unwrap_err();
        assert!(matches!(err, Error::BoardMismatch { .. }));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn record_own_move_propagates_illegal_moves() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let x0 = tree
            .record_own_move(root, &Board::new(), 0, Symbol::X)
            .unwrap();
        let err = tree
            .record_own_move(x0, &board("X........"), 0, Symbol::O)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMove { position: 0 }));
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn record_opponent_move_finds_or_creates() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let after = board("..X......");

        let created = tree.record_opponent_move(root, &after).unwrap();
        assert_eq!(tree.get(created).move_played(), None);
        assert_eq!(tree.get(created).parent(), Some(root));

        let found = tree.record_opponent_move(root, &after).unwrap();
        assert_eq!(created, found);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn record_opponent_move_without_change_is_noop() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let same = tree.record_opponent_move(root, &Board::new()).unwrap();
        assert_eq!(same, root);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn record_opponent_move_rejects_multi_cell_jumps() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let err = tree
            .record_opponent_move(root, &board("X...O...."))
            .unwrap_err();
        assert!(matches!(err, Error::InconsistentBoard { .. }));
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn own_move_never_rewrites_existing_node() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let opponent = tree.record_opponent_move(root, &board("X........")).unwrap();

        let own = tree
            .record_own_move(root, &Board::new(), 0, Symbol::X)
            .unwrap();
        assert_eq!(own, opponent);
        assert_eq!(tree.get(own).move_played(), None);
        assert_eq!(tree.get(root).children().len(), 1);
    }

    #[test]
    fn own_symbol_follows_first_own_move() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        assert_eq!(tree.own_symbol(), None);

        let opening = tree.record_opponent_move(root, &board("X........")).unwrap();
        assert_eq!(tree.own_symbol(), None);

        tree.record_own_move(opening, &board("X........"), 4, Symbol::O)
            .unwrap();
        assert_eq!(tree.own_symbol(), Some(Symbol::O));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn validate_rejects_mixed_perspectives() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        tree.record_own_move(root, &Board::new(), 0, Symbol::X)
            .unwrap();
        tree.record_own_move(root, &Board::new(), 1, Symbol::O)
            .unwrap();

        let err = tree.validate().unwrap_err();
        assert!(matches!(err, Error::CorruptTree { .. }));
        assert!(err.to_string().contains("expected"), "got {err}");
    }

    #[test]
    fn siblings_keep_creation_order() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let empty = Board::new();
        for position in [5, 1, 7] {
            tree.record_own_move(root, &empty, position, Symbol::X)
                .unwrap();
        }
        let moves: Vec<_> = tree
            .children(root)
            .map(|(_, node)| node.move_played())
            .collect();
        assert_eq!(moves, vec![Some(5), Some(1), Some(7)]);
    }

    #[test]
    fn backpropagation_updates_whole_path() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let a = tree
            .record_own_move(root, &Board::new(), 0, Symbol::X)
            .unwrap();
        let b = tree.record_opponent_move(a, &board("X...O....")).unwrap();
        let side = tree
            .record_own_move(root, &Board::new(), 1, Symbol::X)
            .unwrap();

        assert_eq!(tree.backpropagate(b, 2), 3);
        assert_eq!(tree.get(root).score(), 2);
        assert_eq!(tree.get(a).score(), 2);
        assert_eq!(tree.get(b).score(), 2);
        assert_eq!(tree.get(side).score(), 0);

        tree.backpropagate(b, -4);
        assert_eq!(tree.get(root).score(), -2);
        assert_eq!(tree.get(a).score(), -2);
        assert_eq!(tree.get(b).score(), -2);

        tree.backpropagate(b, 0);
        assert_eq!(tree.get(b).score(), -2);
    }

    #[test]
    fn path_to_root_and_depth() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let a = tree
            .record_own_move(root, &Board::new(), 0, Symbol::X)
            .unwrap();
        let b = tree.record_opponent_move(a, &board("X...O....")).unwrap();

        let path: Vec<_> = tree.path_to_root(b).collect();
        assert_eq!(path, vec![b, a, root]);
        assert_eq!(tree.depth(b), 2);
        assert_eq!(tree.depth(root), 0);
    }

    #[test]
    fn validate_accepts_recorded_tree() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let a = tree
            .record_own_move(root, &Board::new(), 0, Symbol::X)
            .unwrap();
        tree.record_opponent_move(a, &board("X...O....")).unwrap();
        tree.record_opponent_move(a, &board("X.......O")).unwrap();
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_siblings() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let a = tree
            .record_own_move(root, &Board::new(), 0, Symbol::X)
            .unwrap();
        let state = *tree.get(a).state();
        tree.nodes.push(BoardNode::child(root, state, Some(0)));
        let duplicate = NodeId::new(tree.nodes.len() - 1);
        tree.nodes[0].children.push(duplicate);

        let err = tree.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"), "got {err}");
    }

    #[test]
    fn validate_rejects_wrong_move_played() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let a = tree
            .record_own_move(root, &Board::new(), 0, Symbol::X)
            .unwrap();
        tree.nodes[a.index()].move_played = Some(3);

        let err = tree.validate().unwrap_err();
        assert!(matches!(err, Error::CorruptTree { .. }));
    }

    #[test]
    fn stats_count_node_kinds() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let a = tree
            .record_own_move(root, &Board::new(), 0, Symbol::X)
            .unwrap();
        tree.record_own_move(root, &Board::new(), 1, Symbol::X)
            .unwrap();
        tree.record_opponent_move(a, &board("X...O....")).unwrap();

        let stats = tree.stats();
        assert_eq!(stats.nodes, 4);
        assert_eq!(stats.own_move_nodes, 2);
        assert_eq!(stats.opponent_nodes, 1);
        assert_eq!(stats.leaves, 2);
        assert_eq!(stats.max_depth, 2);
    }
}
