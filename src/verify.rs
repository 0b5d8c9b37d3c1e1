//! Invariant verification for [RBTree].
//!
//! Nothing here is invoked on a mutating path, it is meant for
//! diagnostics and tests.

use std::fmt;

use crate::{node::NodeId, Error, RBTree, Result};

/// Statistics gathered by [RBTree::validate].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of entries reachable from the root.
    pub n_count: usize,
    /// Number of black nodes on every path from root to the sentinel,
    /// the sentinel not included.
    pub blacks: usize,
    /// Number of nodes on the longest path from root to a leaf.
    pub depth: usize,
}

impl<K, V> RBTree<K, V> {
    /// Validate red-black tree with following rules:
    ///
    /// * Root node is black, unless the tree is empty.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks is the same on every path from root to sentinel.
    /// * Sentinel is black and carries no residual links.
    /// * Keys are in sorted order and parent links mirror child links.
    ///
    /// Additionally return statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats>
    where
        K: Ord + fmt::Debug,
    {
        if !self.nil.is_detached() {
            err_at!(Fatal, msg: "sentinel is not detached {:?}", self.nil)?;
        }
        if self.is_red(self.root) {
            err_at!(Fatal, msg: "root node must be black")?;
        }
        if self.root.is_internal() && self.parent(self.root).is_internal() {
            err_at!(Fatal, msg: "root node has a parent")?;
        }

        let blacks = self.left_blacks();
        let mut ss = Stats {
            n_count: 0,
            blacks,
            depth: 0,
        };
        self.validate_tree(self.root, (None, None), 0, 1, &mut ss)?;

        if ss.n_count != self.len() {
            err_at!(Fatal, msg: "n_count {} != {}", ss.n_count, self.len())?;
        }
        Ok(ss)
    }

    /// Return whether all red-black invariants hold, along with the
    /// tree's maximum depth.
    pub fn verify(&self) -> (bool, usize)
    where
        K: Ord + fmt::Debug,
    {
        (self.validate().is_ok(), self.max_depth())
    }

    /// Number of nodes on the longest path from root to a leaf, zero
    /// for an empty tree.
    pub fn max_depth(&self) -> usize {
        self.depth_of(self.root)
    }

    fn depth_of(&self, id: NodeId) -> usize {
        match id {
            id if id.is_external() => 0,
            id => 1 + self.depth_of(self.left(id)).max(self.depth_of(self.right(id))),
        }
    }

    // black height along the left spine.
    fn left_blacks(&self) -> usize {
        let (mut id, mut blacks) = (self.root, 0);
        while id.is_internal() {
            if self.is_black(id) {
                blacks += 1;
            }
            id = self.left(id);
        }
        blacks
    }

    fn validate_tree(
        &self,
        id: NodeId,
        (low, high): (Option<&K>, Option<&K>),
        mut n_blacks: usize,
        depth: usize,
        ss: &mut Stats,
    ) -> Result<()>
    where
        K: Ord + fmt::Debug,
    {
        if id.is_external() {
            if n_blacks != ss.blacks {
                err_at!(Fatal, msg: "unbalanced blacks {} != {}", n_blacks, ss.blacks)?;
            }
            return Ok(());
        }

        let node = self.node(id);
        if node.links.is_red() && self.is_red(node.links.parent) {
            err_at!(Fatal, msg: "consecutive reds at {:?}", node.key)?;
        }
        if node.links.is_black() {
            n_blacks += 1;
        }

        match low {
            Some(low) if node.key.le(low) => {
                err_at!(Fatal, msg: "sort key:{:?} low:{:?}", node.key, low)?
            }
            _ => (),
        }
        match high {
            Some(high) if node.key.ge(high) => {
                err_at!(Fatal, msg: "sort key:{:?} high:{:?}", node.key, high)?
            }
            _ => (),
        }

        let (left, right) = (node.links.left, node.links.right);
        for child in [left, right].iter() {
            if child.is_internal() && self.parent(*child) != id {
                err_at!(Fatal, msg: "broken parent link under {:?}", node.key)?;
            }
        }

        ss.n_count += 1;
        ss.depth = ss.depth.max(depth);

        self.validate_tree(left, (low, Some(&node.key)), n_blacks, depth + 1, ss)?;
        self.validate_tree(right, (Some(&node.key), high), n_blacks, depth + 1, ss)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "verify_test.rs"]
mod verify_test;
