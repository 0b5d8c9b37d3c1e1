//! Bulk loading of [RBTree] from pre-sorted entries.
//!
//! Entries are laid out in the arena in key order, the tree is then
//! linked by recursive halving over index ranges, giving a height
//! balanced tree in O(n) without any rebalancing. Every node starts
//! black, and the deepest level is recolored red.
//!
//! The textual bulk-load format is a line holding the entry count `n`
//! followed by `n` lines of `key value`, keys strictly ascending.

use log::debug;

use std::{fmt, io, str::FromStr};

use crate::{
    node::{Color, Links, Node, NodeId},
    Error, RBTree, Result,
};

impl<K, V> RBTree<K, V> {
    /// Build a tree from entries sorted by key in strictly ascending order.
    /// Return [Error::InvalidInput] if the entries are out of order or
    /// carry duplicate keys.
    pub fn from_sorted<I>(iter: I) -> Result<RBTree<K, V>>
    where
        K: Ord + fmt::Debug,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut nodes: Vec<Node<K, V>> = Vec::default();
        for (key, value) in iter {
            if let Some(prev) = nodes.last() {
                if prev.key.ge(&key) {
                    err_at!(InvalidInput, msg: "unsorted keys {:?} >= {:?}", prev.key, key)?;
                }
            }
            let mut node = Node::new(key, value);
            node.set_black();
            nodes.push(node);
        }

        let n = nodes.len();
        let mut tree = RBTree {
            nodes,
            nil: Links::sentinel(),
            root: NodeId::NIL,
        };
        if n == 0 {
            return Ok(tree);
        }

        tree.root = tree.build(0, n, NodeId::NIL);
        let depth = balanced_depth(n);
        if depth > 1 {
            tree.recolor_depth(tree.root, 1, depth);
        }

        debug!("bulk loaded {} entries, max_depth {}", n, depth);
        Ok(tree)
    }

    // link nodes in [start, end) under `parent` and return the subtree root.
    fn build(&mut self, start: usize, end: usize, parent: NodeId) -> NodeId {
        if start >= end {
            return NodeId::NIL;
        }

        let mid = start + (end - start - 1) / 2;
        let id = NodeId::from_index(mid);
        let left = self.build(start, mid, id);
        let right = self.build(mid + 1, end, id);

        let links = &mut self.nodes[mid].links;
        links.parent = parent;
        links.left = left;
        links.right = right;
        id
    }

    fn recolor_depth(&mut self, id: NodeId, depth: usize, max_depth: usize) {
        if id.is_external() {
            return;
        }
        if depth == max_depth {
            self.set_color(id, Color::Red);
        } else {
            let (left, right) = (self.left(id), self.right(id));
            self.recolor_depth(left, depth + 1, max_depth);
            self.recolor_depth(right, depth + 1, max_depth);
        }
    }
}

/// Height of a tree built by [RBTree::from_sorted] over `n` entries.
///
/// Same as `ceil(log2(n))` for `n` that is not a power of two, powers of
/// two need one more level.
pub fn balanced_depth(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

/// Parse the textual bulk-load format from `reader`. Entries are returned
/// in input order, sort order is checked by [RBTree::from_sorted].
pub fn parse_events<K, V, R>(reader: R) -> Result<Vec<(K, V)>>
where
    K: FromStr,
    V: FromStr,
    <K as FromStr>::Err: fmt::Display,
    <V as FromStr>::Err: fmt::Display,
    R: io::BufRead,
{
    let mut lines = reader.lines();

    let n: usize = match lines.next() {
        Some(line) => {
            let line = err_at!(IOError, line)?;
            err_at!(ParseError, line.trim().parse::<usize>(), "count {:?}", line)?
        }
        None => err_at!(InvalidInput, msg: "missing entry count")?,
    };

    // count is untrusted, grow with the entries actually read.
    let mut entries = Vec::new();
    for i in 0..n {
        let line = match lines.next() {
            Some(line) => err_at!(IOError, line)?,
            None => err_at!(InvalidInput, msg: "expected {} entries, found {}", n, i)?,
        };
        let mut tokens = line.split_whitespace();
        let (key, value) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => err_at!(InvalidInput, msg: "bad entry {:?}", line)?,
        };
        let key = err_at!(ParseError, key.parse::<K>(), "key in {:?}", line)?;
        let value = err_at!(ParseError, value.parse::<V>(), "value in {:?}", line)?;
        entries.push((key, value));
    }

    for line in lines {
        let line = err_at!(IOError, line)?;
        if !line.trim().is_empty() {
            err_at!(InvalidInput, msg: "trailing input {:?}", line)?;
        }
    }

    Ok(entries)
}

#[cfg(test)]
#[path = "load_test.rs"]
mod load_test;
