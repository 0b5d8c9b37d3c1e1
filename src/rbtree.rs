//! Module provide ordered-map implemented by [RBTree] type.
//!
//! RBTree is a textbook [red-black][wiki-rb] tree with parent links. Nodes
//! live in an arena, a `Vec`, and refer to each other by index. A single
//! sentinel, the external node, terminates every path and stands in for the
//! parent of the root.
//!
//! - Each entry in RBTree instance correspond to a {Key, Value} pair.
//! - Parametrised over `key-type` and `value-type`.
//! - Insert, lookup and delete in O(log n).
//! - Full table scan, in ascending key order.
//! - Insertion and deletion fixups are iterative.
//! - Not thread safe.
//!
//! [wiki-rb]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use log::trace;

use std::{borrow::Borrow, cmp::Ordering, iter::FromIterator, mem};

use crate::node::{Color, Links, Node, NodeId};

/// Opaque reference to an entry in [RBTree].
///
/// Handles are returned by [RBTree::insert] and [RBTree::find]. Any removal
/// from the tree may relocate entries, hence a handle must not be used
/// after a removal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Handle(pub(crate) NodeId);

/// Outcome of [RBTree::insert].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Insert {
    /// A new entry was created.
    Inserted(Handle),
    /// Key is already present, tree is left untouched and the handle
    /// points to the existing entry.
    Present(Handle),
}

impl Insert {
    pub fn to_handle(self) -> Handle {
        match self {
            Insert::Inserted(h) | Insert::Present(h) => h,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// RBTree manage a single instance of in-memory ordered-map using
/// [red-black][wiki-rb] tree.
///
/// [wiki-rb]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
#[derive(Clone)]
pub struct RBTree<K, V> {
    pub(crate) nodes: Vec<Node<K, V>>,
    pub(crate) nil: Links, // store: the sentinel
    pub(crate) root: NodeId,
}

impl<K, V> Default for RBTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RBTree<K, V> {
    /// Create an empty instance of RBTree.
    pub fn new() -> RBTree<K, V> {
        RBTree {
            nodes: Vec::default(),
            nil: Links::sentinel(),
            root: NodeId::NIL,
        }
    }
}

/// Maintenance API.
impl<K, V> RBTree<K, V> {
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return the key for entry referred by `handle`.
    pub fn key(&self, handle: Handle) -> &K {
        &self.node(handle.0).key
    }

    /// Return the value for entry referred by `handle`.
    pub fn value(&self, handle: Handle) -> &V {
        &self.node(handle.0).value
    }

    /// Return a mutable reference to the value referred by `handle`.
    pub fn value_mut(&mut self, handle: Handle) -> &mut V {
        debug_assert!(handle.0.to_index() < self.nodes.len(), "stale {:?}", handle);
        &mut self.nodes[handle.0.to_index()].value
    }
}

impl<K, V> RBTree<K, V> {
    /// Insert a new entry. If key is already present, return
    /// [Insert::Present] with the existing entry, without touching the tree.
    pub fn insert(&mut self, key: K, value: V) -> Insert
    where
        K: Ord,
    {
        let (mut parent, mut curr) = (NodeId::NIL, self.root);
        let mut side = Side::Left;
        while curr.is_internal() {
            parent = curr;
            let node = self.node(curr);
            curr = match key.cmp(&node.key) {
                Ordering::Less => {
                    side = Side::Left;
                    node.links.left
                }
                Ordering::Greater => {
                    side = Side::Right;
                    node.links.right
                }
                Ordering::Equal => return Insert::Present(Handle(curr)),
            };
        }

        let id = NodeId::from_index(self.nodes.len());
        let mut node = Node::new(key, value);
        node.links.parent = parent;
        self.nodes.push(node);

        if parent.is_external() {
            self.root = id;
        } else {
            self.set_child(parent, side, id);
        }
        self.insert_fixup(id);

        Insert::Inserted(Handle(id))
    }

    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old value.
    pub fn set(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        match self.find(&key) {
            Some(handle) => Some(mem::replace(self.value_mut(handle), value)),
            None => {
                self.insert(key, value);
                None
            }
        }
    }

    /// Remove the entry referred by `handle` and return its key and value.
    pub fn delete(&mut self, handle: Handle) -> (K, V) {
        let node = self.delete_node(handle.0);
        (node.key, node.value)
    }

    /// Remove key from this instance and return its value. If key is
    /// not present, then remove is effectively a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let handle = self.find(key)?;
        Some(self.delete(handle).1)
    }
}

impl<K, V> RBTree<K, V> {
    /// Find the entry for key.
    pub fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_node(key);
        if id.is_internal() {
            Some(Handle(id))
        } else {
            None
        }
    }

    /// Get the value for key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|h| self.value(h))
    }

    /// Get a mutable reference to the value for key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let handle = self.find(key)?;
        Some(self.value_mut(handle))
    }

    /// Return the entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        match self.root {
            root if root.is_external() => None,
            root => Some(self.entry(self.minimum(root))),
        }
    }

    /// Return the entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        match self.root {
            root if root.is_external() => None,
            root => Some(self.entry(self.maximum(root))),
        }
    }

    /// Return an iterator over all entries in this instance, in
    /// ascending key order.
    pub fn iter(&self) -> Iter<K, V> {
        Iter {
            tree: self,
            curr: self.root,
            stack: Vec::default(),
        }
    }

    pub(crate) fn find_node<Q>(&self, key: &Q) -> NodeId
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut curr = self.root;
        while curr.is_internal() {
            let node = self.node(curr);
            curr = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.links.left,
                Ordering::Greater => node.links.right,
                Ordering::Equal => return curr,
            };
        }
        NodeId::NIL
    }
}

// arena and link accessors, the sentinel is resolved here so that the
// rest of the engine never branches on a missing child or parent.
impl<K, V> RBTree<K, V> {
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        debug_assert!(id.to_index() < self.nodes.len(), "stale {:?}", id);
        &self.nodes[id.to_index()]
    }

    #[inline]
    pub(crate) fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = self.node(id);
        (&node.key, &node.value)
    }

    #[inline]
    pub(crate) fn links(&self, id: NodeId) -> &Links {
        if id.is_external() {
            &self.nil
        } else {
            &self.nodes[id.to_index()].links
        }
    }

    #[inline]
    fn links_mut(&mut self, id: NodeId) -> &mut Links {
        if id.is_external() {
            &mut self.nil
        } else {
            &mut self.nodes[id.to_index()].links
        }
    }

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        self.links(id).parent
    }

    #[inline]
    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        self.links(id).left
    }

    #[inline]
    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        self.links(id).right
    }

    #[inline]
    pub(crate) fn child(&self, id: NodeId, side: Side) -> NodeId {
        match side {
            Side::Left => self.left(id),
            Side::Right => self.right(id),
        }
    }

    #[inline]
    fn set_child(&mut self, id: NodeId, side: Side, child: NodeId) {
        let links = self.links_mut(id);
        match side {
            Side::Left => links.left = child,
            Side::Right => links.right = child,
        }
    }

    #[inline]
    pub(crate) fn is_red(&self, id: NodeId) -> bool {
        self.links(id).is_red()
    }

    #[inline]
    pub(crate) fn is_black(&self, id: NodeId) -> bool {
        self.links(id).is_black()
    }

    #[inline]
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        self.links_mut(id).color = color
    }

    fn minimum(&self, mut id: NodeId) -> NodeId {
        while self.left(id).is_internal() {
            id = self.left(id);
        }
        id
    }

    fn maximum(&self, mut id: NodeId) -> NodeId {
        while self.right(id).is_internal() {
            id = self.right(id);
        }
        id
    }

    // which side of its parent `id` hangs on, `id` may be the sentinel
    // while a deletion fixup is running.
    fn side_of(&self, id: NodeId) -> Side {
        if id == self.left(self.parent(id)) {
            Side::Left
        } else {
            Side::Right
        }
    }
}

//--------- rotation routines ----------------

impl<K, V> RBTree<K, V> {
    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             a   y          to         x   c
    //                / \                   / \
    //               b   c                 a   b
    //
    pub(crate) fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        if x.is_external() || y.is_external() {
            panic!("rotate_left(): pivot on external node ? Call the programmer");
        }

        let b = self.left(y);
        self.links_mut(x).right = b;
        if b.is_internal() {
            self.links_mut(b).parent = x;
        }
        self.replace_child(x, y);
        self.links_mut(y).left = x;
        self.links_mut(x).parent = y;
    }

    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             y   c          to         a   x
    //            / \                           / \
    //           a   b                         b   c
    //
    pub(crate) fn rotate_right(&mut self, x: NodeId) {
        let y = self.left(x);
        if x.is_external() || y.is_external() {
            panic!("rotate_right(): pivot on external node ? Call the programmer");
        }

        let b = self.right(y);
        self.links_mut(x).left = b;
        if b.is_internal() {
            self.links_mut(b).parent = x;
        }
        self.replace_child(x, y);
        self.links_mut(y).right = x;
        self.links_mut(x).parent = y;
    }

    // x moves down towards `side`. Colors are left untouched.
    fn rotate(&mut self, x: NodeId, side: Side) {
        match side {
            Side::Left => self.rotate_left(x),
            Side::Right => self.rotate_right(x),
        }
    }

    // hang `y` where `x` hangs under its parent, or make it root.
    fn replace_child(&mut self, x: NodeId, y: NodeId) {
        let parent = self.parent(x);
        self.links_mut(y).parent = parent;
        if parent.is_external() {
            self.root = y;
        } else if x == self.left(parent) {
            self.links_mut(parent).left = y;
        } else {
            self.links_mut(parent).right = y;
        }
    }

    // put `new` in the position held by `old`. When `new` is the sentinel
    // its parent link is written, to be consumed by delete_fixup().
    fn transplant(&mut self, old: NodeId, new: NodeId) {
        let parent = self.parent(old);
        if parent.is_external() {
            self.root = new;
        } else if old == self.left(parent) {
            self.links_mut(parent).left = new;
        } else {
            self.links_mut(parent).right = new;
        }
        self.links_mut(new).parent = parent;
    }
}

//--------- fixup routines ----------------

impl<K, V> RBTree<K, V> {
    fn insert_fixup(&mut self, mut node: NodeId) {
        while self.is_red(self.parent(node)) {
            let parent = self.parent(node);
            let grand = self.parent(parent); // red parent is never root
            let side = self.side_of(parent);
            let uncle = self.child(grand, side.flip());

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grand, Color::Red);
                node = grand;
                continue;
            }

            if node == self.child(parent, side.flip()) {
                // zig-zag, turn it into the outer case.
                node = parent;
                self.rotate(node, side);
            }

            let parent = self.parent(node);
            let grand = self.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grand, Color::Red);
            self.rotate(grand, side.flip());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    fn delete_fixup(&mut self, mut node: NodeId) {
        while node != self.root && self.is_black(node) {
            let parent = self.parent(node);
            let side = self.side_of(node);
            let far = side.flip();
            let mut sibling = self.child(parent, far);

            if self.is_red(sibling) {
                trace!("delete_fixup red sibling");
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.child(parent, far);
            }

            let near_black = self.is_black(self.child(sibling, side));
            let far_black = self.is_black(self.child(sibling, far));
            if near_black && far_black {
                self.set_color(sibling, Color::Red);
                node = parent;
                continue;
            }

            if far_black {
                let near = self.child(sibling, side);
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.child(parent, far);
            }

            let color = self.links(parent).color;
            self.set_color(sibling, color);
            self.set_color(parent, Color::Black);
            let far_child = self.child(sibling, far);
            self.set_color(far_child, Color::Black);
            self.rotate(parent, side);
            node = self.root;
        }
        self.set_color(node, Color::Black);
    }

    pub(crate) fn delete_node(&mut self, target: NodeId) -> Node<K, V> {
        if target.is_external() {
            panic!("delete_node(): deleting external node ? Call the programmer");
        }

        let mut removed = self.links(target).color;
        let fix = if self.left(target).is_external() {
            let fix = self.right(target);
            self.transplant(target, fix);
            fix
        } else if self.right(target).is_external() {
            let fix = self.left(target);
            self.transplant(target, fix);
            fix
        } else {
            let succ = self.minimum(self.right(target));
            removed = self.links(succ).color;
            let fix = self.right(succ);
            if self.parent(succ) == target {
                self.links_mut(fix).parent = succ;
            } else {
                self.transplant(succ, fix);
                let right = self.right(target);
                self.links_mut(succ).right = right;
                self.links_mut(right).parent = succ;
            }
            self.transplant(target, succ);
            let left = self.left(target);
            self.links_mut(succ).left = left;
            self.links_mut(left).parent = succ;
            let color = self.links(target).color;
            self.set_color(succ, color);
            fix
        };

        trace!("delete_node removed {:?} node, fixup:{}", removed, removed == Color::Black);
        if removed == Color::Black {
            self.delete_fixup(fix);
        }
        self.nil = Links::sentinel();

        self.release(target)
    }

    // drop the unlinked node from the arena. The last node in the arena
    // moves into the freed slot, links pointing at it are rewritten.
    fn release(&mut self, id: NodeId) -> Node<K, V> {
        let last = NodeId::from_index(self.nodes.len() - 1);
        let node = self.nodes.swap_remove(id.to_index());
        if id == last {
            return node;
        }

        let Links {
            parent,
            left,
            right,
            ..
        } = self.links(id).clone();
        if parent.is_external() {
            self.root = id;
        } else if self.left(parent) == last {
            self.links_mut(parent).left = id;
        } else {
            self.links_mut(parent).right = id;
        }
        if left.is_internal() {
            self.links_mut(left).parent = id;
        }
        if right.is_internal() {
            self.links_mut(right).parent = id;
        }
        node
    }
}

impl<K, V> Extend<(K, V)> for RBTree<K, V>
where
    K: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        iter.into_iter().for_each(|(key, value)| {
            self.set(key, value);
        });
    }
}

impl<K, V> FromIterator<(K, V)> for RBTree<K, V>
where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = RBTree::new();
        tree.extend(iter);
        tree
    }
}

/// Iterator over entries of [RBTree], in ascending key order.
pub struct Iter<'a, K, V> {
    tree: &'a RBTree<K, V>,
    curr: NodeId,
    stack: Vec<NodeId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.curr.is_internal() {
            self.stack.push(self.curr);
            self.curr = self.tree.left(self.curr);
        }

        let id = self.stack.pop()?;
        self.curr = self.tree.right(id);
        Some(self.tree.entry(id))
    }
}

impl<'a, K, V> IntoIterator for &'a RBTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "rbtree_test.rs"]
mod rbtree_test;
