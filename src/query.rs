//! Counter updates and ordered queries over [RBTree].

use std::{
    borrow::Borrow,
    ops::{Add, AddAssign, Sub},
};

use crate::{node::NodeId, Insert, RBTree};

impl<K, V> RBTree<K, V> {
    /// Add `delta` to the counter for key, creating the entry when key
    /// is missing. Return the new counter value.
    pub fn increase(&mut self, key: K, delta: V) -> V
    where
        K: Ord,
        V: Copy + Add<Output = V>,
    {
        match self.insert(key, delta) {
            Insert::Inserted(_) => delta,
            Insert::Present(handle) => {
                let value = self.value_mut(handle);
                *value = *value + delta;
                *value
            }
        }
    }

    /// Subtract `delta` from the counter for key and return the new counter
    /// value. When the counter drops to zero or below the entry is removed
    /// and zero is returned. A missing key is left missing and zero is
    /// returned.
    pub fn decrease<Q>(&mut self, key: &Q, delta: V) -> V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Copy + Default + Ord + Sub<Output = V>,
    {
        let handle = match self.find(key) {
            Some(handle) => handle,
            None => return V::default(),
        };

        let value = *self.value(handle) - delta;
        if value <= V::default() {
            self.delete(handle);
            V::default()
        } else {
            *self.value_mut(handle) = value;
            value
        }
    }

    /// Return the counter for key, zero when key is missing.
    pub fn count<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Copy + Default,
    {
        self.get(key).copied().unwrap_or_default()
    }

    /// Sum of values for keys within `low..=high`.
    ///
    /// Subtrees wholly outside the range are never visited, which keeps
    /// the cost at O(log n + m) for `m` matching entries.
    pub fn range_sum<S>(&self, low: &K, high: &K) -> S
    where
        K: Ord,
        V: Copy,
        S: Default + AddAssign + From<V>,
    {
        let mut sum = S::default();
        self.do_range_sum(self.root, low, high, &mut sum);
        sum
    }

    fn do_range_sum<S>(&self, id: NodeId, low: &K, high: &K, sum: &mut S)
    where
        K: Ord,
        V: Copy,
        S: AddAssign + From<V>,
    {
        if id.is_external() {
            return;
        }

        let node = self.node(id);
        if node.key.gt(low) {
            self.do_range_sum(node.links.left, low, high, sum);
        }
        if node.key.ge(low) && node.key.le(high) {
            *sum += S::from(node.value);
        }
        if node.key.lt(high) {
            self.do_range_sum(node.links.right, low, high, sum);
        }
    }

    /// Return the entry with the least key strictly greater than `key`.
    pub fn successor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut curr, mut found) = (self.root, NodeId::NIL);
        while curr.is_internal() {
            let node = self.node(curr);
            if key < node.key.borrow() {
                found = curr;
                curr = node.links.left;
            } else {
                curr = node.links.right;
            }
        }

        match found {
            found if found.is_external() => None,
            found => Some(self.entry(found)),
        }
    }

    /// Return the entry with the greatest key strictly less than `key`.
    pub fn predecessor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut curr, mut found) = (self.root, NodeId::NIL);
        while curr.is_internal() {
            let node = self.node(curr);
            if key > node.key.borrow() {
                found = curr;
                curr = node.links.right;
            } else {
                curr = node.links.left;
            }
        }

        match found {
            found if found.is_external() => None,
            found => Some(self.entry(found)),
        }
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;
