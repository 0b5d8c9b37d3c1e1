//! Module implement the event counter, counter semantics over [RBTree].

use std::{fs, io, path};

use crate::{load, Command, Error, Insert, RBTree, Reply, Result};

/// EventCounter track a counter per event-id.
///
/// An event that is absent has a count of zero, an event whose count is
/// reduced to zero or below is removed.
///
/// ```
/// use bbst::EventCounter;
///
/// let mut counter = EventCounter::from_sorted(vec![(1, 1), (2, 1), (3, 1)]).unwrap();
/// assert_eq!(counter.increase(4, 2), 2);
/// assert_eq!(counter.inrange(1, 3), 3);
/// assert_eq!(counter.next(2), Some((3, 1)));
/// assert_eq!(counter.reduce(2, 1), 0);
/// assert_eq!(counter.count(2), 0);
/// ```
#[derive(Clone, Default)]
pub struct EventCounter {
    tree: RBTree<i64, i64>,
}

impl EventCounter {
    /// Create an empty counter.
    pub fn new() -> EventCounter {
        EventCounter {
            tree: RBTree::new(),
        }
    }

    /// Create a counter from (id, count) pairs sorted by id.
    pub fn from_sorted<I>(iter: I) -> Result<EventCounter>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let tree = RBTree::from_sorted(iter)?;
        Ok(EventCounter { tree })
    }

    /// Create a counter from the textual bulk-load format.
    pub fn from_reader<R: io::BufRead>(reader: R) -> Result<EventCounter> {
        Self::from_sorted(load::parse_events::<i64, i64, R>(reader)?)
    }

    /// Create a counter from a file in the textual bulk-load format.
    pub fn from_file<P: AsRef<path::Path>>(file: P) -> Result<EventCounter> {
        let file = file.as_ref();
        let fd = err_at!(IOError, fs::File::open(file), "{:?}", file)?;
        Self::from_reader(io::BufReader::new(fd))
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn as_tree(&self) -> &RBTree<i64, i64> {
        &self.tree
    }

    /// Add `n` to the count for `id`. Counts saturate at the bounds of i64.
    pub fn increase(&mut self, id: i64, n: i64) -> i64 {
        match self.tree.insert(id, n) {
            Insert::Inserted(_) => n,
            Insert::Present(handle) => {
                let value = self.tree.value_mut(handle);
                *value = value.saturating_add(n);
                *value
            }
        }
    }

    /// Subtract `n` from the count for `id`, removing `id` once the
    /// saturated count drops to zero or below.
    pub fn reduce(&mut self, id: i64, n: i64) -> i64 {
        let handle = match self.tree.find(&id) {
            Some(handle) => handle,
            None => return 0,
        };

        let value = self.tree.value(handle).saturating_sub(n);
        if value <= 0 {
            self.tree.delete(handle);
            0
        } else {
            *self.tree.value_mut(handle) = value;
            value
        }
    }

    pub fn count(&self, id: i64) -> i64 {
        self.tree.count(&id)
    }

    /// Total count for ids within `low..=high`. Sums are widened so that
    /// they do not overflow.
    pub fn inrange(&self, low: i64, high: i64) -> i128 {
        self.tree.range_sum::<i128>(&low, &high)
    }

    pub fn next(&self, id: i64) -> Option<(i64, i64)> {
        self.tree.successor(&id).map(|(k, v)| (*k, *v))
    }

    pub fn previous(&self, id: i64) -> Option<(i64, i64)> {
        self.tree.predecessor(&id).map(|(k, v)| (*k, *v))
    }

    pub fn verify(&self) -> (bool, usize) {
        self.tree.verify()
    }

    /// Execute a single command. Return `None` for [Command::Quit].
    pub fn execute(&mut self, cmd: Command) -> Option<Reply> {
        let reply = match cmd {
            Command::Increase { id, n } => Reply::Count(self.increase(id, n)),
            Command::Reduce { id, n } => Reply::Count(self.reduce(id, n)),
            Command::Count { id } => Reply::Count(self.count(id)),
            Command::InRange { low, high } => Reply::Sum(self.inrange(low, high)),
            Command::Next { id } => Reply::Event(self.next(id)),
            Command::Previous { id } => Reply::Event(self.previous(id)),
            Command::Verify => {
                let (ok, depth) = self.verify();
                Reply::Verify { ok, depth }
            }
            Command::Quit => return None,
        };
        Some(reply)
    }
}

#[cfg(test)]
#[path = "counter_test.rs"]
mod counter_test;
