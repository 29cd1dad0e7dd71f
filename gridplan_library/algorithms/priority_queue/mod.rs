//! Min-priority queue with lazy deletion
//!
//! Backs the open set of the search engine. Re-inserting a key that is
//! already queued invalidates its old entry instead of searching the heap for
//! it, so "decrease key" is just another insert.
//!
//! # Features
//!
//! - At most one *valid* entry per key
//! - Ties broken by insertion order (oldest first), so pop order is
//!   deterministic for identical inputs
//! - `len()` counts valid entries only; stale entries are discarded when they
//!   surface at the top of the heap
//!
//! # Example
//!
//! ```rust
//! use gridplan_library::algorithms::priority_queue::PriorityQueue;
//!
//! let mut open = PriorityQueue::new();
//! open.insert("a", 5.0);
//! open.insert("b", 3.0);
//! open.insert("a", 1.0); // update
//!
//! assert_eq!(open.len(), 2);
//! assert_eq!(open.pop(), Some("a"));
//! assert_eq!(open.pop(), Some("b"));
//! assert!(open.pop().is_none());
//! ```

use gridplan_core::error::{PlanError, PlanResult};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

/// One insertion. The key lives only here and in the index, so a slot's
/// storage is released as soon as it leaves the heap.
#[derive(Debug, Clone)]
struct Slot<K> {
    priority: f64,
    seq: u64,
    key: K,
}

impl<K> PartialEq for Slot<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K> Eq for Slot<K> {}

impl<K> Ord for Slot<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<K> PartialOrd for Slot<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue over hashable keys
#[derive(Debug, Clone)]
pub struct PriorityQueue<K> {
    heap: BinaryHeap<Slot<K>>,
    index: HashMap<K, (u64, f64)>, // key -> (seq, priority) of its valid slot
    next_seq: u64,
}

impl<K: Clone + Eq + Hash> Default for PriorityQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> PriorityQueue<K> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Create an empty queue with room for `capacity` insertions
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Add `key`, or move it to `priority` if it is already queued
    pub fn insert(&mut self, key: K, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        // Replacing the index entry is what invalidates the old slot
        self.index.insert(key.clone(), (seq, priority));
        self.heap.push(Slot { priority, seq, key });
    }

    fn is_live(&self, slot: &Slot<K>) -> bool {
        self.index.get(&slot.key).map(|&(seq, _)| seq) == Some(slot.seq)
    }

    /// Remove and return the lowest-priority key with its priority
    pub fn pop_with_priority(&mut self) -> Option<(K, f64)> {
        while let Some(slot) = self.heap.pop() {
            if self.is_live(&slot) {
                self.index.remove(&slot.key);
                return Some((slot.key, slot.priority));
            }
        }
        None
    }

    /// Remove and return the lowest-priority key
    pub fn pop(&mut self) -> Option<K> {
        self.pop_with_priority().map(|(key, _)| key)
    }

    /// Like [`pop`](Self::pop), but an empty queue is an error
    pub fn pop_min(&mut self) -> PlanResult<K> {
        self.pop().ok_or(PlanError::EmptyQueue)
    }

    /// Priority of the next key to be popped
    pub fn peek_priority(&mut self) -> Option<f64> {
        while let Some(slot) = self.heap.peek() {
            if self.is_live(slot) {
                return Some(slot.priority);
            }
            self.heap.pop();
        }
        None
    }

    /// True if `key` has a valid entry
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Current priority of `key`, if queued
    pub fn priority_of(&self, key: &K) -> Option<f64> {
        self.index.get(key).map(|&(_, priority)| priority)
    }

    /// Invalidate `key`'s entry. Returns false if it was not queued.
    pub fn remove(&mut self, key: &K) -> bool {
        self.index.remove(key).is_some()
    }

    /// Number of valid entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Physical heap size, stale entries included
    pub fn heap_size(&self) -> usize {
        self.heap.len()
    }

    /// Drop everything, resetting insertion order
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
        self.next_seq = 0;
    }
}
