//! Label-keyed union-find (disjoint set) utility.
//!
//! A caller-side companion to the graph modules: useful for
//! pre-partitioning nodes or answering connectivity questions before or
//! after bridge detection. Neither [`BridgeGraph`](crate::BridgeGraph) nor
//! [`DependencyGraph`](crate::DependencyGraph) depends on it.
//!
//! Labels are interned to dense slots; `find` uses iterative path-halving
//! and `union` merges by rank. Equal-rank ties go to the lower slot (the
//! earlier-interned label), so the representative of a set is deterministic
//! for any given merge history.

use std::collections::HashMap;
use std::hash::Hash;

/// A disjoint-set structure over caller-supplied labels.
#[derive(Debug, Clone)]
pub struct UnionFind<L> {
    parent: Vec<usize>,
    rank: Vec<u8>,
    slots: HashMap<L, usize>,
    components: usize,
}

impl<L> UnionFind<L> {
    /// Creates an empty structure with no labels.
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            rank: Vec::new(),
            slots: HashMap::new(),
            components: 0,
        }
    }

    /// Returns the number of labels interned so far.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if no labels have been interned.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the current number of disjoint sets.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Path-halving find: each visited slot is re-pointed at its
    /// grandparent, so chains shrink as they are walked.
    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }
}

impl<L> Default for UnionFind<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Clone + Eq + Hash> UnionFind<L> {
    /// Interns `label` as a singleton set if it is not already known.
    pub fn insert(&mut self, label: L) {
        self.slot_of(label);
    }

    /// Merges the sets containing `a` and `b`, interning either label if
    /// new. Union by rank; equal-rank ties go to the lower slot.
    pub fn union(&mut self, a: L, b: L) {
        let slot_a = self.slot_of(a);
        let slot_b = self.slot_of(b);
        let root_a = self.find(slot_a);
        let root_b = self.find(slot_b);

        if root_a == root_b {
            return;
        }
        self.components -= 1;

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => {
                self.parent[root_a] = root_b;
            }
            std::cmp::Ordering::Greater => {
                self.parent[root_b] = root_a;
            }
            std::cmp::Ordering::Equal => {
                if root_a < root_b {
                    self.parent[root_b] = root_a;
                    self.rank[root_a] += 1;
                } else {
                    self.parent[root_a] = root_b;
                    self.rank[root_b] += 1;
                }
            }
        }
    }

    /// Returns `true` if `a` and `b` are interned and share a set.
    pub fn connected(&mut self, a: &L, b: &L) -> bool {
        let (Some(&slot_a), Some(&slot_b)) = (self.slots.get(a), self.slots.get(b)) else {
            return false;
        };
        self.find(slot_a) == self.find(slot_b)
    }

    /// Looks up or creates the slot for `label`.
    fn slot_of(&mut self, label: L) -> usize {
        if let Some(&slot) = self.slots.get(&label) {
            return slot;
        }
        let slot = self.parent.len();
        self.parent.push(slot);
        self.rank.push(0);
        self.slots.insert(label, slot);
        self.components += 1;
        slot
    }
}
