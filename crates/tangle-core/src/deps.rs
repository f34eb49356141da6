//! Dependency registration and topological ordering.
//!
//! [`DependencyGraph`] accumulates directed "must precede" edges between
//! caller-supplied labels and, on demand, produces a topological ordering
//! with Kahn's algorithm or reports the cycle that prevents one.
//!
//! Registering the same edge twice is a no-op: in-degrees count *distinct*
//! predecessors only, so duplicate registrations can never make an acyclic
//! graph unsortable. Sorting works on a private in-degree snapshot and
//! leaves the registry untouched; repeated sorts are idempotent.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

/// A directed dependency graph over interned labels.
///
/// Same registry shape as [`BridgeGraph`](crate::BridgeGraph): petgraph
/// node slab plus a `HashMap<L, NodeIndex>` lookup. Not internally
/// synchronized.
#[derive(Debug, Clone)]
pub struct DependencyGraph<L> {
    graph: StableDiGraph<L, ()>,
    label_to_index: HashMap<L, NodeIndex>,
}

/// Returned by [`DependencyGraph::topological_sort`] when no total order
/// exists.
///
/// Carries every label Kahn's algorithm could not consume, in first
/// registration order: the cycle members themselves plus any node only
/// reachable through a cycle. An empty graph is *not* an error — it sorts
/// to an empty order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError<L> {
    unordered: Vec<L>,
}

impl<L> CycleError<L> {
    /// The labels left unordered by the cycle, in registration order.
    pub fn unordered(&self) -> &[L] {
        &self.unordered
    }

    /// Consumes the error, yielding the unordered labels.
    pub fn into_unordered(self) -> Vec<L> {
        self.unordered
    }
}

impl<L: fmt::Debug> fmt::Display for CycleError<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dependency cycle leaves {} node(s) unordered: {:?}",
            self.unordered.len(),
            self.unordered
        )
    }
}

impl<L: fmt::Debug> std::error::Error for CycleError<L> {}

impl<L> DependencyGraph<L> {
    /// Creates an empty dependency graph.
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::with_capacity(0, 0),
            label_to_index: HashMap::new(),
        }
    }

    /// Returns the number of distinct labels registered so far.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of distinct dependency edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl<L> Default for DependencyGraph<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Clone + Eq + Hash> DependencyGraph<L> {
    /// Registers the dependency "`from` must precede `to`".
    ///
    /// Both labels are interned as nodes if new. If the edge is already
    /// present the call is a complete no-op, so re-registering a dependency
    /// never inflates `to`'s in-degree. `from == to` is accepted and forms
    /// a one-node cycle that [`topological_sort`](Self::topological_sort)
    /// will report.
    pub fn add_dependency(&mut self, from: L, to: L) {
        let from_idx = self.intern(from);
        let to_idx = self.intern(to);
        if self.graph.find_edge(from_idx, to_idx).is_none() {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    /// Returns `true` if `label` has been registered as a node.
    pub fn contains(&self, label: &L) -> bool {
        self.label_to_index.contains_key(label)
    }

    /// Returns the number of distinct predecessors of `label`, or `None`
    /// if the label is unregistered.
    pub fn in_degree(&self, label: &L) -> Option<usize> {
        let idx = *self.label_to_index.get(label)?;
        Some(self.graph.edges_directed(idx, Direction::Incoming).count())
    }

    /// Produces a topological ordering of every registered label, or the
    /// set of labels a cycle leaves unorderable.
    ///
    /// Kahn's algorithm over a per-call in-degree snapshot: seed a FIFO
    /// queue with the zero-in-degree nodes in first-registration order,
    /// then repeatedly dequeue, append to the order, and decrement each
    /// successor's snapshot in-degree, enqueueing those that reach zero.
    /// Ties among simultaneously released nodes resolve by first
    /// registration order, never by label ordering.
    ///
    /// The registry itself is never mutated, so repeated calls on an
    /// unchanged graph return identical results. Cost is O(V + E).
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] when the order cannot cover every node, i.e.
    /// a dependency cycle exists. An empty graph is fine: `Ok(vec![])`.
    pub fn topological_sort(&self) -> Result<Vec<L>, CycleError<L>> {
        let mut in_degree: HashMap<NodeIndex, usize> =
            self.graph.node_indices().map(|idx| (idx, 0)).collect();
        for edge in self.graph.edge_references() {
            if let Some(deg) = in_degree.get_mut(&edge.target()) {
                *deg += 1;
            }
        }

        // node_indices() yields insertion order, which is exactly first
        // registration order since nodes are never removed.
        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree.get(idx) == Some(&0))
            .collect();

        let mut order: Vec<NodeIndex> = Vec::with_capacity(self.graph.node_count());
        while let Some(node) = queue.pop_front() {
            order.push(node);

            let mut released: Vec<NodeIndex> = Vec::new();
            for edge in self.graph.edges(node) {
                let succ = edge.target();
                if let Some(deg) = in_degree.get_mut(&succ) {
                    if *deg > 0 {
                        *deg -= 1;
                        if *deg == 0 {
                            released.push(succ);
                        }
                    }
                }
            }
            // petgraph iterates a node's out-edges newest-first; sort the
            // released batch back into registration order before enqueueing.
            released.sort_unstable();
            for succ in released {
                queue.push_back(succ);
            }
        }

        if order.len() == self.graph.node_count() {
            Ok(order
                .into_iter()
                .filter_map(|idx| self.graph.node_weight(idx).cloned())
                .collect())
        } else {
            let consumed: HashSet<NodeIndex> = order.into_iter().collect();
            let unordered: Vec<L> = self
                .graph
                .node_indices()
                .filter(|idx| !consumed.contains(idx))
                .filter_map(|idx| self.graph.node_weight(idx).cloned())
                .collect();
            Err(CycleError { unordered })
        }
    }

    /// Looks up or creates the node for `label`.
    fn intern(&mut self, label: L) -> NodeIndex {
        if let Some(&idx) = self.label_to_index.get(&label) {
            return idx;
        }
        let idx = self.graph.add_node(label.clone());
        self.label_to_index.insert(label, idx);
        idx
    }
}
