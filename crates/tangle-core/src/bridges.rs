//! Bridge (cut-edge) detection over an undirected labeled multigraph.
//!
//! [`BridgeGraph`] accumulates undirected edges between caller-supplied
//! labels and classifies each recorded edge as bridge or non-bridge on
//! demand. A bridge is an edge whose removal increases the number of
//! connected components.
//!
//! # Algorithm Overview
//!
//! [`BridgeGraph::find_bridges`] runs a depth-first traversal rooted at
//! every not-yet-visited node, so disconnected graphs are handled component
//! by component. Each node receives a `discovery` time (global visitation
//! counter) and a `lowlink` value (smallest discovery time reachable through
//! tree edges plus at most one back edge). After the traversal, a recorded
//! edge `(u, v)` is a bridge iff
//! `discovery(u) < lowlink(v) || discovery(v) < lowlink(u)` and the edge's
//! endpoint pair occurs exactly once in the edge list — a duplicated edge
//! can never be a bridge, and neither can a self-loop.
//!
//! The traversal uses an explicit frame stack rather than recursion, so the
//! call depth stays constant no matter how long the graph's paths are. The
//! edge used to enter a node is skipped by edge identity, not by endpoint,
//! which makes a parallel edge back to the parent count as the back edge it
//! is.
//!
//! All discovery/lowlink state is local to a single `find_bridges` call;
//! repeated queries on an unchanged graph return identical results.

use std::collections::HashMap;
use std::hash::Hash;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

/// An undirected labeled multigraph with bridge classification.
///
/// Labels are interned on first use; the graph owns the node slab and a
/// `HashMap<L, NodeIndex>` lookup table. Parallel edges and self-loops are
/// accepted and stored as separate records in insertion order.
///
/// Mutation ([`add_edge`](Self::add_edge)) and queries
/// ([`find_bridges`](Self::find_bridges)) are not internally synchronized;
/// share an instance across threads only under external locking.
#[derive(Debug, Clone)]
pub struct BridgeGraph<L> {
    graph: StableUnGraph<L, ()>,
    label_to_index: HashMap<L, NodeIndex>,
}

/// One in-flight traversal frame: the node being expanded, the edge used to
/// reach it (`None` for component roots), its incident edges, and a cursor
/// into them.
struct Frame {
    node: NodeIndex,
    via: Option<EdgeIndex>,
    incident: Vec<(EdgeIndex, NodeIndex)>,
    cursor: usize,
}

impl<L> BridgeGraph<L> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            graph: StableUnGraph::with_capacity(0, 0),
            label_to_index: HashMap::new(),
        }
    }

    /// Returns the number of distinct labels registered so far.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of recorded edges, counting parallel edges and
    /// self-loops individually.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl<L> Default for BridgeGraph<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Clone + Eq + Hash> BridgeGraph<L> {
    /// Registers an undirected edge between `u` and `v`.
    ///
    /// Either endpoint is interned as a node if not yet known. The edge is
    /// appended to the edge list, preserving multiplicity: calling this
    /// twice with the same endpoints records two parallel edges. `u == v`
    /// records a self-loop. The insertion is atomic — both adjacency
    /// directions and the edge record are added together.
    pub fn add_edge(&mut self, u: L, v: L) {
        let u_idx = self.intern(u);
        let v_idx = self.intern(v);
        self.graph.add_edge(u_idx, v_idx, ());
    }

    /// Returns `true` if `label` has been registered as a node.
    pub fn contains(&self, label: &L) -> bool {
        self.label_to_index.contains_key(label)
    }

    /// Classifies every recorded edge and returns the bridges.
    ///
    /// The result preserves edge insertion order, and each bridge is
    /// reported in the `(u, v)` orientation it was added with. Returns an
    /// empty vector for an empty graph.
    ///
    /// This is a pure query: all traversal state (discovery counter,
    /// lowlink table) lives on the call stack, so the graph is unchanged
    /// and repeated calls are idempotent. Cost is O(V + E).
    pub fn find_bridges(&self) -> Vec<(L, L)> {
        let mut discovery: HashMap<NodeIndex, usize> = HashMap::new();
        let mut lowlink: HashMap<NodeIndex, usize> = HashMap::new();
        let mut counter = 0usize;

        // Root a traversal at every unvisited node so that each connected
        // component is covered; bridges are only ever intra-component.
        for root in self.graph.node_indices() {
            if discovery.contains_key(&root) {
                continue;
            }
            self.traverse_component(root, &mut discovery, &mut lowlink, &mut counter);
        }

        // Unordered endpoint-pair multiplicities; a pair recorded more than
        // once can never be a bridge regardless of its lowlink values.
        let mut multiplicity: HashMap<(NodeIndex, NodeIndex), usize> = HashMap::new();
        for edge in self.graph.edge_references() {
            let key = endpoint_key(edge.source(), edge.target());
            *multiplicity.entry(key).or_insert(0) += 1;
        }

        let mut bridges: Vec<(L, L)> = Vec::new();
        for edge in self.graph.edge_references() {
            let (a, b) = (edge.source(), edge.target());
            if a == b {
                continue;
            }
            let count = multiplicity.get(&endpoint_key(a, b)).copied().unwrap_or(0);
            if count != 1 {
                continue;
            }
            let (Some(&disc_a), Some(&low_a), Some(&disc_b), Some(&low_b)) = (
                discovery.get(&a),
                lowlink.get(&a),
                discovery.get(&b),
                lowlink.get(&b),
            ) else {
                continue;
            };
            if disc_a < low_b || disc_b < low_a {
                if let (Some(u), Some(v)) = (self.graph.node_weight(a), self.graph.node_weight(b))
                {
                    bridges.push((u.clone(), v.clone()));
                }
            }
        }

        bridges
    }

    /// Depth-first traversal of the component containing `root`, assigning
    /// discovery and lowlink values.
    ///
    /// Iterative with an explicit [`Frame`] stack: expanding a frame either
    /// advances its cursor (skipping the entry edge once, folding visited
    /// neighbours into the lowlink, or descending into unvisited ones) or,
    /// when exhausted, pops and folds the finished child's lowlink into its
    /// parent.
    fn traverse_component(
        &self,
        root: NodeIndex,
        discovery: &mut HashMap<NodeIndex, usize>,
        lowlink: &mut HashMap<NodeIndex, usize>,
        counter: &mut usize,
    ) {
        discovery.insert(root, *counter);
        lowlink.insert(root, *counter);
        *counter += 1;

        let mut stack: Vec<Frame> = vec![Frame {
            node: root,
            via: None,
            incident: self.incident(root),
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.cursor >= frame.incident.len() {
                // Node fully expanded: fold its lowlink into the parent.
                let done = frame.node;
                stack.pop();
                let child_low = lowlink.get(&done).copied();
                if let (Some(child_low), Some(parent)) = (child_low, stack.last()) {
                    let parent_node = parent.node;
                    if let Some(parent_low) = lowlink.get_mut(&parent_node) {
                        if child_low < *parent_low {
                            *parent_low = child_low;
                        }
                    }
                }
                continue;
            }

            let (edge, next) = frame.incident[frame.cursor];
            frame.cursor += 1;

            // Skip exactly the edge we arrived through; a parallel edge to
            // the parent has a different EdgeIndex and falls through to the
            // back-edge case below.
            if Some(edge) == frame.via {
                continue;
            }

            let node = frame.node;
            if let Some(&seen) = discovery.get(&next) {
                // Back edge (self-loops land here too, as a no-op).
                if let Some(low) = lowlink.get_mut(&node) {
                    if seen < *low {
                        *low = seen;
                    }
                }
                continue;
            }

            discovery.insert(next, *counter);
            lowlink.insert(next, *counter);
            *counter += 1;
            let incident = self.incident(next);
            stack.push(Frame {
                node: next,
                via: Some(edge),
                incident,
                cursor: 0,
            });
        }
    }

    /// Snapshot of the edges incident to `node` as `(edge, other endpoint)`
    /// pairs. Self-loops appear once with `other == node`.
    fn incident(&self, node: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        self.graph
            .edges(node)
            .map(|e| {
                let other = if e.source() == node {
                    e.target()
                } else {
                    e.source()
                };
                (e.id(), other)
            })
            .collect()
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

/// Normalizes an endpoint pair so that parallel edges added in either
/// orientation map to the same key.
fn endpoint_key(a: NodeIndex, b: NodeIndex) -> (NodeIndex, NodeIndex) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn graph_of(edges: &[(u32, u32)]) -> BridgeGraph<u32> {
        let mut g = BridgeGraph::new();
        for &(u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    /// No nodes at all: no bridges.
    #[test]
    fn test_empty_graph_has_no_bridges() {
        let g: BridgeGraph<u32> = BridgeGraph::new();
        assert_eq!(g.node_count(), 0);
        assert!(g.find_bridges().is_empty());
    }

    /// A single edge between two nodes is always a bridge.
    #[test]
    fn test_single_edge_is_bridge() {
        let g = graph_of(&[(1, 2)]);
        assert_eq!(g.find_bridges(), vec![(1, 2)]);
    }

    /// A triangle has no bridges; a pendant edge off the triangle does.
    ///
    /// Graph: 1-2, 2-3, 3-1 (cycle), 3-4 (pendant).
    #[test]
    fn test_triangle_with_pendant_edge() {
        let g = graph_of(&[(1, 2), (2, 3), (3, 1), (3, 4)]);
        assert_eq!(g.find_bridges(), vec![(3, 4)]);
    }

    /// Every edge of a path graph is a bridge, reported in insertion order
    /// and original orientation.
    #[test]
    fn test_path_graph_all_edges_are_bridges() {
        let g = graph_of(&[(1, 2), (2, 3), (3, 4)]);
        assert_eq!(g.find_bridges(), vec![(1, 2), (2, 3), (3, 4)]);
    }

    /// Result order follows edge insertion order even when that differs
    /// from traversal order.
    #[test]
    fn test_result_preserves_insertion_order() {
        let g = graph_of(&[(3, 4), (1, 2), (2, 3)]);
        assert_eq!(g.find_bridges(), vec![(3, 4), (1, 2), (2, 3)]);
    }

    /// A self-loop is never a bridge and does not disturb other edges.
    #[test]
    fn test_self_loop_is_never_bridge() {
        let g = graph_of(&[(1, 1), (1, 2)]);
        assert_eq!(g.find_bridges(), vec![(1, 2)]);
    }

    /// A duplicated edge is never a bridge, in either occurrence; an
    /// adjacent unique edge still is.
    #[test]
    fn test_parallel_edges_are_never_bridges() {
        let g = graph_of(&[(1, 2), (1, 2), (2, 3)]);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.find_bridges(), vec![(2, 3)]);
    }

    /// Parallel edges recorded in opposite orientations still count as
    /// duplicates of the same unordered pair.
    #[test]
    fn test_parallel_edges_opposite_orientation() {
        let g = graph_of(&[(1, 2), (2, 1), (2, 3)]);
        assert_eq!(g.find_bridges(), vec![(2, 3)]);
    }

    /// Two triangles joined by a single edge: only the joining edge is a
    /// bridge.
    #[test]
    fn test_edge_joining_two_cycles_is_bridge() {
        let g = graph_of(&[
            (1, 2),
            (2, 3),
            (3, 1),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 4),
        ]);
        assert_eq!(g.find_bridges(), vec![(3, 4)]);
    }

    /// Disconnected graphs are traversed per component; classification in
    /// one component is unaffected by the other.
    #[test]
    fn test_disconnected_components_classified_independently() {
        // Component A: triangle 1-2-3 (no bridges).
        // Component B: path 10-11-12 (both edges bridges).
        let g = graph_of(&[(1, 2), (10, 11), (2, 3), (11, 12), (3, 1)]);
        assert_eq!(g.find_bridges(), vec![(10, 11), (11, 12)]);
    }

    /// An isolated cycle component alongside a bridge component.
    #[test]
    fn test_isolated_cycle_component_has_no_bridges() {
        let g = graph_of(&[(1, 2), (2, 1), (5, 6)]);
        assert_eq!(g.find_bridges(), vec![(5, 6)]);
    }

    /// Repeated queries on an unchanged graph return identical results —
    /// no traversal state leaks between calls.
    #[test]
    fn test_repeated_queries_are_idempotent() {
        let g = graph_of(&[(1, 2), (2, 3), (3, 1), (3, 4)]);
        let first = g.find_bridges();
        let second = g.find_bridges();
        let third = g.find_bridges();
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    /// Mutating between queries is picked up by the next query.
    #[test]
    fn test_query_reflects_later_mutation() {
        let mut g = graph_of(&[(1, 2)]);
        assert_eq!(g.find_bridges(), vec![(1, 2)]);

        // Closing the cycle demotes the edge.
        g.add_edge(2, 3);
        g.add_edge(3, 1);
        assert!(g.find_bridges().is_empty());
    }

    /// String labels work through the same generic surface.
    #[test]
    fn test_string_labels() {
        let mut g: BridgeGraph<String> = BridgeGraph::new();
        g.add_edge("a".to_owned(), "b".to_owned());
        g.add_edge("b".to_owned(), "c".to_owned());
        g.add_edge("c".to_owned(), "a".to_owned());
        g.add_edge("c".to_owned(), "d".to_owned());
        assert_eq!(g.find_bridges(), vec![("c".to_owned(), "d".to_owned())]);
    }

    /// A long path does not overflow the call stack: the traversal is
    /// iterative, so depth is independent of graph diameter.
    #[test]
    fn test_long_path_does_not_recurse() {
        const N: u32 = 10_000;
        let mut g = BridgeGraph::new();
        for i in 0..N {
            g.add_edge(i, i + 1);
        }
        let bridges = g.find_bridges();
        assert_eq!(bridges.len(), N as usize);
    }

    /// Bridge classification on a graph where a bridge connects two
    /// non-trivial 2-edge-connected blocks through a middle vertex chain.
    #[test]
    fn test_bridge_chain_between_blocks() {
        // 1-2-3-1 triangle, 3-4, 4-5, then 5-6-7-5 triangle.
        let g = graph_of(&[
            (1, 2),
            (2, 3),
            (3, 1),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 5),
        ]);
        assert_eq!(g.find_bridges(), vec![(3, 4), (4, 5)]);
    }

    /// `contains` and counts reflect interned labels.
    #[test]
    fn test_contains_and_counts() {
        let g = graph_of(&[(1, 2), (1, 2)]);
        assert!(g.contains(&1));
        assert!(g.contains(&2));
        assert!(!g.contains(&3));
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 2);
    }
}
