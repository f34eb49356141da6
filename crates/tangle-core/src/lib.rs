#![deny(clippy::print_stdout, clippy::print_stderr)]

//! In-memory graph-algorithms core: bridge (cut-edge) detection over
//! undirected labeled graphs and topological ordering of directed
//! dependency graphs, plus a label-keyed union-find utility.
//!
//! All structures are label-generic (`L: Clone + Eq + Hash`), purely
//! synchronous, and free of I/O. Queries are pure reads: they compute all
//! working state per call, so they are idempotent on an unchanged graph.

pub mod bridges;
pub mod deps;
pub mod union_find;

pub use bridges::BridgeGraph;
pub use deps::{CycleError, DependencyGraph};
pub use union_find::UnionFind;

/// Returns the current version of the tangle-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
