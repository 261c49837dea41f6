//! adjmap: positional lists, a MAD-compression hash table, and an
//! adjacency-map graph with depth-first traversal.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build the Adjacency-Map graph in safe, verifiable layers so each
//!   piece can be reasoned about independently.
//! - Layers:
//!   - PositionalList<T>: doubly-linked sequence over a slotmap arena;
//!     returns stable `Position` handles for O(1) insertion, removal, and
//!     relocation without indices.
//!   - HashTable<K, V, S>: separate-chaining map whose buckets are
//!     positional lists; MAD compression with randomized parameters keeps
//!     patterned hash codes from clustering; grows at load factor 0.7.
//!   - Graph<V, E>: vertex and edge records in two positional lists; each
//!     vertex maps neighbor -> incident edge in hash tables, giving
//!     near-constant-time edge lookup between two vertices.
//!   - traversal: depth-first search, path reconstruction, and a
//!     connectivity test as free functions over the graph's public surface.
//!
//! Constraints
//! - Single-threaded, call-and-return; no interior mutability, so exclusive
//!   mutation is enforced by `&mut self` borrows.
//! - Simple graph: no parallel edges (either direction), no self-loops;
//!   checked before any mutation.
//! - One record layout serves directed and undirected graphs: an undirected
//!   vertex keeps a single incidence table for both edge roles, a directed
//!   vertex keeps one per role.
//! - Stable, generational handles: `Position`, `VertexId`, and `EdgeId` are
//!   small `Copy` values scoped to the issuing container; stale or foreign
//!   handles fail loudly instead of resolving to the wrong slot.
//!
//! Traversal state
//! - Visited sets and discovery-edge maps are per-call values keyed by
//!   `VertexId`, not flags on the entities, so traversals are independent
//!   and restartable with no reset step.
//!
//! Notes and non-goals
//! - No persistence and no concurrent access.
//! - Reachability only: no weighted shortest paths or spanning-tree
//!   optimization beyond the DFS discovery forest.
//! - Adjacency iteration order follows bucket order of the incidence
//!   tables and is not deterministic across resizes.
//! - `pattern` is an independent utility module (substring search); it does
//!   not touch the container types.

pub mod graph;
pub mod hash_table;
mod hash_table_proptest;
pub mod pattern;
pub mod positional_list;
pub mod traversal;

// Public surface
pub use graph::{EdgeId, Graph, GraphError, VertexId};
pub use hash_table::HashTable;
pub use pattern::{find_boyer_moore, find_brute};
pub use positional_list::{InvalidPosition, Position, PositionalList};
pub use traversal::{construct_path, depth_first_search, is_connected};
