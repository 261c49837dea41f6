//! Depth-first traversal, path reconstruction, and connectivity over the
//! public [`Graph`] surface.
//!
//! Traversal state is explicit and per-call: a visited set and the
//! discovery-edge map, both keyed by [`VertexId`] in the crate's own
//! [`HashTable`]. Nothing is stored on vertices or edges, so runs are
//! independent and need no reset step between them.

use crate::graph::{EdgeId, Graph, GraphError, VertexId};
use crate::hash_table::HashTable;

/// Depth-first search from `start`, returning the discovery-edge map.
///
/// Every vertex reachable from `start`, except `start` itself, maps to the
/// edge through which it was first reached; those edges form a spanning tree
/// of the reachable region rooted at `start`. Unreached vertices are absent.
/// Tie order among a vertex's outgoing edges follows the incidence table's
/// bucket order and is not deterministic across resizes.
pub fn depth_first_search<V, E>(
    graph: &Graph<V, E>,
    start: VertexId,
) -> Result<HashTable<VertexId, EdgeId>, GraphError> {
    graph.vertex_element(start)?;
    let mut visited: HashTable<VertexId, ()> = HashTable::new();
    let mut discovery = HashTable::new();
    visited.put(start, ());
    visit(graph, start, &mut visited, &mut discovery)?;
    Ok(discovery)
}

fn visit<V, E>(
    graph: &Graph<V, E>,
    vertex: VertexId,
    visited: &mut HashTable<VertexId, ()>,
    discovery: &mut HashTable<VertexId, EdgeId>,
) -> Result<(), GraphError> {
    let outgoing: Vec<EdgeId> = graph.outgoing_edges(vertex)?.collect();
    for edge in outgoing {
        let neighbor = graph.opposite(vertex, edge)?;
        if visited.get(&neighbor).is_none() {
            visited.put(neighbor, ());
            discovery.put(neighbor, edge);
            visit(graph, neighbor, visited, discovery)?;
        }
    }
    Ok(())
}

/// An ordered sequence of edges leading from `origin` to `dest`, built by
/// walking the discovery-edge chain backward from `dest`. Empty when `dest`
/// is unreachable or equals `origin`.
pub fn construct_path<V, E>(
    graph: &Graph<V, E>,
    origin: VertexId,
    dest: VertexId,
) -> Result<Vec<EdgeId>, GraphError> {
    graph.vertex_element(dest)?;
    let discovery = depth_first_search(graph, origin)?;
    let mut path = Vec::new();
    let mut walk = dest;
    while walk != origin {
        match discovery.get(&walk) {
            Some(&edge) => {
                path.push(edge);
                walk = graph.opposite(walk, edge)?;
            }
            // Unreachable destination: no path at all.
            None => return Ok(Vec::new()),
        }
    }
    path.reverse();
    Ok(path)
}

/// Whether every vertex is reachable from an arbitrarily chosen start
/// vertex. The empty graph counts as connected.
///
/// For a directed graph this is single-source reachability from that start,
/// not strong connectivity; only for undirected graphs does `true` mean the
/// graph is connected in the usual sense.
pub fn is_connected<V, E>(graph: &Graph<V, E>) -> Result<bool, GraphError> {
    let Some(start) = graph.vertices().next() else {
        return Ok(true);
    };
    let discovery = depth_first_search(graph, start)?;
    Ok(discovery.len() == graph.num_vertices() - 1)
}
