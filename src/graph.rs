//! Graph: the Adjacency-Map structure over positional lists and hash tables.
//!
//! Vertex and edge records live in two [`PositionalList`]s owned by the
//! graph; [`VertexId`] and [`EdgeId`] are `Copy` handles over the records'
//! positions, so stale handles fail to resolve instead of dangling. Each
//! vertex carries incidence tables mapping neighbor vertex to connecting
//! edge, which makes edge lookup between two given vertices near-constant
//! time.
//!
//! One record layout serves both graph kinds: an undirected vertex holds a
//! single table playing the outgoing and incoming roles at once
//! ([`Adjacency::Shared`]), a directed vertex holds one table per role. The
//! graph maintains simple-graph invariants throughout: no self-loops, and at
//! most one edge between any two vertices in either direction.

use crate::hash_table::HashTable;
use crate::positional_list::{InvalidPosition, Position, PositionalList};
use thiserror::Error;

/// Misuse conditions raised by graph operations. Each is checked before any
/// mutation, so a returned error implies an unchanged graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The two vertices are already connected by an edge.
    #[error("the vertices are already connected by an edge")]
    EdgeExists,
    /// Origin and destination are the same vertex.
    #[error("self-loops are not allowed in a simple graph")]
    SelfLoop,
    /// The edge does not touch the given vertex.
    #[error("edge is not incident to the given vertex")]
    NotIncident,
    /// A vertex or edge handle belongs to another graph or was removed.
    #[error("handle does not belong to this graph or was removed")]
    InvalidPosition,
}

impl From<InvalidPosition> for GraphError {
    fn from(_: InvalidPosition) -> Self {
        GraphError::InvalidPosition
    }
}

/// Handle to a live vertex of a [`Graph`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct VertexId(Position);

/// Handle to a live edge of a [`Graph`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EdgeId(Position);

/// Per-vertex incidence tables, neighbor vertex -> connecting edge.
///
/// Undirected vertices keep one table for both roles, so an insertion made
/// through the outgoing role is visible through the incoming role and the
/// two can never drift apart.
enum Adjacency {
    Shared(HashTable<VertexId, EdgeId>),
    Directed {
        outgoing: HashTable<VertexId, EdgeId>,
        incoming: HashTable<VertexId, EdgeId>,
    },
}

impl Adjacency {
    fn new(directed: bool) -> Self {
        if directed {
            Adjacency::Directed {
                outgoing: HashTable::new(),
                incoming: HashTable::new(),
            }
        } else {
            Adjacency::Shared(HashTable::new())
        }
    }

    fn outgoing(&self) -> &HashTable<VertexId, EdgeId> {
        match self {
            Adjacency::Shared(table) => table,
            Adjacency::Directed { outgoing, .. } => outgoing,
        }
    }

    fn incoming(&self) -> &HashTable<VertexId, EdgeId> {
        match self {
            Adjacency::Shared(table) => table,
            Adjacency::Directed { incoming, .. } => incoming,
        }
    }

    fn outgoing_mut(&mut self) -> &mut HashTable<VertexId, EdgeId> {
        match self {
            Adjacency::Shared(table) => table,
            Adjacency::Directed { outgoing, .. } => outgoing,
        }
    }

    fn incoming_mut(&mut self) -> &mut HashTable<VertexId, EdgeId> {
        match self {
            Adjacency::Shared(table) => table,
            Adjacency::Directed { incoming, .. } => incoming,
        }
    }
}

struct VertexRecord<V> {
    element: V,
    adjacency: Adjacency,
}

struct EdgeRecord<E> {
    element: E,
    origin: VertexId,
    destination: VertexId,
}

/// A simple graph (no parallel edges, no self-loops), directed or
/// undirected as fixed at construction.
///
/// The graph exclusively owns its vertices and edges; all mutation goes
/// through these operations. An edge's endpoints are live vertices for the
/// edge's entire lifetime: removing a vertex removes its incident edges
/// first.
pub struct Graph<V, E> {
    vertices: PositionalList<VertexRecord<V>>,
    edges: PositionalList<EdgeRecord<E>>,
    directed: bool,
}

impl<V, E> Graph<V, E> {
    pub fn new(directed: bool) -> Self {
        Self {
            vertices: PositionalList::new(),
            edges: PositionalList::new(),
            directed,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Iterates all vertex handles in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.positions().map(VertexId)
    }

    /// Iterates all edge handles in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.positions().map(EdgeId)
    }

    /// Adds an isolated vertex storing `element`. Always succeeds.
    pub fn insert_vertex(&mut self, element: V) -> VertexId {
        let adjacency = Adjacency::new(self.directed);
        VertexId(self.vertices.add_last(VertexRecord { element, adjacency }))
    }

    /// Connects `origin` to `destination` with a new edge storing `element`.
    ///
    /// Fails with [`GraphError::SelfLoop`] when the endpoints coincide and
    /// with [`GraphError::EdgeExists`] when any edge already connects the
    /// two vertices, in either direction.
    pub fn insert_edge(
        &mut self,
        origin: VertexId,
        destination: VertexId,
        element: E,
    ) -> Result<EdgeId, GraphError> {
        if origin == destination {
            return Err(GraphError::SelfLoop);
        }
        // Also validates both endpoint handles before anything mutates.
        if self.get_edge(origin, destination)?.is_some()
            || self.get_edge(destination, origin)?.is_some()
        {
            return Err(GraphError::EdgeExists);
        }

        let edge = EdgeId(self.edges.add_last(EdgeRecord {
            element,
            origin,
            destination,
        }));
        self.vertex_mut(origin)
            .expect("endpoint validated above")
            .adjacency
            .outgoing_mut()
            .put(destination, edge);
        self.vertex_mut(destination)
            .expect("endpoint validated above")
            .adjacency
            .incoming_mut()
            .put(origin, edge);
        Ok(edge)
    }

    /// Returns the edge from `origin` to `destination`, if one exists. For
    /// an undirected graph the orientation of the query does not matter.
    pub fn get_edge(
        &self,
        origin: VertexId,
        destination: VertexId,
    ) -> Result<Option<EdgeId>, GraphError> {
        let outgoing = self.vertex(origin)?.adjacency.outgoing();
        let incoming = self.vertex(destination)?.adjacency.incoming();
        // Probe whichever incidence table is smaller; both give the same
        // answer.
        let found = if outgoing.len() <= incoming.len() {
            outgoing.get(&destination)
        } else {
            incoming.get(&origin)
        };
        Ok(found.copied())
    }

    /// The edge's endpoints as (origin, destination). The order is
    /// meaningful for directed graphs.
    pub fn end_vertices(&self, edge: EdgeId) -> Result<(VertexId, VertexId), GraphError> {
        let record = self.edges.get(edge.0)?;
        Ok((record.origin, record.destination))
    }

    /// For an edge incident to `endpoint`, the vertex at the other end.
    /// Fails with [`GraphError::NotIncident`] when the edge does not touch
    /// `endpoint` at all.
    pub fn opposite(&self, endpoint: VertexId, edge: EdgeId) -> Result<VertexId, GraphError> {
        let record = self.edges.get(edge.0)?;
        if record.origin == endpoint {
            Ok(record.destination)
        } else if record.destination == endpoint {
            Ok(record.origin)
        } else {
            Err(GraphError::NotIncident)
        }
    }

    /// Removes the edge, detaching it from both endpoints. Returns `false`
    /// when the edge is already gone, so repeated cleanup is safe.
    pub fn remove_edge(&mut self, edge: EdgeId) -> bool {
        let Ok(record) = self.edges.get(edge.0) else {
            return false;
        };
        let (origin, destination) = (record.origin, record.destination);
        if let Ok(vertex) = self.vertices.get_mut(origin.0) {
            vertex.adjacency.outgoing_mut().remove(&destination);
        }
        if let Ok(vertex) = self.vertices.get_mut(destination.0) {
            vertex.adjacency.incoming_mut().remove(&origin);
        }
        self.edges.remove(edge.0).is_ok()
    }

    /// Removes the vertex and every edge incident to it. Returns `false`
    /// when the vertex is already gone.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> bool {
        let Ok(record) = self.vertices.get(vertex.0) else {
            return false;
        };
        // Snapshot the incident edges before touching any table; for an
        // undirected vertex the single shared table covers both roles.
        let mut incident: Vec<EdgeId> = record.adjacency.outgoing().values().copied().collect();
        if self.directed {
            incident.extend(record.adjacency.incoming().values().copied());
        }
        for edge in incident {
            self.remove_edge(edge);
        }
        self.vertices.remove(vertex.0).is_ok()
    }

    /// Removes every vertex, cascading to every edge.
    pub fn clear(&mut self) {
        while let Some(position) = self.vertices.first() {
            self.remove_vertex(VertexId(position));
        }
    }

    /// Number of outgoing edges from the vertex.
    pub fn out_degree(&self, vertex: VertexId) -> Result<usize, GraphError> {
        Ok(self.vertex(vertex)?.adjacency.outgoing().len())
    }

    /// Number of incoming edges to the vertex. Equals [`Self::out_degree`]
    /// for an undirected graph.
    pub fn in_degree(&self, vertex: VertexId) -> Result<usize, GraphError> {
        Ok(self.vertex(vertex)?.adjacency.incoming().len())
    }

    /// Iterates the edges leaving the vertex, in the incidence table's
    /// bucket order (not deterministic across resizes).
    pub fn outgoing_edges(
        &self,
        vertex: VertexId,
    ) -> Result<impl Iterator<Item = EdgeId> + '_, GraphError> {
        Ok(self.vertex(vertex)?.adjacency.outgoing().values().copied())
    }

    /// Iterates the edges entering the vertex. The same collection as
    /// [`Self::outgoing_edges`] for an undirected graph.
    pub fn incoming_edges(
        &self,
        vertex: VertexId,
    ) -> Result<impl Iterator<Item = EdgeId> + '_, GraphError> {
        Ok(self.vertex(vertex)?.adjacency.incoming().values().copied())
    }

    pub fn vertex_element(&self, vertex: VertexId) -> Result<&V, GraphError> {
        Ok(&self.vertex(vertex)?.element)
    }

    pub fn vertex_element_mut(&mut self, vertex: VertexId) -> Result<&mut V, GraphError> {
        Ok(&mut self.vertex_mut(vertex)?.element)
    }

    pub fn edge_element(&self, edge: EdgeId) -> Result<&E, GraphError> {
        Ok(&self.edges.get(edge.0)?.element)
    }

    pub fn edge_element_mut(&mut self, edge: EdgeId) -> Result<&mut E, GraphError> {
        Ok(&mut self.edges.get_mut(edge.0)?.element)
    }

    fn vertex(&self, id: VertexId) -> Result<&VertexRecord<V>, GraphError> {
        self.vertices.get(id.0).map_err(GraphError::from)
    }

    fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexRecord<V>, GraphError> {
        self.vertices.get_mut(id.0).map_err(GraphError::from)
    }
}
