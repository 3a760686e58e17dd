//! Grid topology engine.
//!
//! Builds an immutable undirected graph of the distribution network and
//! answers structural questions about it: which vertices hang downstream of
//! an enabled edge, and which normally-open edges could back-feed them if
//! that edge is opened.
//!
//! The enabled-edge subgraph of a valid [`Graph`] is a spanning tree over the
//! in-service vertices, rooted at the single source vertex (radial
//! operation). Normally-open edges may land anywhere and are only evaluated
//! when a query considers closing them.

mod alternatives;
mod connectivity;
mod downstream;

pub use alternatives::{alternative_edges, AlternativeEdge};
pub use connectivity::{
    enabled_only, enabled_with_swap, enabled_without, find_cycle, reachable_from,
};
pub use downstream::downstream_vertices;

#[cfg(test)]
mod tests;

use crate::types::*;

use std::collections::VecDeque;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

/// Function of a vertex in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexRole {
    /// Feeder root; exactly one per graph.
    Source,
    /// Carries a connected load.
    Load,
    /// Plain connection point.
    Junction,
}

/// A node of the network graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub role: VertexRole,
    /// False for out-of-service vertices, which are exempt from the
    /// reachability requirement.
    pub enabled: bool,
}

/// An undirected branch between two distinct vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    /// Endpoint vertex ids, in input order. The graph is undirected; no
    /// query may depend on which endpoint comes first.
    pub vertices: (VertexId, VertexId),
    /// True for a closed switch / in-service line, false for normally open.
    pub enabled: bool,
}

/// Structural problems detected while building a [`Graph`].
/// Construction fails fast; no query runs on an invalid graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NonPositiveId(i64),
    DuplicateVertexId(VertexId),
    DuplicateEdgeId(EdgeId),
    DanglingEdge { edge: EdgeId, vertex: VertexId },
    SelfLoop(EdgeId),
    SourceNotFound(VertexId),
    NotASource(VertexId),
    MultipleSources(usize),
    InactiveEndpoint { edge: EdgeId, vertex: VertexId },
    NotRadial(EdgeId),
    Disconnected(VertexId),
}

impl std::error::Error for ValidationError {}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ValidationError::NonPositiveId(id) => {
                write!(f, "identifier {} is not positive", id)
            }
            ValidationError::DuplicateVertexId(id) => {
                write!(f, "vertex id {} is not unique", id)
            }
            ValidationError::DuplicateEdgeId(id) => {
                write!(f, "edge id {} is not unique", id)
            }
            ValidationError::DanglingEdge { edge, vertex } => {
                write!(f, "edge {} references unknown vertex {}", edge, vertex)
            }
            ValidationError::SelfLoop(id) => {
                write!(f, "edge {} connects a vertex to itself", id)
            }
            ValidationError::SourceNotFound(id) => {
                write!(f, "source vertex {} is not present in the graph", id)
            }
            ValidationError::NotASource(id) => {
                write!(f, "vertex {} does not carry the source role", id)
            }
            ValidationError::MultipleSources(count) => {
                write!(f, "expected exactly one source vertex, found {}", count)
            }
            ValidationError::InactiveEndpoint { edge, vertex } => {
                write!(
                    f,
                    "enabled edge {} touches out-of-service vertex {}",
                    edge, vertex
                )
            }
            ValidationError::NotRadial(id) => {
                write!(f, "enabled edge {} closes a cycle", id)
            }
            ValidationError::Disconnected(id) => {
                write!(
                    f,
                    "in-service vertex {} is not reachable from the source",
                    id
                )
            }
        }
    }
}

/// Errors for queries against a valid graph. These signal caller mistakes
/// and are never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    VertexNotFound(VertexId),
    EdgeNotFound(EdgeId),
    /// The query needs an enabled edge but the given one is normally open.
    EdgeDisabled(EdgeId),
}

impl std::error::Error for QueryError {}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            QueryError::VertexNotFound(id) => write!(f, "vertex {} does not exist", id),
            QueryError::EdgeNotFound(id) => write!(f, "edge {} does not exist", id),
            QueryError::EdgeDisabled(id) => {
                write!(f, "edge {} is normally open; an enabled edge is required", id)
            }
        }
    }
}

/// Immutable topology of the distribution network.
///
/// Owns all vertex and edge records. Queries return plain identifier sets
/// owned by the caller, never references into the graph, and are safe to run
/// concurrently against a shared graph.
#[derive(Debug)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    /// adjacency[v] lists (edge index, neighbor vertex index) pairs.
    adjacency: Vec<Vec<(EdgeIndex, VertexIndex)>>,
    /// Endpoint vertex indices per edge, same order as `edges`.
    endpoints: Vec<(VertexIndex, VertexIndex)>,
    vertex_index: HashMap<VertexId, VertexIndex>,
    edge_index: HashMap<EdgeId, EdgeIndex>,
    source: VertexIndex,
    /// parent[v] = (parent vertex, connecting edge) on the enabled spanning
    /// tree; `None` for the source and out-of-service vertices.
    parent: Vec<Option<(VertexIndex, EdgeIndex)>>,
}

impl Graph {
    /// Build and validate a graph from vertex and edge descriptors.
    ///
    /// Checks, in order: positive unique ids, endpoint existence, no
    /// self-loops, enabled edges only between in-service vertices, a single
    /// source vertex matching `source_vertex_id`, acyclicity of the enabled
    /// subgraph, and reachability of every in-service vertex from the
    /// source. The first violated condition aborts the build.
    pub fn build(
        vertices: Vec<Vertex>,
        edges: Vec<Edge>,
        source_vertex_id: VertexId,
    ) -> Result<Graph, ValidationError> {
        let mut vertex_index = HashMap::with_capacity(vertices.len());
        for (i, vertex) in vertices.iter().enumerate() {
            if vertex.id <= 0 {
                return Err(ValidationError::NonPositiveId(vertex.id));
            }
            if vertex_index.insert(vertex.id, i).is_some() {
                return Err(ValidationError::DuplicateVertexId(vertex.id));
            }
        }

        let mut edge_index = HashMap::with_capacity(edges.len());
        for (i, edge) in edges.iter().enumerate() {
            if edge.id <= 0 {
                return Err(ValidationError::NonPositiveId(edge.id));
            }
            if edge_index.insert(edge.id, i).is_some() {
                return Err(ValidationError::DuplicateEdgeId(edge.id));
            }
        }

        let mut adjacency = vec![Vec::new(); vertices.len()];
        let mut endpoints = Vec::with_capacity(edges.len());
        for (i, edge) in edges.iter().enumerate() {
            let (a, b) = edge.vertices;
            let ai = *vertex_index
                .get(&a)
                .ok_or(ValidationError::DanglingEdge { edge: edge.id, vertex: a })?;
            let bi = *vertex_index
                .get(&b)
                .ok_or(ValidationError::DanglingEdge { edge: edge.id, vertex: b })?;
            if ai == bi {
                return Err(ValidationError::SelfLoop(edge.id));
            }
            if edge.enabled {
                for (idx, id) in [(ai, a), (bi, b)] {
                    if !vertices[idx].enabled {
                        return Err(ValidationError::InactiveEndpoint {
                            edge: edge.id,
                            vertex: id,
                        });
                    }
                }
            }
            adjacency[ai].push((i, bi));
            adjacency[bi].push((i, ai));
            endpoints.push((ai, bi));
        }

        let source = *vertex_index
            .get(&source_vertex_id)
            .ok_or(ValidationError::SourceNotFound(source_vertex_id))?;
        if vertices[source].role != VertexRole::Source {
            return Err(ValidationError::NotASource(source_vertex_id));
        }
        let source_count = vertices
            .iter()
            .filter(|v| v.role == VertexRole::Source)
            .count();
        if source_count != 1 {
            return Err(ValidationError::MultipleSources(source_count));
        }

        let parent = vec![None; vertices.len()];
        let mut graph = Graph {
            vertices,
            edges,
            adjacency,
            endpoints,
            vertex_index,
            edge_index,
            source,
            parent,
        };

        if let Some(edge) = connectivity::first_cycle_edge(&graph, &connectivity::enabled_only()) {
            return Err(ValidationError::NotRadial(graph.edges[edge].id));
        }

        graph.label_parents();
        for (i, vertex) in graph.vertices.iter().enumerate() {
            if vertex.enabled && i != graph.source && graph.parent[i].is_none() {
                return Err(ValidationError::Disconnected(vertex.id));
            }
        }

        Ok(graph)
    }

    /// BFS from the source over enabled edges, recording the parent vertex
    /// and parent edge of every vertex reached.
    fn label_parents(&mut self) {
        let mut visited = vec![false; self.vertices.len()];
        let mut queue = VecDeque::new();
        visited[self.source] = true;
        queue.push_back(self.source);
        while let Some(v) = queue.pop_front() {
            for k in 0..self.adjacency[v].len() {
                let (edge, neighbor) = self.adjacency[v][k];
                if self.edges[edge].enabled && !visited[neighbor] {
                    visited[neighbor] = true;
                    self.parent[neighbor] = Some((v, edge));
                    queue.push_back(neighbor);
                }
            }
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Vertex record by id.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertex_index.get(&id).map(|&i| &self.vertices[i])
    }

    /// Edge record by id; exposes its endpoints and enabled flag.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_index.get(&id).map(|&i| &self.edges[i])
    }

    /// Ids of the edges incident to the given vertex.
    pub fn incident_edges(&self, vertex: VertexId) -> Option<Vec<EdgeId>> {
        let &idx = self.vertex_index.get(&vertex)?;
        Some(
            self.adjacency[idx]
                .iter()
                .map(|&(edge, _)| self.edges[edge].id)
                .collect(),
        )
    }

    /// Id of the designated feeder root.
    pub fn source_id(&self) -> VertexId {
        self.vertices[self.source].id
    }

    pub(crate) fn source_index(&self) -> VertexIndex {
        self.source
    }

    pub(crate) fn vertex_idx(&self, id: VertexId) -> Option<VertexIndex> {
        self.vertex_index.get(&id).copied()
    }

    pub(crate) fn edge_idx(&self, id: EdgeId) -> Option<EdgeIndex> {
        self.edge_index.get(&id).copied()
    }

    pub(crate) fn neighbors(&self, vertex: VertexIndex) -> &[(EdgeIndex, VertexIndex)] {
        &self.adjacency[vertex]
    }

    pub(crate) fn endpoint_indices(&self, edge: EdgeIndex) -> (VertexIndex, VertexIndex) {
        self.endpoints[edge]
    }

    /// Edge through which the given vertex is fed, `None` for the source and
    /// out-of-service vertices.
    pub(crate) fn parent_edge(&self, vertex: VertexIndex) -> Option<EdgeIndex> {
        self.parent[vertex].map(|(_, edge)| edge)
    }
}
