//! Reachability and cycle analysis over filtered edge subsets.
//!
//! A contingency ("open edge e, close edge c") is expressed as an
//! edge-selection predicate passed into the traversal routines; the base
//! graph is never mutated.

use super::{Edge, Graph, QueryError};
use crate::types::*;

use std::collections::VecDeque;

/// Filter selecting every enabled edge.
pub fn enabled_only() -> impl Fn(&Edge) -> bool {
    |edge: &Edge| edge.enabled
}

/// Filter selecting every enabled edge except `removed`.
pub fn enabled_without(removed: EdgeId) -> impl Fn(&Edge) -> bool {
    move |edge: &Edge| edge.enabled && edge.id != removed
}

/// Filter modeling a switch swap: `removed` opens, `added` closes, all other
/// edges keep their enabled flag.
pub fn enabled_with_swap(removed: EdgeId, added: EdgeId) -> impl Fn(&Edge) -> bool {
    move |edge: &Edge| {
        if edge.id == added {
            true
        } else {
            edge.enabled && edge.id != removed
        }
    }
}

/// Vertex ids reachable from `start` through edges selected by `filter`,
/// ascending. The start vertex is part of the result.
pub fn reachable_from(
    graph: &Graph,
    start: VertexId,
    filter: impl Fn(&Edge) -> bool,
) -> Result<Vec<VertexId>, QueryError> {
    let start = graph
        .vertex_idx(start)
        .ok_or(QueryError::VertexNotFound(start))?;
    let visited = reach_indices(graph, start, &filter);
    Ok(collect_ids(graph, &visited))
}

/// True if the filtered edge subset contains a cycle.
pub fn find_cycle(graph: &Graph, filter: impl Fn(&Edge) -> bool) -> bool {
    first_cycle_edge(graph, &filter).is_some()
}

/// BFS over the filtered edge subset, index domain.
pub(crate) fn reach_indices(
    graph: &Graph,
    start: VertexIndex,
    filter: &impl Fn(&Edge) -> bool,
) -> Vec<bool> {
    let mut visited = vec![false; graph.vertex_count()];
    let mut queue = VecDeque::new();
    visited[start] = true;
    queue.push_back(start);
    while let Some(v) = queue.pop_front() {
        for &(edge, neighbor) in graph.neighbors(v) {
            if !visited[neighbor] && filter(&graph.edges()[edge]) {
                visited[neighbor] = true;
                queue.push_back(neighbor);
            }
        }
    }
    visited
}

/// Union-find sweep over the filtered edges; returns the first edge joining
/// two vertices that are already connected.
pub(crate) fn first_cycle_edge(
    graph: &Graph,
    filter: &impl Fn(&Edge) -> bool,
) -> Option<EdgeIndex> {
    let mut components = DisjointSet::new(graph.vertex_count());
    for (i, edge) in graph.edges().iter().enumerate() {
        if !filter(edge) {
            continue;
        }
        let (a, b) = graph.endpoint_indices(i);
        if !components.union(a, b) {
            return Some(i);
        }
    }
    None
}

/// Sorted ids of the visited vertices.
pub(crate) fn collect_ids(graph: &Graph, visited: &[bool]) -> Vec<VertexId> {
    let mut out: Vec<VertexId> = visited
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v)
        .map(|(i, _)| graph.vertices()[i].id)
        .collect();
    out.sort_unstable();
    out
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(size: usize) -> DisjointSet {
        DisjointSet {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// False when both vertices were already in the same component.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let a = self.find(a);
        let b = self.find(b);
        if a == b {
            return false;
        }
        self.parent[a] = b;
        true
    }
}
