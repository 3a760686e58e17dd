//! Downstream subtree enumeration.

use super::{connectivity, Graph, QueryError};
use crate::types::*;

/// All vertices that lose their feeder path if `edge_id` is opened, with
/// respect to the source vertex. Ascending order.
///
/// The enabled subgraph is a tree, so removing one enabled edge splits it
/// into exactly two components; the result is the component that does not
/// contain the source. It never contains the source and, for a leaf edge, is
/// the singleton far endpoint.
///
/// Fails with [`QueryError::EdgeDisabled`] for a normally-open edge: opening
/// an already-open switch has no downstream side.
pub fn downstream_vertices(graph: &Graph, edge_id: EdgeId) -> Result<Vec<VertexId>, QueryError> {
    let edge = graph
        .edge_idx(edge_id)
        .ok_or(QueryError::EdgeNotFound(edge_id))?;
    if !graph.edges()[edge].enabled {
        return Err(QueryError::EdgeDisabled(edge_id));
    }
    let visited = downstream_indices(graph, edge);
    Ok(connectivity::collect_ids(graph, &visited))
}

/// Index-domain downstream membership for an enabled edge.
///
/// The far endpoint is the one fed through the edge, i.e. whose parent edge
/// on the spanning tree is the edge itself; endpoint input order does not
/// matter. The subtree is collected by BFS over enabled edges minus the
/// queried one.
pub(crate) fn downstream_indices(graph: &Graph, edge: EdgeIndex) -> Vec<bool> {
    let (a, b) = graph.endpoint_indices(edge);
    let far = if graph.parent_edge(a) == Some(edge) { a } else { b };
    let filter = connectivity::enabled_without(graph.edges()[edge].id);
    connectivity::reach_indices(graph, far, &filter)
}
