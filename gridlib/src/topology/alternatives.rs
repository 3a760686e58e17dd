//! Normally-open backfeed candidate search.

use serde::Serialize;

use super::{connectivity, downstream, Graph, QueryError};
use crate::types::*;

/// A normally-open edge whose activation restores full connectivity after a
/// contingency, together with the enabled topology the swap produces.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeEdge {
    pub edge_id: EdgeId,
    /// Enabled edge ids after the swap, ascending. Satisfies the radial
    /// invariant: acyclic and fully connected from the source.
    pub enabled_edges: Vec<EdgeId>,
}

/// Every normally-open edge that could back-feed the subtree orphaned by
/// opening `edge_id`, in ascending edge-id order.
///
/// A candidate qualifies iff it bridges the cut (exactly one endpoint in the
/// downstream set) and the swapped enabled set is acyclic and reconnects all
/// in-service vertices to the source. An empty result means the network has
/// no redundancy for this contingency; that is a valid outcome, not an
/// error.
pub fn alternative_edges(
    graph: &Graph,
    edge_id: EdgeId,
) -> Result<Vec<AlternativeEdge>, QueryError> {
    let removed = graph
        .edge_idx(edge_id)
        .ok_or(QueryError::EdgeNotFound(edge_id))?;
    if !graph.edges()[removed].enabled {
        return Err(QueryError::EdgeDisabled(edge_id));
    }
    let in_downstream = downstream::downstream_indices(graph, removed);

    let mut open: Vec<EdgeIndex> = (0..graph.edges().len())
        .filter(|&i| !graph.edges()[i].enabled)
        .collect();
    open.sort_unstable_by_key(|&i| graph.edges()[i].id);

    let mut candidates = Vec::new();
    for candidate in open {
        let (a, b) = graph.endpoint_indices(candidate);
        // Must bridge the cut: one endpoint orphaned, the other not.
        if in_downstream[a] == in_downstream[b] {
            continue;
        }
        let candidate_id = graph.edges()[candidate].id;
        let filter = connectivity::enabled_with_swap(edge_id, candidate_id);
        if connectivity::find_cycle(graph, &filter) {
            continue;
        }
        let reached = connectivity::reach_indices(graph, graph.source_index(), &filter);
        let all_fed = graph
            .vertices()
            .iter()
            .enumerate()
            .all(|(i, v)| !v.enabled || reached[i]);
        if !all_fed {
            continue;
        }
        let mut enabled_edges: Vec<EdgeId> = graph
            .edges()
            .iter()
            .filter(|&e| filter(e))
            .map(|e| e.id)
            .collect();
        enabled_edges.sort_unstable();
        candidates.push(AlternativeEdge {
            edge_id: candidate_id,
            enabled_edges,
        });
    }
    Ok(candidates)
}
