//! N-1 contingency assessment.
//!
//! For one enabled edge taken out of service, evaluates every backfeed
//! candidate with the external engine and tabulates the worst branch
//! loading each candidate produces.

use crate::flow::{aggregate_loading, BatchLoads, FlowError, PowerFlowEngine, ScenarioUpdate};
use crate::io::Network;
use crate::topology::{alternative_edges, Graph, QueryError};
use crate::types::*;

use ordered_float::OrderedFloat;
use serde::Serialize;

/// Failures of a contingency assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContingencyError {
    Query(QueryError),
    Flow(FlowError),
}

impl std::error::Error for ContingencyError {}

impl std::fmt::Display for ContingencyError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ContingencyError::Query(e) => write!(f, "{}", e),
            ContingencyError::Flow(e) => write!(f, "{}", e),
        }
    }
}

impl From<QueryError> for ContingencyError {
    fn from(e: QueryError) -> ContingencyError {
        ContingencyError::Query(e)
    }
}

impl From<FlowError> for ContingencyError {
    fn from(e: FlowError) -> ContingencyError {
        ContingencyError::Flow(e)
    }
}

/// One row of the contingency table: the worst loading observed anywhere in
/// the network with the given backfeed candidate in place.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContingencyRow {
    pub alternative_id: EdgeId,
    pub max_loading: f64,
    pub max_loading_branch: EdgeId,
    pub max_loading_timestamp: Timestamp,
}

/// Assess the contingency "edge `edge_id` fails": run the engine once per
/// backfeed candidate and record the worst branch loading of each resulting
/// topology. Rows come in ascending candidate-id order; an empty table means
/// the network has no redundancy for this contingency.
pub fn n_minus_one<E: PowerFlowEngine>(
    network: &Network,
    graph: &Graph,
    engine: &E,
    loads: &BatchLoads,
    edge_id: EdgeId,
) -> Result<Vec<ContingencyRow>, ContingencyError> {
    let candidates = alternative_edges(graph, edge_id)?;
    let mut rows = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let scenario = ScenarioUpdate::swap(edge_id, candidate.edge_id);
        let output = engine.solve(network, &scenario, loads)?;
        let worst = aggregate_loading(&output)
            .into_iter()
            .max_by_key(|row| OrderedFloat(row.max_loading));
        if let Some(worst) = worst {
            rows.push(ContingencyRow {
                alternative_id: candidate.edge_id,
                max_loading: worst.max_loading,
                max_loading_branch: worst.branch_id,
                max_loading_timestamp: worst.max_loading_timestamp,
            });
        }
    }
    Ok(rows)
}
