//! EV penetration study.
//!
//! Distributes EV charging profiles over randomly chosen loads, feeder by
//! feeder, and evaluates the resulting grid state with the external engine.
//! The caller supplies the RNG, so studies are reproducible under a fixed
//! seed.

use crate::flow::{
    aggregate_loading, aggregate_voltages, BatchLoads, FlowError, LoadingRow, PowerFlowEngine,
    ScenarioUpdate, VoltageRow,
};
use crate::io::{Network, Profile};
use crate::topology::{downstream_vertices, Graph, QueryError};
use crate::types::*;

use rand::Rng;

/// Failures of an EV penetration study.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvError {
    Query(QueryError),
    Flow(FlowError),
    /// A feeder has fewer candidate loads than EVs to place on it.
    NotEnoughLoads {
        feeder: EdgeId,
        available: usize,
        required: usize,
    },
    /// Fewer EV charging profiles than EVs to place.
    NotEnoughProfiles { available: usize, required: usize },
    /// A selected load is missing from the batch load input.
    LoadNotInBatch(LoadId),
}

impl std::error::Error for EvError {}

impl std::fmt::Display for EvError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            EvError::Query(e) => write!(f, "{}", e),
            EvError::Flow(e) => write!(f, "{}", e),
            EvError::NotEnoughLoads {
                feeder,
                available,
                required,
            } => write!(
                f,
                "feeder {} has {} candidate loads for {} EVs",
                feeder, available, required
            ),
            EvError::NotEnoughProfiles {
                available,
                required,
            } => write!(
                f,
                "{} EV charging profiles for {} EVs to place",
                available, required
            ),
            EvError::LoadNotInBatch(id) => {
                write!(f, "load {} is missing from the batch load input", id)
            }
        }
    }
}

impl From<QueryError> for EvError {
    fn from(e: QueryError) -> EvError {
        EvError::Query(e)
    }
}

impl From<FlowError> for EvError {
    fn from(e: FlowError) -> EvError {
        EvError::Flow(e)
    }
}

/// Aggregated grid state with the EVs in place.
#[derive(Debug, Clone, PartialEq)]
pub struct EvStudy {
    pub voltages: Vec<VoltageRow>,
    pub loading: Vec<LoadingRow>,
}

/// Run an EV penetration study at the given level.
///
/// Per feeder, ⌊level% × total loads / feeder count⌋ EVs are placed on
/// uniformly sampled downstream loads, each drawing a distinct uniformly
/// sampled EV charging profile added onto its active power. One engine run
/// evaluates the result. A network without feeders places no EVs and
/// evaluates the base case.
pub fn ev_penetration<E: PowerFlowEngine, R: Rng + ?Sized>(
    network: &Network,
    graph: &Graph,
    engine: &E,
    loads: &BatchLoads,
    ev_profile: &Profile,
    level_percent: u32,
    rng: &mut R,
) -> Result<EvStudy, EvError> {
    if ev_profile.timestamps != loads.timestamps {
        return Err(EvError::Flow(FlowError::LoadMismatch(
            "timestamps of load and EV profiles do not match".to_string(),
        )));
    }

    let feeder_count = network.feeders.len();
    let evs_per_feeder = if feeder_count == 0 {
        0
    } else {
        (level_percent as f64 / 100.0 * network.loads.len() as f64 / feeder_count as f64).floor()
            as usize
    };

    let total_evs = evs_per_feeder * feeder_count;
    if total_evs > ev_profile.columns.len() {
        return Err(EvError::NotEnoughProfiles {
            available: ev_profile.columns.len(),
            required: total_evs,
        });
    }
    // Distinct charging profiles across the whole study.
    let profile_columns = rand::seq::index::sample(rng, ev_profile.columns.len(), total_evs);
    let mut placed = 0;

    let mut active = loads.active.clone();
    for &feeder in &network.feeders {
        let downstream = downstream_vertices(graph, feeder)?;
        let candidates: Vec<LoadId> = network
            .loads
            .iter()
            .filter(|load| downstream.binary_search(&load.node).is_ok())
            .map(|load| load.id)
            .collect();
        if candidates.len() < evs_per_feeder {
            return Err(EvError::NotEnoughLoads {
                feeder,
                available: candidates.len(),
                required: evs_per_feeder,
            });
        }
        let chosen = rand::seq::index::sample(rng, candidates.len(), evs_per_feeder);
        for pick in chosen.iter() {
            let load_id = candidates[pick];
            let column = loads
                .load_ids
                .iter()
                .position(|&id| id == load_id)
                .ok_or(EvError::LoadNotInBatch(load_id))?;
            let ev_column = profile_columns.index(placed);
            placed += 1;
            for t in 0..active.nrows() {
                active[(t, column)] += ev_profile.values[(t, ev_column)];
            }
        }
    }

    let updated = BatchLoads {
        timestamps: loads.timestamps.clone(),
        load_ids: loads.load_ids.clone(),
        active,
        reactive: loads.reactive.clone(),
    };
    let output = engine.solve(network, &ScenarioUpdate::base(), &updated)?;
    Ok(EvStudy {
        voltages: aggregate_voltages(&output),
        loading: aggregate_loading(&output),
    })
}
