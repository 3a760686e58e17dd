//! Whole-input validity check for an analysis session.
//!
//! Verifies the combined network + profile input before any analysis runs:
//! network shape (single transformer and source, feeder wiring), profile
//! consistency (timestamps, load ids, EV profile count), and the topology
//! invariants enforced by [`Graph::build`]. Fails on the first violation;
//! nothing here is retryable.

use crate::io::{Network, Profile};
use crate::topology::{Graph, ValidationError};
use crate::types::*;

/// Problems with the combined network and profile input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// The network must have exactly one transformer.
    TransformerCount(usize),
    /// The network must have exactly one source.
    SourceCount(usize),
    /// A feeder id does not name a line.
    InvalidFeeder(EdgeId),
    /// A feeder line does not depart from the transformer's to-node.
    FeederNotAtTransformer { feeder: EdgeId, node: VertexId },
    /// The named profile's value matrix disagrees with its axes.
    ShapeMismatch(&'static str),
    /// The named profile's timestamps differ from the active profile's.
    TimestampMismatch(&'static str),
    /// Active and reactive profiles disagree on load ids.
    ProfileIdMismatch,
    /// A profile column id is not a load of the network.
    UnknownLoadId(LoadId),
    /// Fewer EV charging profiles than loads.
    NotEnoughEvProfiles { profiles: usize, loads: usize },
    /// The grid graph itself is invalid.
    Topology(ValidationError),
}

impl std::error::Error for InputError {}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InputError::TransformerCount(count) => {
                write!(f, "expected exactly one transformer, found {}", count)
            }
            InputError::SourceCount(count) => {
                write!(f, "expected exactly one source, found {}", count)
            }
            InputError::InvalidFeeder(id) => {
                write!(f, "feeder {} is not a valid line id", id)
            }
            InputError::FeederNotAtTransformer { feeder, node } => {
                write!(
                    f,
                    "feeder line {} starts at node {} instead of the transformer output",
                    feeder, node
                )
            }
            InputError::ShapeMismatch(profile) => {
                write!(f, "value matrix of the {} power profile does not match its axes", profile)
            }
            InputError::TimestampMismatch(profile) => {
                write!(
                    f,
                    "timestamps of the active and {} power profiles do not match",
                    profile
                )
            }
            InputError::ProfileIdMismatch => {
                write!(f, "load ids of the active and reactive power profiles do not match")
            }
            InputError::UnknownLoadId(id) => {
                write!(f, "profile column {} is not a load of the network", id)
            }
            InputError::NotEnoughEvProfiles { profiles, loads } => {
                write!(
                    f,
                    "{} EV charging profiles for {} loads; need at least one per load",
                    profiles, loads
                )
            }
            InputError::Topology(e) => write!(f, "invalid grid topology: {}", e),
        }
    }
}

impl From<ValidationError> for InputError {
    fn from(e: ValidationError) -> InputError {
        InputError::Topology(e)
    }
}

/// Validate a network record together with its active, reactive, and EV
/// charging profiles. Returns the built topology graph on success so callers
/// can query it directly.
pub fn validate_analysis_input(
    network: &Network,
    active: &Profile,
    reactive: &Profile,
    ev: &Profile,
) -> Result<Graph, InputError> {
    if network.transformers.len() != 1 {
        return Err(InputError::TransformerCount(network.transformers.len()));
    }
    if network.sources.len() != 1 {
        return Err(InputError::SourceCount(network.sources.len()));
    }
    let transformer = &network.transformers[0];

    for &feeder in &network.feeders {
        let line = network
            .line(feeder)
            .ok_or(InputError::InvalidFeeder(feeder))?;
        if line.from_node != transformer.to_node {
            return Err(InputError::FeederNotAtTransformer {
                feeder,
                node: line.from_node,
            });
        }
    }

    for (profile, name) in [(active, "active"), (reactive, "reactive"), (ev, "EV")] {
        if !profile.shape_matches() {
            return Err(InputError::ShapeMismatch(name));
        }
    }
    if active.timestamps != reactive.timestamps {
        return Err(InputError::TimestampMismatch("reactive"));
    }
    if active.timestamps != ev.timestamps {
        return Err(InputError::TimestampMismatch("EV"));
    }
    if active.columns != reactive.columns {
        return Err(InputError::ProfileIdMismatch);
    }

    for &column in &active.columns {
        if !network.loads.iter().any(|load| load.id == column) {
            return Err(InputError::UnknownLoadId(column));
        }
    }
    if ev.columns.len() < network.loads.len() {
        return Err(InputError::NotEnoughEvProfiles {
            profiles: ev.columns.len(),
            loads: network.loads.len(),
        });
    }

    // Connectivity and radiality, checked on the flattened graph.
    let (vertices, edges, source) = network
        .topology_input()
        .ok_or(InputError::SourceCount(0))?;
    let graph = Graph::build(vertices, edges, source)?;
    Ok(graph)
}
