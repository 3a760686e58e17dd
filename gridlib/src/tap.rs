//! Transformer tap position sweep.

use crate::flow::{
    aggregate_loading, aggregate_voltages, BatchLoads, FlowError, PowerFlowEngine, ScenarioUpdate,
};
use crate::io::Network;
use crate::types::*;

/// What a tap sweep minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapCriterion {
    /// Mean absolute deviation of the per-timestamp voltage extrema from
    /// 1 p.u.
    VoltageDeviation,
    /// Total energy loss across all branches.
    EnergyLoss,
}

/// Failures of a tap sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapError {
    /// The network lists no transformer to sweep.
    NoTransformer,
    Flow(FlowError),
}

impl std::error::Error for TapError {}

impl std::fmt::Display for TapError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TapError::NoTransformer => write!(f, "the network lists no transformer"),
            TapError::Flow(e) => write!(f, "{}", e),
        }
    }
}

impl From<FlowError> for TapError {
    fn from(e: FlowError) -> TapError {
        TapError::Flow(e)
    }
}

/// Sweep every tap position of the transformer, run the engine per position,
/// and return the position scoring best under the criterion. The tap range
/// may be given in either order; the lowest position wins ties.
pub fn optimal_tap_position<E: PowerFlowEngine>(
    network: &Network,
    engine: &E,
    loads: &BatchLoads,
    criterion: TapCriterion,
) -> Result<TapPosition, TapError> {
    let transformer = network
        .transformers
        .first()
        .ok_or(TapError::NoTransformer)?;
    let (mut low, mut high) = (transformer.tap_min, transformer.tap_max);
    if low > high {
        std::mem::swap(&mut low, &mut high);
    }

    let mut best_score = f64::INFINITY;
    let mut best_tap = low;
    for tap in low..=high {
        let output = engine.solve(network, &ScenarioUpdate::tap(tap), loads)?;
        let score = match criterion {
            TapCriterion::VoltageDeviation => {
                let rows = aggregate_voltages(&output);
                if rows.is_empty() {
                    0.0
                } else {
                    rows.iter()
                        .map(|row| {
                            ((row.max_voltage - 1.0).abs() + (row.min_voltage - 1.0).abs()) / 2.0
                        })
                        .sum::<f64>()
                        / rows.len() as f64
                }
            }
            TapCriterion::EnergyLoss => aggregate_loading(&output)
                .iter()
                .map(|row| row.energy_loss)
                .sum(),
        };
        log::debug!("tap {}: score {}", tap, score);
        if score < best_score {
            best_score = score;
            best_tap = tap;
        }
    }
    Ok(best_tap)
}
