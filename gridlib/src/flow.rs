//! Power-flow engine boundary and result aggregation.
//!
//! The numerical solve is an external concern behind the
//! [`PowerFlowEngine`] trait; this crate prepares the batch input for it and
//! aggregates its output into the two standard result tables. No electrical
//! computation happens here.

use crate::io::{Network, Profile};
use crate::types::*;
use crate::utils;

use ndarray::Array2;
use serde::Serialize;

/// Failures around an engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Profiles disagree on timestamps, load ids, or shape.
    LoadMismatch(String),
    /// Failure reported by the engine itself; opaque payload.
    Engine(String),
}

impl std::error::Error for FlowError {}

impl std::fmt::Display for FlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FlowError::LoadMismatch(reason) => write!(f, "inconsistent load input: {}", reason),
            FlowError::Engine(reason) => write!(f, "power-flow engine failed: {}", reason),
        }
    }
}

/// Topology and tap overrides the engine applies before solving.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioUpdate {
    /// Branch status overrides as (edge id, in service) pairs.
    pub branch_status: Vec<(EdgeId, bool)>,
    /// Transformer tap position override.
    pub tap_pos: Option<TapPosition>,
}

impl ScenarioUpdate {
    /// The base case: no overrides.
    pub fn base() -> ScenarioUpdate {
        ScenarioUpdate::default()
    }

    /// A switch swap: `removed` opens and `added` closes.
    pub fn swap(removed: EdgeId, added: EdgeId) -> ScenarioUpdate {
        ScenarioUpdate {
            branch_status: vec![(removed, false), (added, true)],
            tap_pos: None,
        }
    }

    /// A tap position override only.
    pub fn tap(pos: TapPosition) -> ScenarioUpdate {
        ScenarioUpdate {
            branch_status: Vec::new(),
            tap_pos: Some(pos),
        }
    }
}

/// Time-series load input for one engine run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchLoads {
    pub timestamps: Vec<Timestamp>,
    pub load_ids: Vec<LoadId>,
    /// Active power per load, W, timestamps × loads.
    pub active: Array2<f64>,
    /// Reactive power per load, var, timestamps × loads.
    pub reactive: Array2<f64>,
}

impl BatchLoads {
    /// Combine matching active and reactive profiles into engine input.
    pub fn from_profiles(active: &Profile, reactive: &Profile) -> Result<BatchLoads, FlowError> {
        if !active.shape_matches() || !reactive.shape_matches() {
            return Err(FlowError::LoadMismatch(
                "profile value matrix does not match its axes".to_string(),
            ));
        }
        if active.columns != reactive.columns {
            return Err(FlowError::LoadMismatch(
                "load ids of active and reactive power do not match".to_string(),
            ));
        }
        if active.timestamps != reactive.timestamps {
            return Err(FlowError::LoadMismatch(
                "timestamps of active and reactive power do not match".to_string(),
            ));
        }
        Ok(BatchLoads {
            timestamps: active.timestamps.clone(),
            load_ids: active.columns.clone(),
            active: active.values.clone(),
            reactive: reactive.values.clone(),
        })
    }
}

/// Electrical state computed by the engine, one row per timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowOutput {
    pub timestamps: Vec<Timestamp>,
    pub node_ids: Vec<VertexId>,
    /// Per-unit node voltages, timestamps × nodes.
    pub voltages: Array2<f64>,
    pub branch_ids: Vec<EdgeId>,
    /// Branch loading in p.u., timestamps × branches.
    pub loading: Array2<f64>,
    /// Active power entering the from side, W, timestamps × branches.
    pub power_from: Array2<f64>,
    /// Active power entering the to side, W, timestamps × branches.
    pub power_to: Array2<f64>,
}

/// Boundary to the external power-flow solver.
///
/// An implementation receives the base network, applies the scenario
/// overrides, and computes voltages and branch flows for every timestamp of
/// the batch. Implementations live outside this crate.
pub trait PowerFlowEngine {
    fn solve(
        &self,
        network: &Network,
        scenario: &ScenarioUpdate,
        loads: &BatchLoads,
    ) -> Result<FlowOutput, FlowError>;
}

/// One row of the per-timestamp voltage table.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoltageRow {
    pub timestamp: Timestamp,
    pub max_voltage: f64,
    pub max_voltage_node: VertexId,
    pub min_voltage: f64,
    pub min_voltage_node: VertexId,
}

/// One row of the per-branch loading table.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadingRow {
    pub branch_id: EdgeId,
    /// Energy lost in the branch across the timeline: trapezoidal integral
    /// of |p_from + p_to|, in kWh for hourly samples.
    pub energy_loss: f64,
    pub max_loading: f64,
    pub max_loading_timestamp: Timestamp,
    pub min_loading: f64,
    pub min_loading_timestamp: Timestamp,
}

/// Per-timestamp voltage extrema with the nodes attaining them.
/// The first node wins ties.
pub fn aggregate_voltages(output: &FlowOutput) -> Vec<VoltageRow> {
    let mut rows = Vec::with_capacity(output.timestamps.len());
    if output.node_ids.is_empty() {
        return rows;
    }
    for (t, &timestamp) in output.timestamps.iter().enumerate() {
        let voltages = output.voltages.row(t);
        let mut max_i = 0;
        let mut min_i = 0;
        for (i, &v) in voltages.iter().enumerate() {
            if v > voltages[max_i] {
                max_i = i;
            }
            if v < voltages[min_i] {
                min_i = i;
            }
        }
        rows.push(VoltageRow {
            timestamp,
            max_voltage: voltages[max_i],
            max_voltage_node: output.node_ids[max_i],
            min_voltage: voltages[min_i],
            min_voltage_node: output.node_ids[min_i],
        });
    }
    rows
}

/// Per-branch loading extrema and energy loss across the timeline.
/// The earliest timestamp wins ties.
pub fn aggregate_loading(output: &FlowOutput) -> Vec<LoadingRow> {
    let mut rows = Vec::with_capacity(output.branch_ids.len());
    if output.timestamps.is_empty() {
        return rows;
    }
    for (b, &branch_id) in output.branch_ids.iter().enumerate() {
        let loading = output.loading.column(b);
        let mut max_t = 0;
        let mut min_t = 0;
        for (t, &value) in loading.iter().enumerate() {
            if value > loading[max_t] {
                max_t = t;
            }
            if value < loading[min_t] {
                min_t = t;
            }
        }
        let losses: Vec<f64> = (0..output.timestamps.len())
            .map(|t| (output.power_from[(t, b)] + output.power_to[(t, b)]).abs())
            .collect();
        rows.push(LoadingRow {
            branch_id,
            energy_loss: utils::trapezoid(&losses) / 1000.0,
            max_loading: loading[max_t],
            max_loading_timestamp: output.timestamps[max_t],
            min_loading: loading[min_t],
            min_loading_timestamp: output.timestamps[min_t],
        });
    }
    rows
}
