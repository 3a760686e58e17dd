//! Input output module.
//!
//! Serde representations of network records, load profiles, and the
//! conversion from a network record to topology build input.

pub mod fs;


use crate::topology::{Edge, Vertex, VertexRole};
use crate::types::*;

use ndarray::Array2;
use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashSet;

#[cfg(feature = "hashbrown")]
use hashbrown::HashSet;

/// A bus of the network.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Node {
    pub id: VertexId,
    /// 0 for out-of-service buses.
    #[serde(default = "default_status")]
    pub status: u8,
}

/// A switchable line between two nodes. Normally-open lines have at least
/// one zero status.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: EdgeId,
    pub from_node: VertexId,
    pub to_node: VertexId,
    pub from_status: u8,
    pub to_status: u8,
}

/// The MV/LV transformer. Always in service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transformer {
    pub id: EdgeId,
    pub from_node: VertexId,
    pub to_node: VertexId,
    pub tap_min: TapPosition,
    pub tap_max: TapPosition,
    pub tap_pos: TapPosition,
}

/// External grid connection point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Source {
    pub id: i64,
    pub node: VertexId,
}

/// A symmetric load attached to a node.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Load {
    pub id: LoadId,
    pub node: VertexId,
}

/// JSON representation of a distribution network.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Network {
    pub name: String,
    pub nodes: Vec<Node>,
    pub lines: Vec<Line>,
    pub transformers: Vec<Transformer>,
    pub sources: Vec<Source>,
    pub loads: Vec<Load>,
    /// Ids of the feeder lines leaving the transformer.
    #[serde(default)]
    pub feeders: Vec<EdgeId>,
}

fn default_status() -> u8 {
    1
}

impl Network {
    /// Flatten the record into the vertex and edge descriptors consumed by
    /// [`crate::topology::Graph::build`]. Transformers come first, then the
    /// lines; a line is enabled iff both of its statuses are nonzero.
    ///
    /// Returns `None` when the record lists no source at all; the designated
    /// root is the first source's node.
    pub fn topology_input(&self) -> Option<(Vec<Vertex>, Vec<Edge>, VertexId)> {
        let source_vertex_id = self.sources.first()?.node;

        let source_nodes: HashSet<VertexId> = self.sources.iter().map(|s| s.node).collect();
        let load_nodes: HashSet<VertexId> = self.loads.iter().map(|l| l.node).collect();

        let vertices = self
            .nodes
            .iter()
            .map(|node| {
                let role = if source_nodes.contains(&node.id) {
                    VertexRole::Source
                } else if load_nodes.contains(&node.id) {
                    VertexRole::Load
                } else {
                    VertexRole::Junction
                };
                Vertex {
                    id: node.id,
                    role,
                    enabled: node.status != 0,
                }
            })
            .collect();

        let mut edges: Vec<Edge> = Vec::with_capacity(self.transformers.len() + self.lines.len());
        for transformer in &self.transformers {
            edges.push(Edge {
                id: transformer.id,
                vertices: (transformer.from_node, transformer.to_node),
                enabled: true,
            });
        }
        for line in &self.lines {
            edges.push(Edge {
                id: line.id,
                vertices: (line.from_node, line.to_node),
                enabled: line.from_status != 0 && line.to_status != 0,
            });
        }

        Some((vertices, edges, source_vertex_id))
    }

    /// Line record by id.
    pub fn line(&self, id: EdgeId) -> Option<&Line> {
        self.lines.iter().find(|line| line.id == id)
    }
}

/// A time series table: one row per timestamp, one column per id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub timestamps: Vec<Timestamp>,
    pub columns: Vec<LoadId>,
    #[serde(
        serialize_with = "serialize_array2",
        deserialize_with = "deserialize_array2"
    )]
    pub values: Array2<f64>,
}

impl Profile {
    /// True when the value matrix agrees with the timestamp and column axes.
    pub fn shape_matches(&self) -> bool {
        self.values.nrows() == self.timestamps.len() && self.values.ncols() == self.columns.len()
    }

    /// Column position of the given id.
    pub fn column_index(&self, id: LoadId) -> Option<usize> {
        self.columns.iter().position(|&c| c == id)
    }
}

/// Serialize a 2D array as a list of rows.
fn serialize_array2<S>(array: &Array2<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(array.nrows()))?;
    for row in array.rows() {
        seq.serialize_element(&row.to_vec())?;
    }
    seq.end()
}

/// Deserialize a list of rows into a 2D array. Rows must be equally long.
fn deserialize_array2<'de, D>(deserializer: D) -> Result<Array2<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows: Vec<Vec<f64>> = Vec::deserialize(deserializer)?;
    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    let mut flat = Vec::with_capacity(height * width);
    for row in &rows {
        if row.len() != width {
            return Err(D::Error::custom("profile rows must be equally long"));
        }
        flat.extend_from_slice(row);
    }
    Array2::from_shape_vec((height, width), flat).map_err(D::Error::custom)
}
