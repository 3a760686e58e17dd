//! Primitive data types.

/// Data type for vertex (node) identifiers.
pub type VertexId = i64;
/// Data type for edge (branch) identifiers.
pub type EdgeId = i64;
/// Data type for load identifiers.
pub type LoadId = i64;
/// Internal index of a vertex in the graph.
pub type VertexIndex = usize;
/// Internal index of an edge in the graph.
pub type EdgeIndex = usize;
/// Data type for profile timestamps, in unix seconds.
pub type Timestamp = i64;
/// Data type for transformer tap positions.
pub type TapPosition = i32;
