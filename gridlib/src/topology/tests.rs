use super::*;

fn vertex(id: VertexId, role: VertexRole) -> Vertex {
    Vertex {
        id,
        role,
        enabled: true,
    }
}

fn edge(id: EdgeId, a: VertexId, b: VertexId, enabled: bool) -> Edge {
    Edge {
        id,
        vertices: (a, b),
        enabled,
    }
}

/// Source 1 feeding 2, which feeds 3 and 4; a normally-open tie between
/// 3 and 4.
///
/// ```text
///     1 ──10── 2 ──11── 3
///              │        ┆
///              12       13 (open)
///              │        ┆
///              4 ┄┄┄┄┄┄┄┘
/// ```
fn star_network() -> Graph {
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Junction),
        vertex(3, VertexRole::Load),
        vertex(4, VertexRole::Load),
    ];
    let edges = vec![
        edge(10, 1, 2, true),
        edge(11, 2, 3, true),
        edge(12, 2, 4, true),
        edge(13, 3, 4, false),
    ];
    Graph::build(vertices, edges, 1).unwrap()
}

/// Three feeders out of source 1 with two normally-open ties and a spur.
///
/// ```text
///     1 ──1── 2 ──9── 5
///     │       ┆
///     │       7 (open)
///     │       ┆
///     ├──3── 3
///     │       ┆
///     │       8 (open)
///     │       ┆
///     └──5── 4
/// ```
fn feeder_network() -> Graph {
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Load),
        vertex(3, VertexRole::Load),
        vertex(4, VertexRole::Load),
        vertex(5, VertexRole::Load),
    ];
    let edges = vec![
        edge(1, 1, 2, true),
        edge(3, 1, 3, true),
        edge(5, 1, 4, true),
        edge(7, 2, 3, false),
        edge(8, 3, 4, false),
        edge(9, 2, 5, true),
    ];
    Graph::build(vertices, edges, 1).unwrap()
}

#[test]
fn build_accepts_radial_network() {
    let graph = star_network();
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edges().len(), 4);
    assert_eq!(graph.source_id(), 1);
}

#[test]
fn build_rejects_duplicate_vertex_id() {
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Load),
        vertex(2, VertexRole::Load),
    ];
    let edges = vec![edge(10, 1, 2, true)];
    assert_eq!(
        Graph::build(vertices, edges, 1).unwrap_err(),
        ValidationError::DuplicateVertexId(2)
    );
}

#[test]
fn build_rejects_duplicate_edge_id() {
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Load),
        vertex(3, VertexRole::Load),
    ];
    let edges = vec![edge(10, 1, 2, true), edge(10, 2, 3, true)];
    assert_eq!(
        Graph::build(vertices, edges, 1).unwrap_err(),
        ValidationError::DuplicateEdgeId(10)
    );
}

#[test]
fn build_rejects_non_positive_ids() {
    let vertices = vec![vertex(0, VertexRole::Source)];
    assert_eq!(
        Graph::build(vertices, Vec::new(), 0).unwrap_err(),
        ValidationError::NonPositiveId(0)
    );

    let vertices = vec![vertex(1, VertexRole::Source), vertex(-2, VertexRole::Load)];
    assert_eq!(
        Graph::build(vertices, Vec::new(), 1).unwrap_err(),
        ValidationError::NonPositiveId(-2)
    );

    let vertices = vec![vertex(1, VertexRole::Source), vertex(2, VertexRole::Load)];
    let edges = vec![edge(-10, 1, 2, true)];
    assert_eq!(
        Graph::build(vertices, edges, 1).unwrap_err(),
        ValidationError::NonPositiveId(-10)
    );
}

#[test]
fn build_rejects_dangling_edge() {
    let vertices = vec![vertex(1, VertexRole::Source), vertex(2, VertexRole::Load)];
    let edges = vec![edge(10, 1, 2, true), edge(11, 2, 4, true)];
    assert_eq!(
        Graph::build(vertices, edges, 1).unwrap_err(),
        ValidationError::DanglingEdge { edge: 11, vertex: 4 }
    );
}

#[test]
fn build_rejects_self_loop() {
    let vertices = vec![vertex(1, VertexRole::Source), vertex(2, VertexRole::Load)];
    let edges = vec![edge(10, 1, 2, true), edge(11, 2, 2, false)];
    assert_eq!(
        Graph::build(vertices, edges, 1).unwrap_err(),
        ValidationError::SelfLoop(11)
    );
}

#[test]
fn build_rejects_unknown_source() {
    let vertices = vec![vertex(1, VertexRole::Source), vertex(2, VertexRole::Load)];
    let edges = vec![edge(10, 1, 2, true)];
    assert_eq!(
        Graph::build(vertices, edges, 4).unwrap_err(),
        ValidationError::SourceNotFound(4)
    );
}

#[test]
fn build_rejects_source_role_mismatch() {
    let vertices = vec![vertex(1, VertexRole::Source), vertex(2, VertexRole::Load)];
    let edges = vec![edge(10, 1, 2, true)];
    assert_eq!(
        Graph::build(vertices, edges, 2).unwrap_err(),
        ValidationError::NotASource(2)
    );
}

#[test]
fn build_rejects_multiple_sources() {
    let vertices = vec![vertex(1, VertexRole::Source), vertex(2, VertexRole::Source)];
    let edges = vec![edge(10, 1, 2, true)];
    assert_eq!(
        Graph::build(vertices, edges, 1).unwrap_err(),
        ValidationError::MultipleSources(2)
    );
}

#[test]
fn build_rejects_enabled_edge_to_inactive_vertex() {
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Load),
        Vertex {
            id: 3,
            role: VertexRole::Load,
            enabled: false,
        },
    ];
    let edges = vec![edge(10, 1, 2, true), edge(11, 2, 3, true)];
    assert_eq!(
        Graph::build(vertices, edges, 1).unwrap_err(),
        ValidationError::InactiveEndpoint { edge: 11, vertex: 3 }
    );
}

#[test]
fn build_accepts_open_edge_to_inactive_vertex() {
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Load),
        Vertex {
            id: 3,
            role: VertexRole::Load,
            enabled: false,
        },
    ];
    let edges = vec![edge(10, 1, 2, true), edge(11, 2, 3, false)];
    assert!(Graph::build(vertices, edges, 1).is_ok());
}

#[test]
fn build_rejects_enabled_cycle() {
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Load),
        vertex(3, VertexRole::Load),
    ];
    let edges = vec![
        edge(10, 1, 2, true),
        edge(11, 2, 3, true),
        edge(12, 3, 1, true),
    ];
    assert_eq!(
        Graph::build(vertices, edges, 1).unwrap_err(),
        ValidationError::NotRadial(12)
    );
}

#[test]
fn build_accepts_cycle_among_open_edges() {
    // Only the enabled subgraph must be radial; normally-open ties may form
    // loops with it.
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Load),
        vertex(3, VertexRole::Load),
    ];
    let edges = vec![
        edge(10, 1, 2, true),
        edge(11, 2, 3, true),
        edge(12, 3, 1, false),
        edge(13, 1, 3, false),
    ];
    assert!(Graph::build(vertices, edges, 1).is_ok());
}

#[test]
fn build_rejects_unreachable_vertex() {
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Load),
        vertex(3, VertexRole::Load),
        vertex(4, VertexRole::Load),
    ];
    let edges = vec![edge(10, 1, 2, true), edge(11, 3, 4, true)];
    assert_eq!(
        Graph::build(vertices, edges, 1).unwrap_err(),
        ValidationError::Disconnected(3)
    );
}

#[test]
fn build_rejects_vertex_behind_open_edge_only() {
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Load),
        vertex(3, VertexRole::Load),
    ];
    let edges = vec![edge(10, 1, 2, true), edge(11, 2, 3, false)];
    assert_eq!(
        Graph::build(vertices, edges, 1).unwrap_err(),
        ValidationError::Disconnected(3)
    );
}

#[test]
fn adjacency_lookup() {
    let graph = star_network();
    let mut incident = graph.incident_edges(2).unwrap();
    incident.sort_unstable();
    assert_eq!(incident, vec![10, 11, 12]);
    assert_eq!(graph.incident_edges(99), None);

    let tie = graph.edge(13).unwrap();
    assert_eq!(tie.vertices, (3, 4));
    assert!(!tie.enabled);
    assert_eq!(graph.vertex(4).unwrap().role, VertexRole::Load);
}

#[test]
fn reachability_with_filters() {
    let graph = star_network();
    assert_eq!(
        reachable_from(&graph, 1, enabled_only()).unwrap(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(
        reachable_from(&graph, 1, enabled_without(11)).unwrap(),
        vec![1, 2, 4]
    );
    assert_eq!(
        reachable_from(&graph, 3, enabled_without(11)).unwrap(),
        vec![3]
    );
    assert_eq!(
        reachable_from(&graph, 3, enabled_with_swap(11, 13)).unwrap(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(
        reachable_from(&graph, 99, enabled_only()).unwrap_err(),
        QueryError::VertexNotFound(99)
    );
}

#[test]
fn cycle_detection_with_filters() {
    let graph = star_network();
    assert!(!find_cycle(&graph, enabled_only()));
    // Closing the tie without opening anything loops 2-3-4.
    assert!(find_cycle(&graph, enabled_with_swap(10, 13)));
    assert!(!find_cycle(&graph, enabled_with_swap(11, 13)));
}

#[test]
fn downstream_of_inner_edge() {
    let graph = star_network();
    assert_eq!(downstream_vertices(&graph, 10).unwrap(), vec![2, 3, 4]);
}

#[test]
fn downstream_of_leaf_edge_is_singleton() {
    let graph = star_network();
    assert_eq!(downstream_vertices(&graph, 11).unwrap(), vec![3]);
    assert_eq!(downstream_vertices(&graph, 12).unwrap(), vec![4]);
}

#[test]
fn downstream_ignores_endpoint_order() {
    // Same star network with every edge's endpoints written far-to-near.
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Junction),
        vertex(3, VertexRole::Load),
        vertex(4, VertexRole::Load),
    ];
    let edges = vec![
        edge(10, 2, 1, true),
        edge(11, 3, 2, true),
        edge(12, 4, 2, true),
        edge(13, 4, 3, false),
    ];
    let graph = Graph::build(vertices, edges, 1).unwrap();
    assert_eq!(downstream_vertices(&graph, 10).unwrap(), vec![2, 3, 4]);
    assert_eq!(downstream_vertices(&graph, 11).unwrap(), vec![3]);
}

#[test]
fn downstream_partitions_the_network() {
    let graph = feeder_network();
    for e in [1, 3, 5, 9] {
        let downstream = downstream_vertices(&graph, e).unwrap();
        assert!(!downstream.contains(&graph.source_id()));
        let rest = reachable_from(&graph, graph.source_id(), enabled_without(e)).unwrap();
        let mut union: Vec<VertexId> = downstream.iter().chain(rest.iter()).copied().collect();
        union.sort_unstable();
        assert_eq!(union, vec![1, 2, 3, 4, 5]);
        assert!(downstream.iter().all(|v| !rest.contains(v)));
    }
}

#[test]
fn downstream_query_errors() {
    let graph = star_network();
    assert_eq!(
        downstream_vertices(&graph, 99).unwrap_err(),
        QueryError::EdgeNotFound(99)
    );
    assert_eq!(
        downstream_vertices(&graph, 13).unwrap_err(),
        QueryError::EdgeDisabled(13)
    );
}

#[test]
fn alternatives_for_star_network() {
    let graph = star_network();

    let candidates = alternative_edges(&graph, 11).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].edge_id, 13);
    assert_eq!(candidates[0].enabled_edges, vec![10, 12, 13]);

    assert_eq!(alternative_edges(&graph, 12).unwrap().len(), 1);

    // Nothing ties vertex 1 back in once edge 10 opens.
    assert!(alternative_edges(&graph, 10).unwrap().is_empty());
}

#[test]
fn alternatives_for_feeder_network() {
    let graph = feeder_network();

    let ids = |edge| -> Vec<EdgeId> {
        alternative_edges(&graph, edge)
            .unwrap()
            .into_iter()
            .map(|c| c.edge_id)
            .collect()
    };
    assert_eq!(ids(1), vec![7]);
    assert_eq!(ids(3), vec![7, 8]);
    assert_eq!(ids(5), vec![8]);
    assert_eq!(ids(9), Vec::<EdgeId>::new());
}

#[test]
fn alternatives_satisfy_radial_invariant() {
    let graph = feeder_network();
    for e in [1, 3, 5] {
        for candidate in alternative_edges(&graph, e).unwrap() {
            let vertices: Vec<Vertex> = graph.vertices().to_vec();
            let edges: Vec<Edge> = graph
                .edges()
                .iter()
                .map(|edge| Edge {
                    enabled: candidate.enabled_edges.contains(&edge.id),
                    ..edge.clone()
                })
                .collect();
            assert!(Graph::build(vertices, edges, graph.source_id()).is_ok());
        }
    }
}

#[test]
fn alternatives_without_open_edges() {
    let vertices = vec![
        vertex(1, VertexRole::Source),
        vertex(2, VertexRole::Load),
        vertex(3, VertexRole::Load),
    ];
    let edges = vec![edge(10, 1, 2, true), edge(11, 2, 3, true)];
    let graph = Graph::build(vertices, edges, 1).unwrap();
    assert!(alternative_edges(&graph, 10).unwrap().is_empty());
    assert!(alternative_edges(&graph, 11).unwrap().is_empty());
}

#[test]
fn alternatives_query_errors() {
    let graph = star_network();
    assert_eq!(
        alternative_edges(&graph, 99).unwrap_err(),
        QueryError::EdgeNotFound(99)
    );
    assert_eq!(
        alternative_edges(&graph, 13).unwrap_err(),
        QueryError::EdgeDisabled(13)
    );
}

#[test]
fn repeated_queries_are_identical() {
    let graph = feeder_network();
    assert_eq!(
        downstream_vertices(&graph, 1).unwrap(),
        downstream_vertices(&graph, 1).unwrap()
    );
    assert_eq!(
        alternative_edges(&graph, 3).unwrap(),
        alternative_edges(&graph, 3).unwrap()
    );
}
