use float_cmp::approx_eq;
use proptest::prelude::*;

use hydronet::{
    ErrorCode, build_graph,
    config::{GroupBy, LayoutConfig, ProjectionConfig},
    graph::{NetworkGraph, build_graph_with},
    palette, parse, project,
    scene::SceneEdge,
    semantic::ElementKind,
};

fn graph_of(source: &str) -> NetworkGraph {
    let (elements, nodes, connections) = parse(source).into_parts();
    build_graph(&elements, &nodes, &connections)
}

#[test]
fn identical_input_gives_identical_positions() {
    let source = "\
SYSTEM CONNECTIVITY
ELEM C1 LINK 1 2
ELEM C2 LINK 2 3
ELEM C3 LINK 3 1
ELEM D1 LINK 3 4
NODE 5 ELEV 3.0
";
    let first: Vec<_> = graph_of(source).vertices().map(|v| v.position()).collect();
    let second: Vec<_> = graph_of(source).vertices().map(|v| v.position()).collect();
    assert_eq!(first, second);
}

#[test]
fn legend_marks_first_edge_of_each_type() {
    let graph = graph_of(
        "\
SYSTEM CONNECTIVITY
ELEM C1 LINK 1 2
ELEM C2 LINK 2 3
ELEM C3 LINK 3 4
ELEM D1 LINK 4 5
",
    );
    let scene = project(&graph, &ProjectionConfig::default()).unwrap();

    let kinds: Vec<ElementKind> = scene.edges().iter().map(SceneEdge::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Conduit,
            ElementKind::Conduit,
            ElementKind::Conduit,
            ElementKind::Dummy
        ]
    );

    let marked: Vec<&str> = scene
        .edges()
        .iter()
        .filter(|edge| edge.shows_in_legend())
        .map(SceneEdge::element_id)
        .collect();
    assert_eq!(marked, vec!["C1", "D1"]);
}

#[test]
fn degenerate_elevations_share_first_bucket() {
    let graph = graph_of(
        "\
SYSTEM CONNECTIVITY
NODE 1 ELEV 12.0
NODE 2 ELEV 12.0
NODE 3 ELEV 12.0
NODE 4 ELEV 12.0
NODE 5 ELEV 12.0
",
    );
    let config = ProjectionConfig::default().with_group_by(GroupBy::ByElevationRange);
    let scene = project(&graph, &config).unwrap();

    let first = palette::group_colors(5)[0];
    assert_eq!(scene.nodes().len(), 5);
    assert!(scene.nodes().iter().all(|node| node.color() == first));
    assert!(
        scene
            .diagnostics()
            .iter()
            .any(|d| d.code() == Some(ErrorCode::H300))
    );
}

#[test]
fn unknown_elevation_is_not_zero() {
    let graph = graph_of("SYSTEM CONNECTIVITY\nELEM C1 LINK 1 2\nNODE 1 ELEV 0.0\n");
    let scene = project(&graph, &ProjectionConfig::default()).unwrap();

    assert_eq!(scene.nodes()[0].hover()[2], "Elevation: 0.00");
    assert_eq!(scene.nodes()[1].hover()[2], "Elevation: Unknown");
}

#[test]
fn projection_leaves_graph_reusable() {
    let graph = graph_of("SYSTEM CONNECTIVITY\nELEM C1 LINK 1 2\nNODE 1 ELEV 400.0\n");

    let flat = project(
        &graph,
        &ProjectionConfig::default().with_elevation_scale_factor(0.0),
    )
    .unwrap();
    let tall = project(
        &graph,
        &ProjectionConfig::default().with_elevation_scale_factor(10.0),
    )
    .unwrap();

    assert!(approx_eq!(f64, flat.nodes()[0].position().z(), 0.0));
    assert!(approx_eq!(f64, tall.nodes()[0].position().z(), 4.0));
    assert!(approx_eq!(
        f64,
        graph.vertices().next().unwrap().position().z(),
        0.4
    ));
}

#[test]
fn palette_gradient_for_many_groups() {
    assert_eq!(palette::group_colors(1), vec![palette::SINGLE_GROUP]);

    let colors = palette::group_colors(12);
    assert_eq!(colors.len(), 12);
    for pair in colors.windows(2) {
        assert!(pair[0].r() <= pair[1].r());
        assert!(pair[0].b() >= pair[1].b());
    }
}

fn source_strategy() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        (0u32..20, 0u32..20).prop_map(|(a, b)| format!("ELEM C{a} LINK {a} {b}")),
        (0u32..20, 0u32..20).prop_map(|(a, b)| format!("ELEM D{a} LINK {a} {b}")),
        (0u32..20).prop_map(|n| format!("ELEM HW{n} AT {n}")),
        (0u32..20, -50.0f64..50.0).prop_map(|(n, e)| format!("NODE {n} ELEV {e}")),
    ];
    prop::collection::vec(line, 0..30)
        .prop_map(|lines| format!("SYSTEM CONNECTIVITY\n{}\n", lines.join("\n")))
}

/// Two builds with the same layout settings agree on every position.
fn check_deterministic_layout(source: &str, seed: u64) -> Result<(), TestCaseError> {
    let (elements, nodes, connections) = parse(source).into_parts();
    let layout = LayoutConfig::new(30, seed);

    let first = build_graph_with(&elements, &nodes, &connections, &layout);
    let second = build_graph_with(&elements, &nodes, &connections, &layout);

    let a: Vec<_> = first.vertices().map(|v| v.position()).collect();
    let b: Vec<_> = second.vertices().map(|v| v.position()).collect();
    prop_assert_eq!(a, b);
    Ok(())
}

/// Every vertex size is `5 + 2 * degree` and degrees sum to twice the edges.
fn check_sizes_follow_degree(source: &str) -> Result<(), TestCaseError> {
    let graph = graph_of(source);

    let mut degree_sum = 0;
    for vertex in graph.vertices() {
        degree_sum += vertex.degree();
        prop_assert!(approx_eq!(
            f64,
            vertex.size(),
            5.0 + 2.0 * vertex.degree() as f64
        ));
        prop_assert!(vertex.position().x().is_finite());
        prop_assert!(vertex.position().y().is_finite());
    }
    prop_assert_eq!(degree_sum, 2 * graph.edge_count());
    Ok(())
}

/// Each edge type has exactly one legend edge, and it is the first one.
fn check_legend_dedup(source: &str) -> Result<(), TestCaseError> {
    let scene = project(&graph_of(source), &ProjectionConfig::default()).unwrap();

    let mut seen = Vec::new();
    for edge in scene.edges() {
        let first = !seen.contains(&edge.kind());
        prop_assert_eq!(edge.shows_in_legend(), first);
        if first {
            seen.push(edge.kind());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn layout_is_deterministic(source in source_strategy(), seed in any::<u64>()) {
        check_deterministic_layout(&source, seed)?;
    }

    #[test]
    fn sizes_follow_degree(source in source_strategy()) {
        check_sizes_follow_degree(&source)?;
    }

    #[test]
    fn legend_is_deduplicated(source in source_strategy()) {
        check_legend_dedup(&source)?;
    }
}
