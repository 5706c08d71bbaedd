//! Integration tests for the NetworkBuilder API
//!
//! These tests verify that the public API works and is usable.

use hydronet::{
    HydronetError, NetworkBuilder,
    config::{AppConfig, GroupBy, LayoutConfig, ProjectionConfig, StyleConfig},
};

const SOURCE: &str = "\
SYSTEM CONNECTIVITY
ELEM HW AT 1
ELEM C1 LINK 1 2
ELEM C2 LINK 2 3
NODE 1 ELEV 100.0
NODE 2 ELEV 50.0
NODE 3 ELEV 0.0
FINISH
ELEMENT PROPERTIES
CONDUIT ID C1 LENG 500.0 DIAM 0.4 FRIC 0.02
CONDUIT ID C2 LENG 250.0 DIAM 0.3 FRIC 0.02
";

#[test]
fn test_builder_api_exists() {
    // Just verify the API compiles and can be constructed
    let _builder = NetworkBuilder::default();
}

#[test]
fn test_parse_build_project() {
    let builder = NetworkBuilder::default();
    let parsed = builder.parse(SOURCE);
    assert!(parsed.diagnostics().is_empty());

    let graph = builder.build(&parsed);
    assert_eq!(graph.vertex_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let scene = builder.project(&graph).expect("Failed to project");
    assert_eq!(scene.nodes().len(), 3);
    assert_eq!(scene.edges().len(), 2);
    assert_eq!(scene.metadata().title(), "Hydraulic System Network");
    assert_eq!(scene.metadata().group_by(), GroupBy::ByType);
}

#[test]
fn test_render_json() {
    let builder = NetworkBuilder::default();
    let graph = builder.build(&builder.parse(SOURCE));
    let scene = builder.project(&graph).expect("Failed to project");

    let json = builder.render_json(&scene).expect("Failed to render");
    assert!(json.starts_with('{'), "Output should be a JSON object");
    assert!(json.contains("\"legend_title\": \"Element Types\""));
}

#[test]
fn test_builder_with_config() {
    let config = AppConfig::new(
        LayoutConfig::new(50, 7),
        ProjectionConfig::default().with_group_by(GroupBy::ByElevationRange),
        StyleConfig::new(Some("#f0f0f0".to_string())),
    );
    let builder = NetworkBuilder::new(config);

    let graph = builder.build(&builder.parse(SOURCE));
    let scene = builder.project(&graph).expect("Failed to project");

    assert_eq!(scene.legend().len(), 5);
    assert_eq!(
        scene.metadata().background().map(|color| color.to_hex()),
        Some("#f0f0f0".to_string())
    );
}

#[test]
fn test_invalid_factor_is_rejected() {
    let config = AppConfig::default()
        .with_projection(ProjectionConfig::default().with_edge_width_factor(-3.0));
    let builder = NetworkBuilder::new(config);
    let graph = builder.build(&builder.parse(SOURCE));

    let result = builder.project(&graph);
    assert!(matches!(
        result,
        Err(HydronetError::InvalidConfiguration {
            field: "edge_width_factor",
            ..
        })
    ));
}

#[test]
fn test_invalid_background_is_config_error() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        ProjectionConfig::default(),
        StyleConfig::new(Some("no-such-color".to_string())),
    );
    let builder = NetworkBuilder::new(config);
    let graph = builder.build(&builder.parse(SOURCE));

    assert!(matches!(
        builder.project(&graph),
        Err(HydronetError::Config(_))
    ));
}
