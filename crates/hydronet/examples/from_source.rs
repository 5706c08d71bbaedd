//! Example: Creating a network scene from solver output
//!
//! This example demonstrates the basic workflow of:
//! 1. Creating a NetworkBuilder with default configuration
//! 2. Parsing the network description into elements, nodes and connections
//! 3. Building the laid-out graph and projecting it into a scene
//! 4. Exporting the scene as JSON

use hydronet::NetworkBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A small pumping main: reservoir, two conduits, a dummy and a storage
    let source = "\
SYSTEM CONNECTIVITY
ELEM HW AT 1
ELEM C1 LINK 1 2
ELEM C2 LINK 2 3
ELEM D1 LINK 3 4
ELEM ST AT 4
JUNCTION AT 2
NODE 1 ELEV 120.0
NODE 2 ELEV 95.5
NODE 3 ELEV 40.0
FINISH
ELEMENT PROPERTIES
CONDUIT ID C1 LENG 1200.0 DIAM 0.6 FRIC 0.015
CONDUIT ID C2 LENG 800.0 DIAM 0.5 FRIC 0.018
DUMMY
DIAMETER 0.4
ID D1
FINISH
";

    // Create a builder with default configuration
    let builder = NetworkBuilder::default();

    // Parse the description
    println!("Parsing network description...");
    let parsed = builder.parse(source);
    println!("Elements: {}", parsed.elements().len());
    println!("Nodes: {}", parsed.nodes().len());
    println!("Skipped lines: {}", parsed.diagnostics().len());

    // Build the graph and project it
    let graph = builder.build(&parsed);
    println!("Graph: {}", graph.summary());

    let scene = builder.project(&graph)?;
    for node in scene.nodes() {
        println!("{:>4} {:<12} {}", node.id(), node.label(), node.color());
    }

    // Export the scene
    let json = builder.render_json(&scene)?;
    let output_path = "from_source_scene.json";
    std::fs::write(output_path, &json)?;
    println!("Scene written to: {}", output_path);

    Ok(())
}
