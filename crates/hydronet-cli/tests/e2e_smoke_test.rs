use std::{fs, path::PathBuf};

use tempfile::tempdir;

use hydronet::config::GroupBy;
use hydronet_cli::{Args, run};

/// Collects all .out files from a directory
fn collect_out_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("out")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn demos_path() -> PathBuf {
    // Demos are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

#[test]
fn e2e_smoke_test_demos() {
    // Create a temporary directory for test outputs
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demos = collect_out_files(demos_path());
    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &demos {
        for group_by in [GroupBy::ByType, GroupBy::ByElevationRange, GroupBy::None] {
            let output_filename = format!(
                "{}_{}.json",
                demo_path.file_stem().unwrap().to_string_lossy(),
                group_by
            );
            let output_path = temp_dir.path().join(output_filename);

            let mut args = Args::new(
                demo_path.to_string_lossy(),
                output_path.to_string_lossy(),
            );
            args.log_level = "off".to_string();
            args.group_by = Some(group_by);

            match run(&args) {
                Ok(()) => {
                    let json = fs::read_to_string(&output_path).expect("Output not written");
                    assert!(json.contains("\"title\": \"Hydraulic System Network\""));
                    assert!(json.contains(&format!("\"group_by\": \"{group_by}\"")));
                }
                Err(e) => failed_demos.push((demo_path.clone(), group_by, e)),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, group_by, err) in &failed_demos {
            eprintln!("  - {} ({group_by}): {}", path.display(), err);
        }
        panic!("{} demo run(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} demos passed", demos.len());
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = Args::new(
        temp_dir.path().join("absent.out").to_string_lossy(),
        temp_dir.path().join("scene.json").to_string_lossy(),
    );

    assert!(run(&args).is_err());
    assert!(!temp_dir.path().join("scene.json").exists());
}

#[test]
fn e2e_negative_factor_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("pumping_main.out");
    let output = temp_dir.path().join("scene.json");

    let mut args = Args::new(input.to_string_lossy(), output.to_string_lossy());
    args.edge_width_factor = Some(-2.0);

    assert!(run(&args).is_err());
    assert!(!output.exists());
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[projection]\ngroup_by = \"none\"\n\n[style]\nbackground_color = \"white\"\n",
    )
    .unwrap();
    let output = temp_dir.path().join("scene.json");

    let mut args = Args::new(
        demos_path().join("branched_network.out").to_string_lossy(),
        output.to_string_lossy(),
    );
    args.config = Some(config_path.to_string_lossy().to_string());

    run(&args).expect("Run failed");

    let json = fs::read_to_string(&output).unwrap();
    assert!(json.contains("\"group_by\": \"none\""));
    assert!(json.contains("\"background\": \"#ffffff\""));
    assert!(json.contains("\"legend\": []"));
}
