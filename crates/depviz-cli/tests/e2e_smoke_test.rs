use std::{fs, path::PathBuf};

use tempfile::tempdir;

use depviz_cli::{Args, run};

/// Sample scenes live at the workspace root, not in the crate.
fn scenes_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("scenes")
}

/// Collects all files with `extension` from a directory
fn collect_files(dir: PathBuf, extension: &str) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(extension)
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &PathBuf, output: &PathBuf, config: Option<&PathBuf>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: Some(output.to_string_lossy().to_string()),
        config: config.map(|path| path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_scenes() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_scenes = collect_files(scenes_dir(), "fbx");
    assert!(!valid_scenes.is_empty(), "No valid scenes found in scenes/");

    let mut failed_scenes = Vec::new();

    for scene_path in &valid_scenes {
        let output_filename = format!("{}.dot", scene_path.file_stem().unwrap().to_string_lossy());
        let output_path = temp_dir.path().join(output_filename);

        match run(&args(scene_path, &output_path, None)) {
            Ok(()) => {
                let dot = fs::read_to_string(&output_path).expect("Failed to read output");
                assert!(dot.starts_with("digraph \""), "{}", scene_path.display());
                assert!(dot.ends_with("}\n"), "{}", scene_path.display());
            }
            Err(e) => failed_scenes.push((scene_path.clone(), e)),
        }
    }

    if !failed_scenes.is_empty() {
        eprintln!("\nValid scenes that failed:");
        for (path, err) in &failed_scenes {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid scene(s) failed unexpectedly", failed_scenes.len());
    }

    println!("All {} valid scenes passed", valid_scenes.len());
}

#[test]
fn e2e_smoke_test_error_scenes() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_scenes = collect_files(scenes_dir().join("errors"), "fbx");
    assert!(
        !error_scenes.is_empty(),
        "No error scenes found in scenes/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for scene_path in &error_scenes {
        let output_filename = format!(
            "error_{}.dot",
            scene_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args(scene_path, &output_path, None)).is_ok() {
            unexpectedly_succeeded.push(scene_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError scenes that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error scene(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("All {} error scenes failed as expected", error_scenes.len());
}

#[test]
fn e2e_cube_scene_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let scene = scenes_dir().join("cube.fbx");
    let output = temp_dir.path().join("cube.dot");

    run(&args(&scene, &output, None)).expect("cube scene should render");
    let dot = fs::read_to_string(&output).expect("Failed to read output");

    assert!(dot.starts_with("digraph \"cube.fbx\" {\n"));
    assert!(dot.contains("\t2035615664 [label=\"Cube\"]\n"));
    assert!(dot.contains("\t2035541312 -> 2035615664\n"));
    assert!(dot.contains("\t2035552240 -> 2035615664\n"));
    // The root node 0 is never declared and implicit nodes are hidden by default.
    assert!(!dot.contains("\t0 "));
    assert!(!dot.contains("-> 0"));
}

#[test]
fn e2e_toml_config_styles_character() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let scene = scenes_dir().join("textured_character.fbx");
    let config = scenes_dir().join("character.toml");
    let output = temp_dir.path().join("character.dot");

    run(&args(&scene, &output, Some(&config))).expect("character scene should render");
    let dot = fs::read_to_string(&output).expect("Failed to read output");

    assert!(dot.contains("\tgraph [rankdir=\"LR\"]\n"));
    assert!(dot.contains("\t200 [label=\"Hips\", color=\"darkgreen\"]\n"));
    assert!(dot.contains("\t700 -> 600 [label=\"DiffuseColor\", style=\"dashed\"]\n"));
    // Implicit root is shown, videos and poses are filtered out.
    assert!(dot.contains("\t0 [label=\":\"]\n"));
    assert!(!dot.contains("\t800 "));
    assert!(!dot.contains("\t900 "));
}

#[test]
fn e2e_json_config_filters_meshes() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let scene = scenes_dir().join("textured_character.fbx");
    let config = scenes_dir().join("meshes_only.json");
    let output = temp_dir.path().join("meshes.dot");

    run(&args(&scene, &output, Some(&config))).expect("character scene should render");
    let dot = fs::read_to_string(&output).expect("Failed to read output");

    assert!(dot.contains("\t300 [label=\"Body\", tooltip=\"Visibility = 1\"]\n"));
    assert!(dot.contains("\t400 -> 300\n"));
    assert!(!dot.contains("\t200 "));
    assert!(!dot.contains("\t500 "));
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let scene = scenes_dir().join("does_not_exist.fbx");
    let output = temp_dir.path().join("missing.dot");

    assert!(run(&args(&scene, &output, None)).is_err());
    assert!(!output.exists());
}
