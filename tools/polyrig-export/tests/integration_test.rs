//! Integration tests for polyrig-export
//!
//! Tests the full pipeline: generate test assets -> export -> verify output

mod generate_test_assets;

use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn polyrig_export() -> Command {
    Command::new(env!("CARGO_BIN_EXE_polyrig-export"))
}

fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("Failed to read output");
    serde_json::from_str(&text).expect("Output should be valid JSON")
}

/// Test manifest build -> geometry file
#[test]
fn test_build_from_manifest() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("figure.obj");
    let manifest_path = dir.path().join("rig.toml");

    generate_test_assets::generate_figure_obj(&obj_path).expect("Failed to generate OBJ");
    generate_test_assets::generate_rig_manifest(&manifest_path, "figure.obj")
        .expect("Failed to generate manifest");

    let status = polyrig_export()
        .args(["build", manifest_path.to_str().unwrap()])
        .status()
        .expect("Failed to run polyrig-export");
    assert!(status.success(), "polyrig-export build failed");

    let output = dir.path().join("out/figure.geo.json");
    assert!(output.exists(), "Geometry file should exist");

    let json = read_json(&output);
    let geometry = &json["minecraft:geometry"][0];
    assert_eq!(geometry["description"]["identifier"], "geometry.figure");

    let bones = geometry["bones"].as_array().unwrap();
    let bone = |name: &str| bones.iter().find(|b| b["name"] == name).unwrap();

    let head = &bone("head")["poly_mesh"];
    assert_eq!(head["polys"].as_array().unwrap().len(), 1);
    assert_eq!(head["positions"].as_array().unwrap().len(), 4);
    assert_eq!(head["positions"][0], serde_json::json!([4.0, 24.0, -4.0]));

    let body = &bone("body")["poly_mesh"];
    assert_eq!(body["polys"].as_array().unwrap().len(), 2);
    assert_eq!(body["positions"].as_array().unwrap().len(), 4);
    assert_eq!(body["polys"][0][3], body["polys"][0][2]);

    assert!(bone("root").get("poly_mesh").is_none());
}

/// Test single-group export
#[test]
fn test_export_group() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("figure.obj");
    let mesh_path = dir.path().join("hat.json");

    generate_test_assets::generate_figure_obj(&obj_path).expect("Failed to generate OBJ");

    let status = polyrig_export()
        .args([
            "export",
            obj_path.to_str().unwrap(),
            "--group",
            "Head/Hat",
            "-o",
            mesh_path.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to run polyrig-export");
    assert!(status.success(), "polyrig-export export failed");

    let json = read_json(&mesh_path);
    assert_eq!(json["normalized_uvs"], true);
    assert_eq!(json["normals"], serde_json::json!([[0.0, 1.0, 0.0]]));
    assert_eq!(
        json["polys"][0],
        serde_json::json!([[0, 0, 0], [1, 0, 1], [2, 0, 2], [3, 0, 3]])
    );
}

/// Whole-model export keeps every attribute entry
#[test]
fn test_export_whole_model() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("figure.obj");
    let mesh_path = dir.path().join("figure.json");

    generate_test_assets::generate_figure_obj(&obj_path).expect("Failed to generate OBJ");

    let status = polyrig_export()
        .args(["export", obj_path.to_str().unwrap(), "-o", mesh_path.to_str().unwrap()])
        .status()
        .expect("Failed to run polyrig-export");
    assert!(status.success());

    let json = read_json(&mesh_path);
    assert_eq!(json["positions"].as_array().unwrap().len(), 12);
    assert_eq!(json["uvs"].as_array().unwrap().len(), 4);
    assert_eq!(json["polys"].as_array().unwrap().len(), 4);
}

/// Unknown groups fail the check command
#[test]
fn test_check_rejects_unknown_group() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("figure.obj");
    let manifest_path = dir.path().join("rig.toml");

    generate_test_assets::generate_figure_obj(&obj_path).expect("Failed to generate OBJ");
    std::fs::write(
        &manifest_path,
        "[model]\nobj = \"figure.obj\"\n\n[parts]\nhead = [\"Head/Horns\"]\n",
    )
    .expect("Failed to write manifest");

    let status = polyrig_export()
        .args(["check", manifest_path.to_str().unwrap()])
        .status()
        .expect("Failed to run polyrig-export");
    assert!(!status.success(), "check should fail on an unknown group");
}

/// Inspect prints the group tree
#[test]
fn test_inspect_lists_groups() {
    let dir = tempdir().expect("Failed to create temp dir");
    let obj_path = dir.path().join("figure.obj");
    generate_test_assets::generate_figure_obj(&obj_path).expect("Failed to generate OBJ");

    let output = polyrig_export()
        .args(["inspect", obj_path.to_str().unwrap()])
        .output()
        .expect("Failed to run polyrig-export");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Head/Hat  faces 1..2  vertices 6..12"));
    assert!(stdout.contains("Body  faces 2..4  vertices 12..18"));
}
