use std::path::Path;
use std::process::Command;

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path.to_string_lossy().into_owned()
}

fn run_ok(args: &[&str]) -> String {
    let exe = env!("CARGO_BIN_EXE_geochron");
    let output = Command::new(exe).args(args).output().expect("run geochron");
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf-8 output")
}

fn field_lines(stdout: &str) -> Vec<&str> {
    stdout.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

#[test]
fn fields_of_unit_square() {
    let dir = tempfile::tempdir().unwrap();
    let rois = write(
        dir.path(),
        "rois.json",
        r#"{
            "image_width": 100,
            "image_height": 100,
            "regions": [{ "vertices": [[0, 100], [100, 100], [100, 0], [0, 0]] }]
        }"#,
    );
    let out = run_ok(&["fields", &rois]);
    assert_eq!(
        field_lines(&out),
        vec![
            "vertex_0_0_x=0",
            "vertex_0_0_y=0",
            "vertex_0_1_x=1",
            "vertex_0_1_y=0",
            "vertex_0_2_x=1",
            "vertex_0_2_y=1",
            "vertex_0_3_x=0",
            "vertex_0_3_y=1",
        ]
    );
}

#[test]
fn normalize_reorients_and_drops_degenerate_regions() {
    let dir = tempfile::tempdir().unwrap();
    // clockwise square plus a two-point sliver
    let rois = write(
        dir.path(),
        "rois.json",
        r#"{
            "image_width": 100,
            "image_height": 100,
            "regions": [
                { "vertices": [[0, 100], [0, 0], [100, 0], [100, 100]] },
                { "vertices": [[10, 10], [20, 20]] }
            ]
        }"#,
    );
    let out = run_ok(&["normalize", &rois]);
    let got: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
    assert_eq!(
        got,
        serde_json::json!([[[1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]])
    );
}

#[test]
fn normalize_empty_document_uses_configured_default() {
    let dir = tempfile::tempdir().unwrap();
    let rois = write(
        dir.path(),
        "rois.json",
        r#"{ "image_width": 200, "image_height": 100, "regions": [] }"#,
    );
    let point = run_ok(&["normalize", &rois]);
    let got: serde_json::Value = serde_json::from_str(point.trim()).unwrap();
    assert_eq!(got, serde_json::json!([[[0.5, 0.25]]]));

    let config = write(
        dir.path(),
        "editor.json",
        r#"{ "default_region": { "kind": "square", "half": 0.125 } }"#,
    );
    let square = run_ok(&["normalize", &rois, "--config", &config]);
    let got: serde_json::Value = serde_json::from_str(square.trim()).unwrap();
    assert_eq!(
        got,
        serde_json::json!([[[0.375, 0.125], [0.625, 0.125], [0.625, 0.375], [0.375, 0.375]]])
    );
}

#[test]
fn induced_regions_are_mirrored() {
    let dir = tempfile::tempdir().unwrap();
    let rois = write(
        dir.path(),
        "rois.json",
        r#"{
            "image_width": 100,
            "image_height": 100,
            "regions": [{ "vertices": [[0, 100], [50, 100], [50, 50], [0, 50]] }]
        }"#,
    );
    let out = run_ok(&["normalize", &rois, "--ft-type", "I"]);
    let got: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
    // mirroring flips the winding, normalization flips it back
    assert_eq!(
        got,
        serde_json::json!([[[1.0, 0.5], [0.5, 0.5], [0.5, 0.0], [1.0, 0.0]]])
    );
}

#[test]
fn replay_welds_square_into_triangle() {
    let dir = tempfile::tempdir().unwrap();
    let rois = write(
        dir.path(),
        "rois.json",
        r#"{
            "image_width": 100,
            "image_height": 100,
            "regions": [
                { "vertices": [[10, 90], [50, 90], [50, 50], [10, 50]] },
                { "vertices": [[60, 90], [90, 90], [90, 60]] }
            ]
        }"#,
    );
    let script = write(
        dir.path(),
        "drag.yaml",
        "- handle: { vertex: { region: 0, index: 2 } }\n  path: [[0.8, 0.15]]\n",
    );
    let out = run_ok(&["replay", &rois, "--script", &script, "-v"]);
    let lines = field_lines(&out);
    assert_eq!(lines.len(), 12);
    assert!(lines.iter().all(|l| l.starts_with("vertex_0_")));
    assert!(lines.contains(&"vertex_0_2_x=0.6"));
    assert!(lines.contains(&"vertex_0_4_y=0.4"));
}
