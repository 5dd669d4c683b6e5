use std::path::Path;
use std::process::Command;

const SQUARE: &str = r#"{
    "image_width": 100,
    "image_height": 100,
    "regions": [{ "vertices": [[0, 100], [100, 100], [100, 0], [0, 0]] }]
}"#;

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path.to_string_lossy().into_owned()
}

fn status(args: &[&str]) -> Option<i32> {
    let bin = env!("CARGO_BIN_EXE_geochron");
    Command::new(bin)
        .args(args)
        .output()
        .expect("run geochron")
        .status
        .code()
}

#[test]
fn exit_code_usage_is_1_for_missing_args() {
    assert_eq!(status(&["fields"]), Some(1));
    assert_eq!(status(&[]), Some(1));
}

#[test]
fn exit_code_usage_is_1_for_unknown_ft_type() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rois = write(dir.path(), "rois.json", SQUARE);
    assert_eq!(status(&["fields", &rois, "--ft-type", "fission"]), Some(1));
}

#[test]
fn exit_code_is_0_for_help() {
    assert_eq!(status(&["--help"]), Some(0));
}

#[test]
fn exit_code_input_is_2_for_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.json");
    assert_eq!(status(&["normalize", missing.to_string_lossy().as_ref()]), Some(2));
}

#[test]
fn exit_code_input_is_2_for_invalid_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bad = write(dir.path(), "bad.json", "{\"image_width\": 100,");
    assert_eq!(status(&["normalize", &bad]), Some(2));
}

#[test]
fn exit_code_input_is_2_for_zero_width_image() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rois = write(
        dir.path(),
        "rois.json",
        r#"{"image_width": 0, "image_height": 10, "regions": []}"#,
    );
    assert_eq!(status(&["normalize", &rois]), Some(2));
}

#[test]
fn exit_code_input_is_2_for_invalid_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rois = write(dir.path(), "rois.json", SQUARE);
    let config = write(dir.path(), "editor.yaml", "snap_threshold_px: -1\n");
    assert_eq!(status(&["fields", &rois, "--config", &config]), Some(2));
}

#[test]
fn exit_code_processing_is_3_for_unknown_handle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rois = write(dir.path(), "rois.json", SQUARE);
    let script = write(
        dir.path(),
        "drag.yaml",
        "- handle: { vertex: { region: 4, index: 0 } }\n  path: [[0.5, 0.5]]\n",
    );
    assert_eq!(status(&["replay", &rois, "--script", &script]), Some(3));
}

#[test]
fn exit_code_success_is_0() {
    let dir = tempfile::tempdir().expect("tempdir");
    let rois = write(dir.path(), "rois.json", SQUARE);
    assert_eq!(status(&["fields", &rois]), Some(0));
}
