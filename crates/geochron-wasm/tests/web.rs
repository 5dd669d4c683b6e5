#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

use geochron_wasm::{Counter, GrainEditor, LayerShift};

fn js(json: &str) -> JsValue {
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    serde_wasm_bindgen::to_value(&value).unwrap()
}

fn json(value: JsValue) -> serde_json::Value {
    serde_wasm_bindgen::from_value(value).unwrap()
}

#[wasm_bindgen_test]
fn version_is_exported() {
    assert_eq!(geochron_wasm::version(), env!("CARGO_PKG_VERSION"));
}

#[wasm_bindgen_test]
fn unit_square_saves_plain_fields() {
    let regions = js("[[[0, 0], [0, 1], [1, 1], [1, 0]]]");
    let mut editor = GrainEditor::new(regions, 1000, 1000, None).unwrap();
    editor.begin_edit().unwrap();
    assert_eq!(editor.mode(), "editing");
    let fields = json(editor.save().unwrap());
    assert_eq!(fields["vertex_0_1_x"], 1.0);
    assert_eq!(fields["vertex_0_1_y"], 0.0);
    assert_eq!(fields["vertex_0_3_y"], 1.0);
    editor.save_succeeded().unwrap();
    assert_eq!(editor.mode(), "viewing");
}

#[wasm_bindgen_test]
fn drag_without_edit_is_an_editor_error() {
    let mut editor = GrainEditor::new(js("[]"), 100, 100, None).unwrap();
    let err = editor
        .drag_start(js(r#"{"vertex": {"region": 0, "index": 0}}"#))
        .unwrap_err();
    assert_eq!(json(err)["kind"], "editor");
}

#[wasm_bindgen_test]
fn counter_rejects_clicks_outside() {
    let regions = js("[[[0, 0], [0, 1], [1, 1], [1, 0]]]");
    let mut counter = Counter::new(regions, JsValue::UNDEFINED, None).unwrap();
    assert!(counter.click(0.5, 0.5).is_some());
    assert!(counter.click(2.0, 0.5).is_none());
    assert_eq!(json(counter.result().unwrap())["track_num"], 1.0);
}

#[wasm_bindgen_test]
fn layer_shift_reports_whole_pixels() {
    let mut shift = LayerShift::new(0, 0, 1000, 1000).unwrap();
    shift.begin_edit().unwrap();
    shift.drag_start().unwrap();
    // handle starts at the centre (lat 0.5, lng 0.5)
    let offset = json(shift.drag_move(0.5, 0.51).unwrap());
    assert_eq!(offset["x"], 10.0);
    assert_eq!(offset["y"], 0.0);
}

#[wasm_bindgen_test]
fn zero_width_image_is_a_config_error() {
    let err = GrainEditor::new(js("[]"), 0, 100, None).err().unwrap();
    assert_eq!(json(err)["kind"], "config");
    let err = LayerShift::new(5, 5, 0, 10).err().unwrap();
    assert_eq!(json(err)["kind"], "config");
}

#[wasm_bindgen_test]
fn counter_moves_and_categorizes_markers() {
    let regions = js("[[[0, 0], [0, 1], [1, 1], [1, 0]]]");
    let mut counter = Counter::new(regions, JsValue::UNDEFINED, None).unwrap();
    let id = counter.click(0.5, 0.5).unwrap();
    assert!(!counter.move_marker(id, 0.5, 2.0));
    assert!(counter.move_marker(id, 0.25, 0.75));
    assert!(counter.set_category(id, "inclusion".to_string()));

    let markers = json(counter.markers().unwrap());
    assert_eq!(markers[0]["latlng"], serde_json::json!([0.25, 0.75]));
    assert_eq!(markers[0]["category"], "inclusion");
    assert_eq!(json(counter.result().unwrap())["marker_categories"][0], "inclusion");
}
