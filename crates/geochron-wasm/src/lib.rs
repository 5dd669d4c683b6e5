use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

use geochron_core::fields::ShiftOffset;
use geochron_core::{FtType, LatLng, RegionSet, Rois, Vertex};
use geochron_editor::{
    Containment, EditorConfig, Handle, ImageInfo, MarkerId, Mode, RegionEditor, ShiftEditor,
    SimpleCrs, TrackCounter,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Returns the current crate version. Used as a minimal wasm smoke export.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Serialize)]
struct GeochronError {
    kind: String,
    message: String,
}

fn to_js_error(kind: &str, message: String) -> JsValue {
    let err = GeochronError {
        kind: kind.to_string(),
        message,
    };
    serde_wasm_bindgen::to_value(&err)
        .unwrap_or_else(|_| JsValue::from_str(&format!("{kind}: {}", err.message)))
}

fn editor_error(err: geochron_editor::EditorError) -> JsValue {
    to_js_error("editor", err.to_string())
}

// Plain objects rather than ES maps, so form fields can be posted as-is.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| to_js_error("wasm", e.to_string()))
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| to_js_error("input", e.to_string()))
}

fn mode_name(mode: Mode) -> String {
    match mode {
        Mode::Viewing => "viewing",
        Mode::Editing => "editing",
    }
    .to_string()
}

fn image_info(width: u32, height: u32) -> Result<ImageInfo, JsValue> {
    ImageInfo::new(width, height).map_err(|e| to_js_error("config", e.to_string()))
}

fn parse_config(config_json: Option<String>) -> Result<EditorConfig, JsValue> {
    match config_json {
        Some(s) => EditorConfig::from_json_str(&s).map_err(|e| to_js_error("config", e.to_string())),
        None => Ok(EditorConfig::default()),
    }
}

#[derive(Serialize)]
struct HandleView {
    handle: Handle,
    latlng: LatLng,
}

/// Region editor driven by map pointer events in `[lat, lng]`.
#[wasm_bindgen]
pub struct GrainEditor {
    inner: RegionEditor,
    crs: SimpleCrs,
}

#[wasm_bindgen]
impl GrainEditor {
    /// `regions` is an array of regions, each an array of `[lat, lng]`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        regions: JsValue,
        width: u32,
        height: u32,
        config_json: Option<String>,
    ) -> Result<GrainEditor, JsValue> {
        let regions: Vec<Vec<LatLng>> = from_js(regions)?;
        let image = image_info(width, height)?;
        let inner = RegionEditor::new(
            RegionSet::from_lat_lngs(regions),
            image,
            parse_config(config_json)?,
        );
        let crs = SimpleCrs::new(inner.config().zoom);
        Ok(GrainEditor { inner, crs })
    }

    /// Build from a server ROI document for the given track type (`S`/`I`).
    #[wasm_bindgen(js_name = fromRois)]
    pub fn from_rois(
        rois_json: &str,
        ft_type: &str,
        config_json: Option<String>,
    ) -> Result<GrainEditor, JsValue> {
        let rois = Rois::from_json_str(rois_json).map_err(|e| to_js_error("rois", e.to_string()))?;
        let ft_type: FtType = parse_name(ft_type)?;
        let regions = rois
            .region_set(ft_type)
            .map_err(|e| to_js_error("rois", e.to_string()))?;
        let image = ImageInfo::try_from(&rois).map_err(|e| to_js_error("rois", e.to_string()))?;
        let inner = RegionEditor::new(regions, image, parse_config(config_json)?);
        let crs = SimpleCrs::new(inner.config().zoom);
        Ok(GrainEditor { inner, crs })
    }

    /// Follow the map's zoom so collapse distances stay in screen pixels.
    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, zoom: i32) {
        self.crs = SimpleCrs::new(zoom);
    }

    pub fn mode(&self) -> String {
        mode_name(self.inner.mode())
    }

    pub fn regions(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.regions().to_lat_lngs())
    }

    pub fn outline(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.outline().to_lat_lngs())
    }

    pub fn covers(&self, lat: f64, lng: f64) -> bool {
        self.inner.covers(Vertex::from(LatLng::new(lat, lng)))
    }

    #[wasm_bindgen(js_name = beginEdit)]
    pub fn begin_edit(&mut self) -> Result<(), JsValue> {
        self.inner.begin_edit().map_err(editor_error)
    }

    pub fn handles(&self) -> Result<JsValue, JsValue> {
        let views: Vec<HandleView> = self
            .inner
            .handles()
            .into_iter()
            .map(|(handle, v)| HandleView {
                handle,
                latlng: LatLng::from(v),
            })
            .collect();
        to_js(&views)
    }

    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&mut self, handle: JsValue) -> Result<(), JsValue> {
        let handle: Handle = from_js(handle)?;
        self.inner.drag_start(handle).map_err(editor_error)
    }

    /// Returns the tentative regions to draw.
    #[wasm_bindgen(js_name = dragMove)]
    pub fn drag_move(&mut self, lat: f64, lng: f64) -> Result<JsValue, JsValue> {
        let pos = Vertex::from(LatLng::new(lat, lng));
        let regions = self.inner.drag_move(pos, &self.crs).map_err(editor_error)?;
        to_js(&regions.to_lat_lngs())
    }

    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self) -> Result<JsValue, JsValue> {
        let regions = self.inner.drag_end().map_err(editor_error)?;
        to_js(&regions.to_lat_lngs())
    }

    #[wasm_bindgen(js_name = cancelEdit)]
    pub fn cancel_edit(&mut self) -> Result<(), JsValue> {
        self.inner.cancel_edit().map_err(editor_error)
    }

    /// Form fields for the save request.
    pub fn save(&mut self) -> Result<JsValue, JsValue> {
        let fields = self.inner.save().map_err(editor_error)?;
        to_js(&fields)
    }

    #[wasm_bindgen(js_name = saveSucceeded)]
    pub fn save_succeeded(&mut self) -> Result<(), JsValue> {
        self.inner.save_succeeded().map_err(editor_error)
    }
}

/// Parse a bare enum name such as `"I"` or `"even-odd"`.
fn parse_name<T: DeserializeOwned>(s: &str) -> Result<T, JsValue> {
    T::deserialize(serde::de::value::StrDeserializer::<serde::de::value::Error>::new(s))
        .map_err(|e| to_js_error("input", e.to_string()))
}

/// Mica layer shift editor.
#[wasm_bindgen]
pub struct LayerShift {
    inner: ShiftEditor,
}

#[wasm_bindgen]
impl LayerShift {
    #[wasm_bindgen(constructor)]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Result<LayerShift, JsValue> {
        let offset = ShiftOffset {
            x: x.into(),
            y: y.into(),
        };
        Ok(LayerShift {
            inner: ShiftEditor::new(offset, image_info(width, height)?),
        })
    }

    pub fn mode(&self) -> String {
        mode_name(self.inner.mode())
    }

    /// `[lat, lng]` of the drag handle, or `null` when not editing.
    pub fn handle(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.handle().map(LatLng::from))
    }

    pub fn offset(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.offset())
    }

    /// Shift `regions` by the change made in this session.
    pub fn apply(&self, regions: JsValue) -> Result<JsValue, JsValue> {
        let regions: Vec<Vec<LatLng>> = from_js(regions)?;
        let shifted = self.inner.apply(&RegionSet::from_lat_lngs(regions));
        to_js(&shifted.to_lat_lngs())
    }

    #[wasm_bindgen(js_name = beginEdit)]
    pub fn begin_edit(&mut self) -> Result<(), JsValue> {
        self.inner.begin_edit().map_err(editor_error)
    }

    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&mut self) -> Result<(), JsValue> {
        self.inner.drag_start().map_err(editor_error)
    }

    #[wasm_bindgen(js_name = dragMove)]
    pub fn drag_move(&mut self, lat: f64, lng: f64) -> Result<JsValue, JsValue> {
        let offset = self
            .inner
            .drag_move(Vertex::from(LatLng::new(lat, lng)))
            .map_err(editor_error)?;
        to_js(&offset)
    }

    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self) -> Result<JsValue, JsValue> {
        let offset = self.inner.drag_end().map_err(editor_error)?;
        to_js(&offset)
    }

    #[wasm_bindgen(js_name = cancelEdit)]
    pub fn cancel_edit(&mut self) -> Result<(), JsValue> {
        self.inner.cancel_edit().map_err(editor_error)
    }

    pub fn save(&self) -> Result<JsValue, JsValue> {
        let fields = self.inner.save().map_err(editor_error)?;
        to_js(&fields)
    }

    #[wasm_bindgen(js_name = saveSucceeded)]
    pub fn save_succeeded(&mut self) -> Result<(), JsValue> {
        self.inner.save_succeeded().map_err(editor_error)
    }
}

#[derive(Serialize)]
struct MarkerView<'a> {
    id: u64,
    latlng: LatLng,
    category: &'a str,
    selected: bool,
}

/// Track counter for the counting page.
#[wasm_bindgen]
pub struct Counter {
    inner: TrackCounter,
}

#[wasm_bindgen]
impl Counter {
    /// `containment` is `"any"` (default) or `"even-odd"`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        regions: JsValue,
        markers: JsValue,
        containment: Option<String>,
    ) -> Result<Counter, JsValue> {
        let regions: Vec<Vec<LatLng>> = from_js(regions)?;
        let markers: Vec<LatLng> = if markers.is_undefined() || markers.is_null() {
            Vec::new()
        } else {
            from_js(markers)?
        };
        let containment = match containment.as_deref() {
            None => Containment::default(),
            Some(s) => parse_name(s)?,
        };
        Ok(Counter {
            inner: TrackCounter::with_markers(
                RegionSet::from_lat_lngs(regions),
                containment,
                &markers,
            ),
        })
    }

    /// Place a marker; returns its id, or `undefined` outside the regions.
    pub fn click(&mut self, lat: f64, lng: f64) -> Option<f64> {
        self.inner
            .click(Vertex::from(LatLng::new(lat, lng)))
            .map(|id| id.0 as f64)
    }

    pub fn count(&self) -> usize {
        self.inner.count()
    }

    pub fn markers(&self) -> Result<JsValue, JsValue> {
        let views: Vec<MarkerView> = self
            .inner
            .markers()
            .iter()
            .map(|m| MarkerView {
                id: m.id.0,
                latlng: LatLng::from(m.at),
                category: &m.category,
                selected: m.selected,
            })
            .collect();
        to_js(&views)
    }

    /// Drag marker `id`; false when it is unknown or `lat`/`lng` is outside.
    #[wasm_bindgen(js_name = moveMarker)]
    pub fn move_marker(&mut self, id: f64, lat: f64, lng: f64) -> bool {
        self.inner
            .move_marker(MarkerId(id as u64), Vertex::from(LatLng::new(lat, lng)))
    }

    #[wasm_bindgen(js_name = setCategory)]
    pub fn set_category(&mut self, id: f64, category: String) -> bool {
        self.inner.set_category(MarkerId(id as u64), category)
    }

    /// Select markers inside the box with corners `a` and `b`.
    #[wasm_bindgen(js_name = selectRect)]
    pub fn select_rect(&mut self, a_lat: f64, a_lng: f64, b_lat: f64, b_lng: f64) -> usize {
        self.inner.select_rect(
            Vertex::from(LatLng::new(a_lat, a_lng)),
            Vertex::from(LatLng::new(b_lat, b_lng)),
        )
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.inner.clear_selection();
    }

    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> usize {
        self.inner.delete_selected()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// `{ track_num, marker_latlngs, marker_categories }` for submission.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.result())
    }
}
