use serde::{Deserialize, Serialize};

/// A point in normalized image coordinates.
///
/// `x` runs along the image width (`0..=1`), `y` runs up from the bottom
/// edge (`0..=height/width`). Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn midpoint(self, other: Vertex) -> Vertex {
        Vertex::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Translate this vertex by `delta`.
    pub fn shift(&mut self, delta: [f64; 2]) -> &mut Self {
        self.x += delta[0];
        self.y += delta[1];
        self
    }
}

impl From<[f64; 2]> for Vertex {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Vertex> for [f64; 2] {
    fn from(v: Vertex) -> Self {
        [v.x, v.y]
    }
}

/// The mapping layer's `[lat, lng]` pair. Only used at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(ll: LatLng) -> Self {
        [ll.lat, ll.lng]
    }
}

impl From<LatLng> for Vertex {
    fn from(ll: LatLng) -> Self {
        Vertex::new(ll.lng, ll.lat)
    }
}

impl From<Vertex> for LatLng {
    fn from(v: Vertex) -> Self {
        LatLng::new(v.y, v.x)
    }
}

/// A position in screen pixels (`y` pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
