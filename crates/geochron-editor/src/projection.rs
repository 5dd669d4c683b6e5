use geochron_core::{ScreenPoint, Vertex};

/// Maps normalized image coordinates to screen pixels at the current view.
pub trait Projection {
    fn project(&self, v: Vertex) -> ScreenPoint;
}

impl<F> Projection for F
where
    F: Fn(Vertex) -> ScreenPoint,
{
    fn project(&self, v: Vertex) -> ScreenPoint {
        self(v)
    }
}

/// The flat image projection: one normalized unit spans `2^zoom` pixels and
/// screen `y` grows downwards. Pixel origin is irrelevant to distances, so
/// it is left at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleCrs {
    pub zoom: i32,
}

impl SimpleCrs {
    pub fn new(zoom: i32) -> Self {
        Self { zoom }
    }

    pub fn scale(&self) -> f64 {
        2f64.powi(self.zoom)
    }
}

impl Projection for SimpleCrs {
    fn project(&self, v: Vertex) -> ScreenPoint {
        let s = self.scale();
        ScreenPoint::new(v.x * s, -v.y * s)
    }
}
