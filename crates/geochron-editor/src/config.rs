use geochron_core::{Rois, Vertex};
use geochron_geometry::DefaultRegion;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which regions a counted track must fall inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Containment {
    /// Inside any region.
    #[default]
    Any,
    /// Inside an odd number of regions, so nested regions make holes.
    EvenOdd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Screen distance at which a dragged vertex merges into its neighbour.
    pub snap_threshold_px: f64,
    /// Zoom used when no live projection is available.
    pub zoom: i32,
    pub default_region: DefaultRegion,
    pub containment: Containment,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold_px: 10.0,
            zoom: 11,
            default_region: DefaultRegion::Point,
            containment: Containment::Any,
        }
    }
}

impl EditorConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !(self.snap_threshold_px > 0.0) {
            return Err(ConfigError::SnapThreshold(self.snap_threshold_px));
        }
        if let DefaultRegion::Square { half } = self.default_region {
            if !(half > 0.0) {
                return Err(ConfigError::SquareHalf(half));
            }
        }
        Ok(self)
    }
}

/// Pixel size of the image stack being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    /// Normalized coordinates are divided by the width, so it must be
    /// non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ImageWidth(width));
        }
        Ok(Self { width, height })
    }

    pub fn aspect(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }

    /// Centre of the image in normalized coordinates.
    pub fn centre(&self) -> Vertex {
        Vertex::new(0.5, self.aspect() / 2.0)
    }
}

impl TryFrom<&Rois> for ImageInfo {
    type Error = ConfigError;

    fn try_from(rois: &Rois) -> Result<Self, Self::Error> {
        Self::new(rois.image_width, rois.image_height)
    }
}
