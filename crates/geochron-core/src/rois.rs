//! ROI documents as stored by the server, in image pixels.

use serde::{Deserialize, Serialize};

use crate::region::{Region, RegionSet};
use crate::vertex::Vertex;

#[derive(Debug, thiserror::Error)]
pub enum RoisError {
    #[error("failed to parse ROI document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image width must be positive (got {0})")]
    ImageWidth(u32),
    #[error("region {index} has no vertices")]
    EmptyRegion { index: usize },
}

/// Which track population is being shown.
///
/// Induced tracks are counted on the mica print, which is a mirror image
/// of the grain and may carry a registration transform and shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FtType {
    #[default]
    #[serde(alias = "S")]
    Spontaneous,
    #[serde(alias = "I")]
    Induced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoisRegion {
    #[serde(default)]
    pub shift: [f64; 2],
    pub vertices: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rois {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grain_id: Option<u64>,
    pub image_width: u32,
    pub image_height: u32,
    pub regions: Vec<RoisRegion>,
    /// `[[x0, y0, t0], [x1, y1, t1]]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mica_transform_matrix: Option<[[f64; 3]; 2]>,
}

impl Rois {
    pub fn from_json_str(s: &str) -> Result<Self, RoisError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Image height over width; the extent of normalized `y`.
    pub fn aspect(&self) -> f64 {
        f64::from(self.image_height) / f64::from(self.image_width)
    }

    /// The layer shift in pixels, taken from the first region.
    pub fn shift(&self) -> [f64; 2] {
        self.regions.first().map(|r| r.shift).unwrap_or_default()
    }

    /// Convert to normalized image coordinates for the given track type.
    pub fn region_set(&self, ft_type: FtType) -> Result<RegionSet, RoisError> {
        if self.image_width == 0 {
            return Err(RoisError::ImageWidth(self.image_width));
        }
        let w = f64::from(self.image_width);
        let h = f64::from(self.image_height);
        let shift = match ft_type {
            FtType::Spontaneous => [0.0, 0.0],
            FtType::Induced => {
                let [sx, sy] = self.shift();
                [sx / w, sy / w]
            }
        };

        let mut regions = Vec::with_capacity(self.regions.len());
        for (index, region) in self.regions.iter().enumerate() {
            if region.vertices.is_empty() {
                return Err(RoisError::EmptyRegion { index });
            }
            let vertices = region.vertices.iter().map(|&[px, py]| {
                let mut v = Vertex::new(px / w, (h - py) / w);
                if ft_type == FtType::Induced {
                    v = self.to_mica(v);
                }
                *v.shift(shift)
            });
            regions.push(vertices.collect::<Region>());
        }
        Ok(RegionSet::new(regions))
    }

    fn to_mica(&self, v: Vertex) -> Vertex {
        match self.mica_transform_matrix {
            Some([[x0, y0, _], [x1, y1, _]]) => {
                let x = v.x - 0.5;
                let y = v.y - 0.5;
                Vertex::new(0.5 + x * x0 + y * y0, 0.5 + x * x1 + y * y1)
            }
            None => Vertex::new(1.0 - v.x, v.y),
        }
    }
}
