use geochron_core::{Region, RegionSet, Vertex};
use serde::{Deserialize, Serialize};

use crate::primitives::signed_area;

/// Shape that replaces a region set with no vertices left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DefaultRegion {
    /// A single vertex at the centre, grown by dragging its midpoint handle.
    #[default]
    Point,
    /// A counter-clockwise square with half-side `half`.
    Square { half: f64 },
}

impl DefaultRegion {
    pub fn region(self, centre: Vertex) -> Region {
        match self {
            DefaultRegion::Point => Region::new(vec![centre]),
            DefaultRegion::Square { half } => Region::new(vec![
                Vertex::new(centre.x - half, centre.y - half),
                Vertex::new(centre.x + half, centre.y - half),
                Vertex::new(centre.x + half, centre.y + half),
                Vertex::new(centre.x - half, centre.y + half),
            ]),
        }
    }
}

/// Remove consecutive duplicates (including across the wrap) and orient
/// counter-clockwise. A region of identical points keeps its first one.
fn clean(region: &Region) -> Region {
    let Some(&first) = region.vertices.first() else {
        return Region::default();
    };
    let mut last = region.vertices[region.len() - 1];
    let mut out = Vec::with_capacity(region.len());
    for &v in region.iter() {
        if v != last {
            out.push(v);
            last = v;
        }
    }
    if out.is_empty() {
        out.push(first);
    }
    let mut out = Region::new(out);
    if signed_area(&out) < 0.0 {
        out.vertices.reverse();
    }
    out
}

/// Tidy every region without dropping short ones: consecutive duplicates
/// go, clockwise regions are reversed and empty regions are removed.
pub fn clean_regions(regions: &RegionSet) -> RegionSet {
    regions
        .iter()
        .map(clean)
        .filter(|r| !r.is_empty())
        .collect()
}

/// Cleanup run when editing starts and before saving.
///
/// Regions with fewer than three distinct vertices are dropped when any
/// proper polygon remains; otherwise each is reduced to its first vertex.
/// An empty result becomes `fallback` at `centre`.
pub fn normalize(regions: &RegionSet, fallback: DefaultRegion, centre: Vertex) -> RegionSet {
    let cleaned = clean_regions(regions).regions;
    let out: Vec<Region> = if cleaned.iter().any(|r| r.len() >= 3) {
        cleaned.into_iter().filter(|r| r.len() >= 3).collect()
    } else {
        cleaned
            .into_iter()
            .map(|r| Region::new(vec![r[0]]))
            .collect()
    };
    if out.is_empty() {
        return RegionSet::new(vec![fallback.region(centre)]);
    }
    RegionSet::new(out)
}
