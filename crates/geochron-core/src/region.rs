use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::vertex::{LatLng, Vertex};

/// A simple polygon stored as a cyclic vertex list; index 0 follows the last.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region {
    pub vertices: Vec<Vertex>,
}

impl Region {
    #[must_use]
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    pub fn from_lat_lngs(points: impl IntoIterator<Item = LatLng>) -> Self {
        Self::new(points.into_iter().map(Vertex::from).collect())
    }

    #[must_use]
    pub fn to_lat_lngs(&self) -> Vec<LatLng> {
        self.vertices.iter().copied().map(LatLng::from).collect()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    /// Index of the vertex before `i`, wrapping.
    pub fn prev_index(&self, i: usize) -> usize {
        if i == 0 { self.len() - 1 } else { i - 1 }
    }

    /// Index of the vertex after `i`, wrapping.
    pub fn next_index(&self, i: usize) -> usize {
        if i + 1 == self.len() { 0 } else { i + 1 }
    }

    /// Every edge as `(start index, end index)`, beginning with the closing
    /// edge from the last vertex to the first.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.len();
        (0..n).map(move |i| (if i == 0 { n - 1 } else { i - 1 }, i))
    }

    /// A copy of this region without vertex `i`.
    #[must_use]
    pub fn without(&self, i: usize) -> Region {
        let mut vertices = self.vertices.clone();
        vertices.remove(i);
        Region::new(vertices)
    }
}

impl Index<usize> for Region {
    type Output = Vertex;

    fn index(&self, i: usize) -> &Vertex {
        &self.vertices[i]
    }
}

impl From<Vec<Vertex>> for Region {
    fn from(vertices: Vec<Vertex>) -> Self {
        Self::new(vertices)
    }
}

impl FromIterator<Vertex> for Region {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// All regions edited together. Positions identify regions only within
/// a single edit gesture.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionSet {
    pub regions: Vec<Region>,
}

impl RegionSet {
    #[must_use]
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Build from the mapping layer's nested `[lat, lng]` arrays.
    pub fn from_lat_lngs(regions: Vec<Vec<LatLng>>) -> Self {
        regions.into_iter().map(Region::from_lat_lngs).collect()
    }

    #[must_use]
    pub fn to_lat_lngs(&self) -> Vec<Vec<LatLng>> {
        self.regions.iter().map(Region::to_lat_lngs).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn get(&self, i: usize) -> Option<&Region> {
        self.regions.get(i)
    }

    /// Total number of vertices across all regions.
    pub fn vertex_count(&self) -> usize {
        self.regions.iter().map(Region::len).sum()
    }

    /// A copy of this set with region `i` replaced by `replacement`
    /// (which may hold zero, one or several regions).
    #[must_use]
    pub fn splice(&self, i: usize, replacement: impl IntoIterator<Item = Region>) -> RegionSet {
        let mut regions = self.regions.clone();
        regions.splice(i..=i, replacement);
        RegionSet::new(regions)
    }
}

impl Index<usize> for RegionSet {
    type Output = Region;

    fn index(&self, i: usize) -> &Region {
        &self.regions[i]
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        Self::new(regions)
    }
}

impl FromIterator<Region> for RegionSet {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
