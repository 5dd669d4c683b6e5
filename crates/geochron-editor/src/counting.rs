//! Track counting: markers may only be placed inside the grain's regions.

use geochron_core::{LatLng, RegionSet, Vertex};
use geochron_geometry::{contains_any, contains_even_odd};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Containment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

/// Category given to markers placed by a plain click.
pub const DEFAULT_CATEGORY: &str = "track";

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub at: Vertex,
    pub category: String,
    pub selected: bool,
}

/// What the counting page submits. Categories run parallel to the markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountingResult {
    pub track_num: usize,
    pub marker_latlngs: Vec<LatLng>,
    pub marker_categories: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TrackCounter {
    regions: RegionSet,
    containment: Containment,
    markers: Vec<Marker>,
    next_id: u64,
}

impl TrackCounter {
    pub fn new(regions: RegionSet, containment: Containment) -> Self {
        Self {
            regions,
            containment,
            markers: Vec::new(),
            next_id: 0,
        }
    }

    /// Restore markers from an earlier partial save. They are trusted as
    /// they are and not re-checked against the regions.
    pub fn with_markers(regions: RegionSet, containment: Containment, saved: &[LatLng]) -> Self {
        let mut counter = Self::new(regions, containment);
        for &ll in saved {
            counter.push(ll.into());
        }
        counter
    }

    pub fn contains(&self, p: Vertex) -> bool {
        match self.containment {
            Containment::Any => contains_any(&self.regions, p),
            Containment::EvenOdd => contains_even_odd(&self.regions, p),
        }
    }

    fn push(&mut self, at: Vertex) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.push(Marker {
            id,
            at,
            category: DEFAULT_CATEGORY.to_string(),
            selected: false,
        });
        id
    }

    /// Place a marker at `p` if it is inside the regions.
    pub fn click(&mut self, p: Vertex) -> Option<MarkerId> {
        if !self.contains(p) {
            debug!(x = p.x, y = p.y, "click outside regions ignored");
            return None;
        }
        Some(self.push(p))
    }

    fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.iter_mut().find(|m| m.id == id)
    }

    /// Move marker `id` to `to`. Refused, leaving the marker where it was,
    /// when the id is unknown or `to` is outside the regions.
    pub fn move_marker(&mut self, id: MarkerId, to: Vertex) -> bool {
        if !self.contains(to) {
            debug!(?id, x = to.x, y = to.y, "move outside regions ignored");
            return false;
        }
        match self.marker_mut(id) {
            Some(m) => {
                m.at = to;
                true
            }
            None => false,
        }
    }

    /// Returns false when there is no marker `id`.
    pub fn set_category(&mut self, id: MarkerId, category: impl Into<String>) -> bool {
        match self.marker_mut(id) {
            Some(m) => {
                m.category = category.into();
                true
            }
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.markers.len()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn selected(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|m| m.selected)
    }

    /// Select exactly the markers inside the rectangle spanned by two
    /// corners (edges included). Returns how many were selected.
    pub fn select_rect(&mut self, a: Vertex, b: Vertex) -> usize {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        let mut n = 0;
        for m in &mut self.markers {
            m.selected = (x0..=x1).contains(&m.at.x) && (y0..=y1).contains(&m.at.y);
            n += usize::from(m.selected);
        }
        n
    }

    pub fn clear_selection(&mut self) {
        for m in &mut self.markers {
            m.selected = false;
        }
    }

    /// Remove the selected markers. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.markers.len();
        self.markers.retain(|m| !m.selected);
        let removed = before - self.markers.len();
        debug!(removed, remaining = self.markers.len(), "deleted selected markers");
        removed
    }

    pub fn reset(&mut self) {
        self.markers.clear();
    }

    pub fn result(&self) -> CountingResult {
        CountingResult {
            track_num: self.markers.len(),
            marker_latlngs: self.markers.iter().map(|m| m.at.into()).collect(),
            marker_categories: self.markers.iter().map(|m| m.category.clone()).collect(),
        }
    }
}
