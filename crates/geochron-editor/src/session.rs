//! The region editing session.
//!
//! While idle the editor exposes a handle on every vertex and on the middle
//! of every edge. A drag works on a private copy of the regions: each move
//! re-derives a tentative set (collapse, split, weld or plain move) for the
//! outline, and releasing the pointer commits the last tentative set.

use geochron_core::fields::{self, FormFields};
use geochron_core::{Region, RegionSet, Vertex};
use geochron_geometry::{
    clean_regions, collapse_vertex, contains_even_odd, normalize, points_close, reconfigure,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::config::{EditorConfig, ImageInfo};
use crate::error::EditorError;
use crate::projection::Projection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing,
}

/// Something the user can grab.
///
/// A midpoint handle sits halfway along the edge ending at vertex `index`;
/// grabbing it inserts a new vertex at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Vertex { region: usize, index: usize },
    Midpoint { region: usize, index: usize },
}

#[derive(Debug, Clone)]
struct Drag {
    region: usize,
    index: usize,
    working: RegionSet,
    tentative: Option<RegionSet>,
}

#[derive(Debug, Clone)]
pub struct RegionEditor {
    config: EditorConfig,
    image: ImageInfo,
    saved: RegionSet,
    regions: RegionSet,
    mode: Mode,
    drag: Option<Drag>,
}

impl RegionEditor {
    pub fn new(regions: RegionSet, image: ImageInfo, config: EditorConfig) -> Self {
        Self {
            config,
            image,
            saved: regions.clone(),
            regions,
            mode: Mode::Viewing,
            drag: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The committed regions of this session.
    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    /// What the outline should show: the tentative set during a drag.
    pub fn outline(&self) -> &RegionSet {
        match &self.drag {
            Some(Drag { tentative: Some(t), .. }) => t,
            Some(drag) => &drag.working,
            None => &self.regions,
        }
    }

    /// Whether `p` is inside the edited area, with nested regions as holes.
    pub fn covers(&self, p: Vertex) -> bool {
        contains_even_odd(self.outline(), p)
    }

    fn normalized(&self, regions: &RegionSet) -> RegionSet {
        normalize(regions, self.config.default_region, self.image.centre())
    }

    pub fn begin_edit(&mut self) -> Result<(), EditorError> {
        if self.mode == Mode::Editing {
            return Err(EditorError::AlreadyEditing);
        }
        self.regions = self.normalized(&self.regions);
        self.mode = Mode::Editing;
        info!(regions = self.regions.len(), vertices = self.regions.vertex_count(), "begin edit");
        Ok(())
    }

    /// Grab handles with their positions. Midpoints are hidden mid-drag.
    pub fn handles(&self) -> Vec<(Handle, Vertex)> {
        if self.mode == Mode::Viewing {
            return Vec::new();
        }
        let regions = self.outline();
        let mut out = Vec::with_capacity(regions.vertex_count() * 2);
        for (ri, region) in regions.iter().enumerate() {
            for (vi, &v) in region.iter().enumerate() {
                out.push((Handle::Vertex { region: ri, index: vi }, v));
            }
        }
        if self.drag.is_none() {
            for (ri, region) in regions.iter().enumerate() {
                for (prev, vi) in region.edges() {
                    let m = region[prev].midpoint(region[vi]);
                    out.push((Handle::Midpoint { region: ri, index: vi }, m));
                }
            }
        }
        out
    }

    pub fn drag_start(&mut self, handle: Handle) -> Result<(), EditorError> {
        if self.mode != Mode::Editing {
            return Err(EditorError::NotEditing);
        }
        if self.drag.is_some() {
            return Err(EditorError::DragInProgress);
        }
        let (region, index) = match handle {
            Handle::Vertex { region, index } | Handle::Midpoint { region, index } => (region, index),
        };
        let unknown = EditorError::UnknownHandle { region, index };
        let len = self.regions.get(region).map(Region::len).ok_or(unknown.clone())?;
        if index >= len {
            return Err(unknown);
        }

        let mut working = self.regions.clone();
        if let Handle::Midpoint { .. } = handle {
            let r = &mut working.regions[region];
            let m = r[r.prev_index(index)].midpoint(r[index]);
            r.vertices.insert(index, m);
        }
        debug!(?handle, "drag start");
        self.drag = Some(Drag {
            region,
            index,
            working,
            tentative: None,
        });
        Ok(())
    }

    /// Move the grabbed vertex to `pos` and return the tentative regions.
    pub fn drag_move<P: Projection + ?Sized>(
        &mut self,
        pos: Vertex,
        projection: &P,
    ) -> Result<&RegionSet, EditorError> {
        let threshold = self.config.snap_threshold_px;
        let drag = self.drag.as_mut().ok_or(EditorError::NoDrag)?;
        let (r, i) = (drag.region, drag.index);
        drag.working.regions[r].vertices[i] = pos;

        let tentative = if wants_collapse(&drag.working[r], i, projection, threshold) {
            collapse_vertex(&drag.working, r, i)
        } else {
            reconfigure(&drag.working, r, i)
        };
        trace!(x = pos.x, y = pos.y, regions = tentative.len(), "drag move");
        Ok(drag.tentative.insert(tentative))
    }

    /// Commit the last tentative regions and return the new committed set.
    ///
    /// Committed regions are counter-clockwise and free of consecutive
    /// duplicates. Regions under three vertices are kept until `save`, so a
    /// lone point can be grown back into a polygon one midpoint at a time.
    pub fn drag_end(&mut self) -> Result<&RegionSet, EditorError> {
        let drag = self.drag.take().ok_or(EditorError::NoDrag)?;
        self.regions = clean_regions(&drag.tentative.unwrap_or(drag.working));
        info!(regions = self.regions.len(), vertices = self.regions.vertex_count(), "drag committed");
        Ok(&self.regions)
    }

    /// Throw away every change since the last successful save.
    pub fn cancel_edit(&mut self) -> Result<(), EditorError> {
        if self.mode != Mode::Editing {
            return Err(EditorError::NotEditing);
        }
        self.drag = None;
        self.regions = self.saved.clone();
        self.mode = Mode::Viewing;
        info!("edit cancelled");
        Ok(())
    }

    /// Fields for the save request. The session is left as it is so a
    /// failed request can simply be retried.
    pub fn save(&mut self) -> Result<FormFields, EditorError> {
        if self.mode != Mode::Editing {
            return Err(EditorError::NotEditing);
        }
        if self.drag.is_some() {
            return Err(EditorError::DragInProgress);
        }
        self.regions = self.normalized(&self.regions);
        info!(regions = self.regions.len(), "save requested");
        Ok(fields::vertex_fields(&self.regions))
    }

    /// The save request went through: adopt the regions and stop editing.
    pub fn save_succeeded(&mut self) -> Result<(), EditorError> {
        if self.mode != Mode::Editing {
            return Err(EditorError::NotEditing);
        }
        self.drag = None;
        self.saved = self.regions.clone();
        self.mode = Mode::Viewing;
        info!("save completed");
        Ok(())
    }
}

fn wants_collapse<P: Projection + ?Sized>(
    region: &Region,
    i: usize,
    projection: &P,
    threshold: f64,
) -> bool {
    if region.len() < 2 {
        return false;
    }
    let p = projection.project(region[i]);
    let prev = projection.project(region[region.prev_index(i)]);
    let next = projection.project(region[region.next_index(i)]);
    points_close(p, prev, threshold) || points_close(p, next, threshold)
}
