//! Registration of the mica layer against the grain images.
//!
//! The offset is stored in whole pixels but edited by dragging a single
//! handle that starts at the image centre displaced by the offset.

use geochron_core::fields::{self, FormFields, ShiftOffset};
use geochron_core::{Region, RegionSet, Vertex};
use tracing::{debug, info};

use crate::config::ImageInfo;
use crate::error::EditorError;
use crate::session::Mode;

#[derive(Debug, Clone)]
pub struct ShiftEditor {
    image: ImageInfo,
    saved: ShiftOffset,
    /// Current offset in normalized units.
    delta: [f64; 2],
    mode: Mode,
    dragging: bool,
}

impl ShiftEditor {
    pub fn new(shift: ShiftOffset, image: ImageInfo) -> Self {
        Self {
            image,
            saved: shift,
            delta: to_delta(shift, image),
            mode: Mode::Viewing,
            dragging: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The handle position while editing.
    pub fn handle(&self) -> Option<Vertex> {
        (self.mode == Mode::Editing).then(|| *self.image.centre().shift(self.delta))
    }

    /// The current offset rounded to whole pixels.
    pub fn offset(&self) -> ShiftOffset {
        let w = f64::from(self.image.width);
        ShiftOffset {
            x: (self.delta[0] * w).round() as i64,
            y: (self.delta[1] * w).round() as i64,
        }
    }

    /// Move `regions` by the difference between the current and the saved
    /// offset, for drawing the shifted outline while the handle moves.
    pub fn apply(&self, regions: &RegionSet) -> RegionSet {
        let saved = to_delta(self.saved, self.image);
        let d = [self.delta[0] - saved[0], self.delta[1] - saved[1]];
        regions
            .iter()
            .map(|r| r.iter().map(|&v| *Vertex::new(v.x, v.y).shift(d)).collect::<Region>())
            .collect()
    }

    pub fn begin_edit(&mut self) -> Result<(), EditorError> {
        if self.mode == Mode::Editing {
            return Err(EditorError::AlreadyEditing);
        }
        self.mode = Mode::Editing;
        info!(x = self.saved.x, y = self.saved.y, "begin shift edit");
        Ok(())
    }

    pub fn drag_start(&mut self) -> Result<(), EditorError> {
        if self.mode != Mode::Editing {
            return Err(EditorError::NotEditing);
        }
        if self.dragging {
            return Err(EditorError::DragInProgress);
        }
        self.dragging = true;
        debug!("shift drag start");
        Ok(())
    }

    pub fn drag_move(&mut self, pos: Vertex) -> Result<ShiftOffset, EditorError> {
        if !self.dragging {
            return Err(EditorError::NoDrag);
        }
        let c = self.image.centre();
        self.delta = [pos.x - c.x, pos.y - c.y];
        Ok(self.offset())
    }

    pub fn drag_end(&mut self) -> Result<ShiftOffset, EditorError> {
        if !self.dragging {
            return Err(EditorError::NoDrag);
        }
        self.dragging = false;
        Ok(self.offset())
    }

    pub fn cancel_edit(&mut self) -> Result<(), EditorError> {
        if self.mode != Mode::Editing {
            return Err(EditorError::NotEditing);
        }
        self.delta = to_delta(self.saved, self.image);
        self.dragging = false;
        self.mode = Mode::Viewing;
        info!("shift edit cancelled");
        Ok(())
    }

    pub fn save(&self) -> Result<FormFields, EditorError> {
        if self.mode != Mode::Editing {
            return Err(EditorError::NotEditing);
        }
        if self.dragging {
            return Err(EditorError::DragInProgress);
        }
        let offset = self.offset();
        info!(x = offset.x, y = offset.y, "shift save requested");
        Ok(fields::shift_fields(offset))
    }

    pub fn save_succeeded(&mut self) -> Result<(), EditorError> {
        if self.mode != Mode::Editing {
            return Err(EditorError::NotEditing);
        }
        self.saved = self.offset();
        self.delta = to_delta(self.saved, self.image);
        self.dragging = false;
        self.mode = Mode::Viewing;
        Ok(())
    }
}

fn to_delta(shift: ShiftOffset, image: ImageInfo) -> [f64; 2] {
    let w = f64::from(image.width);
    [shift.x as f64 / w, shift.y as f64 / w]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn image() -> ImageInfo {
        ImageInfo::new(200, 100).unwrap()
    }

    #[test]
    fn handle_starts_at_centre_plus_offset() {
        let mut e = ShiftEditor::new(ShiftOffset { x: 40, y: 20 }, image());
        assert_eq!(e.handle(), None);
        e.begin_edit().unwrap();
        let h = e.handle().unwrap();
        assert_abs_diff_eq!(h.x, 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(h.y, 0.35, epsilon = 1e-12);
    }

    #[test]
    fn dragging_rounds_to_pixels() {
        let mut e = ShiftEditor::new(ShiftOffset::default(), image());
        e.begin_edit().unwrap();
        e.drag_start().unwrap();
        let got = e.drag_move(Vertex::new(0.4, 0.25 + 0.1003)).unwrap();
        assert_eq!(got, ShiftOffset { x: -20, y: 20 });
        e.drag_end().unwrap();
        let fields = e.save().unwrap();
        assert_eq!(fields["x"], -20.0);
        assert_eq!(fields["y"], 20.0);
    }

    #[test]
    fn cancel_restores_saved_offset() {
        let saved = ShiftOffset { x: 3, y: -7 };
        let mut e = ShiftEditor::new(saved, image());
        e.begin_edit().unwrap();
        e.drag_start().unwrap();
        e.drag_move(Vertex::new(0.0, 0.0)).unwrap();
        e.cancel_edit().unwrap();
        assert_eq!(e.offset(), saved);
        assert_eq!(e.drag_move(Vertex::new(0.0, 0.0)), Err(EditorError::NoDrag));
    }

    #[test]
    fn save_succeeded_adopts_offset() {
        let mut e = ShiftEditor::new(ShiftOffset::default(), image());
        e.begin_edit().unwrap();
        e.drag_start().unwrap();
        assert_eq!(e.save(), Err(EditorError::DragInProgress));
        e.drag_move(Vertex::new(0.55, 0.25)).unwrap();
        e.drag_end().unwrap();
        e.save_succeeded().unwrap();
        assert_eq!(e.mode(), Mode::Viewing);
        e.begin_edit().unwrap();
        e.cancel_edit().unwrap();
        assert_eq!(e.offset(), ShiftOffset { x: 10, y: 0 });
    }

    #[test]
    fn outline_follows_unsaved_offset() {
        let mut e = ShiftEditor::new(ShiftOffset::default(), image());
        let set = RegionSet::new(vec![Region::new(vec![Vertex::new(0.1, 0.1)])]);
        e.begin_edit().unwrap();
        e.drag_start().unwrap();
        e.drag_move(Vertex::new(0.6, 0.2)).unwrap();
        let moved = e.apply(&set);
        assert_abs_diff_eq!(moved[0][0].x, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(moved[0][0].y, 0.05, epsilon = 1e-12);
    }
}
