//! Drag scripts: recorded gestures replayed against a region editor.
//!
//! ```yaml
//! - handle: { vertex: { region: 0, index: 2 } }
//!   path: [[0.7, 0.3], [0.8, 0.15]]
//! ```

use geochron_core::Vertex;
use geochron_editor::{EditorError, Handle, Projection, RegionEditor};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub handle: Handle,
    /// Pointer positions in normalized image coordinates, `[x, y]`.
    pub path: Vec<Vertex>,
}

/// Parse a script. JSON scripts are accepted since they are valid YAML.
pub fn parse_script(text: &str) -> Result<Vec<Gesture>, serde_yaml::Error> {
    serde_yaml::from_str(text)
}

/// Run every gesture in order. The editor must already be editing.
pub fn replay<P: Projection + ?Sized>(
    editor: &mut RegionEditor,
    gestures: &[Gesture],
    projection: &P,
) -> Result<(), EditorError> {
    for (n, gesture) in gestures.iter().enumerate() {
        debug!(gesture = n, handle = ?gesture.handle, moves = gesture.path.len(), "replay gesture");
        editor.drag_start(gesture.handle)?;
        for &pos in &gesture.path {
            editor.drag_move(pos, projection)?;
        }
        editor.drag_end()?;
    }
    Ok(())
}
