//! Editing sessions for the grain image viewer.
//!
//! Each session owns its data and is driven by a single caller that
//! forwards pointer events; nothing here touches a renderer or the network.

pub mod config;
pub mod counting;
pub mod error;
pub mod projection;
pub mod session;
pub mod shift;

pub use config::{Containment, EditorConfig, ImageInfo};
pub use counting::{CountingResult, Marker, MarkerId, TrackCounter, DEFAULT_CATEGORY};
pub use error::{ConfigError, EditorError};
pub use projection::{Projection, SimpleCrs};
pub use session::{Handle, Mode, RegionEditor};
pub use shift::ShiftEditor;
