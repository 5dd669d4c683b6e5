//! Plain data shared by the Geochron@home grain editor crates.

pub mod fields;
pub mod region;
pub mod rois;
pub mod vertex;

pub use fields::{FieldsError, FormFields, ShiftOffset};
pub use region::{Region, RegionSet};
pub use rois::{FtType, Rois, RoisError, RoisRegion};
pub use vertex::{LatLng, ScreenPoint, Vertex};
