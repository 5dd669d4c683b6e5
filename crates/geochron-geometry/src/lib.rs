//! 2D geometry for editing grain regions of interest.

pub mod normalize;
pub mod primitives;
pub mod topology;

pub use normalize::{clean_regions, normalize, DefaultRegion};
pub use primitives::{
    contains_any, contains_even_odd, point_in_polygon, points_close, segments_cross, signed_area,
};
pub use topology::{collapse_vertex, merge_regions, reconfigure, split_region};
