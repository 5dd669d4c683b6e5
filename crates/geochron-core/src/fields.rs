//! Flattened form fields sent with a save request.
//!
//! Regions are written as `vertex_{region}_{index}_x` / `_y` pairs
//! (`x` is across the image, `y` is up). A layer shift is written as
//! integer pixel fields `x` and `y`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::region::{Region, RegionSet};
use crate::vertex::Vertex;

/// Field name to value, in submission order.
pub type FormFields = IndexMap<String, f64>;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FieldsError {
    #[error("malformed vertex field name \"{0}\"")]
    BadName(String),
    #[error("vertex {region}/{index} is missing its {axis} coordinate")]
    MissingAxis {
        region: usize,
        index: usize,
        axis: char,
    },
    #[error("region {region} skips vertex index {index}")]
    Gap { region: usize, index: usize },
    #[error("region index {0} is missing")]
    MissingRegion(usize),
}

/// A layer registration offset in whole image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftOffset {
    pub x: i64,
    pub y: i64,
}

pub fn vertex_fields(regions: &RegionSet) -> FormFields {
    let mut fields = FormFields::with_capacity(regions.vertex_count() * 2);
    for (ri, region) in regions.iter().enumerate() {
        for (vi, v) in region.iter().enumerate() {
            fields.insert(format!("vertex_{ri}_{vi}_x"), v.x);
            fields.insert(format!("vertex_{ri}_{vi}_y"), v.y);
        }
    }
    fields
}

pub fn shift_fields(shift: ShiftOffset) -> FormFields {
    IndexMap::from([
        ("x".to_string(), shift.x as f64),
        ("y".to_string(), shift.y as f64),
    ])
}

/// Rebuild a region set from `vertex_*` fields. Other fields are ignored.
pub fn region_set_from_fields(fields: &FormFields) -> Result<RegionSet, FieldsError> {
    let mut grid: Vec<Vec<[Option<f64>; 2]>> = Vec::new();
    for (name, &value) in fields {
        let Some(rest) = name.strip_prefix("vertex_") else {
            continue;
        };
        let (region, index, axis) = parse_vertex_name(rest).ok_or_else(|| FieldsError::BadName(name.clone()))?;
        if grid.len() <= region {
            grid.resize_with(region + 1, Vec::new);
        }
        let vertices = &mut grid[region];
        if vertices.len() <= index {
            vertices.resize(index + 1, [None, None]);
        }
        vertices[index][axis] = Some(value);
    }

    let mut regions = Vec::with_capacity(grid.len());
    for (ri, vertices) in grid.into_iter().enumerate() {
        if vertices.is_empty() {
            return Err(FieldsError::MissingRegion(ri));
        }
        let mut region = Vec::with_capacity(vertices.len());
        for (vi, slot) in vertices.into_iter().enumerate() {
            let v = match slot {
                [Some(x), Some(y)] => Vertex::new(x, y),
                [None, None] => return Err(FieldsError::Gap { region: ri, index: vi }),
                [None, Some(_)] => return Err(FieldsError::MissingAxis { region: ri, index: vi, axis: 'x' }),
                [Some(_), None] => return Err(FieldsError::MissingAxis { region: ri, index: vi, axis: 'y' }),
            };
            region.push(v);
        }
        regions.push(Region::new(region));
    }
    Ok(RegionSet::new(regions))
}

fn parse_vertex_name(rest: &str) -> Option<(usize, usize, usize)> {
    let mut parts = rest.split('_');
    let region = parts.next()?.parse().ok()?;
    let index = parts.next()?.parse().ok()?;
    let axis = match parts.next()? {
        "x" => 0,
        "y" => 1,
        _ => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((region, index, axis))
}
