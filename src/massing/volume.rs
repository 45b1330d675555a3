use geo::{Area, Polygon};

use crate::error::{ConfigError, GeometryError, MassingError};
use crate::geom::{inward_offset, BuildableFootprint, MIN_AREA};
use super::sizing::{size_floors, FloorRounding, FloorSpec};

/// Floors and height computed for one footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct MassingResult {
    pub floor_count: u32,
    pub height: f64,
    pub footprint_area: f64,
    pub footprint: BuildableFootprint,
}

/// Options for a single-parcel massing study.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeOptions {
    pub setback: f64,
    pub floor_height: f64,
    pub min_floors: u32,
    pub rounding: FloorRounding,
}

impl Default for VolumeOptions {
    fn default() -> Self {
        Self { setback: 0.0, floor_height: 3.0, min_floors: 1, rounding: FloorRounding::Ceil }
    }
}

/// Mass a single parcel with no coverage target: the whole setback region is
/// built on, and floors are stacked until the floor-area budget is spent.
///
/// Unlike the batch pipeline there is no fallback here: a setback that leaves
/// nothing to build on is an error.
pub fn compute_volume(parcel: &Polygon<f64>, floor_area_ratio: f64, options: &VolumeOptions) -> Result<MassingResult, MassingError> {
    if !(floor_area_ratio > 0.0) {
        return Err(ConfigError::FloorAreaRatio(floor_area_ratio).into());
    }
    if !(options.floor_height > 0.0) || !options.floor_height.is_finite() {
        return Err(ConfigError::FloorHeight(options.floor_height).into());
    }
    if options.min_floors < 1 {
        return Err(ConfigError::MinFloors(options.min_floors).into());
    }
    if !(options.setback >= 0.0) || !options.setback.is_finite() {
        return Err(ConfigError::Setback(options.setback).into());
    }

    let region = inward_offset(parcel, options.setback)
        .ok_or_else(|| GeometryError::EmptyFootprint(format!("setback {} consumes the parcel", options.setback)))?;

    let plot_area = parcel.unsigned_area();
    let footprint_area = region.unsigned_area();
    if footprint_area <= MIN_AREA {
        return Err(GeometryError::EmptyFootprint(format!("area {footprint_area}")).into());
    }

    let spec = FloorSpec {
        floor_height: options.floor_height,
        min_floors: options.min_floors,
        max_floors: u32::MAX,
        rounding: options.rounding,
    };
    let sizing = size_floors(plot_area, floor_area_ratio, footprint_area, &spec);

    Ok(MassingResult {
        floor_count: sizing.floor_count,
        height: sizing.height,
        footprint_area,
        footprint: BuildableFootprint { polygon: region, area: footprint_area, setback_area: footprint_area },
    })
}
