use geo::{Area, Buffer, Centroid, Polygon, Scale};

use crate::error::GeometryError;
use super::normalize::{largest_polygon, MIN_AREA};

/// The outline a building may legally occupy on one parcel.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildableFootprint {
    pub polygon: Polygon<f64>,
    pub area: f64,
    /// Area of the setback-limited region the footprint was shrunk from.
    pub setback_area: f64,
}

/// Derive the buildable footprint of a parcel.
///
/// The setback is a hard boundary and the coverage ratio a soft area target:
/// the setback region is only ever shrunk to meet the target, never grown.
/// A setback that consumes the whole parcel is ignored, and a target that
/// scales to nothing leaves the full setback region in place.
pub fn derive_footprint(parcel: &Polygon<f64>, coverage_ratio: f64, setback: f64) -> Result<BuildableFootprint, GeometryError> {
    let parcel_area = parcel.unsigned_area().max(MIN_AREA);

    let region = setback_region(parcel, setback);
    let setback_area = region.unsigned_area();

    let target_area = parcel_area * coverage_ratio;
    let polygon = match scale_to_area(&region, target_area) {
        Some(scaled) => scaled,
        None => {
            tracing::debug!(target_area, setback_area, "coverage scaling degenerate, keeping setback region");
            region
        }
    };

    let area = polygon.unsigned_area();
    if !area.is_finite() || area <= MIN_AREA {
        return Err(GeometryError::EmptyFootprint(format!("area {area} after setback {setback}")));
    }

    Ok(BuildableFootprint { polygon, area, setback_area })
}

/// Offset the parcel inward by `setback`, keeping the largest remaining piece.
/// Returns `None` when nothing survives.
pub(crate) fn inward_offset(parcel: &Polygon<f64>, setback: f64) -> Option<Polygon<f64>> {
    if setback <= 0.0 { return Some(parcel.clone()) }
    largest_polygon(&parcel.buffer(-setback))
}

/// The setback region, falling back to the unshrunk parcel when the setback consumes it.
fn setback_region(parcel: &Polygon<f64>, setback: f64) -> Polygon<f64> {
    inward_offset(parcel, setback).unwrap_or_else(|| {
        tracing::debug!(setback, "setback leaves no buildable area, using parcel boundary");
        parcel.clone()
    })
}

/// Uniformly shrink `polygon` about its centroid so its area matches `target_area`.
/// Returns `None` when the result would be degenerate.
fn scale_to_area(polygon: &Polygon<f64>, target_area: f64) -> Option<Polygon<f64>> {
    let area = polygon.unsigned_area();
    if area <= MIN_AREA || !(target_area > MIN_AREA) { return None }

    let factor = (target_area / area).min(1.0).sqrt();
    let origin = polygon.centroid()?;
    let scaled = polygon.scale_around_point(factor, factor, origin);

    (scaled.unsigned_area() > MIN_AREA).then_some(scaled)
}
