use serde::{Deserialize, Serialize};

use crate::geom::MIN_AREA;

/// Relative distance from an integer within which a floor ratio counts as exact.
const INTEGER_SNAP: f64 = 1e-9;

/// How a fractional floor count is turned into whole floors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloorRounding {
    /// Round up, so the permitted floor area is never under-delivered.
    #[default]
    Ceil,
    /// Truncate, so the permitted floor area is never exceeded.
    Floor,
}

/// Floor sizing parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloorSpec {
    pub floor_height: f64,
    pub min_floors: u32,
    pub max_floors: u32,
    pub rounding: FloorRounding,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloorSizing {
    pub floor_count: u32,
    pub height: f64,
}

/// Convert a floor-area budget into a clamped floor count and height.
///
/// `max_floors` is a safety rail against a malformed parcel producing an
/// absurd tower, not a zoning rule. Callers validate `spec` up front.
pub fn size_floors(parcel_area: f64, floor_area_ratio: f64, footprint_area: f64, spec: &FloorSpec) -> FloorSizing {
    let total_floor_area = parcel_area * floor_area_ratio;
    let ratio = total_floor_area / footprint_area.max(MIN_AREA);

    let raw = match spec.rounding {
        FloorRounding::Ceil => snap_to_integer(ratio).ceil(),
        FloorRounding::Floor => snap_to_integer(ratio).floor(),
    };

    // `as` saturates negatives to 0; NaN must not reach `min`, which would pick the cap.
    let raw = if raw.is_nan() { 0.0 } else { raw };
    let floor_count = (raw.min(spec.max_floors as f64) as u32).max(spec.min_floors);

    FloorSizing { floor_count, height: floor_count as f64 * spec.floor_height }
}

/// Remove float noise around whole numbers so `ceil(5.000000000001)` stays 5.
fn snap_to_integer(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() <= INTEGER_SNAP * nearest.abs().max(1.0) { nearest } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(min_floors: u32, max_floors: u32, rounding: FloorRounding) -> FloorSpec {
        FloorSpec { floor_height: 3.6, min_floors, max_floors, rounding }
    }

    #[test]
    fn ceiling_covers_permitted_area() {
        let s = size_floors(2400.0, 3.0, 1440.0, &spec(1, 60, FloorRounding::Ceil));
        assert_eq!(s.floor_count, 5);
        assert_eq!(s.height, 5.0 * 3.6);

        let s = size_floors(2400.0, 3.0, 1400.0, &spec(1, 60, FloorRounding::Ceil));
        assert_eq!(s.floor_count, 6);
    }

    #[test]
    fn truncation_is_explicit() {
        let s = size_floors(2400.0, 3.0, 1400.0, &spec(1, 60, FloorRounding::Floor));
        assert_eq!(s.floor_count, 5);
    }

    #[test]
    fn float_noise_does_not_add_a_floor() {
        let s = size_floors(2400.0, 3.0, 1440.0 - 1e-10, &spec(1, 60, FloorRounding::Ceil));
        assert_eq!(s.floor_count, 5);
        let s = size_floors(2400.0, 3.0, 1440.0 + 1e-10, &spec(1, 60, FloorRounding::Floor));
        assert_eq!(s.floor_count, 5);
    }

    #[test]
    fn clamped_to_limits() {
        let tall = size_floors(1000.0, 50.0, 10.0, &spec(1, 60, FloorRounding::Ceil));
        assert_eq!(tall.floor_count, 60);

        let empty = size_floors(1000.0, 0.0, 500.0, &spec(2, 60, FloorRounding::Ceil));
        assert_eq!(empty.floor_count, 2);
        assert_eq!(empty.height, 2.0 * 3.6);

        let unbounded = size_floors(1000.0, f64::INFINITY, 500.0, &spec(1, 60, FloorRounding::Ceil));
        assert_eq!(unbounded.floor_count, 60);
    }

    #[test]
    fn height_is_exact_multiple() {
        for fp in [100.0, 333.3, 999.0] {
            let s = size_floors(1000.0, 2.5, fp, &spec(1, 60, FloorRounding::Ceil));
            assert_eq!(s.height, s.floor_count as f64 * 3.6);
        }
    }
}
