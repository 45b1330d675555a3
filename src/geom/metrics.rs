use geo::{Area, Centroid, Coord, MinimumRotatedRect, Polygon};

use crate::error::GeometryError;
use super::normalize::{ring_vertices, MIN_AREA};

/// Depths below this make the aspect ratio infinite.
const MIN_DEPTH: f64 = 1e-9;

/// Shape indicators of a single parcel.
///
/// `width` and `depth` are the long and short sides of the minimum-area
/// oriented bounding rectangle, so they do not depend on how the parcel is
/// rotated in the source coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParcelMetrics {
    pub area: f64,
    pub centroid: Coord<f64>,
    pub width: f64,
    pub depth: f64,
    pub aspect_ratio: f64,
}

impl ParcelMetrics {
    /// Compute metrics for a single-piece parcel boundary.
    /// Parcels with area at or below `MIN_AREA` are rejected.
    pub fn from_polygon(polygon: &Polygon<f64>) -> Result<Self, GeometryError> {
        let area = polygon.unsigned_area();
        if !area.is_finite() || area <= MIN_AREA {
            return Err(GeometryError::DegenerateParcel(area));
        }

        let centroid = polygon.centroid()
            .ok_or(GeometryError::DegenerateParcel(area))?
            .0;

        let rect = polygon.minimum_rotated_rect()
            .ok_or(GeometryError::DegenerateParcel(area))?;
        let corners = ring_vertices(&rect);
        if corners.len() < 3 {
            return Err(GeometryError::DegenerateParcel(area));
        }

        // Adjacent sides of a rectangle carry its only two distinct lengths.
        let e0 = distance(corners[0], corners[1]);
        let e1 = distance(corners[1], corners[2]);
        let (width, depth) = (e0.max(e1), e0.min(e1));

        let aspect_ratio = if depth > MIN_DEPTH { width / depth } else { f64::INFINITY };

        Ok(Self { area, centroid, width, depth, aspect_ratio })
    }
}

#[inline]
fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{polygon, Rect, Rotate};

    #[test]
    fn axis_aligned_rectangle() {
        let parcel = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 60.0, y: 40.0 }).to_polygon();
        let m = ParcelMetrics::from_polygon(&parcel).unwrap();

        assert_relative_eq!(m.area, 2400.0);
        assert_relative_eq!(m.centroid.x, 30.0);
        assert_relative_eq!(m.centroid.y, 20.0);
        assert_relative_eq!(m.width, 60.0, epsilon = 1e-9);
        assert_relative_eq!(m.depth, 40.0, epsilon = 1e-9);
        assert_relative_eq!(m.aspect_ratio, 1.5, epsilon = 1e-9);
    }

    #[test]
    fn rotation_does_not_change_dimensions() {
        let parcel = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 50.0, y: 10.0 }).to_polygon();
        let rotated = parcel.rotate_around_centroid(33.0);
        let m = ParcelMetrics::from_polygon(&rotated).unwrap();

        assert_relative_eq!(m.area, 500.0, epsilon = 1e-6);
        assert_relative_eq!(m.width, 50.0, epsilon = 1e-6);
        assert_relative_eq!(m.depth, 10.0, epsilon = 1e-6);
        assert_relative_eq!(m.aspect_ratio, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn triangle_uses_oriented_rectangle() {
        let parcel = polygon![(x: 0.0, y: 0.0), (x: 30.0, y: 0.0), (x: 0.0, y: 10.0)];
        let m = ParcelMetrics::from_polygon(&parcel).unwrap();

        assert_relative_eq!(m.area, 150.0);
        assert!(m.width >= m.depth);
        assert!(m.width * m.depth >= m.area);
    }

    #[test]
    fn zero_area_triangle_is_rejected() {
        let flat = polygon![(x: 0.0, y: 0.0), (x: 5.0, y: 5.0), (x: 10.0, y: 10.0)];
        assert!(matches!(
            ParcelMetrics::from_polygon(&flat),
            Err(GeometryError::DegenerateParcel(_))
        ));
    }
}
