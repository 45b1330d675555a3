use geo::{Area, Coord, MultiPolygon, Polygon};

/// Areas at or below this are treated as numerically empty.
pub const MIN_AREA: f64 = 1e-9;

/// Reduce a (possibly multi-piece) geometry to its largest non-empty piece.
///
/// Used identically by parcel ingestion, footprint derivation and extrusion,
/// so every stage agrees on which piece "is" the parcel.
pub fn largest_polygon(geom: &MultiPolygon<f64>) -> Option<Polygon<f64>> {
    geom.0.iter()
        .map(|polygon| (polygon, polygon.unsigned_area()))
        .filter(|(_, area)| area.is_finite() && *area > MIN_AREA)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(polygon, _)| polygon.clone())
}

/// Exterior ring vertices in winding order, without the closing duplicate.
pub fn ring_vertices(polygon: &Polygon<f64>) -> Vec<Coord<f64>> {
    let mut coords = polygon.exterior().0.clone();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    coords
}
