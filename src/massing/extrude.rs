//! Extrusion of flat footprints into closed prisms.

use geo::{Coord, Polygon};
use serde::Serialize;

use crate::error::GeometryError;
use crate::geom::ring_vertices;

/// A point in model space; `z` is elevation above ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vertex3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex3 {
    #[inline]
    fn at(c: Coord<f64>, z: f64) -> Self { Self { x: c.x, y: c.y, z } }
}

/// A planar ring of at least three vertices, implicitly closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Face(pub Vec<Vertex3>);

impl Face {
    #[inline] pub fn vertices(&self) -> &[Vertex3] { &self.0 }

    #[inline] pub fn len(&self) -> usize { self.0.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// Lift a footprint into the faces of a prism of the given height.
///
/// Face order is: bottom cap at z = 0 in the footprint's winding, top cap at
/// z = `height` in reversed winding, then one quad per boundary edge. Interior
/// rings are ignored. The result always holds `n + 2` faces for `n` exterior
/// vertices.
pub fn extrude(footprint: &Polygon<f64>, height: f64) -> Result<Vec<Face>, GeometryError> {
    if !(height > 0.0) || !height.is_finite() {
        return Err(GeometryError::NonPositiveHeight(height));
    }

    let ring = ring_vertices(footprint);
    let n = ring.len();
    if n < 3 {
        return Err(GeometryError::TooFewVertices(n));
    }

    let bottom: Vec<Vertex3> = ring.iter().map(|&c| Vertex3::at(c, 0.0)).collect();
    let top: Vec<Vertex3> = ring.iter().map(|&c| Vertex3::at(c, height)).collect();

    let mut faces = Vec::with_capacity(n + 2);
    faces.push(Face(bottom.clone()));
    faces.push(Face(top.iter().rev().copied().collect()));

    for i in 0..n {
        let j = (i + 1) % n;
        faces.push(Face(vec![bottom[i], bottom[j], top[j], top[i]]));
    }

    Ok(faces)
}
