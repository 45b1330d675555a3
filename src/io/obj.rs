//! Wavefront OBJ export of massed buildings.

use std::{collections::HashMap, fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use geo::{Coord, LineString, Polygon, TriangulateEarcut};

use crate::batch::Building;
use crate::common::ensure_parent_dir;
use crate::massing::{Face, Vertex3};

/// Write all building faces as a single triangulated OBJ mesh.
pub fn write_obj(buildings: &[Building], path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path)
        .with_context(|| format!("[io::obj] Failed to create {}", path.display()))?;
    write_obj_to(buildings, BufWriter::new(file))
        .with_context(|| format!("[io::obj] Failed to write {}", path.display()))
}

/// Write an OBJ mesh to any writer.
///
/// Horizontal faces (the caps, which may be concave) are ear-clipped; the
/// remaining faces are side quads and are split along a diagonal. Triangles
/// keep the winding of their face. Identical vertices are shared and
/// triangles that collapse after merging are dropped. Each building becomes
/// its own `g` group.
pub fn write_obj_to<W: Write>(buildings: &[Building], mut out: W) -> Result<()> {
    let mut mesh = MeshBuilder::default();
    let groups: Vec<(&str, Vec<[usize; 3]>)> = buildings.iter()
        .map(|building| {
            let mut triangles = Vec::new();
            for face in &building.faces {
                for [a, b, c] in triangulate(face) {
                    let tri = [mesh.vertex(a), mesh.vertex(b), mesh.vertex(c)];
                    if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                        triangles.push(tri);
                    }
                }
            }
            (building.id.as_str(), triangles)
        })
        .collect();

    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for (id, triangles) in groups {
        writeln!(out, "g {}", sanitize(id))?;
        for [a, b, c] in triangles {
            // OBJ indices are 1-based.
            writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1)?;
        }
    }
    out.flush()?;

    Ok(())
}

/// Split a planar face into triangles.
fn triangulate(face: &Face) -> Vec<[Vertex3; 3]> {
    let vertices = face.vertices();
    let Some(first) = vertices.first() else { return Vec::new() };

    if !vertices.iter().all(|v| v.z == first.z) {
        return (1..vertices.len().saturating_sub(1))
            .map(|i| [vertices[0], vertices[i], vertices[i + 1]])
            .collect();
    }

    let z = first.z;
    let ring: Vec<Coord<f64>> = vertices.iter().map(|v| Coord { x: v.x, y: v.y }).collect();
    let winding = signed_area(&ring).signum();
    let lift = |c: Coord<f64>| Vertex3 { x: c.x, y: c.y, z };

    Polygon::new(LineString::new(ring), vec![])
        .earcut_triangles_iter()
        .map(|triangle| {
            let [a, b, c] = triangle.to_array();
            if signed_area(&[a, b, c]).signum() == winding {
                [lift(a), lift(b), lift(c)]
            } else {
                [lift(a), lift(c), lift(b)]
            }
        })
        .collect()
}

/// Shoelace area of an open ring; positive when counter-clockwise.
fn signed_area(ring: &[Coord<f64>]) -> f64 {
    let n = ring.len();
    (0..n).map(|i| {
        let (p, q) = (ring[i], ring[(i + 1) % n]);
        p.x * q.y - q.x * p.y
    }).sum::<f64>() / 2.0
}

#[derive(Default)]
struct MeshBuilder {
    vertices: Vec<Vertex3>,
    index: HashMap<[u64; 3], usize>,
}

impl MeshBuilder {
    /// Index of `v`, inserting it on first sight.
    fn vertex(&mut self, v: Vertex3) -> usize {
        // +0.0 and -0.0 must merge.
        let key = [v.x, v.y, v.z].map(|c| if c == 0.0 { 0u64 } else { c.to_bits() });
        *self.index.entry(key).or_insert_with(|| {
            self.vertices.push(v);
            self.vertices.len() - 1
        })
    }
}

/// OBJ group names end at whitespace.
fn sanitize(id: &str) -> String {
    id.split_whitespace().collect::<Vec<_>>().join("_")
}
