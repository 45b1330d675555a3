use geo::{MultiPolygon, Polygon};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::massing::Face;

/// One input parcel: identifier, boundary, and its raw attribute table.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelBoundary {
    pub id: String,
    /// Multi-piece boundaries are reduced to their largest piece.
    pub geometry: MultiPolygon<f64>,
    pub attributes: Map<String, Value>,
}

impl ParcelBoundary {
    pub fn new(id: impl Into<String>, geometry: impl Into<MultiPolygon<f64>>) -> Self {
        Self { id: id.into(), geometry: geometry.into(), attributes: Map::new() }
    }

    /// Builder-style attribute insertion.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Per-parcel result record. Field order is the tabular output schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassingRow {
    pub id: String,
    pub area: f64,
    pub width: f64,
    pub depth: f64,
    pub aspect_ratio: f64,
    pub coverage_ratio: f64,
    pub floor_area_ratio: f64,
    pub setback: f64,
    pub footprint_area: f64,
    pub floor_count: u32,
    pub floor_height: f64,
    pub height: f64,
}

/// A massed building, ready for rendering or export.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub id: String,
    pub footprint: Polygon<f64>,
    pub height: f64,
    pub faces: Vec<Face>,
}

/// A parcel dropped under the skip policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedParcel {
    /// Position in the input sequence.
    pub index: usize,
    pub id: String,
    pub reason: String,
}

/// Index-aligned rows and buildings, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutput {
    pub rows: Vec<MassingRow>,
    pub buildings: Vec<Building>,
    pub skipped: Vec<SkippedParcel>,
}

impl BatchOutput {
    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}
