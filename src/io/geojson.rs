//! GeoJSON parcel ingestion and footprint export.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{json, Map, Value};

use crate::batch::{Building, ParcelBoundary};
use crate::common::ensure_parent_dir;
use crate::geom::largest_polygon;

/// Read parcels from a GeoJSON FeatureCollection file.
pub fn read_parcels_geojson(path: &Path) -> Result<Vec<ParcelBoundary>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("[io::geojson] Failed to read {}", path.display()))?;
    parse_parcels_geojson(&text)
        .with_context(|| format!("[io::geojson] Failed to load parcels from {}", path.display()))
}

/// Parse parcels from GeoJSON text.
///
/// Polygon and MultiPolygon features become parcels (largest piece kept).
/// Features without geometry, with non-areal geometry, or with no area are
/// dropped. It is an error for nothing to survive.
pub fn parse_parcels_geojson(text: &str) -> Result<Vec<ParcelBoundary>> {
    let value: Value = serde_json::from_str(text).context("[io::geojson] Invalid JSON")?;
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson] Expected a FeatureCollection with a 'features' array"))?;

    let mut parcels = Vec::with_capacity(features.len());
    let mut type_counts: BTreeMap<String, usize> = BTreeMap::new();

    for (idx, feature) in features.iter().enumerate() {
        let Some(geometry) = feature.get("geometry").filter(|g| !g.is_null()) else { continue };

        let ty = geometry["type"].as_str().unwrap_or("Unknown");
        *type_counts.entry(ty.to_string()).or_default() += 1;

        let coords = geometry["coordinates"].as_array();
        let shape = match (ty, coords) {
            ("Polygon", Some(rings)) => MultiPolygon(vec![parse_polygon_coords(rings)?]),
            ("MultiPolygon", Some(polys)) => parse_multipolygon_coords(polys)?,
            _ => continue,
        };

        let Some(polygon) = largest_polygon(&shape) else { continue };

        let attributes = match feature.get("properties") {
            Some(Value::Object(props)) => props.clone(),
            _ => Map::new(),
        };
        let id = feature_id(feature, &attributes).unwrap_or_else(|| idx.to_string());

        parcels.push(ParcelBoundary { id, geometry: MultiPolygon(vec![polygon]), attributes });
    }

    if parcels.is_empty() {
        bail!("[io::geojson] No Polygon/MultiPolygon found. Geometry types in file: {type_counts:?}");
    }

    tracing::debug!(parcels = parcels.len(), features = features.len(), "parsed parcels");
    Ok(parcels)
}

/// Parcel id: `id` property, then `ID`, then the feature's own id.
fn feature_id(feature: &Value, props: &Map<String, Value>) -> Option<String> {
    [props.get("id"), props.get("ID"), feature.get("id")]
        .into_iter()
        .flatten()
        .find_map(|value| match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
}

/// Parse `[[ring], [hole], ...]` into a Polygon.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        ring.as_array()
            .ok_or_else(|| anyhow!("[io::geojson] Polygon ring must be an array"))
            .and_then(|coords| parse_ring_coords(coords))
    });

    let exterior = rings.next()
        .ok_or_else(|| anyhow!("[io::geojson] Polygon is missing its exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Parse `[[[ring], ...], ...]` into a MultiPolygon.
fn parse_multipolygon_coords(polygons: &[Value]) -> Result<MultiPolygon<f64>> {
    polygons.iter()
        .map(|polygon| {
            polygon.as_array()
                .ok_or_else(|| anyhow!("[io::geojson] MultiPolygon member must be an array"))
                .and_then(|rings| parse_polygon_coords(rings))
        })
        .collect::<Result<Vec<_>>>()
        .map(MultiPolygon)
}

/// Parse a ring `[[x, y], ...]`, closing it if needed.
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len() + 1);

    for pair in coords {
        let pair = pair.as_array()
            .filter(|p| p.len() >= 2)
            .ok_or_else(|| anyhow!("[io::geojson] Position must be an array of at least 2 numbers"))?;
        let x = pair[0].as_f64()
            .ok_or_else(|| anyhow!("[io::geojson] Invalid coordinate: x must be a number"))?;
        let y = pair[1].as_f64()
            .ok_or_else(|| anyhow!("[io::geojson] Invalid coordinate: y must be a number"))?;
        points.push(Coord { x, y });
    }

    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}

/// Footprints as a GeoJSON FeatureCollection with `id` and `height` properties.
pub fn buildings_to_geojson_bytes(buildings: &[Building]) -> Result<Vec<u8>> {
    let ring = |ls: &LineString<f64>| ls.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>();

    let features: Vec<Value> = buildings.iter().map(|building| {
        let mut rings = vec![ring(building.footprint.exterior())];
        rings.extend(building.footprint.interiors().iter().map(ring));

        json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": rings,
            },
            "properties": {
                "id": building.id,
                "height": building.height,
            }
        })
    }).collect();

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    serde_json::to_vec(&collection).context("[io::geojson] Failed to serialize buildings")
}

/// Write building footprints to a GeoJSON file.
pub fn write_buildings_geojson(buildings: &[Building], path: &Path) -> Result<()> {
    let bytes = buildings_to_geojson_bytes(buildings)?;
    ensure_parent_dir(path)?;
    fs::write(path, bytes)
        .with_context(|| format!("[io::geojson] Failed to write {}", path.display()))
}
