use rayon::prelude::*;
use serde_json::Value;

use crate::config::{MassingConfig, ParcelErrorPolicy};
use crate::error::{GeometryError, MassingError};
use crate::geom::{derive_footprint, largest_polygon, ParcelMetrics};
use crate::massing::{extrude, size_floors};
use crate::ratio;
use crate::rules::FloorAreaRule;
use super::parcel::{BatchOutput, Building, MassingRow, ParcelBoundary, SkippedParcel};

/// Mass every parcel, in input order.
///
/// The configuration is validated once up front. Per-parcel geometric
/// failures either abort the batch or are recorded in `skipped`, depending on
/// `config.on_parcel_error`. Parallel and sequential runs produce identical output.
pub fn run_batch(parcels: &[ParcelBoundary], rule: &dyn FloorAreaRule, config: &MassingConfig) -> Result<BatchOutput, MassingError> {
    config.validate()?;

    let results: Vec<Result<(MassingRow, Building), GeometryError>> = if config.parallel {
        parcels.par_iter().map(|parcel| mass_parcel(parcel, rule, config)).collect()
    } else {
        parcels.iter().map(|parcel| mass_parcel(parcel, rule, config)).collect()
    };

    let mut output = BatchOutput::default();
    for (index, (parcel, result)) in parcels.iter().zip(results).enumerate() {
        match result {
            Ok((row, building)) => {
                output.rows.push(row);
                output.buildings.push(building);
            }
            Err(source) => match config.on_parcel_error {
                ParcelErrorPolicy::Raise => {
                    return Err(MassingError::Parcel { id: parcel.id.clone(), source });
                }
                ParcelErrorPolicy::Skip => {
                    tracing::warn!(index, id = %parcel.id, error = %source, "skipping parcel");
                    output.skipped.push(SkippedParcel { index, id: parcel.id.clone(), reason: source.to_string() });
                }
            },
        }
    }

    tracing::info!(
        parcels = parcels.len(),
        buildings = output.buildings.len(),
        skipped = output.skipped.len(),
        rule = rule.name(),
        "batch complete"
    );

    Ok(output)
}

/// Run the full derivation for one parcel. Assumes a validated configuration.
pub fn mass_parcel(parcel: &ParcelBoundary, rule: &dyn FloorAreaRule, config: &MassingConfig) -> Result<(MassingRow, Building), GeometryError> {
    let boundary = largest_polygon(&parcel.geometry)
        .ok_or(GeometryError::DegenerateParcel(0.0))?;
    let metrics = ParcelMetrics::from_polygon(&boundary)?;

    let coverage_ratio = ratio::coverage_ratio(
        parcel.attributes.get(&config.coverage_key),
        config.default_coverage_ratio,
    );
    let floor_area_ratio = resolve_floor_area_ratio(parcel, &metrics, rule, config);

    let footprint = derive_footprint(&boundary, coverage_ratio, config.setback)?;
    let sizing = size_floors(metrics.area, floor_area_ratio, footprint.area, &config.floor_spec());
    let faces = extrude(&footprint.polygon, sizing.height)?;

    tracing::debug!(
        id = %parcel.id,
        coverage_ratio,
        floor_area_ratio,
        footprint_area = footprint.area,
        floor_count = sizing.floor_count,
        "massed parcel"
    );

    let row = MassingRow {
        id: parcel.id.clone(),
        area: metrics.area,
        width: metrics.width,
        depth: metrics.depth,
        aspect_ratio: metrics.aspect_ratio,
        coverage_ratio,
        floor_area_ratio,
        setback: config.setback,
        footprint_area: footprint.area,
        floor_count: sizing.floor_count,
        floor_height: config.floor_height,
        height: sizing.height,
    };
    let building = Building {
        id: parcel.id.clone(),
        footprint: footprint.polygon,
        height: sizing.height,
        faces,
    };

    Ok((row, building))
}

/// Attribute first, then the rule, then the configured default.
fn resolve_floor_area_ratio(parcel: &ParcelBoundary, metrics: &ParcelMetrics, rule: &dyn FloorAreaRule, config: &MassingConfig) -> f64 {
    match parcel.attributes.get(&config.floor_area_key) {
        Some(value) if !is_blank(value) => ratio::floor_area_ratio(Some(value), config.default_floor_area_ratio),
        _ => match rule.floor_area_ratio(metrics) {
            Ok(far) if far.is_finite() && far > 0.0 => far,
            Ok(far) => {
                tracing::debug!(id = %parcel.id, far, rule = rule.name(), "rule returned unusable ratio, using default");
                config.default_floor_area_ratio
            }
            Err(e) => {
                tracing::debug!(id = %parcel.id, error = %e, rule = rule.name(), "rule failed, using default");
                config.default_floor_area_ratio
            }
        },
    }
}

/// Missing-equivalent attribute values.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
