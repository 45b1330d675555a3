use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::massing::{FloorRounding, FloorSpec};

/// What the batch does when a single parcel cannot be massed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParcelErrorPolicy {
    /// Abort the whole batch on the first failing parcel.
    #[default]
    Raise,
    /// Record the parcel as skipped and continue.
    Skip,
}

/// Batch configuration. Every knob the pipeline uses lives here; there are no
/// ambient defaults elsewhere in the crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MassingConfig {
    /// Inward offset from the parcel boundary, in map units.
    pub setback: f64,
    pub floor_height: f64,
    pub min_floors: u32,
    /// Safety cap on floor count, not a zoning rule.
    pub max_floors: u32,
    pub default_coverage_ratio: f64,
    pub default_floor_area_ratio: f64,
    pub rounding: FloorRounding,
    pub on_parcel_error: ParcelErrorPolicy,
    pub parallel: bool,
    /// Attribute holding a per-parcel coverage override.
    pub coverage_key: String,
    /// Attribute holding a per-parcel floor-area override.
    pub floor_area_key: String,
}

impl Default for MassingConfig {
    fn default() -> Self {
        Self {
            setback: 0.5,
            floor_height: 3.6,
            min_floors: 1,
            max_floors: 60,
            default_coverage_ratio: 0.6,
            default_floor_area_ratio: 2.5,
            rounding: FloorRounding::Ceil,
            on_parcel_error: ParcelErrorPolicy::Raise,
            parallel: false,
            coverage_key: "building_r".to_string(),
            floor_area_key: "floor_r".to_string(),
        }
    }
}

impl MassingConfig {
    /// Load a (possibly partial) JSON configuration; missing fields take defaults,
    /// unknown fields are an error.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("[config] Failed to parse {}", path.display()))
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.floor_height > 0.0) || !self.floor_height.is_finite() {
            return Err(ConfigError::FloorHeight(self.floor_height));
        }
        if !(self.default_floor_area_ratio > 0.0) || !self.default_floor_area_ratio.is_finite() {
            return Err(ConfigError::DefaultFloorAreaRatio(self.default_floor_area_ratio));
        }
        if !(self.default_coverage_ratio > 0.0 && self.default_coverage_ratio <= 1.0) {
            return Err(ConfigError::DefaultCoverageRatio(self.default_coverage_ratio));
        }
        if self.min_floors < 1 {
            return Err(ConfigError::MinFloors(self.min_floors));
        }
        if self.max_floors < self.min_floors {
            return Err(ConfigError::MaxFloors { min: self.min_floors, max: self.max_floors });
        }
        if !(self.setback >= 0.0) || !self.setback.is_finite() {
            return Err(ConfigError::Setback(self.setback));
        }
        Ok(())
    }

    #[inline]
    pub fn floor_spec(&self) -> FloorSpec {
        FloorSpec {
            floor_height: self.floor_height,
            min_floors: self.min_floors,
            max_floors: self.max_floors,
            rounding: self.rounding,
        }
    }
}
