#![doc = "ParcelMass public API: parcels and zoning ratios in, massed building volumes out."]
mod batch;
mod common;
mod config;
mod error;
mod geom;
mod massing;

pub mod io;
pub mod ratio;
pub mod rules;

#[doc(inline)]
pub use batch::{mass_parcel, run_batch, BatchOutput, Building, MassingRow, ParcelBoundary, SkippedParcel};

#[doc(inline)]
pub use config::{MassingConfig, ParcelErrorPolicy};

#[doc(inline)]
pub use error::{ConfigError, GeometryError, MassingError};

#[doc(inline)]
pub use geom::{derive_footprint, largest_polygon, BuildableFootprint, ParcelMetrics, MIN_AREA};

#[doc(inline)]
pub use massing::{compute_volume, extrude, size_floors, Face, FloorRounding, FloorSizing, FloorSpec, MassingResult, Vertex3, VolumeOptions};

#[doc(inline)]
pub use rules::{AreaTierRule, FixedRule, FloorAreaRule, FrontageRule};
