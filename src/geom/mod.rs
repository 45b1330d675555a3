mod footprint;
mod metrics;
mod normalize;

pub use footprint::{derive_footprint, BuildableFootprint};
pub(crate) use footprint::inward_offset;
pub use metrics::ParcelMetrics;
pub use normalize::{largest_polygon, ring_vertices, MIN_AREA};
