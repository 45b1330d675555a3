use thiserror::Error;

/// Caller configuration problems. Raised once, before any parcel is processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("floor height must be positive, got {0}")]
    FloorHeight(f64),

    #[error("default floor-area ratio must be positive, got {0}")]
    DefaultFloorAreaRatio(f64),

    #[error("default coverage ratio must lie in (0, 1], got {0}")]
    DefaultCoverageRatio(f64),

    #[error("floor-area ratio must be positive, got {0}")]
    FloorAreaRatio(f64),

    #[error("minimum floor count must be at least 1, got {0}")]
    MinFloors(u32),

    #[error("maximum floor count {max} is below minimum {min}")]
    MaxFloors { min: u32, max: u32 },

    #[error("setback must be a non-negative distance, got {0}")]
    Setback(f64),
}

/// Geometric failures scoped to a single parcel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("degenerate parcel geometry (area {0})")]
    DegenerateParcel(f64),

    #[error("buildable footprint is empty: {0}")]
    EmptyFootprint(String),

    #[error("footprint has {0} distinct vertices, at least 3 are required")]
    TooFewVertices(usize),

    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),
}

/// Errors surfaced by a massing run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MassingError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("parcel '{id}': {source}")]
    Parcel {
        id: String,
        #[source]
        source: GeometryError,
    },
}
