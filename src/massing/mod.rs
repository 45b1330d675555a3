mod extrude;
mod sizing;
mod volume;

pub use extrude::{extrude, Face, Vertex3};
pub use sizing::{size_floors, FloorRounding, FloorSizing, FloorSpec};
pub use volume::{compute_volume, MassingResult, VolumeOptions};
