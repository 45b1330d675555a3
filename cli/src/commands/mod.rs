pub mod batch;
pub mod volume;
