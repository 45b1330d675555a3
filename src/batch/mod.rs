mod parcel;
mod run;

pub use parcel::{BatchOutput, Building, MassingRow, ParcelBoundary, SkippedParcel};
pub use run::{mass_parcel, run_batch};
