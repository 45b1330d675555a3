//! Boundary adapters: parcel ingestion and result export.

mod csv;
mod geojson;
mod obj;

pub use csv::{rows_to_dataframe, write_rows_csv, write_rows_csv_string};
pub use geojson::{buildings_to_geojson_bytes, parse_parcels_geojson, read_parcels_geojson, write_buildings_geojson};
pub use obj::{write_obj, write_obj_to};
