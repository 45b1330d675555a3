//! CSV export of per-parcel result rows.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{CsvWriter, NamedFrom}, series::Series};

use crate::batch::MassingRow;
use crate::common::ensure_parent_dir;

/// Column-wise view of the result rows, in output schema order.
pub fn rows_to_dataframe(rows: &[MassingRow]) -> Result<DataFrame> {
    fn col(rows: &[MassingRow], f: impl Fn(&MassingRow) -> f64) -> Vec<f64> {
        rows.iter().map(f).collect()
    }

    let df = DataFrame::new(vec![
        Series::new("id".into(), rows.iter().map(|r| r.id.clone()).collect::<Vec<String>>()).into(),
        Series::new("area".into(), col(rows, |r| r.area)).into(),
        Series::new("width".into(), col(rows, |r| r.width)).into(),
        Series::new("depth".into(), col(rows, |r| r.depth)).into(),
        Series::new("aspect_ratio".into(), col(rows, |r| r.aspect_ratio)).into(),
        Series::new("coverage_ratio".into(), col(rows, |r| r.coverage_ratio)).into(),
        Series::new("floor_area_ratio".into(), col(rows, |r| r.floor_area_ratio)).into(),
        Series::new("setback".into(), col(rows, |r| r.setback)).into(),
        Series::new("footprint_area".into(), col(rows, |r| r.footprint_area)).into(),
        Series::new("floor_count".into(), rows.iter().map(|r| r.floor_count).collect::<Vec<u32>>()).into(),
        Series::new("floor_height".into(), col(rows, |r| r.floor_height)).into(),
        Series::new("height".into(), col(rows, |r| r.height)).into(),
    ]).context("[io::csv] Failed to assemble result columns")?;

    Ok(df)
}

/// Write result rows to a CSV file, creating parent directories as needed.
pub fn write_rows_csv(rows: &[MassingRow], path: &Path) -> Result<()> {
    let mut df = rows_to_dataframe(rows)?;
    ensure_parent_dir(path)?;

    let file = File::create(path)
        .with_context(|| format!("[io::csv] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(&mut df)
        .with_context(|| format!("[io::csv] Failed to write CSV to {}", path.display()))
}

/// Render result rows as a CSV string.
pub fn write_rows_csv_string(rows: &[MassingRow]) -> Result<String> {
    let mut df = rows_to_dataframe(rows)?;
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .finish(&mut df)
        .context("[io::csv] Failed to write CSV to string")?;
    String::from_utf8(buffer).context("[io::csv] CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, floor_count: u32) -> MassingRow {
        MassingRow {
            id: id.to_string(),
            area: 2400.0,
            width: 60.0,
            depth: 40.0,
            aspect_ratio: 1.5,
            coverage_ratio: 0.6,
            floor_area_ratio: 3.0,
            setback: 3.0,
            footprint_area: 1440.0,
            floor_count,
            floor_height: 3.6,
            height: floor_count as f64 * 3.6,
        }
    }

    #[test]
    fn header_follows_schema() {
        let csv = write_rows_csv_string(&[row("a", 5), row("b", 2)]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,area,width,depth,aspect_ratio,coverage_ratio,floor_area_ratio,setback,footprint_area,floor_count,floor_height,height"
        );
        assert!(lines.next().unwrap().starts_with("a,"));
        assert!(lines.next().unwrap().starts_with("b,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn writes_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs/result.csv");
        write_rows_csv(&[row("a", 5)], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
