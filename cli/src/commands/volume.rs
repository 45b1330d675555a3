use anyhow::{ensure, Result};
use geo::{Coord, Rect};
use parcelmass::{compute_volume, extrude, VolumeOptions};

use crate::cli::VolumeArgs;

pub fn run(_cli: &crate::cli::Cli, args: &VolumeArgs) -> Result<()> {
    ensure!(args.width > 0.0 && args.depth > 0.0, "[volume] parcel width and depth must be positive");

    let parcel = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: args.width, y: args.depth }).to_polygon();
    let options = VolumeOptions {
        setback: args.setback,
        floor_height: args.floor_height,
        min_floors: args.min_floors,
        rounding: args.rounding.into(),
    };

    let result = compute_volume(&parcel, args.far, &options)?;
    let faces = extrude(&result.footprint.polygon, result.height)?;

    println!("Parcel area:    {:.2}", args.width * args.depth);
    println!("Buildable area: {:.2}", result.footprint_area);
    println!("Floors:         {}", result.floor_count);
    println!("Height:         {:.2}", result.height);
    println!("Faces:          {}", faces.len());

    Ok(())
}
