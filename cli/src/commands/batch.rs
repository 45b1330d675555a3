use std::path::PathBuf;

use anyhow::{Context, Result};
use parcelmass::{io, run_batch, AreaTierRule, FixedRule, FloorAreaRule, FrontageRule, MassingConfig, ParcelErrorPolicy};

use crate::cli::{BatchArgs, RuleKind};

pub fn run(_cli: &crate::cli::Cli, args: &BatchArgs) -> Result<()> {
    let out_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("outputs"));
    let config = resolve_config(args)?;

    let rule: Box<dyn FloorAreaRule> = match args.rule {
        RuleKind::Area => Box::new(AreaTierRule),
        RuleKind::Frontage => Box::new(FrontageRule),
        RuleKind::Fixed => Box::new(FixedRule(args.fixed_far)),
    };

    println!("[batch] loading parcels from {}", args.parcels.display());
    let parcels = io::read_parcels_geojson(&args.parcels)?;

    println!("[batch] massing {} parcels with rule '{}'", parcels.len(), rule.name());
    let output = run_batch(&parcels, rule.as_ref(), &config)
        .context("[batch] massing failed")?;

    for skipped in &output.skipped {
        eprintln!("[batch] skipped parcel {} (#{}): {}", skipped.id, skipped.index, skipped.reason);
    }

    let csv_path = out_dir.join(format!("result_{}.csv", rule.name()));
    io::write_rows_csv(&output.rows, &csv_path)?;
    println!("[batch] wrote {} rows to {}", output.rows.len(), csv_path.display());

    let geojson_path = out_dir.join(format!("buildings_{}.geojson", rule.name()));
    io::write_buildings_geojson(&output.buildings, &geojson_path)?;
    println!("[batch] wrote footprints to {}", geojson_path.display());

    let obj_path = out_dir.join(format!("massing_{}.obj", rule.name()));
    io::write_obj(&output.buildings, &obj_path)?;
    println!("[batch] wrote mesh to {}", obj_path.display());

    Ok(())
}

/// Config file (or defaults), with explicit flags layered on top.
fn resolve_config(args: &BatchArgs) -> Result<MassingConfig> {
    let mut config = match &args.config {
        Some(path) => MassingConfig::from_json_file(path)?,
        None => MassingConfig::default(),
    };

    if let Some(setback) = args.setback { config.setback = setback }
    if let Some(floor_height) = args.floor_height { config.floor_height = floor_height }
    if let Some(min_floors) = args.min_floors { config.min_floors = min_floors }
    if let Some(max_floors) = args.max_floors { config.max_floors = max_floors }
    if let Some(rounding) = args.rounding { config.rounding = rounding.into() }
    if args.skip_invalid { config.on_parcel_error = ParcelErrorPolicy::Skip }
    if args.parallel { config.parallel = true }

    config.validate().context("[batch] invalid configuration")?;
    Ok(config)
}
