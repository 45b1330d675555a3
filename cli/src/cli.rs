use std::path::PathBuf;

/// Parcel massing CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "parcelmass", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Mass every parcel in a GeoJSON file and export rows, footprints and a mesh
    Batch(BatchArgs),

    /// Mass a single rectangular demo parcel and print the result
    Volume(VolumeArgs),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum RuleKind { Area, Frontage, Fixed }

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum Rounding { Ceil, Floor }

impl From<Rounding> for parcelmass::FloorRounding {
    fn from(value: Rounding) -> Self {
        match value {
            Rounding::Ceil => parcelmass::FloorRounding::Ceil,
            Rounding::Floor => parcelmass::FloorRounding::Floor,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct BatchArgs {
    /// Input parcel boundaries (GeoJSON FeatureCollection)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub parcels: PathBuf,

    /// Output directory, defaults to "./outputs"
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// JSON configuration file; flags below override its values
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Floor-area rule used when a parcel has no floor-area attribute
    #[arg(short, long, value_enum, default_value_t = RuleKind::Area)]
    pub rule: RuleKind,

    /// Ratio for `--rule fixed`
    #[arg(long, default_value_t = 2.5)]
    pub fixed_far: f64,

    /// Inward setback from the parcel boundary
    #[arg(long)]
    pub setback: Option<f64>,

    /// Storey height
    #[arg(long)]
    pub floor_height: Option<f64>,

    #[arg(long)]
    pub min_floors: Option<u32>,

    /// Safety cap on floor count
    #[arg(long)]
    pub max_floors: Option<u32>,

    #[arg(long, value_enum)]
    pub rounding: Option<Rounding>,

    /// Skip parcels that cannot be massed instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Process parcels on all cores
    #[arg(long)]
    pub parallel: bool,
}

#[derive(clap::Args, Debug)]
pub struct VolumeArgs {
    /// Parcel width
    #[arg(long, default_value_t = 60.0)]
    pub width: f64,

    /// Parcel depth
    #[arg(long, default_value_t = 40.0)]
    pub depth: f64,

    /// Floor-area ratio
    #[arg(long, default_value_t = 3.0)]
    pub far: f64,

    #[arg(long, default_value_t = 3.0)]
    pub setback: f64,

    #[arg(long, default_value_t = 3.6)]
    pub floor_height: f64,

    #[arg(long, default_value_t = 1)]
    pub min_floors: u32,

    #[arg(long, value_enum, default_value_t = Rounding::Ceil)]
    pub rounding: Rounding,
}
