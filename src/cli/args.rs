use clap::Parser;
use std::path::PathBuf;

use ndvipro::{Colormap, CropSource};

#[derive(Parser)]
#[command(name = "ndvipro", version, about = "NDVIPRO CLI")]
pub struct CliArgs {
    /// Working directory holding data/ and output/
    #[arg(short, long)]
    pub work_dir: PathBuf,

    /// Acquisition date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Tile row (V) index
    #[arg(long)]
    pub tile_v: u32,

    /// Tile column (H) index
    #[arg(long)]
    pub tile_h: u32,

    /// Target pixel column; rounded to the nearest pixel
    #[arg(long, allow_negative_numbers = true)]
    pub img_x: f64,

    /// Target pixel row; rounded to the nearest pixel
    #[arg(long, allow_negative_numbers = true)]
    pub img_y: f64,

    /// Directory receiving the raw tiles extracted from the HDF5 container
    #[arg(long)]
    pub container_dir: PathBuf,

    /// JSON file with pipeline parameters (missing fields keep defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip extraction and use raw tiles already on disk
    #[arg(long, default_value_t = false)]
    pub skip_extract: bool,

    /// Source of the cropped red/nir products (ndvi reproduces the reference run)
    #[arg(long, value_enum)]
    pub crop_source: Option<CropSource>,

    /// Color ramp for all products
    #[arg(long, value_enum)]
    pub colormap: Option<Colormap>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
