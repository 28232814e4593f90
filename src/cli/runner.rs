use chrono::NaiveDate;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ndvipro::{
    AcquisitionLayout, ExtractOutcome, PipelineParams, PixelCoord, TileId, process_acquisition,
};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_coord(value: f64) -> Result<f64, AppError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::InvalidCoordinate { value })
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let date = NaiveDate::parse_from_str(&args.date, "%Y-%m-%d").map_err(|_| {
        AppError::InvalidDate {
            date: args.date.clone(),
        }
    })?;
    let center = PixelCoord::from_f64(parse_coord(args.img_x)?, parse_coord(args.img_y)?);

    let mut params = match &args.config {
        Some(path) => PipelineParams::from_json_file(path).map_err(AppError::from)?,
        None => PipelineParams::default(),
    };
    if let Some(source) = args.crop_source {
        params.crop_source = source;
    }
    if let Some(map) = args.colormap {
        params.colormap = map;
    }

    let layout = AcquisitionLayout::new(
        &args.work_dir,
        date,
        TileId {
            v: args.tile_v,
            h: args.tile_h,
        },
    );
    info!(
        "Processing {} tile T{:02}{:02}, target ({}, {})",
        date, args.tile_v, args.tile_h, center.x, center.y
    );

    let raw_dir = (!args.skip_extract).then_some(args.container_dir.as_path());
    let report = process_acquisition(&layout, raw_dir, Some(center), &params)
        .map_err(AppError::from)?;

    for (band, outcome) in &report.extracted {
        if *outcome == ExtractOutcome::NotFound {
            warn!("{} band was not extracted", band);
        }
    }
    for path in &report.images {
        info!("Wrote {:?}", path);
    }
    Ok(())
}
