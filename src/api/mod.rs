//! High-level library API: extract an acquisition's bands from its
//! container, then decode, derive NDVI and render all products. Prefer these
//! entrypoints over the low-level processing modules when embedding NDVIPRO.
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::params::PipelineParams;
use crate::core::processing::pipeline::run_pipeline;
use crate::error::Result;
use crate::io::container::{ExtractOutcome, GdalContainer, extract_and_save_to_raw};
use crate::io::layout::AcquisitionLayout;
use crate::types::{Band, PixelCoord};

/// Result of one acquisition run.
#[derive(Debug, Clone)]
pub struct AcquisitionReport {
    /// Extraction outcome per band; empty when extraction was skipped
    pub extracted: Vec<(Band, ExtractOutcome)>,
    pub images: Vec<PathBuf>,
}

/// Extract the red and nir arrays of an acquisition into `raw_dir`.
pub fn extract_bands(
    layout: &AcquisitionLayout,
    raw_dir: &Path,
) -> Result<Vec<(Band, ExtractOutcome)>> {
    let container = GdalContainer::open(layout.container_path())?;
    let mut outcomes = Vec::with_capacity(2);
    for band in [Band::Red, Band::Nir] {
        let output = layout.raw_path(raw_dir, band);
        let outcome = extract_and_save_to_raw(&container, band.dataset_path(), &output)?;
        outcomes.push((band, outcome));
    }
    Ok(outcomes)
}

/// Optionally extract, then discover inputs and render the six products.
pub fn process_acquisition(
    layout: &AcquisitionLayout,
    raw_dir: Option<&Path>,
    center: Option<PixelCoord>,
    params: &PipelineParams,
) -> Result<AcquisitionReport> {
    let extracted = match raw_dir {
        Some(dir) => extract_bands(layout, dir)?,
        None => Vec::new(),
    };

    let paths = layout.discover(params.format)?;
    info!(
        "Inputs: red={:?} nir={:?}",
        paths.red_input, paths.nir_input
    );
    let images = run_pipeline(&paths, center, params)?;
    Ok(AcquisitionReport { extracted, images })
}
