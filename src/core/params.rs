use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Colormap, CropSource, OutputFormat};

/// Inclusive `[min, max]` interval of physical values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}

impl DisplayRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Pipeline parameters suitable for JSON config files.
///
/// Defaults reproduce the reference SGLI run: 4800x4800 tiles,
/// reflectance = 1.0e-4 * DN, 301 px crops.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Side length of the square raw tiles
    pub dimension: usize,
    /// Multiplier from raw counts to reflectance
    pub scale_factor: f64,
    /// Side length of the cropped products; odd keeps the target centered
    pub crop_size: usize,
    /// Colorbar range for the red/nir images
    pub reflectance_display: DisplayRange,
    /// Colorbar range for NDVI images
    pub ndvi_display: DisplayRange,
    /// Samples outside this range are masked
    pub valid_range: DisplayRange,
    /// Optional no-data code, compared against physical values
    pub invalid_value: Option<f64>,
    pub colormap: Colormap,
    pub mask_color: [u8; 3],
    pub marker_color: [u8; 3],
    pub crop_source: CropSource,
    pub format: OutputFormat,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            dimension: 4800,
            scale_factor: 1.0e-4,
            crop_size: 301,
            reflectance_display: DisplayRange::new(0.0, 0.4),
            ndvi_display: DisplayRange::new(0.0, 1.0),
            valid_range: DisplayRange::new(0.0, 1.0),
            invalid_value: None,
            colormap: Colormap::Gray,
            mask_color: [0, 0, 255],
            marker_color: [255, 0, 0],
            crop_source: CropSource::Ndvi,
            format: OutputFormat::Png,
        }
    }
}

impl PipelineParams {
    /// Load parameters from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(Error::InvalidArgument {
                arg: "dimension",
                value: self.dimension.to_string(),
            });
        }
        if self.crop_size == 0 {
            return Err(Error::InvalidArgument {
                arg: "crop_size",
                value: self.crop_size.to_string(),
            });
        }
        for (name, range) in [
            ("reflectance_display", self.reflectance_display),
            ("ndvi_display", self.ndvi_display),
        ] {
            if !(range.min < range.max) {
                return Err(Error::InvalidArgument {
                    arg: name,
                    value: format!("[{}, {}]", range.min, range.max),
                });
            }
        }
        Ok(())
    }
}
