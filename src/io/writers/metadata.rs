use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::{Colormap, PixelCoord};

/// Legend of a rendered image: what the colorbar means and where things are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendMetadata {
    pub label: String,
    pub vmin: f64,
    pub vmax: f64,
    pub colormap: Colormap,
    pub mask_color: [u8; 3],
    /// Marker position in plot pixels, if one was drawn
    pub center: Option<PixelCoord>,
    /// Size of the raster area (excluding the colorbar)
    pub plot_width: u32,
    pub plot_height: u32,
    /// Horizontal extent of the colorbar strip, [start, end)
    pub colorbar_columns: [u32; 2],
    pub invalid_pixels: usize,
}

/// `red.png` -> `red.png.json`, so a PNG and a JPEG of the same product
/// keep separate legends.
pub fn sidecar_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.as_os_str().to_owned();
    name.push(".json");
    PathBuf::from(name)
}

/// Write `<image>.json` next to the image.
pub fn create_legend_sidecar(output_path: &Path, legend: &LegendMetadata) -> Result<PathBuf> {
    let path = sidecar_path(output_path);
    let json_string = serde_json::to_string_pretty(legend)
        .map_err(|e| Error::UnsupportedFormat(format!("legend serialization: {}", e)))?;
    std::fs::write(&path, json_string)?;
    info!("Created legend sidecar: {:?}", path);
    Ok(path)
}

pub fn read_legend_sidecar(output_path: &Path) -> Result<LegendMetadata> {
    let path = sidecar_path(output_path);
    let text = std::fs::read_to_string(&path)?;
    serde_json::from_str(&text).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}
