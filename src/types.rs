//! Shared types used across NDVIPRO.
//! Includes `Band`, `Colormap`, `CropSource`, `OutputFormat` and the
//! `PixelCoord` used to mark a point of interest on a raster.
use std::path::Path;

use clap::ValueEnum;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Row-major grid of physical values (reflectance or an index).
pub type Raster = Array2<f64>;

/// Spectral band of an SGLI reflectance product.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Band {
    Red,
    Nir,
}

impl Band {
    /// Dataset path inside the L2 reflectance container.
    pub fn dataset_path(self) -> &'static str {
        match self {
            Band::Red => "Image_data/Rs_VN08",
            Band::Nir => "Image_data/Rs_VN11",
        }
    }

    /// Suffix of the raw binary file holding this band.
    pub fn raw_suffix(self) -> &'static str {
        match self {
            Band::Red => "VN08.bin",
            Band::Nir => "VN11.bin",
        }
    }

    /// Colorbar label used for the reflectance image of this band.
    pub fn label(self) -> &'static str {
        match self {
            Band::Red => "Reflectance (RED)",
            Band::Nir => "Reflectance (NIR)",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Red => write!(f, "RED"),
            Band::Nir => write!(f, "NIR"),
        }
    }
}

/// Linear color ramps available to the renderer.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    Gray,
    Greens,
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colormap::Gray => write!(f, "gray"),
            Colormap::Greens => write!(f, "greens"),
        }
    }
}

/// Which raster feeds the cropped red/nir products.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropSource {
    /// All three cropped products show NDVI (reference behavior).
    Ndvi,
    /// Cropped red/nir products show their own band.
    Bands,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg, // Lossy, preview only
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// Guess the format from a file extension, if it is one we write.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }
}

/// Integer pixel position (column `x`, row `y`) in a raster's frame.
///
/// Signed so that a target lying off the tile can still be carried through
/// cropping; the renderer simply skips a marker that falls outside the image.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PixelCoord {
    pub x: i64,
    pub y: i64,
}

impl PixelCoord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Round fractional pixel coordinates to the nearest pixel, ties to even.
    /// Values beyond the i64 range saturate.
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: x.round_ties_even() as i64,
            y: y.round_ties_even() as i64,
        }
    }

    /// Position inside a `rows x cols` grid, if it lies within it.
    pub fn to_index(self, rows: usize, cols: usize) -> Option<(usize, usize)> {
        let (x, y) = (usize::try_from(self.x).ok()?, usize::try_from(self.y).ok()?);
        (x < cols && y < rows).then_some((y, x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.PNG")), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_path(Path::new("b.jpeg")), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_path(Path::new("b.tif")), None);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn pixel_coord_rounding_and_bounds() {
        assert_eq!(PixelCoord::from_f64(10.5, 11.5), PixelCoord::new(10, 12));
        assert_eq!(PixelCoord::from_f64(-2.5, -0.4), PixelCoord::new(-2, 0));
        assert_eq!(PixelCoord::from_f64(10.6, 1e300), PixelCoord::new(11, i64::MAX));
        assert_eq!(PixelCoord::new(2, 1).to_index(3, 4), Some((1, 2)));
        assert_eq!(PixelCoord::new(4, 1).to_index(3, 4), None);
        assert_eq!(PixelCoord::new(-1, 0).to_index(3, 4), None);
    }
}
