use std::path::{Path, PathBuf};

use image::Rgb;
use tracing::info;

use crate::core::params::{DisplayRange, PipelineParams};
use crate::core::processing::crop::crop_image;
use crate::core::processing::decode::RasterDecoder;
use crate::core::processing::mask::mask_invalid_values;
use crate::core::processing::ops::ndvi;
use crate::core::processing::render::{RenderSpec, render_masked};
use crate::error::Result;
use crate::io::layout::{BandPaths, crop_output_path};
use crate::types::{Band, CropSource, PixelCoord, Raster};

const NDVI_LABEL: &str = "NDVI";

/// Mask, optionally crop, and render one product. Returns the written path.
///
/// With `crop_size` set, the output name gains a `_<size>x<size>` suffix
/// even when the window was clamped smaller at a tile edge.
pub fn plot_image(
    data: &Raster,
    output: &Path,
    range: DisplayRange,
    label: &str,
    center: Option<PixelCoord>,
    crop_size: Option<usize>,
    params: &PipelineParams,
) -> Result<PathBuf> {
    let masked = mask_invalid_values(
        data,
        params.invalid_value,
        Some(params.valid_range.min),
        Some(params.valid_range.max),
    );
    let (cropped, relative_center) = crop_image(&masked, center, crop_size);

    let output = match crop_size {
        Some(size) => crop_output_path(output, size),
        None => output.to_path_buf(),
    };

    let spec = RenderSpec {
        range,
        colormap: params.colormap,
        mask_color: Rgb(params.mask_color),
        marker_color: Rgb(params.marker_color),
        center: relative_center,
        label: label.to_string(),
    };
    render_masked(&cropped, &output, &spec)?;
    Ok(output)
}

/// Decode both bands, derive NDVI and render the six products:
/// full-scene red, nir and NDVI, then the three cropped views.
///
/// With `CropSource::Ndvi` the cropped red/nir products show NDVI under the
/// red/nir names and labels; `CropSource::Bands` crops the bands themselves.
pub fn run_pipeline(
    paths: &BandPaths,
    center: Option<PixelCoord>,
    params: &PipelineParams,
) -> Result<Vec<PathBuf>> {
    params.validate()?;
    let decoder = RasterDecoder::from_params(params);
    let red = decoder.decode(&paths.red_input)?;
    let nir = decoder.decode(&paths.nir_input)?;
    let index = ndvi(&nir, &red)?;

    let (red_crop, nir_crop) = match params.crop_source {
        CropSource::Ndvi => (&index, &index),
        CropSource::Bands => (&red, &nir),
    };
    let reflectance = params.reflectance_display;
    let crop = Some(params.crop_size);

    let products: [(&Raster, &Path, DisplayRange, &str, Option<usize>); 6] = [
        (&red, paths.red_output.as_path(), reflectance, Band::Red.label(), None),
        (&nir, paths.nir_output.as_path(), reflectance, Band::Nir.label(), None),
        (&index, paths.ndvi_output.as_path(), params.ndvi_display, NDVI_LABEL, None),
        (red_crop, paths.red_output.as_path(), reflectance, Band::Red.label(), crop),
        (nir_crop, paths.nir_output.as_path(), reflectance, Band::Nir.label(), crop),
        (&index, paths.ndvi_output.as_path(), params.ndvi_display, NDVI_LABEL, crop),
    ];

    let mut written = Vec::with_capacity(products.len());
    for (data, output, range, label, crop_size) in products {
        written.push(plot_image(data, output, range, label, center, crop_size, params)?);
    }
    info!("Rendered {} images", written.len());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::raw::write_raw_u16;
    use crate::io::writers::metadata::read_legend_sidecar;
    use ndarray::Array2;

    fn params(dimension: usize, crop_size: usize) -> PipelineParams {
        PipelineParams {
            dimension,
            crop_size,
            ..Default::default()
        }
    }

    #[test]
    fn plot_image_crops_and_renames() {
        let dir = tempfile::tempdir().unwrap();
        let data = Array2::from_elem((20, 20), 0.2);
        let out = plot_image(
            &data,
            &dir.path().join("red.png"),
            DisplayRange::new(0.0, 0.4),
            "Reflectance (RED)",
            Some(PixelCoord::new(2, 10)),
            Some(7),
            &params(20, 7),
        )
        .unwrap();
        assert_eq!(out, dir.path().join("red_7x7.png"));
        let legend = read_legend_sidecar(&out).unwrap();
        // clamped on the left: columns 0..=5, rows 7..=13
        assert_eq!((legend.plot_width, legend.plot_height), (6, 7));
        assert_eq!(legend.center, Some(PixelCoord::new(2, 3)));
    }

    #[test]
    fn decode_failure_writes_no_images() {
        let dir = tempfile::tempdir().unwrap();
        let red_input = dir.path().join("a.VN08.bin");
        let nir_input = dir.path().join("a.VN11.bin");
        write_raw_u16(&red_input, &Array2::from_elem((4, 4), 100)).unwrap();
        // wrong size
        write_raw_u16(&nir_input, &Array2::from_elem((3, 4), 100)).unwrap();
        let paths = BandPaths {
            red_input,
            nir_input,
            red_output: dir.path().join("red.png"),
            nir_output: dir.path().join("nir.png"),
            ndvi_output: dir.path().join("ndvi.png"),
        };
        let err = run_pipeline(&paths, None, &params(4, 3)).unwrap_err();
        assert!(matches!(err, crate::Error::Format { .. }));
        assert!(!paths.red_output.exists());
    }
}
