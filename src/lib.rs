#![doc = r#"
NDVIPRO — SGLI surface reflectance to NDVI diagnostic images.

This crate decodes fixed-size reflectance tiles stored as raw little-endian
u16 grids, derives NDVI from the red (VN08) and near-infrared (VN11) bands,
and renders full-scene and cropped-around-a-target images with invalid
pixels highlighted. It also extracts named arrays from HDF5 containers into
the raw tile format the pipeline reads.

Requirements
------------
- GDAL development headers and runtime (with the HDF5 driver) available on
  your system.
- Rust 2024 edition toolchain.

Quick start: render an acquisition
----------------------------------
```rust,no_run
use chrono::NaiveDate;
use ndvipro::{AcquisitionLayout, PipelineParams, PixelCoord, TileId, process_acquisition};

fn main() -> ndvipro::Result<()> {
    let layout = AcquisitionLayout::new(
        "/work",
        NaiveDate::from_ymd_opt(2023, 7, 4).unwrap(),
        TileId { v: 5, h: 29 },
    );
    let report = process_acquisition(
        &layout,
        Some(std::path::Path::new("/work/data/2023/0704")),
        Some(PixelCoord::new(2400, 1800)),
        &PipelineParams::default(),
    )?;
    println!("wrote {} images", report.images.len());
    Ok(())
}
```

Building blocks
---------------
```rust
use ndarray::array;
use ndvipro::{crop_image, mask_invalid_values, ndvi, PixelCoord};

let nir = array![[0.3, 0.2], [0.0, 0.5]];
let red = array![[0.1, 0.2], [0.0, 0.1]];
let index = ndvi(&nir, &red).unwrap();
let masked = mask_invalid_values(&index, None, Some(0.0), Some(1.0));
assert!(!masked.is_valid(1, 0)); // 0/0
let (window, center) = crop_image(&masked, Some(PixelCoord::new(0, 0)), Some(3));
assert_eq!(window.dim(), (2, 2));
assert_eq!(center, Some(PixelCoord::new(0, 0)));
```

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — decoding, masking, cropping, NDVI, rendering, pipeline.
- [`io`] — container extraction, raw tiles, path layout, image writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

pub use core::params::{DisplayRange, PipelineParams};
pub use error::{Error, Result};
pub use types::{Band, Colormap, CropSource, OutputFormat, PixelCoord, Raster};

pub use core::processing::crop::crop_image;
pub use core::processing::decode::RasterDecoder;
pub use core::processing::mask::{MaskedRaster, mask_invalid_values};
pub use core::processing::ops::ndvi;
pub use core::processing::pipeline::{plot_image, run_pipeline};
pub use core::processing::render::{RenderSpec, render_masked, render_raster};

pub use io::container::{extract_and_save_to_raw, extract_dataset};
pub use io::{AcquisitionLayout, ArraySource, BandPaths, ExtractOutcome, GdalContainer, TileId};

pub use api::{AcquisitionReport, extract_bands, process_acquisition};
