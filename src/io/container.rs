//! Extraction of named arrays from structured containers (HDF5, netCDF)
//! into the raw u16 tiles the decoder consumes.
use std::path::{Path, PathBuf};

use gdal::raster::GdalDataType;
use gdal::{Dataset, Metadata};
use ndarray::Array2;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::io::raw::write_raw_u16;

/// Anything that can hand out a named 2-D array as u16.
pub trait ArraySource {
    /// Path of the container, for messages.
    fn location(&self) -> &Path;

    /// Read `dataset` converted to u16, or `Error::DatasetNotFound` if absent.
    fn read_u16(&self, dataset: &str) -> Result<Array2<u16>>;
}

/// GDAL-backed container: HDF5 and netCDF arrays are exposed as subdatasets.
#[derive(Debug)]
pub struct GdalContainer {
    path: PathBuf,
    subdatasets: Vec<String>,
}

/// Pick the subdataset whose name ends with `dataset`.
///
/// GDAL names HDF5 arrays `HDF5:"file.h5"://Group/Array` and netCDF variables
/// `NETCDF:"file.nc":var`; a leading `/` on `dataset` is ignored.
pub fn find_subdataset<'a>(names: &'a [String], dataset: &str) -> Option<&'a str> {
    let wanted = dataset.trim_start_matches('/');
    if wanted.is_empty() {
        return None;
    }
    let hdf5_suffix = format!("://{}", wanted);
    let nc_suffix = format!("\":{}", wanted);
    names
        .iter()
        .find(|name| name.ends_with(&hdf5_suffix) || name.ends_with(&nc_suffix))
        .map(String::as_str)
}

impl GdalContainer {
    /// Open a container read-only and list its subdatasets.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dataset = Dataset::open(&path)?;
        // SUBDATASET_n_NAME=<gdal name>, SUBDATASET_n_DESC=<description>
        let subdatasets: Vec<String> = dataset
            .metadata_domain("SUBDATASETS")
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| {
                let (key, val) = entry.split_once('=')?;
                key.ends_with("_NAME").then(|| val.to_string())
            })
            .collect();
        debug!("{:?}: {} subdatasets", path, subdatasets.len());
        Ok(Self { path, subdatasets })
    }
}

/// Read the single band of an opened array as u16.
fn read_band_u16(ds: &Dataset, dataset: &str) -> Result<Array2<u16>> {
    if ds.raster_count() != 1 {
        return Err(Error::UnsupportedFormat(format!(
            "{} has {} bands, expected a single 2-D array",
            dataset,
            ds.raster_count()
        )));
    }
    let band = ds.rasterband(1)?;
    let native = band.band_type();
    if native != GdalDataType::UInt16 {
        // GDAL rounds and saturates to [0, 65535] during the conversion
        warn!(
            "{} is stored as {:?}; converting to UInt16 with saturation",
            dataset, native
        );
    }
    let (cols, rows) = ds.raster_size();
    let buf = band.read_as::<u16>((0, 0), (cols, rows), (cols, rows), None)?;
    Array2::from_shape_vec((rows, cols), buf.data().to_vec())
        .map_err(|e| Error::UnsupportedFormat(e.to_string()))
}

impl ArraySource for GdalContainer {
    fn location(&self) -> &Path {
        &self.path
    }

    fn read_u16(&self, dataset: &str) -> Result<Array2<u16>> {
        let name = find_subdataset(&self.subdatasets, dataset).ok_or_else(|| {
            Error::DatasetNotFound {
                container: self.path.clone(),
                dataset: dataset.to_string(),
            }
        })?;
        let ds = Dataset::open(Path::new(name))?;
        read_band_u16(&ds, dataset)
    }
}

/// What an extraction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    Written { elements: usize, bytes: usize },
    NotFound,
}

/// Copy `dataset` out of `source` into `output` as raw little-endian u16.
///
/// A missing dataset is reported and skipped: no file is written and the
/// result is `Ok(ExtractOutcome::NotFound)`. Any other failure propagates.
pub fn extract_and_save_to_raw<S: ArraySource>(
    source: &S,
    dataset: &str,
    output: &Path,
) -> Result<ExtractOutcome> {
    match source.read_u16(dataset) {
        Ok(array) => {
            let bytes = write_raw_u16(output, &array)?;
            info!(
                "Dataset '{}' saved to {:?} in little-endian format",
                dataset, output
            );
            Ok(ExtractOutcome::Written {
                elements: array.len(),
                bytes,
            })
        }
        Err(Error::DatasetNotFound { dataset, .. }) => {
            info!("Dataset '{}' not found in {:?}", dataset, source.location());
            Ok(ExtractOutcome::NotFound)
        }
        Err(e) => Err(e),
    }
}

/// Open `container` with GDAL and extract one dataset.
pub fn extract_dataset(container: &Path, dataset: &str, output: &Path) -> Result<ExtractOutcome> {
    let source = GdalContainer::open(container)?;
    extract_and_save_to_raw(&source, dataset, output)
}
