use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use crate::core::params::PipelineParams;
use crate::error::{Error, Result};
use crate::types::Raster;

const SAMPLE_BYTES: usize = std::mem::size_of::<u16>();

/// Decodes headerless little-endian u16 tiles into reflectance rasters.
#[derive(Debug, Clone, Copy)]
pub struct RasterDecoder {
    pub dimension: usize,
    pub scale_factor: f64,
}

impl RasterDecoder {
    pub fn new(dimension: usize, scale_factor: f64) -> Self {
        Self {
            dimension,
            scale_factor,
        }
    }

    pub fn from_params(params: &PipelineParams) -> Self {
        Self::new(params.dimension, params.scale_factor)
    }

    pub fn expected_bytes(&self) -> usize {
        self.dimension * self.dimension * SAMPLE_BYTES
    }

    /// Read a whole tile from disk.
    pub fn decode(&self, path: &Path) -> Result<Raster> {
        let bytes = std::fs::read(path)?;
        debug!("Read {} bytes from {:?}", bytes.len(), path);
        self.decode_bytes(&bytes, path)
    }

    /// Decode an in-memory tile; `origin` only labels errors.
    pub fn decode_bytes(&self, bytes: &[u8], origin: &Path) -> Result<Raster> {
        if bytes.len() != self.expected_bytes() {
            return Err(Error::Format {
                path: origin.to_path_buf(),
                dimension: self.dimension,
                expected_bytes: self.expected_bytes(),
                actual_bytes: bytes.len(),
            });
        }
        let scale = self.scale_factor;
        let values: Vec<f64> = bytes
            .chunks_exact(SAMPLE_BYTES)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]) as f64 * scale)
            .collect();
        Array2::from_shape_vec((self.dimension, self.dimension), values)
            .map_err(|e| Error::UnsupportedFormat(e.to_string()))
    }
}
