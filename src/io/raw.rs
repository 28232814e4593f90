use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::Array2;

use crate::error::Result;

/// Write a grid as headerless little-endian u16, row-major.
/// Returns the number of bytes written.
pub fn write_raw_u16(output: &Path, data: &Array2<u16>) -> Result<usize> {
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    // iter() walks in logical row-major order whatever the memory layout
    for value in data.iter() {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(data.len() * std::mem::size_of::<u16>())
}
