//! On-disk layout of SGLI L2 reflectance acquisitions.
//!
//! ```text
//! <work_dir>/data/YYYY/MMDD/GC1SG1_YYYYMMDDD01D_TVVHH_L2SG_RSRFQ_3002.h5
//! <work_dir>/data/YYYY/MMDD/*VN08.bin, *VN11.bin      (red / nir tiles)
//! <work_dir>/output/YYYY/MMDD/<tile basename>.png      (rendered images)
//! ```
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Band, OutputFormat};

/// SGLI tile index (vertical, horizontal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileId {
    pub v: u32,
    pub h: u32,
}

/// Input tiles and output image paths for one acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandPaths {
    pub red_input: PathBuf,
    pub nir_input: PathBuf,
    pub red_output: PathBuf,
    pub nir_output: PathBuf,
    pub ndvi_output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AcquisitionLayout {
    pub work_dir: PathBuf,
    pub date: NaiveDate,
    pub tile: TileId,
}

impl AcquisitionLayout {
    pub fn new(work_dir: impl Into<PathBuf>, date: NaiveDate, tile: TileId) -> Self {
        Self {
            work_dir: work_dir.into(),
            date,
            tile,
        }
    }

    fn dated(&self, root: &str) -> PathBuf {
        self.work_dir
            .join(root)
            .join(format!("{}", self.date.year()))
            .join(format!("{:02}{:02}", self.date.month(), self.date.day()))
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dated("data")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dated("output")
    }

    /// Product stem shared by the container and its extracted tiles.
    pub fn product_stem(&self) -> String {
        format!(
            "GC1SG1_{}D01D_T{:02}{:02}_L2SG_RSRFQ_3002",
            self.date.format("%Y%m%d"),
            self.tile.v,
            self.tile.h
        )
    }

    pub fn container_path(&self) -> PathBuf {
        self.data_dir().join(format!("{}.h5", self.product_stem()))
    }

    /// Where the extracted tile for `band` goes inside `raw_dir`.
    pub fn raw_path(&self, raw_dir: &Path, band: Band) -> PathBuf {
        let dataset = band.dataset_path();
        let leaf = dataset.rsplit('/').next().unwrap_or(dataset);
        raw_dir.join(format!("{}.{}.bin", self.product_stem(), leaf))
    }

    /// Find the tiles in the data directory and derive the output paths.
    /// Creates the output directory.
    pub fn discover(&self, format: OutputFormat) -> Result<BandPaths> {
        let data_dir = self.data_dir();
        let red_input = find_band_file(&data_dir, Band::Red)?;
        let nir_input = find_band_file(&data_dir, Band::Nir)?;

        let output_dir = self.output_dir();
        fs::create_dir_all(&output_dir)?;

        let ext = format.extension();
        let red_output = output_dir.join(file_name(&red_input)).with_extension(ext);
        let nir_output = output_dir.join(file_name(&nir_input)).with_extension(ext);
        let ndvi_output = output_dir.join(ndvi_name(&nir_input, ext));

        Ok(BandPaths {
            red_input,
            nir_input,
            red_output,
            nir_output,
            ndvi_output,
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<prefix>VN11.bin` -> `<prefix>ndvi.<ext>`
fn ndvi_name(nir_input: &Path, ext: &str) -> String {
    let name = file_name(nir_input);
    let prefix = name.strip_suffix(Band::Nir.raw_suffix()).unwrap_or(&name);
    format!("{}ndvi.{}", prefix, ext)
}

/// First file (by name) in `dir` ending with the band's raw suffix.
pub fn find_band_file(dir: &Path, band: Band) -> Result<PathBuf> {
    let suffix = band.raw_suffix();
    let not_found = || Error::PathNotFound {
        dir: dir.to_path_buf(),
        pattern: format!("*{}", suffix),
    };
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(e.into()),
    };
    let mut matches = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && file_name(&path).ends_with(suffix) {
            matches.push(path);
        }
    }
    matches.sort();
    debug!("{} candidates for {} in {:?}", matches.len(), band, dir);
    matches.into_iter().next().ok_or_else(not_found)
}

/// Insert `_<size>x<size>` before the extension.
pub fn crop_output_path(path: &Path, size: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}x{}.{}", stem, size, size, ext.to_string_lossy()),
        None => format!("{}_{}x{}", stem, size, size),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(root: &Path) -> AcquisitionLayout {
        AcquisitionLayout::new(
            root,
            NaiveDate::from_ymd_opt(2023, 7, 4).unwrap(),
            TileId { v: 5, h: 29 },
        )
    }

    #[test]
    fn container_and_raw_paths() {
        let l = layout(Path::new("/wd"));
        assert_eq!(
            l.container_path(),
            PathBuf::from("/wd/data/2023/0704/GC1SG1_20230704D01D_T0529_L2SG_RSRFQ_3002.h5")
        );
        assert_eq!(
            l.raw_path(Path::new("/bins"), Band::Nir),
            PathBuf::from("/bins/GC1SG1_20230704D01D_T0529_L2SG_RSRFQ_3002.Rs_VN11.bin")
        );
    }

    #[test]
    fn discovers_inputs_and_derives_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let l = layout(dir.path());
        fs::create_dir_all(l.data_dir()).unwrap();
        let stem = l.product_stem();
        for band in ["Rs_VN08", "Rs_VN11"] {
            fs::write(l.data_dir().join(format!("{stem}.{band}.bin")), b"").unwrap();
        }

        let paths = l.discover(OutputFormat::Png).unwrap();
        let out = l.output_dir();
        assert!(out.is_dir());
        assert_eq!(paths.red_input, l.data_dir().join(format!("{stem}.Rs_VN08.bin")));
        assert_eq!(paths.red_output, out.join(format!("{stem}.Rs_VN08.png")));
        assert_eq!(paths.nir_output, out.join(format!("{stem}.Rs_VN11.png")));
        assert_eq!(paths.ndvi_output, out.join(format!("{stem}.Rs_ndvi.png")));
    }

    #[test]
    fn missing_band_is_path_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let l = layout(dir.path());
        fs::create_dir_all(l.data_dir()).unwrap();
        fs::write(l.data_dir().join("x.Rs_VN08.bin"), b"").unwrap();
        match l.discover(OutputFormat::Png) {
            Err(Error::PathNotFound { pattern, .. }) => assert_eq!(pattern, "*VN11.bin"),
            other => panic!("unexpected: {other:?}"),
        }
        // no data directory at all
        let empty = layout(&dir.path().join("nowhere"));
        assert!(matches!(
            find_band_file(&empty.data_dir(), Band::Red),
            Err(Error::PathNotFound { .. })
        ));
    }

    #[test]
    fn crop_suffix_goes_before_extension() {
        assert_eq!(
            crop_output_path(Path::new("/o/a.Rs_VN08.png"), 301),
            PathBuf::from("/o/a.Rs_VN08_301x301.png")
        );
        assert_eq!(
            crop_output_path(Path::new("plain"), 5),
            PathBuf::from("plain_5x5")
        );
    }
}
