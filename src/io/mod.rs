//! I/O layer: GDAL-backed container extraction, the raw tile writer,
//! acquisition path layout, and `writers` for images and legend sidecars.
pub mod container;
pub use container::{ArraySource, ExtractOutcome, GdalContainer};

pub mod layout;
pub use layout::{AcquisitionLayout, BandPaths, TileId};

pub mod raw;
pub mod writers;
