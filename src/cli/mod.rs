//! Command Line Interface (CLI) layer for NDVIPRO.
//!
//! Defines argument parsing (`args`), CLI error types (`errors`) and the
//! orchestration logic (`runner`): extract the tile's bands from its HDF5
//! container, then render the full-scene and cropped products.
//!
//! To embed NDVIPRO in another application, use `ndvipro::api` instead.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
