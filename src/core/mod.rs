//! Core processing building blocks: raw decoding, validity masking,
//! cropping, band-ratio indices, color ramps, rendering and the
//! pipeline driver. These are consumed by the high-level `api` module.
pub mod params;
pub mod processing;
