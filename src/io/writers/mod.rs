//! Image encoders and the JSON legend sidecar written next to each image.
pub mod jpeg;
pub mod metadata;
pub mod png;
