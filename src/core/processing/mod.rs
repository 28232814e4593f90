pub mod colormap;
pub mod crop;
pub mod decode;
pub mod glyphs;
pub mod mask;
pub mod ops;
pub mod pipeline;
pub mod render;
