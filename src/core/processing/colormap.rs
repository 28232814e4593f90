//! Linear color ramps for scalar rasters.
use image::Rgb;

use crate::types::Colormap;

/// Anchors of each ramp, evenly spaced over [0, 1].
fn stops(map: Colormap) -> &'static [[u8; 3]] {
    match map {
        Colormap::Gray => &[[0, 0, 0], [255, 255, 255]],
        Colormap::Greens => &[
            [247, 252, 245],
            [161, 217, 155],
            [65, 171, 93],
            [0, 68, 27],
        ],
    }
}

fn interpolate_color(c1: [u8; 3], c2: [u8; 3], t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
    [mix(c1[0], c2[0]), mix(c1[1], c2[1]), mix(c1[2], c2[2])]
}

/// Position of `value` on `[vmin, vmax]`, clipped to [0, 1].
pub fn normalize(value: f64, vmin: f64, vmax: f64) -> f64 {
    ((value - vmin) / (vmax - vmin)).clamp(0.0, 1.0)
}

/// Color for a normalized position `t` in [0, 1].
pub fn ramp_color(map: Colormap, t: f64) -> Rgb<u8> {
    let anchors = stops(map);
    let segments = anchors.len() - 1;
    let scaled = t.clamp(0.0, 1.0) * segments as f64;
    let idx = (scaled.floor() as usize).min(segments - 1);
    Rgb(interpolate_color(
        anchors[idx],
        anchors[idx + 1],
        scaled - idx as f64,
    ))
}

/// Precomputed 256-entry lookup for a ramp.
#[derive(Debug, Clone)]
pub struct ColorLut {
    table: [Rgb<u8>; 256],
}

impl ColorLut {
    pub fn new(map: Colormap) -> Self {
        let mut table = [Rgb([0, 0, 0]); 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = ramp_color(map, i as f64 / 255.0);
        }
        Self { table }
    }

    /// Map a finite value through `[vmin, vmax]`, clipping out-of-range values.
    pub fn map(&self, value: f64, vmin: f64, vmax: f64) -> Rgb<u8> {
        let t = normalize(value, vmin, vmax);
        self.table[(t * 255.0).round() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_endpoints_and_midpoint() {
        let lut = ColorLut::new(Colormap::Gray);
        assert_eq!(lut.map(0.0, 0.0, 0.4), Rgb([0, 0, 0]));
        assert_eq!(lut.map(0.4, 0.0, 0.4), Rgb([255, 255, 255]));
        assert_eq!(lut.map(0.2, 0.0, 0.4), Rgb([128, 128, 128]));
    }

    #[test]
    fn out_of_range_values_clip() {
        let lut = ColorLut::new(Colormap::Gray);
        assert_eq!(lut.map(-3.0, 0.0, 1.0), Rgb([0, 0, 0]));
        assert_eq!(lut.map(7.0, 0.0, 1.0), Rgb([255, 255, 255]));
    }

    #[test]
    fn greens_hits_its_anchors() {
        assert_eq!(ramp_color(Colormap::Greens, 0.0), Rgb([247, 252, 245]));
        assert_eq!(ramp_color(Colormap::Greens, 1.0), Rgb([0, 68, 27]));
        assert_eq!(ramp_color(Colormap::Greens, 1.0 / 3.0), Rgb([161, 217, 155]));
    }
}
