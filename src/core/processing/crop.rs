use std::ops::Range;

use ndarray::s;
use tracing::debug;

use crate::core::processing::mask::MaskedRaster;
use crate::types::{PixelCoord, Raster};

/// Grids that can hand out an owned rectangular sub-window.
pub trait Window: Sized {
    fn dim(&self) -> (usize, usize);
    fn window(&self, rows: Range<usize>, cols: Range<usize>) -> Self;
}

impl Window for Raster {
    fn dim(&self) -> (usize, usize) {
        Raster::dim(self)
    }

    fn window(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        self.slice(s![rows, cols]).to_owned()
    }
}

impl Window for MaskedRaster {
    fn dim(&self) -> (usize, usize) {
        MaskedRaster::dim(self)
    }

    fn window(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        MaskedRaster::window(self, rows, cols)
    }
}

/// Inclusive span `[center - half, center + half]` clamped to `[0, len)`.
/// Returns an empty range when the span misses the axis entirely.
fn clamp_span(center: i64, half: i64, len: usize) -> Range<usize> {
    let len = len as i64;
    let end = center.saturating_add(half).saturating_add(1).clamp(0, len);
    let start = center.saturating_sub(half).clamp(0, end);
    start as usize..end as usize
}

/// Crop a square window of side `size` centered on `center`.
///
/// With `center` or `size` absent the input is returned unchanged. Each axis
/// is clamped on its own, so windows at a border shrink rather than shift.
/// The returned center is relative to the window's top-left corner.
pub fn crop_image<T: Window + Clone>(
    data: &T,
    center: Option<PixelCoord>,
    size: Option<usize>,
) -> (T, Option<PixelCoord>) {
    let (Some(center), Some(size)) = (center, size) else {
        return (data.clone(), center);
    };

    let half = (size / 2) as i64;
    let (rows, cols) = data.dim();
    let row_span = clamp_span(center.y, half, rows);
    let col_span = clamp_span(center.x, half, cols);

    let relative = PixelCoord::new(
        center.x.saturating_sub(col_span.start as i64),
        center.y.saturating_sub(row_span.start as i64),
    );
    debug!(
        "Crop {}x{} around ({}, {}): rows {:?}, cols {:?}",
        size, size, center.x, center.y, row_span, col_span
    );

    (data.window(row_span, col_span), Some(relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::mask::mask_invalid_values;
    use ndarray::{Array2, array};

    fn grid(rows: usize, cols: usize) -> Raster {
        Array2::from_shape_fn((rows, cols), |(i, j)| (i * cols + j) as f64)
    }

    #[test]
    fn identity_when_parameters_absent() {
        let data = grid(4, 5);
        let center = Some(PixelCoord::new(2, 1));
        assert_eq!(crop_image(&data, None, Some(3)), (data.clone(), None));
        assert_eq!(crop_image(&data, center, None), (data.clone(), center));
        assert_eq!(crop_image(&data, None, None), (data.clone(), None));
    }

    #[test]
    fn full_grid_when_window_covers_it() {
        let data = array![[0.01, 0.02, 0.03], [0.04, 0.05, 0.06], [0.07, 0.08, 0.09]];
        let (out, c) = crop_image(&data, Some(PixelCoord::new(1, 1)), Some(3));
        assert_eq!(out, data);
        assert_eq!(c, Some(PixelCoord::new(1, 1)));
    }

    #[test]
    fn interior_window_has_requested_size() {
        let data = grid(1000, 1000);
        let (out, c) = crop_image(&data, Some(PixelCoord::new(500, 400)), Some(301));
        assert_eq!(out.dim(), (301, 301));
        assert_eq!(c, Some(PixelCoord::new(150, 150)));
        assert_eq!(out[[150, 150]], data[[400, 500]]);
    }

    #[test]
    fn clamps_asymmetrically_near_edges() {
        let data = grid(1000, 1000);
        // near the left edge: columns shrink, rows keep the full 301
        let (out, c) = crop_image(&data, Some(PixelCoord::new(20, 500)), Some(301));
        assert_eq!(out.dim(), (301, 171));
        let c = c.unwrap();
        assert_eq!((c.x, c.y), (20, 150));
        assert_eq!(out[[c.y as usize, c.x as usize]], data[[500, 20]]);

        // near the bottom-right corner
        let (out, c) = crop_image(&data, Some(PixelCoord::new(990, 995)), Some(301));
        assert_eq!(out.dim(), (155, 160));
        let c = c.unwrap();
        // adding back the window start recovers the original center
        assert_eq!((c.x + 840, c.y + 845), (990, 995));
    }

    #[test]
    fn out_of_range_center_yields_empty_window() {
        let data = grid(10, 10);
        let (out, _) = crop_image(&data, Some(PixelCoord::new(50, 5)), Some(5));
        assert_eq!(out.dim(), (5, 0));
        let (out, _) = crop_image(&data, Some(PixelCoord::new(5, -20)), Some(5));
        assert_eq!(out.dim(), (0, 5));
    }

    #[test]
    fn extreme_centers_do_not_overflow() {
        let data = grid(10, 10);
        let (out, c) = crop_image(&data, Some(PixelCoord::from_f64(1e300, 5.0)), Some(301));
        assert_eq!(out.dim(), (10, 0));
        assert_eq!(c, Some(PixelCoord::new(i64::MAX - 10, 5)));

        let (out, c) = crop_image(&data, Some(PixelCoord::new(5, i64::MIN)), Some(301));
        assert_eq!(out.dim(), (0, 10));
        assert_eq!(c, Some(PixelCoord::new(5, i64::MIN)));

        // a half-width of i64::MAX reaches every row from i64::MAX
        let (out, _) = crop_image(&data, Some(PixelCoord::new(i64::MIN, i64::MAX)), Some(usize::MAX));
        assert_eq!(out.dim(), (10, 0));
    }

    #[test]
    fn masked_rasters_crop_values_and_validity_together() {
        let data = grid(5, 5);
        let masked = mask_invalid_values(&data, Some(12.0), None, None);
        let (out, c) = crop_image(&masked, Some(PixelCoord::new(2, 2)), Some(3));
        assert_eq!(out.dim(), (3, 3));
        assert_eq!(c, Some(PixelCoord::new(1, 1)));
        assert!(!out.is_valid(1, 1));
        assert_eq!(out.invalid_count(), 1);
        assert_eq!(out.data[[0, 0]], 6.0);
    }
}
