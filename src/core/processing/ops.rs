use ndarray::{Array2, Zip};

use crate::error::{Error, Result};
use crate::types::Raster;

fn ensure_same_shape(a: &Raster, b: &Raster) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(Error::ShapeMismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }
    Ok(())
}

/// Normalized difference: (a - b) / (a + b).
///
/// A zero denominator is not special-cased; it yields NaN or ±inf, which the
/// range mask later flags.
pub fn normalized_diff_arrays(a: &Raster, b: &Raster) -> Result<Raster> {
    ensure_same_shape(a, b)?;
    let mut result = Array2::zeros(a.dim());
    Zip::from(a)
        .and(b)
        .and(&mut result)
        .for_each(|&a_val, &b_val, res| {
            *res = (a_val - b_val) / (a_val + b_val);
        });
    Ok(result)
}

/// NDVI = (NIR - RED) / (NIR + RED)
pub fn ndvi(nir: &Raster, red: &Raster) -> Result<Raster> {
    normalized_diff_arrays(nir, red)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::mask::mask_invalid_values;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn reference_values() {
        let nir = array![[0.2, 0.3, 0.0]];
        let red = array![[0.2, 0.1, 0.0]];
        let index = ndvi(&nir, &red).unwrap();
        assert_abs_diff_eq!(index[[0, 0]], 0.0);
        assert_abs_diff_eq!(index[[0, 1]], 0.5, epsilon = 1e-12);
        assert!(!index[[0, 2]].is_finite());

        let masked = mask_invalid_values(&index, None, Some(0.0), Some(1.0));
        assert!(masked.is_valid(0, 0));
        assert!(masked.is_valid(0, 1));
        assert!(!masked.is_valid(0, 2));
    }

    #[test]
    fn negative_index_for_bare_surfaces() {
        let index = ndvi(&array![[0.1]], &array![[0.3]]).unwrap();
        assert_abs_diff_eq!(index[[0, 0]], -0.5, epsilon = 1e-12);
    }

    #[test]
    fn mismatched_shapes_fail() {
        let nir = Array2::<f64>::zeros((2, 3));
        let red = Array2::<f64>::zeros((3, 2));
        match ndvi(&nir, &red) {
            Err(Error::ShapeMismatch { left, right }) => {
                assert_eq!(left, (2, 3));
                assert_eq!(right, (3, 2));
            }
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }
}
