use ndarray::{Array2, Zip, s};

use crate::types::Raster;

/// A raster paired with a per-sample validity grid.
///
/// Invalidity is tracked separately from the values so that no numeric
/// sentinel (NaN included) is overloaded to mean "no data".
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedRaster {
    pub data: Raster,
    pub valid: Array2<bool>,
}

impl MaskedRaster {
    /// Wrap a raster with every sample marked valid.
    pub fn all_valid(data: Raster) -> Self {
        let valid = Array2::from_elem(data.dim(), true);
        Self { data, valid }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.valid[[row, col]]
    }

    pub fn invalid_count(&self) -> usize {
        self.valid.iter().filter(|&&v| !v).count()
    }

    /// Copy out the window `rows x cols` (half-open ranges).
    pub fn window(&self, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) -> Self {
        Self {
            data: self.data.slice(s![rows.clone(), cols.clone()]).to_owned(),
            valid: self.valid.slice(s![rows, cols]).to_owned(),
        }
    }
}

/// Flag samples equal to `invalid_value` or outside `[range_min, range_max]`.
///
/// An omitted bound leaves that side open. When any bound is given, NaN and
/// infinite samples are flagged too, even on the open side.
pub fn mask_invalid_values(
    data: &Raster,
    invalid_value: Option<f64>,
    range_min: Option<f64>,
    range_max: Option<f64>,
) -> MaskedRaster {
    let mut valid = Array2::from_elem(data.dim(), true);
    let ranged = range_min.is_some() || range_max.is_some();
    Zip::from(&mut valid).and(data).for_each(|ok, &v| {
        if invalid_value.is_some_and(|iv| v == iv) {
            *ok = false;
            return;
        }
        if ranged {
            let above_min = range_min.is_none_or(|lo| v >= lo);
            let below_max = range_max.is_none_or(|hi| v <= hi);
            if !(above_min && below_max && v.is_finite()) {
                *ok = false;
            }
        }
    });
    MaskedRaster {
        data: data.clone(),
        valid,
    }
}
