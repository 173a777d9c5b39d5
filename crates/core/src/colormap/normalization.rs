use ndarray::{ArrayBase, Data, Dimension};

use crate::colormap::color_mapper::ColormapError;
use crate::shared::constants::COLORMAP_SIZE;

/// The `(v_min, v_max)` pair that maps raw values onto `[0, 1]`.
///
/// Always finite with `v_max > v_min`, so normalization never divides by
/// zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizationRange {
    v_min: f32,
    v_max: f32,
}

impl NormalizationRange {
    pub fn new(v_min: f32, v_max: f32) -> Result<Self, ColormapError> {
        if !(v_min.is_finite() && v_max.is_finite() && v_max > v_min) {
            return Err(ColormapError::DegenerateRange { v_min, v_max });
        }
        Ok(Self { v_min, v_max })
    }

    /// Uses the given bounds where present and the data's min/max (NaN
    /// ignored) for whichever is missing.
    pub fn resolve<S, D>(
        values: &ArrayBase<S, D>,
        v_min: Option<f32>,
        v_max: Option<f32>,
    ) -> Result<Self, ColormapError>
    where
        S: Data<Elem = f32>,
        D: Dimension,
    {
        match (v_min, v_max) {
            (Some(lo), Some(hi)) => Self::new(lo, hi),
            _ => {
                let (lo, hi) = min_max(values.iter()).ok_or(ColormapError::EmptyInput)?;
                Self::new(v_min.unwrap_or(lo), v_max.unwrap_or(hi))
            }
        }
    }

    pub fn v_min(&self) -> f32 {
        self.v_min
    }

    pub fn v_max(&self) -> f32 {
        self.v_max
    }

    pub fn normalize(&self, value: f32) -> f32 {
        (value - self.v_min) / (self.v_max - self.v_min)
    }

    /// Colormap index of `value`: the normalized value times 255, floored
    /// and clamped to `[0, 255]`. NaN maps to 0.
    pub fn index_of(&self, value: f32) -> u8 {
        let last = (COLORMAP_SIZE - 1) as f32;
        (self.normalize(value) * last).floor().clamp(0.0, last) as u8
    }
}

fn min_max<'a>(values: impl Iterator<Item = &'a f32>) -> Option<(f32, f32)> {
    values
        .filter(|v| !v.is_nan())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
