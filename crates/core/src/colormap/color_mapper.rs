use ndarray::{Array, ArrayBase, Axis, Data, Dimension};
use thiserror::Error;

use crate::colormap::colormap_table::{ColormapTable, Rgb};
use crate::colormap::normalization::NormalizationRange;
use crate::colormap::palette;

#[derive(Error, Debug)]
pub enum ColormapError {
    #[error("unknown colormap '{name}' (supported: {supported})")]
    UnknownColormap { name: String, supported: String },
    #[error("degenerate normalization range: v_min={v_min}, v_max={v_max}")]
    DegenerateRange { v_min: f32, v_max: f32 },
    #[error("no values to derive a normalization range from")]
    EmptyInput,
    #[error("colormapped output does not fit its shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Maps scalar arrays to RGB through a fixed colormap table.
///
/// Immutable once built; share it by reference.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMapper {
    table: ColormapTable,
}

impl ColorMapper {
    /// Resolves `name` (e.g. `"inferno"`) to its table. Fails before any
    /// data is touched if the name is unknown.
    pub fn new(name: &str) -> Result<Self, ColormapError> {
        Ok(Self::from_table(palette::resolve(name)?))
    }

    pub fn from_table(table: ColormapTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ColormapTable {
        &self.table
    }

    /// Color of a single value under `range`.
    pub fn map_value(&self, value: f32, range: &NormalizationRange) -> Rgb {
        self.table.get(range.index_of(value))
    }

    /// Colormaps every element of `values`, returning an array with the
    /// same shape plus a trailing axis of length 3.
    ///
    /// Missing bounds are taken from the data itself.
    pub fn apply<S, D>(
        &self,
        values: &ArrayBase<S, D>,
        v_min: Option<f32>,
        v_max: Option<f32>,
    ) -> Result<Array<f32, D::Larger>, ColormapError>
    where
        S: Data<Elem = f32>,
        D: Dimension,
    {
        let range = NormalizationRange::resolve(values, v_min, v_max)?;

        let mut rgb = Vec::with_capacity(values.len() * 3);
        for &value in values.iter() {
            rgb.extend_from_slice(&self.map_value(value, &range));
        }

        let channel_axis = values.ndim();
        let mut shape = values.view().insert_axis(Axis(channel_axis)).raw_dim();
        shape[channel_axis] = 3;
        Ok(Array::from_shape_vec(shape, rgb)?)
    }
}
