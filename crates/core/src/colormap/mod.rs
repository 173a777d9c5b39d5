//! Scalar-to-RGB colormapping for depth visualization.

pub mod color_mapper;
pub mod colormap_table;
pub mod normalization;
pub mod palette;

pub use color_mapper::{ColorMapper, ColormapError};
pub use colormap_table::{ColormapTable, Rgb};
pub use normalization::NormalizationRange;
