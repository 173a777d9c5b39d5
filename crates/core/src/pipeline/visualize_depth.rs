use ndarray::{Array, ArrayBase, Data, Dimension};
use thiserror::Error;

use crate::colormap::color_mapper::{ColorMapper, ColormapError};
use crate::colormap::normalization::NormalizationRange;
use crate::shared::constants::DEFAULT_COLORMAP;
use crate::shared::frame::FrameError;
use crate::shared::frame_sequence::FrameSequence;

#[derive(Error, Debug)]
pub enum VisualizeError {
    #[error(transparent)]
    Colormap(#[from] ColormapError),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Colors a whole depth sequence (e.g. `(frames, height, width)`) with the
/// inferno colormap, returning the same shape plus a trailing RGB axis.
///
/// Missing bounds come from the entire sequence rather than each frame, so
/// one depth value has the same color throughout the video.
pub fn vis_sequence_depth<S, D>(
    depths: &ArrayBase<S, D>,
    v_min: Option<f32>,
    v_max: Option<f32>,
) -> Result<Array<f32, D::Larger>, ColormapError>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let mapper = ColorMapper::new(DEFAULT_COLORMAP)?;
    let range = NormalizationRange::resolve(depths, v_min, v_max)?;
    log::debug!(
        "Coloring {:?} depth values over [{}, {}]",
        depths.shape(),
        range.v_min(),
        range.v_max()
    );
    mapper.apply(depths, Some(range.v_min()), Some(range.v_max()))
}

/// Frame-level counterpart of [`vis_sequence_depth`]: colors a grayscale
/// sequence with `mapper` under one global range and returns color frames
/// ready for export.
pub fn visualize_depth_frames(
    depths: &FrameSequence,
    mapper: &ColorMapper,
    v_min: Option<f32>,
    v_max: Option<f32>,
) -> Result<FrameSequence, VisualizeError> {
    if depths.is_empty() {
        return Ok(FrameSequence::new());
    }
    let stacked = depths.to_gray_array()?;
    let rgb = mapper.apply(&stacked, v_min, v_max)?;
    Ok(FrameSequence::from_color_array(rgb)?)
}
