use std::fmt;

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, ArrayViewD};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("color frame must have 3 channels, got {0}")]
    ChannelCount(usize),
    #[error("frame {index} is {found}, expected {expected}")]
    KindMismatch {
        index: usize,
        expected: FrameKind,
        found: FrameKind,
    },
    #[error("frame {index} is {found_width}x{found_height}, expected {width}x{height}")]
    SizeMismatch {
        index: usize,
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },
    #[error("frame data does not fit its shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Whether a frame carries RGB channels or a single scalar plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Color,
    Gray,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Color => f.write_str("color"),
            FrameKind::Gray => f.write_str("grayscale"),
        }
    }
}

/// A single frame of normalized samples, nominally in `[0, 1]`.
///
/// Color frames are `(height, width, 3)` in RGB order; grayscale frames
/// (depth maps, masks) are `(height, width)`. The variant carries the
/// layout so writers never have to guess it from dimensionality.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Color(Array3<f32>),
    Gray(Array2<f32>),
}

impl Frame {
    /// Wraps an RGB array, rejecting anything whose last axis is not 3.
    pub fn color(data: Array3<f32>) -> Result<Self, FrameError> {
        let channels = data.shape()[2];
        if channels != 3 {
            return Err(FrameError::ChannelCount(channels));
        }
        Ok(Frame::Color(data))
    }

    pub fn gray(data: Array2<f32>) -> Self {
        Frame::Gray(data)
    }

    /// Builds a color frame from tightly packed 8-bit RGB pixels, scaling
    /// each sample by `1 / 255`.
    pub fn from_rgb8(pixels: &[u8], width: u32, height: u32) -> Result<Self, FrameError> {
        let samples = pixels.iter().map(|&p| f32::from(p) / 255.0).collect();
        let data = Array3::from_shape_vec((height as usize, width as usize, 3), samples)?;
        Ok(Frame::Color(data))
    }

    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Color(_) => FrameKind::Color,
            Frame::Gray(_) => FrameKind::Gray,
        }
    }

    pub fn is_color(&self) -> bool {
        self.kind() == FrameKind::Color
    }

    pub fn width(&self) -> usize {
        match self {
            Frame::Color(data) => data.shape()[1],
            Frame::Gray(data) => data.shape()[1],
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Frame::Color(data) => data.shape()[0],
            Frame::Gray(data) => data.shape()[0],
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            Frame::Color(data) => data.shape()[2],
            Frame::Gray(_) => 1,
        }
    }

    /// Re-checks the channel count of a color frame built directly through
    /// the `Frame::Color` variant rather than [`Frame::color`].
    pub fn validate(&self) -> Result<(), FrameError> {
        match self.kind() {
            FrameKind::Color if self.channels() != 3 => {
                Err(FrameError::ChannelCount(self.channels()))
            }
            _ => Ok(()),
        }
    }

    pub fn as_color(&self) -> Option<ArrayView3<'_, f32>> {
        match self {
            Frame::Color(data) => Some(data.view()),
            Frame::Gray(_) => None,
        }
    }

    pub fn as_gray(&self) -> Option<ArrayView2<'_, f32>> {
        match self {
            Frame::Gray(data) => Some(data.view()),
            Frame::Color(_) => None,
        }
    }

    /// Dimension-erased view; iterating it yields samples in row-major,
    /// channel-interleaved order.
    pub fn samples(&self) -> ArrayViewD<'_, f32> {
        match self {
            Frame::Color(data) => data.view().into_dyn(),
            Frame::Gray(data) => data.view().into_dyn(),
        }
    }

    /// Checks that `other` (found at `index` in a sequence) has this frame's
    /// kind and size.
    pub fn ensure_matches(&self, other: &Frame, index: usize) -> Result<(), FrameError> {
        if self.kind() != other.kind() {
            return Err(FrameError::KindMismatch {
                index,
                expected: self.kind(),
                found: other.kind(),
            });
        }
        if self.width() != other.width() || self.height() != other.height() {
            return Err(FrameError::SizeMismatch {
                index,
                width: self.width(),
                height: self.height(),
                found_width: other.width(),
                found_height: other.height(),
            });
        }
        Ok(())
    }
}
