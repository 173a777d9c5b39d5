use ndarray::{Array3, Array4, ArrayView2, ArrayView3, Axis};

use crate::shared::frame::{Frame, FrameError, FrameKind};

/// Frames in temporal order, all of the same kind and size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Builds a sequence from frames, validating each against the first.
    pub fn from_frames(frames: Vec<Frame>) -> Result<Self, FrameError> {
        let mut sequence = Self::new();
        for frame in frames {
            sequence.push(frame)?;
        }
        Ok(sequence)
    }

    /// Splits an `(n, height, width, 3)` array into color frames.
    pub fn from_color_array(data: Array4<f32>) -> Result<Self, FrameError> {
        let channels = data.shape()[3];
        if channels != 3 {
            return Err(FrameError::ChannelCount(channels));
        }
        let frames = data
            .axis_iter(Axis(0))
            .map(|frame| Frame::Color(frame.to_owned()))
            .collect();
        Ok(Self { frames })
    }

    /// Splits an `(n, height, width)` array into grayscale frames.
    pub fn from_gray_array(data: Array3<f32>) -> Self {
        let frames = data
            .axis_iter(Axis(0))
            .map(|frame| Frame::Gray(frame.to_owned()))
            .collect();
        Self { frames }
    }

    pub fn push(&mut self, frame: Frame) -> Result<(), FrameError> {
        frame.validate()?;
        if let Some(first) = self.frames.first() {
            first.ensure_matches(&frame, self.frames.len())?;
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn kind(&self) -> Option<FrameKind> {
        self.frames.first().map(Frame::kind)
    }

    pub fn as_slice(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Stacks color frames into one `(n, height, width, 3)` array.
    pub fn to_color_array(&self) -> Result<Array4<f32>, FrameError> {
        let views = self
            .frames
            .iter()
            .enumerate()
            .map(|(index, frame)| {
                frame.as_color().ok_or(FrameError::KindMismatch {
                    index,
                    expected: FrameKind::Color,
                    found: frame.kind(),
                })
            })
            .collect::<Result<Vec<ArrayView3<'_, f32>>, _>>()?;
        Ok(ndarray::stack(Axis(0), &views)?)
    }

    /// Stacks grayscale frames into one `(n, height, width)` array.
    pub fn to_gray_array(&self) -> Result<Array3<f32>, FrameError> {
        let views = self
            .frames
            .iter()
            .enumerate()
            .map(|(index, frame)| {
                frame.as_gray().ok_or(FrameError::KindMismatch {
                    index,
                    expected: FrameKind::Gray,
                    found: frame.kind(),
                })
            })
            .collect::<Result<Vec<ArrayView2<'_, f32>>, _>>()?;
        Ok(ndarray::stack(Axis(0), &views)?)
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl IntoIterator for FrameSequence {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}
