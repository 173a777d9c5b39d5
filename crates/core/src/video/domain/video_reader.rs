use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::frame::{Frame, FrameError};
use crate::video::domain::sampling_plan::SamplingPlan;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("ffmpeg error: {0}")]
    Ffmpeg(#[from] ffmpeg_next::Error),
    #[error("no video stream found in {0}")]
    NoVideoStream(String),
    #[error("reader has not been opened")]
    NotOpened,
    #[error("decoded frame has an invalid shape: {0}")]
    Frame(#[from] FrameError),
}

/// What [`VideoReader::open`] learns about the source before decoding:
/// the native picture size and frame rate that sampling is planned from.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    /// Average frame rate; 0 when the container does not declare one.
    pub fps: f64,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

/// Reads frames from a video source.
///
/// Implementations handle I/O details (codec, container format, etc.)
/// while the pipeline works with the abstract `Frame` and `VideoMetadata`
/// types.
pub trait VideoReader {
    /// Opens a video file and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, ReadError>;

    /// Returns an iterator over frames in decode order, each resized to
    /// `plan.width` x `plan.height` and normalized to `[0, 1]` RGB.
    ///
    /// Sampling (stride and limit) is applied by the caller; `nth` may be
    /// overridden to skip frames without converting them.
    fn frames(
        &mut self,
        plan: &SamplingPlan,
    ) -> Box<dyn Iterator<Item = Result<Frame, ReadError>> + '_>;

    /// Releases any resources held by the reader.
    fn close(&mut self);
}
