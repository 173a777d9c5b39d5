use std::path::Path;

use thiserror::Error;

use crate::shared::frame::{Frame, FrameError};

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("sample buffer does not match a {width}x{height} image")]
    BufferSize { width: u32, height: u32 },
    #[error("inconsistent frame sequence: {0}")]
    Frame(#[from] FrameError),
}

/// Sample depth of exported frame images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// 16 bits per channel PNG; samples scaled by 65535.
    #[default]
    Png16,
    /// 8 bits per channel PNG; samples scaled by 255.
    Png8,
}

impl ExportFormat {
    /// Largest integer sample value of this format.
    pub fn max_value(self) -> f32 {
        match self {
            ExportFormat::Png16 => f32::from(u16::MAX),
            ExportFormat::Png8 => f32::from(u8::MAX),
        }
    }
}

/// Writes a single frame to an image file.
pub trait ImageWriter {
    /// Writes a frame to `path`. The parent directory must already exist.
    fn write(&self, path: &Path, frame: &Frame, format: ExportFormat) -> Result<(), WriteError>;
}
