use std::path::Path;

use image::{ImageBuffer, ImageError, ImageFormat, Luma, Pixel, Rgb};

use crate::shared::frame::Frame;
use crate::video::domain::image_writer::{ExportFormat, ImageWriter, WriteError};

/// Writes a normalized frame to a PNG file using the `image` crate.
///
/// Samples are scaled to the format's integer range, rounded, and clamped;
/// NaN samples become 0. PNG stores channels in RGB order, so color frames
/// are written as-is.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame, format: ExportFormat) -> Result<(), WriteError> {
        frame.validate()?;
        let width = frame.width() as u32;
        let height = frame.height() as u32;
        let max = format.max_value();
        let samples = frame.samples();
        let quantized = samples.iter().map(|&v| quantize(v, max));

        match (frame, format) {
            (Frame::Color(_), ExportFormat::Png16) => {
                save::<Rgb<u16>>(path, width, height, quantized.map(|v| v as u16).collect())
            }
            (Frame::Gray(_), ExportFormat::Png16) => {
                save::<Luma<u16>>(path, width, height, quantized.map(|v| v as u16).collect())
            }
            (Frame::Color(_), ExportFormat::Png8) => {
                save::<Rgb<u8>>(path, width, height, quantized.map(|v| v as u8).collect())
            }
            (Frame::Gray(_), ExportFormat::Png8) => {
                save::<Luma<u8>>(path, width, height, quantized.map(|v| v as u8).collect())
            }
        }
    }
}

fn quantize(value: f32, max: f32) -> f32 {
    (value * max).round().clamp(0.0, max)
}

fn save<P>(
    path: &Path,
    width: u32,
    height: u32,
    samples: Vec<P::Subpixel>,
) -> Result<(), WriteError>
where
    P: Pixel + image::PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
{
    let img = ImageBuffer::<P, Vec<P::Subpixel>>::from_raw(width, height, samples)
        .ok_or(WriteError::BufferSize { width, height })?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(source) => WriteError::Io {
                path: path.display().to_string(),
                source,
            },
            source => WriteError::Encode {
                path: path.display().to_string(),
                source,
            },
        })
}
