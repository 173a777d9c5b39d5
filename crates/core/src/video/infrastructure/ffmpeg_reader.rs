use std::path::Path;

use ffmpeg_next::software::scaling;
use ffmpeg_next::util::error::EAGAIN;
use ffmpeg_next::util::frame::video::Video;

use crate::shared::frame::Frame;
use crate::video::domain::sampling_plan::SamplingPlan;
use crate::video::domain::video_reader::{ReadError, VideoMetadata, VideoReader};

/// Decodes video frames via ffmpeg-next (libavformat + libavcodec).
///
/// Each decoded picture is bilinearly rescaled to the plan's size and
/// converted to RGB24 in a single swscale pass, then normalized into a
/// [`Frame`].
pub struct FfmpegReader {
    input_ctx: Option<ffmpeg_next::format::context::Input>,
    video_stream_index: usize,
}

impl FfmpegReader {
    pub fn new() -> Self {
        Self {
            input_ctx: None,
            video_stream_index: 0,
        }
    }
}

impl Default for FfmpegReader {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoReader for FfmpegReader {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, ReadError> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(path)?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| ReadError::NoVideoStream(path.display().to_string()))?;

        let video_stream_index = stream.index();
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;

        let rate = stream.rate();
        let fps = if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            0.0
        };

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            fps,
            codec: decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            source_path: Some(path.to_path_buf()),
        };
        log::debug!(
            "Opened {}: {}x{} @ {:.3} fps ({})",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.fps,
            metadata.codec
        );

        self.video_stream_index = video_stream_index;
        self.input_ctx = Some(ictx);

        Ok(metadata)
    }

    fn frames(
        &mut self,
        plan: &SamplingPlan,
    ) -> Box<dyn Iterator<Item = Result<Frame, ReadError>> + '_> {
        let video_stream_index = self.video_stream_index;
        let Some(ictx) = self.input_ctx.as_mut() else {
            return Box::new(std::iter::once(Err(ReadError::NotOpened)));
        };

        let decoder = match open_decoder(ictx, video_stream_index) {
            Ok(decoder) => decoder,
            Err(e) => return Box::new(std::iter::once(Err(e))),
        };

        Box::new(FfmpegFrameIter {
            ictx,
            decoder,
            scaler: None,
            width: plan.width,
            height: plan.height,
            video_stream_index,
            flushing: false,
            done: false,
        })
    }

    fn close(&mut self) {
        self.input_ctx = None;
    }
}

fn open_decoder(
    ictx: &ffmpeg_next::format::context::Input,
    video_stream_index: usize,
) -> Result<ffmpeg_next::decoder::Video, ReadError> {
    let stream = ictx
        .stream(video_stream_index)
        .ok_or(ReadError::NotOpened)?;
    let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
    Ok(codec_ctx.decoder().video()?)
}

/// Lazy iterator that decodes one picture per `next`, so only the frames
/// the caller keeps are held in memory.
///
/// A decoder failure is yielded once as an error and ends the iteration.
struct FfmpegFrameIter<'a> {
    ictx: &'a mut ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    /// Built from the first decoded picture, whose format and size are
    /// authoritative over the container's declared parameters.
    scaler: Option<scaling::Context>,
    width: u32,
    height: u32,
    video_stream_index: usize,
    flushing: bool,
    done: bool,
}

impl FfmpegFrameIter<'_> {
    /// Returns the next decoded picture in its native format and size,
    /// feeding packets (and finally EOF) to the decoder as needed.
    fn next_decoded(&mut self) -> Option<Result<Video, ReadError>> {
        if self.done {
            return None;
        }

        loop {
            let mut decoded = Video::empty();
            match self.decoder.receive_frame(&mut decoded) {
                Ok(()) => return Some(Ok(decoded)),
                Err(ffmpeg_next::Error::Eof) => {
                    self.done = true;
                    return None;
                }
                Err(ffmpeg_next::Error::Other { errno: EAGAIN }) => {}
                Err(e) => return Some(Err(self.fail(e))),
            }

            if self.flushing {
                self.done = true;
                return None;
            }

            match self.ictx.packets().next() {
                Some((stream, packet)) => {
                    if stream.index() != self.video_stream_index {
                        continue;
                    }
                    if let Err(e) = self.decoder.send_packet(&packet) {
                        return Some(Err(self.fail(e)));
                    }
                }
                None => {
                    if let Err(e) = self.decoder.send_eof() {
                        return Some(Err(self.fail(e)));
                    }
                    self.flushing = true;
                }
            }
        }
    }

    fn fail(&mut self, error: ffmpeg_next::Error) -> ReadError {
        log::warn!("Decoding stopped: {error}");
        self.done = true;
        ReadError::Ffmpeg(error)
    }

    fn convert(&mut self, decoded: &Video) -> Result<Frame, ReadError> {
        let scaler = match &mut self.scaler {
            Some(scaler) => scaler,
            empty => empty.insert(scaling::Context::get(
                decoded.format(),
                decoded.width(),
                decoded.height(),
                ffmpeg_next::format::Pixel::RGB24,
                self.width,
                self.height,
                scaling::Flags::BILINEAR,
            )?),
        };
        let mut rgb_frame = Video::empty();
        scaler.run(decoded, &mut rgb_frame)?;
        let pixels = extract_rgb_pixels(&rgb_frame, self.width, self.height);
        Ok(Frame::from_rgb8(&pixels, self.width, self.height)?)
    }
}

impl Iterator for FfmpegFrameIter<'_> {
    type Item = Result<Frame, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_decoded()? {
            Ok(decoded) => Some(self.convert(&decoded)),
            Err(e) => Some(Err(e)),
        }
    }

    /// Skipped pictures are decoded (the codec needs them as references)
    /// but never scaled or normalized. A decoder failure while skipping is
    /// still returned.
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        for _ in 0..n {
            if let Err(e) = self.next_decoded()? {
                return Some(Err(e));
            }
        }
        self.next()
    }
}

/// Copies pixel data from an ffmpeg frame into a contiguous RGB buffer.
///
/// ffmpeg frames may have padding bytes at the end of each row (stride > width*3).
/// This function strips that padding to produce a tightly-packed pixel buffer.
fn extract_rgb_pixels(rgb_frame: &Video, width: u32, height: u32) -> Vec<u8> {
    let stride = rgb_frame.stride(0);
    let data = rgb_frame.data(0);
    let w = width as usize;
    let h = height as usize;

    let mut pixels = Vec::with_capacity(w * h * 3);
    for row in 0..h {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + w * 3]);
    }
    pixels
}
