use crate::shared::constants::{DEFAULT_MAX_RES, DIMENSION_MULTIPLE};
use crate::video::domain::video_reader::VideoMetadata;

/// Caller-facing knobs for reading a video.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadOptions {
    /// Maximum number of sampled frames to return; 0 reads to the end.
    pub process_length: usize,
    /// Desired output frame rate; negative keeps the source rate.
    pub target_fps: f64,
    /// Upper bound on the longer output side, in pixels.
    pub max_res: u32,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            process_length: 0,
            target_fps: -1.0,
            max_res: DEFAULT_MAX_RES,
        }
    }
}

/// Concrete decode plan derived from a video's metadata and [`ReadOptions`].
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingPlan {
    pub width: u32,
    pub height: u32,
    /// Keep every `stride`-th decoded frame, starting with the first.
    pub stride: usize,
    pub max_frames: Option<usize>,
    /// Rate the sampled sequence is meant to be played back at.
    pub fps: f64,
}

impl SamplingPlan {
    pub fn new(metadata: &VideoMetadata, options: &ReadOptions) -> Self {
        let (width, height) = target_dimensions(metadata.width, metadata.height, options.max_res);
        let fps = effective_fps(metadata.fps, options.target_fps);
        Self {
            width,
            height,
            stride: frame_stride(metadata.fps, fps),
            max_frames: (options.process_length > 0).then_some(options.process_length),
            fps,
        }
    }

    /// Number of sampled frames the caller will accept.
    pub fn frame_limit(&self) -> usize {
        self.max_frames.unwrap_or(usize::MAX)
    }
}

/// Output size for a `width`x`height` source: both sides rounded to a
/// multiple of [`DIMENSION_MULTIPLE`], the longer side at most `max_res`.
///
/// Rounding is to the nearest multiple with ties to even, so a 160-px side
/// becomes 128. Downscaling keeps the source aspect ratio. When nearest
/// rounding of the scaled size still overshoots `max_res` the sides are
/// rounded down. Sides never drop below one multiple.
pub fn target_dimensions(width: u32, height: u32, max_res: u32) -> (u32, u32) {
    let rounded_w = round_to_multiple(f64::from(width));
    let rounded_h = round_to_multiple(f64::from(height));
    if rounded_w.max(rounded_h) <= max_res {
        return (rounded_w, rounded_h);
    }

    let scale = f64::from(max_res) / f64::from(width.max(height));
    let scaled_w = f64::from(width) * scale;
    let scaled_h = f64::from(height) * scale;
    let (w, h) = (round_to_multiple(scaled_w), round_to_multiple(scaled_h));
    if w.max(h) <= max_res {
        (w, h)
    } else {
        (floor_to_multiple(scaled_w), floor_to_multiple(scaled_h))
    }
}

/// Frame rate the output is sampled at. Non-positive or non-finite targets
/// fall back to the source rate.
pub fn effective_fps(source_fps: f64, target_fps: f64) -> f64 {
    if target_fps.is_finite() && target_fps > 0.0 {
        target_fps
    } else {
        source_fps
    }
}

/// `max(round(source / target), 1)` with ties to even, so 25 -> 10 fps
/// keeps every 2nd frame; 1 when either rate is unknown.
pub fn frame_stride(source_fps: f64, target_fps: f64) -> usize {
    if !(source_fps > 0.0 && target_fps > 0.0) {
        return 1;
    }
    let ratio = (source_fps / target_fps).round_ties_even();
    if ratio.is_finite() && ratio >= 1.0 {
        ratio as usize
    } else {
        1
    }
}

fn round_to_multiple(value: f64) -> u32 {
    let multiple = f64::from(DIMENSION_MULTIPLE);
    let units = (value / multiple).round_ties_even().max(1.0);
    units as u32 * DIMENSION_MULTIPLE
}

fn floor_to_multiple(value: f64) -> u32 {
    let multiple = f64::from(DIMENSION_MULTIPLE);
    let units = (value / multiple).floor().max(1.0);
    units as u32 * DIMENSION_MULTIPLE
}
