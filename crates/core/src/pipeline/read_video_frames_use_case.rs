use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::frame_sequence::FrameSequence;
use crate::video::domain::sampling_plan::{ReadOptions, SamplingPlan};
use crate::video::domain::video_reader::{ReadError, VideoReader};
use crate::video::infrastructure::ffmpeg_reader::FfmpegReader;

/// Video decoding pipeline: open → plan → sample → normalize.
pub struct ReadVideoFramesUseCase {
    reader: Box<dyn VideoReader>,
}

impl ReadVideoFramesUseCase {
    pub fn new(reader: Box<dyn VideoReader>) -> Self {
        Self { reader }
    }

    /// Reads the sampled frames of `path` and returns them together with
    /// the frame rate they represent.
    ///
    /// The reader is closed on every path after a successful open.
    pub fn execute(
        &mut self,
        path: &Path,
        options: &ReadOptions,
    ) -> Result<(FrameSequence, f64), ReadError> {
        let metadata = self.reader.open(path)?;
        let plan = SamplingPlan::new(&metadata, options);
        log::debug!(
            "Sampling {}: {}x{} -> {}x{}, stride {}, limit {:?}",
            path.display(),
            metadata.width,
            metadata.height,
            plan.width,
            plan.height,
            plan.stride,
            plan.max_frames
        );

        let sampled = collect_sampled(self.reader.frames(&plan), &plan);
        self.reader.close();
        let frames = sampled?;

        log::info!(
            "Read {} frames from {} at {}x{} ({:.2} fps)",
            frames.len(),
            path.display(),
            plan.width,
            plan.height,
            plan.fps
        );
        Ok((frames, plan.fps))
    }
}

fn collect_sampled(
    frames: impl Iterator<Item = Result<Frame, ReadError>>,
    plan: &SamplingPlan,
) -> Result<FrameSequence, ReadError> {
    let mut sequence = FrameSequence::new();
    for frame in frames.step_by(plan.stride).take(plan.frame_limit()) {
        sequence.push(frame?)?;
    }
    Ok(sequence)
}

/// Decodes `path` with ffmpeg into normalized RGB frames.
///
/// Frames are resized so both sides are multiples of 64 with the longer
/// side at most `max_res`, sampled every `round(source_fps / target_fps)`
/// decoded frames, and capped at `process_length` sampled frames (0 reads
/// to the end). A negative `target_fps` keeps the source rate, which is
/// then the returned rate.
pub fn read_video_frames(
    path: impl AsRef<Path>,
    process_length: usize,
    target_fps: f64,
    max_res: u32,
) -> Result<(FrameSequence, f64), ReadError> {
    let options = ReadOptions {
        process_length,
        target_fps,
        max_res,
    };
    ReadVideoFramesUseCase::new(Box::new(FfmpegReader::new())).execute(path.as_ref(), &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::domain::video_reader::VideoMetadata;
    use crate::video::infrastructure::ffmpeg_reader::test_support::{
        create_test_video, create_undecodable_video, expected_level,
    };
    use ndarray::Array3;
    use std::cell::Cell;
    use std::rc::Rc;

    // --- Stubs ---

    /// Yields `total` frames whose samples all equal the decode index.
    struct StubVideoReader {
        total: usize,
        fps: f64,
        fail_at: Option<usize>,
        closed: Rc<Cell<bool>>,
    }

    impl StubVideoReader {
        fn new(total: usize, fps: f64) -> Self {
            Self {
                total,
                fps,
                fail_at: None,
                closed: Rc::new(Cell::new(false)),
            }
        }
    }

    impl VideoReader for StubVideoReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, ReadError> {
            Ok(VideoMetadata {
                width: 1920,
                height: 1080,
                fps: self.fps,
                codec: "stub".to_string(),
                source_path: None,
            })
        }

        fn frames(
            &mut self,
            plan: &SamplingPlan,
        ) -> Box<dyn Iterator<Item = Result<Frame, ReadError>> + '_> {
            let (w, h) = (plan.width as usize, plan.height as usize);
            let fail_at = self.fail_at;
            Box::new((0..self.total).map(move |i| {
                if Some(i) == fail_at {
                    return Err(ReadError::NotOpened);
                }
                Ok(Frame::color(Array3::from_elem((h, w, 3), i as f32)).unwrap())
            }))
        }

        fn close(&mut self) {
            self.closed.set(true);
        }
    }

    struct FailingOpenReader;

    impl VideoReader for FailingOpenReader {
        fn open(&mut self, path: &Path) -> Result<VideoMetadata, ReadError> {
            Err(ReadError::NoVideoStream(path.display().to_string()))
        }

        fn frames(
            &mut self,
            _plan: &SamplingPlan,
        ) -> Box<dyn Iterator<Item = Result<Frame, ReadError>> + '_> {
            Box::new(std::iter::empty())
        }

        fn close(&mut self) {}
    }

    fn decode_indices(frames: &FrameSequence) -> Vec<usize> {
        frames
            .iter()
            .map(|f| f.as_color().unwrap()[[0, 0, 0]] as usize)
            .collect()
    }

    fn options(process_length: usize, target_fps: f64) -> ReadOptions {
        ReadOptions {
            process_length,
            target_fps,
            max_res: 1024,
        }
    }

    // --- Tests ---

    #[test]
    fn test_half_rate_keeps_every_other_frame() {
        let mut use_case = ReadVideoFramesUseCase::new(Box::new(StubVideoReader::new(10, 30.0)));
        let (frames, fps) = use_case.execute(Path::new("in.mp4"), &options(0, 15.0)).unwrap();
        assert_eq!(decode_indices(&frames), vec![0, 2, 4, 6, 8]);
        assert_eq!(fps, 15.0);
    }

    #[test]
    fn test_process_length_truncates() {
        let mut use_case = ReadVideoFramesUseCase::new(Box::new(StubVideoReader::new(100, 30.0)));
        let (frames, _) = use_case.execute(Path::new("in.mp4"), &options(5, 30.0)).unwrap();
        assert_eq!(decode_indices(&frames), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_process_length_counts_sampled_frames() {
        let mut use_case = ReadVideoFramesUseCase::new(Box::new(StubVideoReader::new(100, 30.0)));
        let (frames, _) = use_case.execute(Path::new("in.mp4"), &options(3, 10.0)).unwrap();
        assert_eq!(decode_indices(&frames), vec![0, 3, 6]);
    }

    #[test]
    fn test_negative_target_fps_keeps_source_rate() {
        let mut use_case = ReadVideoFramesUseCase::new(Box::new(StubVideoReader::new(4, 24.0)));
        let (frames, fps) = use_case.execute(Path::new("in.mp4"), &options(0, -1.0)).unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(fps, 24.0);
    }

    #[test]
    fn test_frames_use_planned_dimensions() {
        let mut use_case = ReadVideoFramesUseCase::new(Box::new(StubVideoReader::new(2, 30.0)));
        let (frames, _) = use_case.execute(Path::new("in.mp4"), &options(0, -1.0)).unwrap();
        for frame in &frames {
            assert_eq!((frame.width(), frame.height()), (1024, 576));
        }
    }

    #[test]
    fn test_reader_closed_after_success() {
        let reader = StubVideoReader::new(3, 30.0);
        let closed = Rc::clone(&reader.closed);
        let mut use_case = ReadVideoFramesUseCase::new(Box::new(reader));
        use_case.execute(Path::new("in.mp4"), &options(0, -1.0)).unwrap();
        assert!(closed.get());
    }

    #[test]
    fn test_decode_error_propagates_and_closes() {
        let mut reader = StubVideoReader::new(10, 30.0);
        reader.fail_at = Some(2);
        let closed = Rc::clone(&reader.closed);
        let mut use_case = ReadVideoFramesUseCase::new(Box::new(reader));
        let result = use_case.execute(Path::new("in.mp4"), &options(0, -1.0));
        assert!(matches!(result, Err(ReadError::NotOpened)));
        assert!(closed.get());
    }

    #[test]
    fn test_error_in_skipped_frame_is_not_surfaced() {
        let mut reader = StubVideoReader::new(10, 30.0);
        reader.fail_at = Some(1);
        let mut use_case = ReadVideoFramesUseCase::new(Box::new(reader));
        let (frames, _) = use_case.execute(Path::new("in.mp4"), &options(0, 15.0)).unwrap();
        assert_eq!(frames.len(), 5);
    }

    #[test]
    fn test_open_error_propagates() {
        let mut use_case = ReadVideoFramesUseCase::new(Box::new(FailingOpenReader));
        let result = use_case.execute(Path::new("missing.mp4"), &ReadOptions::default());
        assert!(matches!(result, Err(ReadError::NoVideoStream(_))));
    }

    // --- ffmpeg end to end ---

    #[test]
    fn test_read_video_frames_samples_real_video() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        create_test_video(&path, 10, 160, 120, 30);

        let (frames, fps) = read_video_frames(&path, 0, 15.0, 1024).unwrap();
        assert_eq!(fps, 15.0);
        assert_eq!(frames.len(), 5);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!((frame.width(), frame.height()), (128, 128));
            let samples = frame.samples();
            assert!(samples.iter().all(|&v| (0.0..=1.0).contains(&v)));
            let mean = samples.sum() / samples.len() as f32;
            assert!((mean - expected_level(i * 2)).abs() < 0.06, "frame {i}");
        }
    }

    #[test]
    fn test_read_video_frames_respects_max_res() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        create_test_video(&path, 3, 320, 240, 30);

        let (frames, fps) = read_video_frames(&path, 2, -1.0, 128).unwrap();
        assert!(fps > 0.0);
        assert_eq!(frames.len(), 2);
        let frame = &frames.as_slice()[0];
        assert_eq!(frame.width() % 64, 0);
        assert_eq!(frame.height() % 64, 0);
        assert!(frame.width().max(frame.height()) <= 128);
    }

    #[test]
    fn test_read_video_frames_fails_on_undecodable_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.avi");
        create_undecodable_video(&path, 5, 64, 64);

        let result = read_video_frames(&path, 0, -1.0, 1024);
        assert!(matches!(result, Err(ReadError::Ffmpeg(_))));
    }

    #[test]
    fn test_read_video_frames_missing_file() {
        assert!(read_video_frames("/nonexistent/clip.mp4", 0, -1.0, 1024).is_err());
    }
}
