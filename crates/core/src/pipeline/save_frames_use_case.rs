use std::path::{Path, PathBuf};

use crate::shared::constants::FRAME_EXTENSION;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::{ExportFormat, ImageWriter, WriteError};
use crate::video::infrastructure::image_file_writer::ImageFileWriter;

/// Exports a frame sequence as one image file per frame.
pub struct SaveFramesUseCase {
    writer: Box<dyn ImageWriter>,
}

impl SaveFramesUseCase {
    pub fn new(writer: Box<dyn ImageWriter>) -> Self {
        Self { writer }
    }

    /// Writes `frames` into `output_dir` and returns `output_dir`.
    ///
    /// Every frame is validated and checked against the first before any
    /// file is written. `output_dir` must already exist.
    pub fn execute(
        &self,
        frames: &[Frame],
        output_dir: &Path,
        file_name: &str,
        export_type: &str,
        format: ExportFormat,
    ) -> Result<PathBuf, WriteError> {
        if let Some(first) = frames.first() {
            for (index, frame) in frames.iter().enumerate() {
                frame.validate()?;
                first.ensure_matches(frame, index)?;
            }
        }

        for (index, frame) in frames.iter().enumerate() {
            let path = output_dir.join(frame_file_name(file_name, export_type, index));
            self.writer.write(&path, frame, format)?;
            log::debug!("Wrote {}", path.display());
        }

        log::info!(
            "Exported {} {} frames to {}",
            frames.len(),
            export_type,
            output_dir.display()
        );
        Ok(output_dir.to_path_buf())
    }
}

/// `<file_name>_<export_type>_frame_<NNNN>.png`, index zero-padded to 4 digits.
pub fn frame_file_name(file_name: &str, export_type: &str, index: usize) -> String {
    format!("{file_name}_{export_type}_frame_{index:04}.{FRAME_EXTENSION}")
}

/// Writes each frame of `frames` as a PNG into `output_dir` using
/// [`frame_file_name`] and returns `output_dir`.
///
/// Color frames become RGB images and grayscale frames single-channel
/// images, at the bit depth chosen by `format`.
pub fn save_video(
    frames: &[Frame],
    output_dir: impl AsRef<Path>,
    file_name: &str,
    export_type: &str,
    format: ExportFormat,
) -> Result<PathBuf, WriteError> {
    SaveFramesUseCase::new(Box::new(ImageFileWriter::new())).execute(
        frames,
        output_dir.as_ref(),
        file_name,
        export_type,
        format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::FrameError;
    use ndarray::{Array2, Array3};
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubImageWriter {
        written: Arc<Mutex<Vec<(PathBuf, ExportFormat)>>>,
    }

    impl ImageWriter for StubImageWriter {
        fn write(
            &self,
            path: &Path,
            _frame: &Frame,
            format: ExportFormat,
        ) -> Result<(), WriteError> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), format));
            Ok(())
        }
    }

    fn stub_use_case() -> (SaveFramesUseCase, Arc<Mutex<Vec<(PathBuf, ExportFormat)>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let writer = StubImageWriter {
            written: Arc::clone(&written),
        };
        (SaveFramesUseCase::new(Box::new(writer)), written)
    }

    fn gray_frames(n: usize) -> Vec<Frame> {
        (0..n)
            .map(|i| Frame::gray(Array2::from_elem((4, 6), i as f32 / n as f32)))
            .collect()
    }

    // --- Tests ---

    #[test]
    fn test_frame_file_name() {
        assert_eq!(frame_file_name("clip", "depth", 7), "clip_depth_frame_0007.png");
        assert_eq!(frame_file_name("a", "vis", 12345), "a_vis_frame_12345.png");
    }

    #[test]
    fn test_writes_one_file_per_frame_in_order() {
        let (use_case, written) = stub_use_case();
        let out = use_case
            .execute(
                &gray_frames(3),
                Path::new("/out"),
                "clip",
                "depth",
                ExportFormat::Png16,
            )
            .unwrap();
        assert_eq!(out, PathBuf::from("/out"));

        let written = written.lock().unwrap();
        let names: Vec<_> = written.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("/out/clip_depth_frame_0000.png"),
                PathBuf::from("/out/clip_depth_frame_0001.png"),
                PathBuf::from("/out/clip_depth_frame_0002.png"),
            ]
        );
        assert!(written.iter().all(|(_, f)| *f == ExportFormat::Png16));
    }

    #[test]
    fn test_empty_sequence_writes_nothing() {
        let (use_case, written) = stub_use_case();
        let out = use_case
            .execute(&[], Path::new("/out"), "clip", "depth", ExportFormat::Png16)
            .unwrap();
        assert_eq!(out, PathBuf::from("/out"));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_mixed_kinds_rejected_before_writing() {
        let (use_case, written) = stub_use_case();
        let mut frames = gray_frames(2);
        frames.push(Frame::color(Array3::zeros((4, 6, 3))).unwrap());

        let result = use_case.execute(&frames, Path::new("/out"), "clip", "depth", ExportFormat::Png16);
        assert!(matches!(
            result,
            Err(WriteError::Frame(FrameError::KindMismatch { index: 2, .. }))
        ));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_four_channel_color_frame_rejected_before_writing() {
        let (use_case, written) = stub_use_case();
        let frames = vec![
            Frame::color(Array3::zeros((4, 6, 3))).unwrap(),
            Frame::Color(Array3::zeros((4, 6, 4))),
        ];
        let result = use_case.execute(&frames, Path::new("/out"), "clip", "vis", ExportFormat::Png16);
        assert!(matches!(
            result,
            Err(WriteError::Frame(FrameError::ChannelCount(4)))
        ));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_mixed_sizes_rejected() {
        let (use_case, _) = stub_use_case();
        let frames = vec![
            Frame::gray(Array2::zeros((4, 6))),
            Frame::gray(Array2::zeros((6, 4))),
        ];
        let result = use_case.execute(&frames, Path::new("/out"), "clip", "depth", ExportFormat::Png8);
        assert!(matches!(
            result,
            Err(WriteError::Frame(FrameError::SizeMismatch { index: 1, .. }))
        ));
    }

    // --- Real files ---

    #[test]
    fn test_save_video_writes_decodable_16_bit_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let out = save_video(&gray_frames(3), dir.path(), "clip", "depth", ExportFormat::Png16)
            .unwrap();
        assert_eq!(out, dir.path());

        let mut entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        entries.sort();
        assert_eq!(
            entries,
            vec![
                "clip_depth_frame_0000.png",
                "clip_depth_frame_0001.png",
                "clip_depth_frame_0002.png",
            ]
        );

        for name in &entries {
            let img = image::open(dir.path().join(name)).unwrap();
            assert_eq!(img.color(), image::ColorType::L16);
            assert_eq!((img.width(), img.height()), (6, 4));
        }
    }

    #[test]
    fn test_save_video_missing_directory() {
        let result = save_video(
            &gray_frames(1),
            "/nonexistent/output",
            "clip",
            "depth",
            ExportFormat::Png16,
        );
        assert!(matches!(result, Err(WriteError::Io { .. })));
    }
}
