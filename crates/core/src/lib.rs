//! Frame I/O and depth colormapping for depth-estimation video pipelines.
//!
//! - [`read_video_frames`] decodes a video into normalized RGB frames at a
//!   64-aligned resolution and a target frame rate.
//! - [`save_video`] exports a frame sequence as 16-bit PNG images.
//! - [`ColorMapper`] and [`vis_sequence_depth`] turn depth maps into RGB.

pub mod colormap;
pub mod pipeline;
pub mod shared;
pub mod video;

pub use colormap::{ColorMapper, ColormapError, ColormapTable, NormalizationRange};
pub use pipeline::read_video_frames_use_case::{read_video_frames, ReadVideoFramesUseCase};
pub use pipeline::save_frames_use_case::{frame_file_name, save_video, SaveFramesUseCase};
pub use pipeline::visualize_depth::{vis_sequence_depth, visualize_depth_frames, VisualizeError};
pub use shared::constants::VIDEO_FOURCC;
pub use shared::frame::{Frame, FrameError, FrameKind};
pub use shared::frame_sequence::FrameSequence;
pub use video::domain::image_writer::{ExportFormat, WriteError};
pub use video::domain::sampling_plan::ReadOptions;
pub use video::domain::video_reader::ReadError;
