pub mod read_video_frames_use_case;
pub mod save_frames_use_case;
pub mod visualize_depth;
