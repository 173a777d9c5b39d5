pub mod image_writer;
pub mod sampling_plan;
pub mod video_reader;
