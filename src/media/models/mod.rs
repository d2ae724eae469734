pub mod file_properties;
pub mod video_artifacts;
