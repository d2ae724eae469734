pub mod video_record;
