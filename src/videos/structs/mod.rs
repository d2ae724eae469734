pub mod generate_video_response;
