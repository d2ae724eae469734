use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateVideoResponse {
    pub video_url: String,
    pub thumbnail: String,
    pub prompt: String,
    pub user_id: String,
}
